//! 组件扫描器抽象接口
//!
//! 提供在指定包下发现候选 Bean 类型的能力

use crate::class::BeanClass;
use infrastructure_common::BeanResult;

/// 组件扫描器 trait
///
/// 容器把扫描结果视为不透明输入，只要求每个候选类型的 [`TypeId`](std::any::TypeId) 互不相同。
pub trait BeanScanner: Send + Sync {
    /// 扫描指定根包（模块路径前缀）下的候选类型
    fn scan(&self, base_packages: &[String]) -> BeanResult<Vec<BeanClass>>;

    /// 获取扫描器名称
    fn name(&self) -> &str;
}
