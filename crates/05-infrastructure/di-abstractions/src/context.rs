//! 应用上下文抽象接口

use crate::arguments::{ResolvedBean, SharedBean};
use infrastructure_common::{BeanResult, TypeInfo};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// 应用上下文 trait
///
/// 面向框架其余部分的能力集合：Bean 查找、Bean 类型枚举与控制器枚举。
pub trait ApplicationContext: Send + Sync {
    /// 获取可赋值给指定类型的单例
    fn get_bean_by_type(&self, bean_type: &TypeInfo) -> BeanResult<ResolvedBean>;

    /// 所有已注册的具体类型
    fn get_bean_classes(&self) -> HashSet<TypeInfo>;

    /// 控制器单例
    fn get_controllers(&self) -> HashMap<TypeInfo, SharedBean>;

    /// 获取可赋值给 `T` 的单例
    fn get_bean<T>(&self) -> BeanResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
        Self: Sized,
    {
        self.get_bean_by_type(&TypeInfo::of::<T>())?.downcast::<T>()
    }
}
