//! Bean 工厂抽象接口

use crate::arguments::{ResolvedBean, SharedBean};
use crate::class::Stereotype;
use infrastructure_common::{BeanResult, TypeInfo};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Bean 工厂 trait
///
/// 负责具体类型解析、按依赖顺序实例化以及单例缓存
pub trait BeanFactory: Send + Sync {
    /// 获取可赋值给指定类型的单例，不存在时先构造
    fn get_bean_by_type(&self, bean_type: &TypeInfo) -> BeanResult<ResolvedBean>;

    /// 按类型名称（完整路径或简短名称）获取单例
    fn get_bean_by_name(&self, name: &str) -> BeanResult<SharedBean>;

    /// 所有已注册的具体类型
    fn get_bean_classes(&self) -> HashSet<TypeInfo>;

    /// 具体类型带有指定标记的单例
    fn get_beans_with_stereotype(&self, stereotype: Stereotype) -> HashMap<TypeInfo, SharedBean>;

    /// 控制器单例
    fn get_controllers(&self) -> HashMap<TypeInfo, SharedBean> {
        self.get_beans_with_stereotype(Stereotype::Controller)
    }

    /// 是否存在可赋值给指定类型的 Bean 定义
    fn contains_bean_definition(&self, bean_type: &TypeInfo) -> bool;

    /// 是否存在可赋值给 `T` 的 Bean 定义
    fn contains_bean<T>(&self) -> bool
    where
        T: ?Sized + 'static,
        Self: Sized,
    {
        self.contains_bean_definition(&TypeInfo::of::<T>())
    }

    /// 扫描、注册并预先实例化所有 Bean
    fn initialize(&self) -> BeanResult<()>;

    /// 丢弃所有定义与单例
    fn clear(&self);

    /// 获取可赋值给 `T` 的单例
    fn get_bean<T>(&self) -> BeanResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
        Self: Sized,
    {
        self.get_bean_by_type(&TypeInfo::of::<T>())?.downcast::<T>()
    }
}
