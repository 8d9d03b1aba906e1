//! 应用上下文实现

use crate::factory::DefaultListableBeanFactory;
use di_abstractions::{ApplicationContext, BeanFactory, ResolvedBean, SharedBean};
use infrastructure_common::{BeanResult, TypeInfo};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// 通用应用上下文
///
/// 持有一个 Bean 工厂并把所有查询委托给它，本身不保存任何状态。
pub struct GenericApplicationContext<F: ?Sized + BeanFactory = DefaultListableBeanFactory> {
    bean_factory: Arc<F>,
}

impl<F: ?Sized + BeanFactory> GenericApplicationContext<F> {
    /// 用已有的 Bean 工厂创建上下文
    pub fn new(bean_factory: Arc<F>) -> Self {
        Self { bean_factory }
    }

    /// 底层 Bean 工厂
    pub fn bean_factory(&self) -> &Arc<F> {
        &self.bean_factory
    }
}

impl<F: ?Sized + BeanFactory> Clone for GenericApplicationContext<F> {
    fn clone(&self) -> Self {
        Self {
            bean_factory: Arc::clone(&self.bean_factory),
        }
    }
}

impl<F: ?Sized + BeanFactory> ApplicationContext for GenericApplicationContext<F> {
    fn get_bean_by_type(&self, bean_type: &TypeInfo) -> BeanResult<ResolvedBean> {
        self.bean_factory.get_bean_by_type(bean_type)
    }

    fn get_bean_classes(&self) -> HashSet<TypeInfo> {
        self.bean_factory.get_bean_classes()
    }

    fn get_controllers(&self) -> HashMap<TypeInfo, SharedBean> {
        self.bean_factory.get_controllers()
    }
}

impl<F: ?Sized + BeanFactory> std::fmt::Debug for GenericApplicationContext<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericApplicationContext")
            .field("bean_classes", &self.bean_factory.get_bean_classes().len())
            .finish_non_exhaustive()
    }
}
