//! 单例缓存

use di_abstractions::SharedBean;
use infrastructure_common::TypeInfo;
use std::any::TypeId;
use std::collections::HashMap;

/// 单例缓存，按具体类型保存已完成构造的实例
///
/// 每个具体类型最多一个实例。
#[derive(Default)]
pub struct SingletonStore {
    singletons: HashMap<TypeId, (TypeInfo, SharedBean)>,
}

impl SingletonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, type_id: TypeId) -> Option<SharedBean> {
        self.singletons
            .get(&type_id)
            .map(|(_, instance)| instance.clone())
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.singletons.contains_key(&type_id)
    }

    /// 保存实例并返回缓存中的实例
    ///
    /// 类型已有实例时保留原实例，新实例被丢弃。
    pub fn insert(&mut self, type_info: TypeInfo, instance: SharedBean) -> SharedBean {
        self.singletons
            .entry(type_info.id)
            .or_insert((type_info, instance))
            .1
            .clone()
    }

    pub fn entries(&self) -> impl Iterator<Item = (TypeInfo, &SharedBean)> + '_ {
        self.singletons
            .values()
            .map(|(type_info, instance)| (*type_info, instance))
    }

    pub fn len(&self) -> usize {
        self.singletons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.singletons.is_empty()
    }

    pub fn clear(&mut self) {
        self.singletons.clear();
    }
}

impl std::fmt::Debug for SingletonStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonStore")
            .field(
                "singletons",
                &self.singletons.values().map(|(ty, _)| ty.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
