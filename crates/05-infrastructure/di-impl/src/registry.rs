//! Bean 定义注册表
//!
//! 保存具体类型到 Bean 定义的映射，并负责具体类型解析：
//! 请求类型（具体类型或 trait object）必须恰好对应一个可赋值的已注册类型。

use di_abstractions::{BeanClass, BeanDefinition};
use infrastructure_common::{BeanError, BeanResult, TypeInfo};
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Bean 定义注册表
#[derive(Debug, Default)]
pub struct BeanDefinitionRegistry {
    definitions: HashMap<TypeId, BeanDefinition>,
}

impl BeanDefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为每个候选类型构建定义并注册
    ///
    /// 全部构建成功后才写入注册表；已注册的类型保持原定义。返回新注册的数量。
    pub fn register_classes(&mut self, classes: &[BeanClass]) -> BeanResult<usize> {
        let mut pending: Vec<BeanDefinition> = Vec::with_capacity(classes.len());
        let mut seen = HashSet::new();

        for class in classes {
            let type_id = class.type_info().id;
            if self.definitions.contains_key(&type_id) || !seen.insert(type_id) {
                debug!("跳过已注册的类型: {}", class.type_info());
                continue;
            }
            pending.push(BeanDefinition::from_class(class)?);
        }

        let registered = pending.len();
        for definition in pending {
            self.register(definition);
        }
        Ok(registered)
    }

    /// 注册单个定义，类型已存在时返回 `false`
    pub fn register(&mut self, definition: BeanDefinition) -> bool {
        let type_info = definition.type_info();
        if self.definitions.contains_key(&type_info.id) {
            warn!("Bean 定义已存在，忽略重复注册: {}", type_info);
            return false;
        }

        debug!("注册 Bean 定义: {}", type_info);
        self.definitions.insert(type_info.id, definition);
        true
    }

    pub fn get(&self, type_id: TypeId) -> Option<&BeanDefinition> {
        self.definitions.get(&type_id)
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.definitions.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// 所有已注册的具体类型
    pub fn bean_classes(&self) -> HashSet<TypeInfo> {
        self.definitions
            .values()
            .map(BeanDefinition::type_info)
            .collect()
    }

    /// 按类型名称排序的定义列表
    pub fn sorted_definitions(&self) -> Vec<BeanDefinition> {
        let mut definitions: Vec<BeanDefinition> = self.definitions.values().cloned().collect();
        definitions.sort_by_key(BeanDefinition::type_info);
        definitions
    }

    /// 解析可赋值给请求类型的唯一具体类型
    pub fn find_concrete(&self, requested: &TypeInfo) -> BeanResult<&BeanDefinition> {
        let candidates: Vec<&BeanDefinition> = self
            .definitions
            .values()
            .filter(|definition| definition.is_assignable_to(requested.id))
            .collect();

        single_candidate(requested.name, candidates)
    }

    /// 按名称解析唯一具体类型，名称可以是任一可赋值类型的完整路径或简短名称
    pub fn find_concrete_by_name(&self, name: &str) -> BeanResult<&BeanDefinition> {
        let candidates: Vec<&BeanDefinition> = self
            .definitions
            .values()
            .filter(|definition| {
                definition
                    .assignable_types()
                    .any(|type_info| type_info.matches_name(name))
            })
            .collect();

        single_candidate(name, candidates)
    }

    pub fn clear(&mut self) {
        self.definitions.clear();
    }
}

fn single_candidate<'a>(
    type_name: &str,
    mut candidates: Vec<&'a BeanDefinition>,
) -> BeanResult<&'a BeanDefinition> {
    match candidates.len() {
        0 => Err(BeanError::NoConcreteClass {
            type_name: type_name.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => {
            let mut names: Vec<String> = candidates
                .iter()
                .map(|definition| definition.type_info().name.to_string())
                .collect();
            names.sort();
            Err(BeanError::AmbiguousConcreteClass {
                type_name: type_name.to_string(),
                candidates: names,
            })
        }
    }
}
