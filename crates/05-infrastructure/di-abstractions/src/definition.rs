//! Bean 定义
//!
//! 从扫描得到的候选类型构建，创建后不可变

use crate::arguments::{ErasedBean, SharedBean};
use crate::class::{BeanClass, ConstructorDefinition, Stereotype, TypeBinding};
use infrastructure_common::{BeanError, BeanResult, TypeInfo};
use std::any::TypeId;
use std::collections::HashSet;
use tracing::debug;

/// Bean 定义
///
/// 记录目标类型、选定的构造函数及其有序参数类型，并保留候选类型声明的可赋值类型与标记。
#[derive(Debug, Clone)]
pub struct BeanDefinition {
    type_info: TypeInfo,
    constructor: ConstructorDefinition,
    bindings: Vec<TypeBinding>,
    stereotypes: HashSet<Stereotype>,
}

impl BeanDefinition {
    /// 从候选类型构建定义
    ///
    /// 构造函数选择规则：唯一的注入构造函数优先，否则使用唯一的构造函数。
    pub fn from_class(class: &BeanClass) -> BeanResult<Self> {
        let constructor = select_constructor(class)?;
        debug!(
            "构建 Bean 定义: {}，参数: {:?}",
            class.type_info(),
            constructor
                .parameter_types()
                .iter()
                .map(|ty| ty.name)
                .collect::<Vec<_>>()
        );

        Ok(Self {
            type_info: class.type_info(),
            constructor,
            bindings: class.bindings().to_vec(),
            stereotypes: class.stereotypes().clone(),
        })
    }

    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    pub fn constructor(&self) -> &ConstructorDefinition {
        &self.constructor
    }

    pub fn parameter_types(&self) -> &[TypeInfo] {
        self.constructor.parameter_types()
    }

    pub fn stereotypes(&self) -> &HashSet<Stereotype> {
        &self.stereotypes
    }

    pub fn has_stereotype(&self, stereotype: Stereotype) -> bool {
        self.stereotypes.contains(&stereotype)
    }

    pub fn is_controller(&self) -> bool {
        self.has_stereotype(Stereotype::Controller)
    }

    /// 此类型的实例能否赋值给指定类型
    pub fn is_assignable_to(&self, type_id: TypeId) -> bool {
        self.bindings
            .iter()
            .any(|binding| binding.type_info().id == type_id)
    }

    /// 所有可赋值类型
    pub fn assignable_types(&self) -> impl Iterator<Item = TypeInfo> + '_ {
        self.bindings.iter().map(TypeBinding::type_info)
    }

    /// 把实例转换为目标类型的视图
    pub fn cast(&self, instance: SharedBean, target: &TypeInfo) -> BeanResult<ErasedBean> {
        self.bindings
            .iter()
            .find(|binding| binding.type_info().id == target.id)
            .and_then(|binding| binding.cast(instance))
            .ok_or_else(|| BeanError::TypeMismatch {
                expected: target.name.to_string(),
            })
    }
}

fn select_constructor(class: &BeanClass) -> BeanResult<ConstructorDefinition> {
    let type_name = class.type_info().name.to_string();
    let constructors = class.constructors();

    let injectables: Vec<&ConstructorDefinition> = constructors
        .iter()
        .filter(|constructor| constructor.is_injectable())
        .collect();

    match (injectables.as_slice(), constructors) {
        ([injectable], _) => Ok((*injectable).clone()),
        ([], [only]) => Ok(only.clone()),
        ([], []) => Err(BeanError::NoUsableConstructor {
            type_name,
            message: "没有声明构造函数".to_string(),
        }),
        ([], _) => Err(BeanError::NoUsableConstructor {
            type_name,
            message: format!("存在 {} 个构造函数但没有注入构造函数", constructors.len()),
        }),
        (_, _) => Err(BeanError::NoUsableConstructor {
            type_name,
            message: format!("存在 {} 个注入构造函数", injectables.len()),
        }),
    }
}
