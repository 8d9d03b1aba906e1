//! 默认 Bean 工厂
//!
//! 扫描候选类型、构建定义注册表，并按依赖顺序惰性或预先构造单例。
//!
//! 构造过程在可重入互斥锁内执行：同一线程递归构造依赖时可以重复进入，
//! "检查缓存 -> 构造 -> 写入缓存"对其他线程是原子的。锁内同时维护正在创建的类型链，
//! 用于检测循环依赖。

use crate::registry::BeanDefinitionRegistry;
use crate::singleton::SingletonStore;
use chrono::{DateTime, Utc};
use di_abstractions::{
    BeanArguments, BeanDefinition, BeanFactory, BeanScanner, ResolvedBean, SharedBean, Stereotype,
};
use infrastructure_common::{BeanError, BeanResult, TypeInfo};
use parking_lot::{ReentrantMutex, RwLock};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// 工厂统计信息
#[derive(Debug, Clone)]
pub struct FactoryStats {
    /// 容器标识
    pub container_id: Uuid,
    /// 扫描的根包
    pub base_packages: Vec<String>,
    /// 已注册的定义数量
    pub registered_definitions: usize,
    /// 已创建的单例数量
    pub singleton_count: usize,
    /// 最近一次完成初始化的时间
    pub initialized_at: Option<DateTime<Utc>>,
}

/// 默认 Bean 工厂
pub struct DefaultListableBeanFactory {
    id: Uuid,
    base_packages: Vec<String>,
    scanner: Arc<dyn BeanScanner>,
    registry: RwLock<BeanDefinitionRegistry>,
    singletons: RwLock<SingletonStore>,
    /// 构造锁，内部为正在创建的类型链
    creation: ReentrantMutex<RefCell<Vec<TypeInfo>>>,
    initialized_at: RwLock<Option<DateTime<Utc>>>,
}

impl DefaultListableBeanFactory {
    /// 创建新的 Bean 工厂
    pub fn new<S, I, P>(scanner: S, base_packages: I) -> Self
    where
        S: BeanScanner + 'static,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self::with_scanner(
            Arc::new(scanner),
            base_packages.into_iter().map(Into::into).collect(),
        )
    }

    /// 使用共享的扫描器创建 Bean 工厂
    pub fn with_scanner(scanner: Arc<dyn BeanScanner>, base_packages: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            base_packages,
            scanner,
            registry: RwLock::new(BeanDefinitionRegistry::new()),
            singletons: RwLock::new(SingletonStore::new()),
            creation: ReentrantMutex::new(RefCell::new(Vec::new())),
            initialized_at: RwLock::new(None),
        }
    }

    /// 容器标识
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 扫描的根包
    pub fn base_packages(&self) -> &[String] {
        &self.base_packages
    }

    /// 扫描并注册 Bean 定义，不创建实例
    ///
    /// 返回新注册的定义数量。
    pub fn register_bean_definitions(&self) -> BeanResult<usize> {
        let classes = self.scanner.scan(&self.base_packages).map_err(|e| {
            error!("扫描器 {} 扫描失败: {}", self.scanner.name(), e);
            e
        })?;

        let registered = self.registry.write().register_classes(&classes)?;
        debug!(
            "扫描器 {} 返回 {} 个候选类型，新注册 {} 个定义",
            self.scanner.name(),
            classes.len(),
            registered
        );
        Ok(registered)
    }

    /// 为每个已注册的定义创建单例，已存在的单例保持不变
    pub fn pre_instantiate_singletons(&self) -> BeanResult<()> {
        let _creation = self.creation.lock();
        let definitions = self.registry.read().sorted_definitions();

        for definition in &definitions {
            self.get_or_create(&definition.type_info(), definition)?;
        }
        Ok(())
    }

    /// 指定具体类型是否已有单例
    pub fn contains_singleton(&self, bean_type: &TypeInfo) -> bool {
        self.singletons.read().contains(bean_type.id)
    }

    /// 已创建的单例数量
    pub fn singleton_count(&self) -> usize {
        self.singletons.read().len()
    }

    /// 获取统计信息
    pub fn stats(&self) -> FactoryStats {
        FactoryStats {
            container_id: self.id,
            base_packages: self.base_packages.clone(),
            registered_definitions: self.registry.read().len(),
            singleton_count: self.singleton_count(),
            initialized_at: *self.initialized_at.read(),
        }
    }

    fn resolve_definition(&self, requested: &TypeInfo) -> BeanResult<BeanDefinition> {
        self.registry.read().find_concrete(requested).cloned()
    }

    fn get_or_create(
        &self,
        requested: &TypeInfo,
        definition: &BeanDefinition,
    ) -> BeanResult<SharedBean> {
        let concrete = definition.type_info();
        let cached = self.singletons.read().get(concrete.id);
        if let Some(instance) = cached {
            return Ok(instance);
        }

        let creation = self.creation.lock();
        let cached = self.singletons.read().get(concrete.id);
        if let Some(instance) = cached {
            return Ok(instance);
        }

        {
            let mut chain = creation.borrow_mut();
            if chain.contains(&concrete) {
                let dependency_chain = chain
                    .iter()
                    .chain(std::iter::once(&concrete))
                    .map(|ty| ty.name)
                    .collect::<Vec<_>>()
                    .join(" -> ");
                error!("检测到循环依赖: {}", dependency_chain);
                return Err(BeanError::CircularDependency { dependency_chain });
            }
            chain.push(concrete);
        }

        let result = self.create_bean(requested, definition);
        creation.borrow_mut().pop();
        result
    }

    fn create_bean(
        &self,
        requested: &TypeInfo,
        definition: &BeanDefinition,
    ) -> BeanResult<SharedBean> {
        let concrete = definition.type_info();
        let mut arguments = self.resolve_arguments(definition)?;

        let instance = definition
            .constructor()
            .instantiate(&mut arguments)
            .map_err(|source| {
                error!("组件 {} 的构造函数调用失败: {}", concrete, source);
                BeanError::ConstructorFailed {
                    type_name: concrete.name.to_string(),
                    source,
                }
            })?;

        let instance = self.singletons.write().insert(concrete, instance);
        info!(
            container_id = %self.id,
            "注册单例 Bean: 请求类型 [{}]，具体类型 [{}]",
            requested,
            concrete
        );
        Ok(instance)
    }

    fn resolve_arguments(&self, definition: &BeanDefinition) -> BeanResult<BeanArguments> {
        let mut arguments = BeanArguments::new(definition.type_info());

        for parameter in definition.parameter_types() {
            let dependency = self.resolve_definition(parameter).map_err(|e| match e {
                BeanError::NoConcreteClass { .. } => BeanError::UnresolvedDependency {
                    type_name: definition.type_info().name.to_string(),
                    dependency: parameter.name.to_string(),
                },
                other => other,
            })?;
            debug!(
                "解析依赖: {} 的参数 {} -> {}",
                definition.type_info(),
                parameter,
                dependency.type_info()
            );

            let instance = self.get_or_create(parameter, &dependency)?;
            arguments.push(*parameter, dependency.cast(instance, parameter)?);
        }

        Ok(arguments)
    }
}

impl BeanFactory for DefaultListableBeanFactory {
    fn get_bean_by_type(&self, bean_type: &TypeInfo) -> BeanResult<ResolvedBean> {
        let definition = self.resolve_definition(bean_type).map_err(|e| {
            error!("无法解析 Bean 类型 {}: {}", bean_type, e);
            e
        })?;

        let instance = self.get_or_create(bean_type, &definition)?;
        let view = definition.cast(instance, bean_type)?;
        Ok(ResolvedBean::new(*bean_type, view))
    }

    fn get_bean_by_name(&self, name: &str) -> BeanResult<SharedBean> {
        if name.trim().is_empty() {
            return Err(BeanError::invalid_argument("Bean 名称不能为空"));
        }

        let definition = self.registry.read().find_concrete_by_name(name).cloned()?;
        self.get_or_create(&definition.type_info(), &definition)
    }

    fn get_bean_classes(&self) -> HashSet<TypeInfo> {
        self.registry.read().bean_classes()
    }

    fn get_beans_with_stereotype(&self, stereotype: Stereotype) -> HashMap<TypeInfo, SharedBean> {
        let registry = self.registry.read();
        let singletons = self.singletons.read();

        singletons
            .entries()
            .filter(|(type_info, _)| {
                registry
                    .get(type_info.id)
                    .is_some_and(|definition| definition.has_stereotype(stereotype))
            })
            .map(|(type_info, instance)| (type_info, instance.clone()))
            .collect()
    }

    fn contains_bean_definition(&self, bean_type: &TypeInfo) -> bool {
        self.registry.read().find_concrete(bean_type).is_ok()
    }

    fn initialize(&self) -> BeanResult<()> {
        let _creation = self.creation.lock();
        info!(
            container_id = %self.id,
            "开始初始化容器，扫描包: {:?}",
            self.base_packages
        );

        self.register_bean_definitions()?;
        self.pre_instantiate_singletons()?;
        *self.initialized_at.write() = Some(Utc::now());

        info!(
            container_id = %self.id,
            "容器初始化完成，{} 个定义，{} 个单例",
            self.registry.read().len(),
            self.singleton_count()
        );
        Ok(())
    }

    fn clear(&self) {
        let _creation = self.creation.lock();
        self.registry.write().clear();
        self.singletons.write().clear();
        *self.initialized_at.write() = None;
        info!(container_id = %self.id, "容器已清空");
    }
}

impl std::fmt::Debug for DefaultListableBeanFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultListableBeanFactory")
            .field("id", &self.id)
            .field("base_packages", &self.base_packages)
            .field("scanner", &self.scanner.name())
            .field("registry", &*self.registry.read())
            .field("singletons", &*self.singletons.read())
            .finish_non_exhaustive()
    }
}
