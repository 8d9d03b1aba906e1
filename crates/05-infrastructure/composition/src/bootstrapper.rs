//! 容器启动器

use crate::settings::AppSettings;
use di_abstractions::{BeanClass, BeanFactory};
use di_impl::{CatalogBeanScanner, DefaultListableBeanFactory, GenericApplicationContext};
use infrastructure_common::InfrastructureResult;
use std::sync::Arc;
use tracing::{error, info};

/// 容器启动器
///
/// 按配置构建 Bean 工厂并完成初始化。预先模式在启动时创建所有单例，
/// 惰性模式只注册定义，单例在第一次查找时创建。
#[derive(Debug)]
pub struct ContainerBootstrapper {
    settings: AppSettings,
    scanner: CatalogBeanScanner,
}

impl ContainerBootstrapper {
    /// 创建新的启动器
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            scanner: CatalogBeanScanner::new(),
        }
    }

    /// 使用已准备好的扫描器
    pub fn with_scanner(mut self, scanner: CatalogBeanScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// 注册候选类型
    pub fn register(mut self, class: BeanClass) -> Self {
        self.scanner = self.scanner.register(class);
        self
    }

    /// 批量注册候选类型
    pub fn register_all<I>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = BeanClass>,
    {
        self.scanner = self.scanner.register_all(classes);
        self
    }

    /// 设置是否预先初始化
    pub fn with_eager_initialization(mut self, eager: bool) -> Self {
        self.settings.container.eager_initialization = eager;
        self
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// 启动容器
    pub fn bootstrap(self) -> InfrastructureResult<GenericApplicationContext> {
        self.settings.validate()?;
        let container = self.settings.container;

        let scanner = container
            .exclude_packages
            .iter()
            .fold(self.scanner, |scanner, package| {
                scanner.exclude_package(package.as_str())
            });
        let factory = DefaultListableBeanFactory::new(scanner, container.base_packages);

        info!(
            container_id = %factory.id(),
            "启动容器，预先初始化: {}",
            container.eager_initialization
        );
        let result = if container.eager_initialization {
            factory.initialize()
        } else {
            factory.register_bean_definitions().map(|_| ())
        };
        if let Err(e) = result {
            error!(container_id = %factory.id(), "容器启动失败: {}", e);
            return Err(e.into());
        }

        let stats = factory.stats();
        info!(
            container_id = %stats.container_id,
            "容器启动完成，{} 个定义，{} 个单例",
            stats.registered_definitions,
            stats.singleton_count
        );
        Ok(GenericApplicationContext::new(Arc::new(factory)))
    }
}
