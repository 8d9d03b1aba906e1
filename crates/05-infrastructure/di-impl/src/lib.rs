//! # 依赖注入具体实现
//!
//! 提供具体的组件扫描器、Bean 定义注册表、单例缓存、Bean 工厂与应用上下文实现

pub mod context;
pub mod factory;
pub mod registry;
pub mod scanner;
pub mod singleton;

pub use context::GenericApplicationContext;
pub use factory::{DefaultListableBeanFactory, FactoryStats};
pub use registry::BeanDefinitionRegistry;
pub use scanner::CatalogBeanScanner;
pub use singleton::SingletonStore;
