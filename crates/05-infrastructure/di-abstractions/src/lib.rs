//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义 Bean 声明、定义与解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`BeanClass`] - 扫描得到的候选类型，显式声明构造函数、实现的接口与标记
//! - [`BeanDefinition`] - 从候选类型构建的不可变定义
//! - [`BeanScanner`] - 组件扫描器接口
//! - [`BeanFactory`] - Bean 工厂接口
//! - [`ApplicationContext`] - 面向使用方的应用上下文接口

pub mod arguments;
pub mod class;
pub mod context;
pub mod definition;
pub mod factory;
pub mod scanner;

pub use arguments::*;
pub use class::*;
pub use context::*;
pub use definition::*;
pub use factory::*;
pub use scanner::*;
