//! # Infrastructure Common
//!
//! 这个 crate 提供了 interface21 容器各层共享的基础类型。
//!
//! ## 核心内容
//!
//! - [`TypeInfo`] - 类型元数据，容器中所有"类"的键
//! - [`BeanError`] - 容器解析与实例化错误
//! - [`ConfigError`] - 配置加载错误
//! - [`InfrastructureError`] - 启动层错误
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 显式注册代替运行时反射
//! - 无全局可变状态

pub mod errors;
pub mod metadata;

pub use errors::*;
pub use metadata::*;
