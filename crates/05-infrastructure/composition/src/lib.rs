//! # 基础设施组合层
//!
//! 负责把配置、日志与 Bean 工厂组合成一个可用的应用上下文。
//!
//! ## 主要功能
//!
//! - **配置加载**: 默认值、TOML 文件与环境变量分层合并
//! - **日志初始化**: 基于 `tracing-subscriber` 的格式化输出
//! - **容器启动**: 构建 Bean 工厂并按预先或惰性模式初始化
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{init_logging, ContainerBootstrapper, SettingsLoader};
//! use di_impl::CatalogBeanScanner;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = SettingsLoader::new().with_file("config/app.toml").load()?;
//!     init_logging(&settings.logging)?;
//!
//!     let context = ContainerBootstrapper::new(settings)
//!         .with_scanner(CatalogBeanScanner::new())
//!         .bootstrap()?;
//!     println!("{:?}", context);
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod logging;
pub mod settings;

pub use bootstrapper::ContainerBootstrapper;
pub use logging::init_logging;
pub use settings::{AppSettings, ContainerSettings, LoggingSettings, SettingsLoader};

// 重新导出错误类型
pub use infrastructure_common::{ConfigError, InfrastructureError};
