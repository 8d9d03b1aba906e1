//! 日志初始化

use crate::settings::LoggingSettings;
use infrastructure_common::{InfrastructureError, InfrastructureResult};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 按配置安装全局日志订阅者
///
/// 全局订阅者只能安装一次，重复调用返回 `BootstrapFailed`，调用方可以忽略。
pub fn init_logging(settings: &LoggingSettings) -> InfrastructureResult<()> {
    let filter =
        EnvFilter::try_new(&settings.level).map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志级别无效: {}", e),
        })?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(settings.show_target)
        .with_thread_ids(settings.show_thread_ids);

    if settings.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| InfrastructureError::BootstrapFailed {
        message: format!("日志初始化失败: {}", e),
    })?;

    info!("日志系统初始化完成，级别: {}", settings.level);
    Ok(())
}
