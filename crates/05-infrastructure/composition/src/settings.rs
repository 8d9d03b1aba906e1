//! 配置加载
//!
//! 配置按优先级从低到高合并：结构体默认值、可选的 TOML 文件、`INTERFACE21` 前缀的环境变量。
//! 环境变量使用 `__` 分隔层级，列表值使用逗号分隔，例如
//! `INTERFACE21__CONTAINER__BASE_PACKAGES=app::web,app::service`。

use config::{Config, Environment, File, FileFormat};
use infrastructure_common::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "INTERFACE21";

/// 环境变量层级分隔符
pub const ENV_SEPARATOR: &str = "__";

const LIST_KEYS: [&str; 2] = ["container.base_packages", "container.exclude_packages"];

/// 应用配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// 容器配置
    pub container: ContainerSettings,
    /// 日志配置
    pub logging: LoggingSettings,
}

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSettings {
    /// 扫描的根包
    pub base_packages: Vec<String>,
    /// 排除的包
    pub exclude_packages: Vec<String>,
    /// 启动时是否预先实例化所有单例
    pub eager_initialization: bool,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            base_packages: Vec::new(),
            exclude_packages: Vec::new(),
            eager_initialization: true,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// 过滤指令，语法同 `RUST_LOG`
    pub level: String,
    /// 是否输出 JSON 格式
    pub json_format: bool,
    /// 是否显示目标模块
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            show_target: true,
            show_thread_ids: false,
        }
    }
}

impl AppSettings {
    /// 使用默认配置扫描指定的包
    pub fn for_packages<I, P>(base_packages: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            container: ContainerSettings {
                base_packages: base_packages.into_iter().map(Into::into).collect(),
                ..ContainerSettings::default()
            },
            logging: LoggingSettings::default(),
        }
    }

    /// 验证配置，返回所有发现的问题
    pub fn validate(&self) -> ConfigResult<()> {
        let mut errors = Vec::new();

        if self.container.base_packages.is_empty() {
            errors.push("container.base_packages 不能为空".to_string());
        }
        for (key, packages) in [
            ("container.base_packages", &self.container.base_packages),
            ("container.exclude_packages", &self.container.exclude_packages),
        ] {
            if packages.iter().any(|package| package.trim().is_empty()) {
                errors.push(format!("{} 包含空白的包名", key));
            }
        }

        if self.logging.level.trim().is_empty() {
            errors.push("logging.level 不能为空".to_string());
        } else if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            errors.push(format!("logging.level 无效: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationFailed { errors })
        }
    }
}

/// 配置加载器
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    env_source: Option<config::Map<String, String>>,
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定 TOML 配置文件，文件必须存在
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// 用给定的变量表代替进程环境变量
    pub fn with_env_source<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_source = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    /// 加载并验证配置
    pub fn load(&self) -> ConfigResult<AppSettings> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;

        info!(
            "配置加载完成，扫描包: {:?}，预先初始化: {}",
            settings.container.base_packages, settings.container.eager_initialization
        );
        Ok(settings)
    }

    /// 加载配置但不验证
    pub fn load_unvalidated(&self) -> ConfigResult<AppSettings> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载配置文件: {}", path.display());
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
        }

        let environment = LIST_KEYS.iter().fold(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .list_separator(",")
                .try_parsing(true),
            |environment, key| environment.with_list_parse_key(key),
        );
        builder = builder.add_source(environment.source(self.env_source.clone()));

        builder
            .build()
            .and_then(|config| config.try_deserialize::<AppSettings>())
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })
    }
}
