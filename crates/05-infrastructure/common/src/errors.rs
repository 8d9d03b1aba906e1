//! 错误类型定义

use thiserror::Error;

/// 装箱的通用错误类型，构造函数闭包使用它返回任意错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 容器错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeanErrorKind {
    /// 调用方传入了无效参数
    InvalidArgument,
    /// 组件无法实例化
    InstantiationFailure,
    /// 构造函数参数没有可用的实现
    UnresolvedDependency,
}

/// Bean 解析与实例化错误类型
#[derive(Error, Debug)]
pub enum BeanError {
    #[error("无效参数: {message}")]
    InvalidArgument { message: String },

    #[error("找不到类型 {type_name} 的具体实现类")]
    NoConcreteClass { type_name: String },

    #[error("类型 {type_name} 存在多个具体实现类: {}", .candidates.join(", "))]
    AmbiguousConcreteClass {
        type_name: String,
        candidates: Vec<String>,
    },

    #[error("组件 {type_name} 的构造函数参数 {dependency} 找不到具体实现类")]
    UnresolvedDependency {
        type_name: String,
        dependency: String,
    },

    #[error("组件 {type_name} 没有可用的构造函数: {message}")]
    NoUsableConstructor { type_name: String, message: String },

    #[error("组件 {type_name} 的构造函数调用失败: {source}")]
    ConstructorFailed {
        type_name: String,
        #[source]
        source: BoxError,
    },

    #[error("构造参数不匹配: 第 {index} 个参数期望 {expected}, 实际 {actual}")]
    ArgumentMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("组件实例无法转换为类型 {expected}")]
    TypeMismatch { expected: String },

    #[error("检测到循环依赖: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("组件扫描失败: {message}")]
    ScanFailed { message: String },
}

impl BeanError {
    /// 获取错误分类
    pub fn kind(&self) -> BeanErrorKind {
        match self {
            Self::InvalidArgument { .. } => BeanErrorKind::InvalidArgument,
            Self::UnresolvedDependency { .. } => BeanErrorKind::UnresolvedDependency,
            _ => BeanErrorKind::InstantiationFailure,
        }
    }

    /// 创建无效参数错误
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// 创建扫描错误
    pub fn scan_failed(message: impl Into<String>) -> Self {
        Self::ScanFailed {
            message: message.into(),
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        #[source]
        source: BoxError,
    },

    #[error("配置验证失败: {errors:?}")]
    ValidationFailed { errors: Vec<String> },
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("容器错误: {source}")]
    BeanError {
        #[from]
        source: BeanError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type BeanResult<T> = Result<T, BeanError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
