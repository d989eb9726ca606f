//! 组合层错误类型

use ioc_common::ContainerError;
use thiserror::Error;

/// 组合层错误
#[derive(Error, Debug)]
pub enum CompositionError {
    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("容器配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("日志初始化失败: {message}")]
    Logging { message: String },
}

/// 结果类型别名
pub type CompositionResult<T> = Result<T, CompositionError>;
