//! 错误类型定义

use crate::lifecycle::{ComponentState, ContainerState};
use thiserror::Error;

/// 通用错误来源类型
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 容器错误类型
///
/// 除 [`ContainerError::NotFound`] 外，启动阶段产生的错误都是致命的，
/// 会立即返回给 `bootstrap` 的调用者。
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("组件发现失败: {source_name}, 原因: {message}")]
    Discovery { source_name: String, message: String },

    #[error("组件重复注册: {type_name}")]
    DuplicateComponent { type_name: String },

    #[error("组件名称重复: `{name}` 同时用于 {first} 和 {second}")]
    DuplicateComponentName {
        name: String,
        first: String,
        second: String,
    },

    #[error("组件实例化失败: {type_name}, 原因: {source}")]
    Instantiation { type_name: String, source: BoxError },

    #[error("依赖无法解析: {component} 的字段 `{slot}` 需要未注册的类型 {missing}")]
    UnresolvedDependency {
        component: String,
        slot: String,
        missing: String,
    },

    #[error("依赖注入失败: {component} 的字段 `{slot}`, 原因: {message}")]
    InjectionFailed {
        component: String,
        slot: String,
        message: String,
    },

    #[error("组件初始化失败: {type_name} 的钩子 `{hook}`, 原因: {source}")]
    Initialization {
        type_name: String,
        hook: String,
        source: BoxError,
    },

    #[error("组件未注册: {type_name}")]
    NotFound { type_name: String },

    #[error("容器尚未就绪: 当前状态 {state}")]
    NotReady { state: ContainerState },

    #[error("容器已经启动过: 当前状态 {state}")]
    AlreadyBootstrapped { state: ContainerState },

    #[error("注册表已冻结，无法注册组件: {type_name}")]
    RegistryFrozen { type_name: String },

    #[error("组件状态转换无效: {type_name}, {from:?} -> {to:?}")]
    InvalidStateTransition {
        type_name: String,
        from: ComponentState,
        to: ComponentState,
    },

    #[error("类型转换失败: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl ContainerError {
    /// 创建发现错误
    pub fn discovery(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Discovery {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// 创建组件未注册错误
    pub fn not_found(type_name: impl Into<String>) -> Self {
        Self::NotFound {
            type_name: type_name.into(),
        }
    }

    /// 是否为启动阶段的致命错误
    pub fn is_bootstrap_fatal(&self) -> bool {
        !matches!(self, Self::NotFound { .. } | Self::NotReady { .. })
    }
}

/// 结果类型别名
pub type ContainerResult<T> = Result<T, ContainerError>;
