//! 组件生命周期管理

use crate::errors::BoxError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 组件生命周期状态
///
/// 单个注册表条目只能按 `Constructed -> Wired -> Initialized` 的顺序前进。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentState {
    /// 已创建实例，依赖尚未注入
    Constructed,
    /// 所有依赖字段已注入
    Wired,
    /// 初始化钩子已全部执行
    Initialized,
}

impl ComponentState {
    /// 获取下一个合法状态
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Constructed => Some(Self::Wired),
            Self::Wired => Some(Self::Initialized),
            Self::Initialized => None,
        }
    }

    /// 是否可以转换到目标状态
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

/// 容器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerState {
    /// 尚未启动
    Empty,
    /// 阶段一：创建实例
    Constructing,
    /// 阶段二：注入依赖
    Wiring,
    /// 阶段三：执行初始化钩子
    Initializing,
    /// 启动完成，可以解析组件
    Ready,
    /// 启动失败（终止状态）
    Failed,
}

impl Default for ContainerState {
    fn default() -> Self {
        Self::Empty
    }
}

impl ContainerState {
    /// 是否可以解析组件
    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }

    /// 是否为终止状态
    pub fn is_terminal(self) -> bool {
        self == Self::Failed
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "Empty",
            Self::Constructing => "Constructing",
            Self::Wiring => "Wiring",
            Self::Initializing => "Initializing",
            Self::Ready => "Ready",
            Self::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// 初始化钩子返回值
///
/// 允许钩子方法返回 `()` 或 `Result<(), E>`。
pub trait IntoHookResult {
    /// 转换为统一的结果类型
    fn into_hook_result(self) -> Result<(), BoxError>;
}

impl IntoHookResult for () {
    fn into_hook_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoHookResult for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_hook_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}
