//! 生命周期执行器抽象接口

use crate::registry::ComponentRegistry;
use ioc_common::ContainerError;

/// 生命周期执行器 trait
///
/// 在全部实例完成注入之后，按注册表顺序执行每个组件的初始化钩子。
/// 任何钩子失败都会中止剩余的初始化。
pub trait LifecycleRunner: Send + Sync {
    /// 初始化所有组件，完成后每个条目都处于 `Initialized` 状态
    fn initialize_all(&self, registry: &mut dyn ComponentRegistry) -> Result<(), ContainerError>;
}
