//! 实例工厂抽象接口

use ioc_common::{ComponentDescriptor, ComponentInstance, ContainerError};

/// 实例工厂 trait
///
/// 为每个描述符创建一个依赖字段全部未注入的实例。创建失败是致命错误，不会重试。
pub trait InstanceFactory: Send + Sync {
    /// 创建组件实例
    fn create(&self, descriptor: &ComponentDescriptor) -> Result<ComponentInstance, ContainerError>;

    /// 获取工厂名称
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
