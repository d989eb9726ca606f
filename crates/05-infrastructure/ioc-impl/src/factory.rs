//! 实例工厂实现

use ioc_abstractions::InstanceFactory;
use ioc_common::{ComponentDescriptor, ComponentInstance, ContainerError};
use tracing::{debug, error};

/// 默认实例工厂
///
/// 直接调用描述符声明的无参构造函数。
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultInstanceFactory;

impl DefaultInstanceFactory {
    /// 创建新的实例工厂
    pub fn new() -> Self {
        Self
    }
}

impl InstanceFactory for DefaultInstanceFactory {
    fn create(&self, descriptor: &ComponentDescriptor) -> Result<ComponentInstance, ContainerError> {
        let key = descriptor.type_key();

        let instance = descriptor.construct().map_err(|source| {
            error!("组件实例化失败: {}, 原因: {}", key, source);
            ContainerError::Instantiation {
                type_name: key.name().to_string(),
                source,
            }
        })?;

        debug!("创建组件实例: {}", descriptor.name());
        Ok(instance)
    }
}
