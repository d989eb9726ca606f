//! 组件来源抽象接口
//!
//! 组件来源负责向容器提供组件描述符，发现机制（静态列表、全局组件表、
//! 配置文件等）对容器透明。

use async_trait::async_trait;
use ioc_common::{ComponentDescriptor, ContainerError, TypeKey};
use std::collections::{HashMap, HashSet};

/// 组件来源 trait
///
/// 同一个来源不得返回两个类型键相同的描述符。
#[async_trait]
pub trait ComponentSource: Send + Sync {
    /// 发现组件描述符
    async fn discover(&self) -> Result<Vec<ComponentDescriptor>, ContainerError>;

    /// 获取来源名称
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// 检查描述符的类型键和组件名称是否唯一
///
/// 返回第一个重复项对应的错误。
pub fn ensure_unique(descriptors: &[ComponentDescriptor]) -> Result<(), ContainerError> {
    let mut seen: HashSet<TypeKey> = HashSet::with_capacity(descriptors.len());
    let mut names: HashMap<&str, TypeKey> = HashMap::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let key = descriptor.type_key();
        if !seen.insert(key) {
            return Err(ContainerError::DuplicateComponent {
                type_name: key.name().to_string(),
            });
        }
        if let Some(first) = names.insert(descriptor.name(), key) {
            return Err(ContainerError::DuplicateComponentName {
                name: descriptor.name().to_string(),
                first: first.name().to_string(),
                second: key.name().to_string(),
            });
        }
    }
    Ok(())
}
