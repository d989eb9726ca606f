//! 组件注册表实现

use ioc_abstractions::{ComponentRegistry, RegistryEntry};
use ioc_common::{ComponentDescriptor, ComponentInstance, ComponentState, ContainerError, TypeKey};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 组件注册表实现
///
/// 条目按注册顺序保存，`all()` 与生命周期阶段都按这个顺序遍历。
#[derive(Debug, Default)]
pub struct ComponentRegistryImpl {
    /// 注册表条目
    entries: Vec<RegistryEntry>,
    /// 类型键到条目下标
    index: HashMap<TypeKey, usize>,
    /// 组件名称到条目下标
    names: HashMap<String, usize>,
    /// 是否已冻结
    frozen: bool,
}

impl ComponentRegistryImpl {
    /// 创建新的组件注册表
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, key: &TypeKey) -> Result<&mut RegistryEntry, ContainerError> {
        match self.index.get(key) {
            Some(&idx) => Ok(&mut self.entries[idx]),
            None => Err(ContainerError::not_found(key.name())),
        }
    }
}

impl ComponentRegistry for ComponentRegistryImpl {
    fn register(
        &mut self,
        descriptor: Arc<ComponentDescriptor>,
        instance: ComponentInstance,
    ) -> Result<(), ContainerError> {
        let key = descriptor.type_key();

        if self.frozen {
            return Err(ContainerError::RegistryFrozen {
                type_name: key.name().to_string(),
            });
        }
        if self.index.contains_key(&key) {
            return Err(ContainerError::DuplicateComponent {
                type_name: key.name().to_string(),
            });
        }
        if let Some(&idx) = self.names.get(descriptor.name()) {
            return Err(ContainerError::DuplicateComponentName {
                name: descriptor.name().to_string(),
                first: self.entries[idx].type_key().name().to_string(),
                second: key.name().to_string(),
            });
        }

        debug!("注册组件: {} ({})", descriptor.name(), key);
        self.index.insert(key, self.entries.len());
        self.names.insert(descriptor.name().to_string(), self.entries.len());
        self.entries.push(RegistryEntry::new(descriptor, instance));
        Ok(())
    }

    fn lookup(&self, key: &TypeKey) -> Result<&RegistryEntry, ContainerError> {
        self.index
            .get(key)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| ContainerError::not_found(key.name()))
    }

    fn lookup_by_name(&self, name: &str) -> Result<&RegistryEntry, ContainerError> {
        self.names
            .get(name)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| ContainerError::not_found(name))
    }

    fn all(&self) -> Vec<RegistryEntry> {
        self.entries.clone()
    }

    fn advance(&mut self, key: &TypeKey, state: ComponentState) -> Result<(), ContainerError> {
        let entry = self.entry_mut(key)?;
        if !entry.state.can_transition_to(state) {
            return Err(ContainerError::InvalidStateTransition {
                type_name: key.name().to_string(),
                from: entry.state,
                to: state,
            });
        }
        entry.state = state;
        Ok(())
    }

    fn freeze(&mut self) {
        debug!("注册表已冻结，共 {} 个组件", self.entries.len());
        self.frozen = true;
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.names.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
