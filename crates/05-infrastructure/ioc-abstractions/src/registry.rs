//! 组件注册表抽象接口

use ioc_common::{ComponentDescriptor, ComponentInstance, ComponentState, ContainerError, TypeKey};
use std::fmt;
use std::sync::Arc;

/// 组件注册表 trait
///
/// 注册表是组件实例的唯一所有者。阶段一结束后注册表被冻结，
/// 成员不再变化，只有条目的生命周期状态还会前进。
pub trait ComponentRegistry: Send + Sync {
    /// 注册组件实例
    fn register(
        &mut self,
        descriptor: Arc<ComponentDescriptor>,
        instance: ComponentInstance,
    ) -> Result<(), ContainerError>;

    /// 查找组件，不会按需创建实例
    fn lookup(&self, key: &TypeKey) -> Result<&RegistryEntry, ContainerError>;

    /// 按组件名称查找
    fn lookup_by_name(&self, name: &str) -> Result<&RegistryEntry, ContainerError>;

    /// 获取所有条目的快照
    fn all(&self) -> Vec<RegistryEntry>;

    /// 推进组件的生命周期状态
    fn advance(&mut self, key: &TypeKey, state: ComponentState) -> Result<(), ContainerError>;

    /// 冻结注册表成员
    fn freeze(&mut self);

    /// 注册表是否已冻结
    fn is_frozen(&self) -> bool;

    /// 清空注册表，释放所有实例
    fn clear(&mut self);

    /// 已注册的组件数量
    fn len(&self) -> usize;

    /// 注册表是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 检查组件是否已注册
    fn contains(&self, key: &TypeKey) -> bool {
        self.lookup(key).is_ok()
    }
}

/// 注册表条目
#[derive(Clone)]
pub struct RegistryEntry {
    /// 组件描述符
    pub descriptor: Arc<ComponentDescriptor>,
    /// 单例实例
    pub instance: ComponentInstance,
    /// 生命周期状态
    pub state: ComponentState,
}

impl RegistryEntry {
    /// 创建新的注册表条目
    pub fn new(descriptor: Arc<ComponentDescriptor>, instance: ComponentInstance) -> Self {
        Self {
            descriptor,
            instance,
            state: ComponentState::Constructed,
        }
    }

    /// 组件类型键
    pub fn type_key(&self) -> TypeKey {
        self.descriptor.type_key()
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("type_key", &self.type_key().name())
            .field("state", &self.state)
            .field("instance", &"<instance>")
            .finish()
    }
}
