//! # IoC Common
//!
//! 这个 crate 提供了 Lorn IoC 容器的公共类型。
//!
//! ## 核心组件
//!
//! - [`TypeKey`] - 组件类型键
//! - [`ComponentDescriptor`] - 组件描述符（构造函数、依赖字段、初始化钩子）
//! - [`Inject`] - 依赖注入字段
//! - [`ComponentState`] / [`ContainerState`] - 生命周期状态
//! - [`ContainerError`] - 容器错误类型
//!
//! ## 设计原则
//!
//! - 以显式描述符代替运行时反射
//! - 注册表是组件实例的唯一所有者
//! - 启动过程中的任何错误都立即失败

pub mod component;
pub mod errors;
pub mod inject;
pub mod lifecycle;
pub mod metadata;

pub use component::*;
pub use errors::*;
pub use inject::*;
pub use lifecycle::*;
pub use metadata::*;

/// 组件描述符工厂
pub type DescriptorFactory = fn() -> ComponentDescriptor;

/// 全局组件表
///
/// 由 `#[derive(Component)]` 生成的 `ctor` 函数在程序启动时填充。
static GLOBAL_COMPONENT_TABLE: once_cell::sync::Lazy<parking_lot::RwLock<Vec<DescriptorFactory>>> =
    once_cell::sync::Lazy::new(|| parking_lot::RwLock::new(Vec::new()));

/// 向全局组件表注册描述符工厂
pub fn register_global_component(factory: DescriptorFactory) {
    GLOBAL_COMPONENT_TABLE.write().push(factory);
}

/// 获取全局组件表中的所有描述符
pub fn global_components() -> Vec<ComponentDescriptor> {
    let factories = GLOBAL_COMPONENT_TABLE.read().clone();
    tracing::debug!("全局组件表中共有 {} 个组件", factories.len());
    factories.into_iter().map(|factory| factory()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct GloballyRegistered;

    fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::builder::<GloballyRegistered>()
            .default_constructor()
            .package("ioc_common::tests::global")
            .build()
    }

    #[test]
    fn test_global_component_table() {
        register_global_component(descriptor);

        let found: Vec<_> = global_components()
            .into_iter()
            .filter(|d| d.belongs_to("ioc_common::tests::global"))
            .collect();

        assert!(!found.is_empty());
        assert!(found[0].type_key().is::<GloballyRegistered>());
    }
}
