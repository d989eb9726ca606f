//! 生命周期执行器实现（阶段三）

use ioc_abstractions::{ComponentRegistry, LifecycleRunner};
use ioc_common::{ComponentState, ContainerError};
use tracing::{debug, error};

/// 默认生命周期执行器
///
/// 只有当注册表中所有组件都已注入完成时才开始执行钩子。
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLifecycleRunner;

impl DefaultLifecycleRunner {
    /// 创建新的生命周期执行器
    pub fn new() -> Self {
        Self
    }
}

impl LifecycleRunner for DefaultLifecycleRunner {
    fn initialize_all(&self, registry: &mut dyn ComponentRegistry) -> Result<(), ContainerError> {
        let entries = registry.all();

        // 所有实例注入完成之后才允许执行任何钩子
        if let Some(pending) = entries.iter().find(|e| e.state != ComponentState::Wired) {
            return Err(ContainerError::InvalidStateTransition {
                type_name: pending.type_key().name().to_string(),
                from: pending.state,
                to: ComponentState::Initialized,
            });
        }

        for entry in &entries {
            for hook in entry.descriptor.init_hooks() {
                debug!("执行初始化钩子: {}::{}", entry.descriptor.name(), hook.name());
                hook.invoke(&entry.instance).map_err(|source| {
                    error!(
                        "初始化钩子失败: {}::{}, 原因: {}",
                        entry.descriptor.name(),
                        hook.name(),
                        source
                    );
                    ContainerError::Initialization {
                        type_name: entry.type_key().name().to_string(),
                        hook: hook.name().to_string(),
                        source,
                    }
                })?;
            }
            registry.advance(&entry.type_key(), ComponentState::Initialized)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentRegistryImpl;
    use ioc_common::{ComponentDescriptor, TypeKey};
    use std::sync::{Arc, Mutex};

    static JOURNAL: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

    #[derive(Default)]
    struct Ordered {
        calls: Mutex<Vec<&'static str>>,
    }

    impl Ordered {
        fn load(&self) {
            self.calls.lock().unwrap().push("load");
        }

        fn start(&self) {
            self.calls.lock().unwrap().push("start");
        }
    }

    #[derive(Default)]
    struct Broken;

    impl Broken {
        fn explode(&self) -> Result<(), std::io::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
        }
    }

    #[derive(Default)]
    struct NeverReached;

    impl NeverReached {
        fn mark(&self) {
            JOURNAL.lock().unwrap().push("never_reached");
        }
    }

    fn wired_registry(descriptors: Vec<ComponentDescriptor>) -> ComponentRegistryImpl {
        let mut registry = ComponentRegistryImpl::new();
        for descriptor in descriptors {
            let key = descriptor.type_key();
            let instance = descriptor.construct().unwrap();
            registry.register(Arc::new(descriptor), instance).unwrap();
            registry.advance(&key, ComponentState::Wired).unwrap();
        }
        registry
    }

    #[test]
    fn test_hooks_run_in_declaration_order() {
        let descriptor = ComponentDescriptor::builder::<Ordered>()
            .default_constructor()
            .init("load", Ordered::load)
            .init("start", Ordered::start)
            .build();
        let mut registry = wired_registry(vec![descriptor]);

        DefaultLifecycleRunner::new().initialize_all(&mut registry).unwrap();

        let entry = registry.lookup(&TypeKey::of::<Ordered>()).unwrap();
        assert_eq!(entry.state, ComponentState::Initialized);
        let ordered = entry.instance.clone().downcast::<Ordered>().unwrap();
        assert_eq!(*ordered.calls.lock().unwrap(), vec!["load", "start"]);
    }

    #[test]
    fn test_failing_hook_stops_initialization() {
        let mut registry = wired_registry(vec![
            ComponentDescriptor::builder::<Broken>()
                .default_constructor()
                .init("explode", Broken::explode)
                .build(),
            ComponentDescriptor::builder::<NeverReached>()
                .default_constructor()
                .init("mark", NeverReached::mark)
                .build(),
        ]);

        let err = DefaultLifecycleRunner::new()
            .initialize_all(&mut registry)
            .unwrap_err();

        match err {
            ContainerError::Initialization { type_name, hook, source } => {
                assert!(type_name.ends_with("Broken"));
                assert_eq!(hook, "explode");
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("期望初始化错误, 实际: {:?}", other),
        }
        assert!(JOURNAL.lock().unwrap().is_empty());
        assert_eq!(
            registry.lookup(&TypeKey::of::<NeverReached>()).unwrap().state,
            ComponentState::Wired
        );
    }

    #[test]
    fn test_unwired_registry_is_rejected() {
        let mut registry = ComponentRegistryImpl::new();
        let descriptor = ComponentDescriptor::of::<Ordered>();
        let instance = descriptor.construct().unwrap();
        registry.register(Arc::new(descriptor), instance).unwrap();

        let err = DefaultLifecycleRunner::new()
            .initialize_all(&mut registry)
            .unwrap_err();
        assert!(matches!(err, ContainerError::InvalidStateTransition { .. }));
    }
}
