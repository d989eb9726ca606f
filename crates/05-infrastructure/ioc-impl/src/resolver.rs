//! 依赖解析器实现（阶段二）

use ioc_abstractions::{ComponentRegistry, DependencyResolver, RegistryEntry};
use ioc_common::{ComponentState, ContainerError};
use tracing::{debug, error};

/// 默认依赖解析器
///
/// 依赖只从注册表中已有的单例里查找，从不按需创建实例。
#[derive(Debug, Clone, Copy)]
pub struct DefaultDependencyResolver {
    /// 注入前先做整体检查
    validate_first: bool,
}

impl DefaultDependencyResolver {
    /// 创建新的依赖解析器
    pub fn new() -> Self {
        Self {
            validate_first: true,
        }
    }

    /// 设置是否在注入前检查所有依赖字段
    pub fn with_validation(mut self, validate_first: bool) -> Self {
        self.validate_first = validate_first;
        self
    }

    fn unresolved(entry: &RegistryEntry, slot: &str, missing: &str) -> ContainerError {
        ContainerError::UnresolvedDependency {
            component: entry.type_key().name().to_string(),
            slot: slot.to_string(),
            missing: missing.to_string(),
        }
    }
}

impl Default for DefaultDependencyResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyResolver for DefaultDependencyResolver {
    fn resolve(&self, registry: &mut dyn ComponentRegistry) -> Result<(), ContainerError> {
        if self.validate_first {
            if let Err(mut errors) = self.validate(registry) {
                for err in &errors {
                    error!("{}", err);
                }
                return Err(errors.remove(0));
            }
        }

        for entry in registry.all() {
            for slot in entry.descriptor.dependency_slots() {
                let required = slot.required();
                let dependency = match registry.lookup(&required) {
                    Ok(dep) => dep.instance.clone(),
                    Err(_) => return Err(Self::unresolved(&entry, slot.name(), required.name())),
                };

                slot.inject(&entry.instance, &dependency)
                    .map_err(|message| ContainerError::InjectionFailed {
                        component: entry.type_key().name().to_string(),
                        slot: slot.name().to_string(),
                        message,
                    })?;

                debug!(
                    "注入依赖: {}.{} <- {}",
                    entry.descriptor.name(),
                    slot.name(),
                    required.short_name()
                );
            }

            registry.advance(&entry.type_key(), ComponentState::Wired)?;
        }

        Ok(())
    }

    fn validate(&self, registry: &dyn ComponentRegistry) -> Result<(), Vec<ContainerError>> {
        let errors: Vec<ContainerError> = registry
            .all()
            .iter()
            .flat_map(|entry| {
                entry
                    .descriptor
                    .dependency_slots()
                    .iter()
                    .filter(|slot| !registry.contains(&slot.required()))
                    .map(|slot| Self::unresolved(entry, slot.name(), slot.required().name()))
                    .collect::<Vec<_>>()
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentRegistryImpl;
    use ioc_common::{ComponentDescriptor, Inject, TypeKey};
    use std::sync::Arc;

    #[derive(Default)]
    struct ServiceA {
        service_b: Inject<ServiceB>,
    }

    #[derive(Default)]
    struct ServiceB {
        service_a: Inject<ServiceA>,
    }

    struct Unregistered;

    #[derive(Default)]
    struct Lonely {
        service_a: Inject<ServiceA>,
        missing: Inject<Unregistered>,
    }

    #[derive(Default)]
    struct Narcissus {
        me: Inject<Narcissus>,
    }

    fn service_a() -> ComponentDescriptor {
        ComponentDescriptor::builder::<ServiceA>()
            .default_constructor()
            .inject("service_b", |a: &ServiceA| &a.service_b)
            .build()
    }

    fn service_b() -> ComponentDescriptor {
        ComponentDescriptor::builder::<ServiceB>()
            .default_constructor()
            .inject("service_a", |b: &ServiceB| &b.service_a)
            .build()
    }

    fn lonely() -> ComponentDescriptor {
        ComponentDescriptor::builder::<Lonely>()
            .default_constructor()
            .inject("service_a", |l: &Lonely| &l.service_a)
            .inject("missing", |l: &Lonely| &l.missing)
            .build()
    }

    fn registry_of(descriptors: Vec<ComponentDescriptor>) -> ComponentRegistryImpl {
        let mut registry = ComponentRegistryImpl::new();
        for descriptor in descriptors {
            let instance = descriptor.construct().unwrap();
            registry.register(Arc::new(descriptor), instance).unwrap();
        }
        registry
    }

    fn instance<T: Send + Sync + 'static>(registry: &ComponentRegistryImpl) -> Arc<T> {
        registry
            .lookup(&TypeKey::of::<T>())
            .unwrap()
            .instance
            .clone()
            .downcast::<T>()
            .unwrap()
    }

    #[test]
    fn test_cyclic_dependencies_are_wired() {
        let mut registry = registry_of(vec![service_a(), service_b()]);
        DefaultDependencyResolver::new().resolve(&mut registry).unwrap();

        let a = instance::<ServiceA>(&registry);
        let b = instance::<ServiceB>(&registry);
        assert!(a.service_b.points_to(&b));
        assert!(b.service_a.points_to(&a));

        for entry in registry.all() {
            assert_eq!(entry.state, ComponentState::Wired);
        }
    }

    #[test]
    fn test_self_dependency_is_wired() {
        let descriptor = ComponentDescriptor::builder::<Narcissus>()
            .default_constructor()
            .inject("me", |n: &Narcissus| &n.me)
            .build();
        let mut registry = registry_of(vec![descriptor]);
        DefaultDependencyResolver::new().resolve(&mut registry).unwrap();

        let n = instance::<Narcissus>(&registry);
        assert!(n.me.points_to(&n));
    }

    #[test]
    fn test_validate_reports_every_unresolved_slot() {
        let registry = registry_of(vec![lonely()]);
        let errors = DefaultDependencyResolver::new().validate(&registry).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ContainerError::UnresolvedDependency { .. })));
    }

    #[test]
    fn test_validation_wires_nothing_on_failure() {
        let mut registry = registry_of(vec![service_a(), service_b(), lonely()]);
        let err = DefaultDependencyResolver::new().resolve(&mut registry).unwrap_err();

        match err {
            ContainerError::UnresolvedDependency {
                component,
                slot,
                missing,
            } => {
                assert!(component.ends_with("tests::Lonely"));
                assert_eq!(slot, "missing");
                assert!(missing.ends_with("Unregistered"));
            }
            other => panic!("期望依赖无法解析错误, 实际: {:?}", other),
        }
        assert!(!instance::<ServiceA>(&registry).service_b.is_wired());
        assert!(!instance::<ServiceB>(&registry).service_a.is_wired());
        assert!(!instance::<Lonely>(&registry).service_a.is_wired());
        for entry in registry.all() {
            assert_eq!(entry.state, ComponentState::Constructed);
        }
    }

    #[test]
    fn test_unresolved_error_names_the_type_not_the_alias() {
        let descriptor = ComponentDescriptor::builder::<Lonely>()
            .named("web-handler")
            .default_constructor()
            .inject("missing", |l: &Lonely| &l.missing)
            .build();
        let mut registry = registry_of(vec![descriptor]);
        let err = DefaultDependencyResolver::new().resolve(&mut registry).unwrap_err();

        match &err {
            ContainerError::UnresolvedDependency { component, .. } => {
                assert_eq!(component, std::any::type_name::<Lonely>());
            }
            other => panic!("期望依赖无法解析错误, 实际: {:?}", other),
        }
        assert!(err.to_string().contains(std::any::type_name::<Lonely>()));
    }

    #[test]
    fn test_unvalidated_resolve_still_fails_fast() {
        let mut registry = registry_of(vec![lonely()]);
        let err = DefaultDependencyResolver::new()
            .with_validation(false)
            .resolve(&mut registry)
            .unwrap_err();

        assert!(matches!(err, ContainerError::UnresolvedDependency { .. }));
    }
}
