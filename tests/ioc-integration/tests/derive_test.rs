//! `#[derive(Component)]` 与包扫描的端到端测试

use async_trait::async_trait;
use ioc_abstractions::ComponentSource;
use ioc_common::{Component, ComponentDescriptor, ContainerError, ContainerState};
use ioc_composition::{CompositionError, ContainerBuilder, ContainerConfig};
use ioc_impl::{IocContainer, PackageScanSource};
use mockall::mock;
use std::sync::Arc;

mod app {
    use ioc_common::Inject;
    use ioc_macros::Component;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default, Component)]
    #[component(init = "setup_cache")]
    pub struct CacheConfig {
        pub setup_calls: AtomicUsize,
    }

    impl CacheConfig {
        fn setup_cache(&self) {
            self.setup_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default, Component)]
    #[component(init = "setup_service")]
    pub struct ServiceConfig {
        pub setup_calls: AtomicUsize,
    }

    impl ServiceConfig {
        fn setup_service(&self) -> Result<(), std::io::Error> {
            self.setup_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default, Component)]
    pub struct ServiceA;

    #[derive(Default, Component)]
    #[component(name = "serviceB")]
    pub struct ServiceB {
        #[inject]
        pub service_a: Inject<ServiceA>,
    }

    #[derive(Component)]
    #[component(constructor = "Greeter::english", init = "first", init = "second")]
    pub struct Greeter {
        pub greeting: &'static str,
        pub events: Mutex<Vec<&'static str>>,
    }

    impl Greeter {
        fn english() -> Self {
            Self {
                greeting: "hello",
                events: Mutex::new(Vec::new()),
            }
        }

        fn first(&self) {
            if let Ok(mut events) = self.events.lock() {
                events.push("first");
            }
        }

        fn second(&self) {
            if let Ok(mut events) = self.events.lock() {
                events.push("second");
            }
        }
    }

    pub mod web {
        use super::{Greeter, ServiceB};
        use ioc_common::Inject;
        use ioc_macros::Component;

        #[derive(Default, Component)]
        pub struct Controller {
            #[inject]
            pub service_b: Inject<ServiceB>,
            #[inject]
            pub greeter: Inject<Greeter>,
        }
    }
}

mod cyclic {
    use ioc_common::Inject;
    use ioc_macros::Component;

    #[derive(Default, Component)]
    pub struct Left {
        #[inject]
        pub right: Inject<Right>,
    }

    #[derive(Default, Component)]
    pub struct Right {
        #[inject]
        pub left: Inject<Left>,
    }
}

mod broken {
    use ioc_common::Inject;
    use ioc_macros::Component;

    #[derive(Default, Component)]
    #[component(manual)]
    pub struct NeverScanned;

    #[derive(Default, Component)]
    pub struct Orphan {
        #[inject]
        pub parent: Inject<NeverScanned>,
    }
}

mod failing {
    use ioc_macros::Component;

    #[derive(Component)]
    #[component(try_constructor = "Database::connect")]
    pub struct Database;

    impl Database {
        fn connect() -> Result<Self, std::io::Error> {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))
        }
    }
}

mock! {
    pub Source {}

    #[async_trait]
    impl ComponentSource for Source {
        async fn discover(&self) -> Result<Vec<ComponentDescriptor>, ContainerError>;
    }
}

async fn scan(package: &str) -> Result<IocContainer, ContainerError> {
    let mut container = IocContainer::new();
    container.bootstrap(&PackageScanSource::new(package)).await?;
    Ok(container)
}

#[tokio::test]
async fn test_package_scan_bootstraps_app() {
    let container = scan("derive_test::app").await.unwrap();

    assert_eq!(container.components().len(), 6);
    let cache = container.get::<app::CacheConfig>().unwrap();
    let service = container.get::<app::ServiceConfig>().unwrap();
    assert_eq!(cache.setup_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(service.setup_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_injected_dependency_is_the_singleton() {
    let container = scan("derive_test::app").await.unwrap();

    let a = container.get::<app::ServiceA>().unwrap();
    let b = container.get::<app::ServiceB>().unwrap();
    assert!(Arc::ptr_eq(&b.service_a.get().unwrap(), &a));

    let controller = container.get::<app::web::Controller>().unwrap();
    assert!(controller.service_b.points_to(&b));
    assert_eq!(controller.greeter.get().unwrap().greeting, "hello");
}

#[tokio::test]
async fn test_descriptor_metadata() {
    let descriptor = <app::ServiceB as Component>::descriptor();
    assert_eq!(descriptor.name(), "serviceB");
    assert_eq!(descriptor.package(), "derive_test::app");
    assert_eq!(descriptor.dependency_slots()[0].name(), "service_a");

    let container = scan("derive_test::app").await.unwrap();
    let by_name = container.get_by_name("serviceB").unwrap();
    assert!(by_name.is::<app::ServiceB>());
}

#[tokio::test]
async fn test_hooks_follow_declaration_order() {
    let container = scan("derive_test::app").await.unwrap();
    let greeter = container.get::<app::Greeter>().unwrap();
    assert_eq!(*greeter.events.lock().unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn test_sub_package_scan() {
    let result = scan("derive_test::app::web").await;

    assert!(matches!(
        result,
        Err(ContainerError::UnresolvedDependency { .. })
    ));
}

#[tokio::test]
async fn test_cycle_via_derive() {
    let container = scan("derive_test::cyclic").await.unwrap();

    let left = container.get::<cyclic::Left>().unwrap();
    let right = container.get::<cyclic::Right>().unwrap();
    assert!(left.right.points_to(&right));
    assert!(right.left.points_to(&left));
    assert_eq!(container.stats().dependency_cycles, 1);
}

#[tokio::test]
async fn test_manual_component_is_not_scanned() {
    let mut container = IocContainer::new();
    let err = container
        .bootstrap(&PackageScanSource::new("derive_test::broken"))
        .await
        .unwrap_err();

    match err {
        ContainerError::UnresolvedDependency { component, missing, .. } => {
            assert!(component.ends_with("broken::Orphan"));
            assert!(missing.ends_with("NeverScanned"));
        }
        other => panic!("期望依赖无法解析错误, 实际: {:?}", other),
    }
    assert_eq!(container.state(), ContainerState::Failed);
}

#[tokio::test]
async fn test_manual_component_via_builder() {
    let container = ContainerBuilder::new()
        .scan_package("derive_test::broken")
        .add_component::<broken::NeverScanned>()
        .with_config(ContainerConfig::default())
        .build()
        .await
        .unwrap();

    let orphan = container.get::<broken::Orphan>().unwrap();
    assert!(orphan.parent.is_wired());
}

#[tokio::test]
async fn test_failing_try_constructor() {
    let result = ContainerBuilder::new()
        .scan_package("derive_test::failing")
        .with_config(ContainerConfig::default())
        .build()
        .await;

    match result {
        Err(CompositionError::Container(ContainerError::Instantiation { source, .. })) => {
            assert_eq!(source.to_string(), "connection refused");
        }
        Err(other) => panic!("期望实例化错误, 实际: {}", other),
        Ok(_) => panic!("构造失败时不应启动成功"),
    }
}

#[tokio::test]
async fn test_mock_source_with_derived_descriptors() -> anyhow::Result<()> {
    let mut source = MockSource::new();
    source.expect_discover().times(1).returning(|| {
        Ok(vec![
            <app::ServiceA as Component>::descriptor(),
            <app::ServiceB as Component>::descriptor(),
        ])
    });

    let mut container = IocContainer::new();
    container.bootstrap(&source).await?;

    let b = container.get::<app::ServiceB>()?;
    assert!(b.service_a.points_to(&container.get::<app::ServiceA>()?));
    assert!(!container.contains::<app::CacheConfig>());

    let summaries = serde_json::to_value(container.components())?;
    assert_eq!(summaries[1]["name"], "serviceB");
    assert_eq!(summaries[1]["state"], "Initialized");
    Ok(())
}
