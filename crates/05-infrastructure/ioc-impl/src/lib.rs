//! # IoC 容器具体实现
//!
//! 提供启动流水线各阶段的默认实现、组件来源和 [`IocContainer`]。
//!
//! ```rust,no_run
//! use ioc_common::{ComponentDescriptor, Inject};
//! use ioc_impl::{IocContainer, StaticComponentSource};
//!
//! #[derive(Default)]
//! struct ServiceA;
//!
//! #[derive(Default)]
//! struct ServiceB {
//!     service_a: Inject<ServiceA>,
//! }
//!
//! # async fn run() -> Result<(), ioc_common::ContainerError> {
//! let source = StaticComponentSource::new()
//!     .with_descriptor(ComponentDescriptor::of::<ServiceA>())
//!     .with_descriptor(
//!         ComponentDescriptor::builder::<ServiceB>()
//!             .default_constructor()
//!             .inject("service_a", |b: &ServiceB| &b.service_a)
//!             .build(),
//!     );
//!
//! let mut container = IocContainer::new();
//! container.bootstrap(&source).await?;
//!
//! let b = container.get::<ServiceB>()?;
//! assert!(b.service_a.points_to(&container.get::<ServiceA>()?));
//! # Ok(())
//! # }
//! ```

pub mod container;
pub mod factory;
pub mod lifecycle;
pub mod registry;
pub mod resolver;
pub mod sources;

pub use container::IocContainer;
pub use factory::DefaultInstanceFactory;
pub use lifecycle::DefaultLifecycleRunner;
pub use registry::ComponentRegistryImpl;
pub use resolver::DefaultDependencyResolver;
pub use sources::{CompositeComponentSource, PackageScanSource, StaticComponentSource};
