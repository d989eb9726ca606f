//! # IoC Abstractions
//!
//! 容器启动流水线的抽象层，每个阶段一个接口。
//!
//! ## 核心接口
//!
//! - [`ComponentSource`] - 组件来源接口
//! - [`InstanceFactory`] - 实例工厂接口（阶段一）
//! - [`ComponentRegistry`] - 组件注册表接口
//! - [`DependencyResolver`] - 依赖解析器接口（阶段二）
//! - [`LifecycleRunner`] - 生命周期执行器接口（阶段三）

pub mod container;
pub mod discovery;
pub mod factory;
pub mod graph;
pub mod lifecycle;
pub mod registry;
pub mod resolver;

pub use container::*;
pub use discovery::*;
pub use factory::*;
pub use graph::*;
pub use lifecycle::*;
pub use registry::*;
pub use resolver::*;
