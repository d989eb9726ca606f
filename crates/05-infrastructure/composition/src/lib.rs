//! # 容器组合层
//!
//! 负责把组件来源、容器配置和日志组合成一个已经启动的 [`IocContainer`]。
//!
//! ## 主要功能
//!
//! - **容器构建器**: 使用构建者模式登记组件、来源和配置
//! - **配置加载**: 配置文件与 `IOC_` 环境变量叠加
//! - **日志初始化**: 开发/生产两套预设
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use ioc_composition::{ContainerBuilder, LoggingConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let container = ContainerBuilder::new()
//!         .scan_package("my_app::components")
//!         .load_config("config/ioc.toml")
//!         .with_logging(LoggingConfig::development())
//!         .build()
//!         .await?;
//!
//!     println!("{} 个组件", container.components().len());
//!     container.shutdown();
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod error;
pub mod logging;
pub mod settings;

pub use builder::ContainerBuilder;
pub use error::{CompositionError, CompositionResult};
pub use logging::LoggingConfig;
pub use settings::{load_container_config, ENV_PREFIX};

pub use ioc_abstractions::ContainerConfig;
pub use ioc_impl::IocContainer;
