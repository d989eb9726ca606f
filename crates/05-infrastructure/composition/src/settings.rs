//! 容器配置加载
//!
//! 配置按以下顺序叠加，后者覆盖前者：
//!
//! 1. [`ContainerConfig`] 默认值
//! 2. 配置文件（TOML/JSON/YAML，按扩展名识别，可选）
//! 3. `IOC_` 前缀的环境变量，例如 `IOC_ENABLE_CYCLE_REPORT=false`

use crate::error::CompositionError;
use ioc_abstractions::ContainerConfig;
use std::path::Path;
use tracing::{debug, error};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "IOC";

/// 加载容器配置
pub fn load_container_config(path: Option<&Path>) -> Result<ContainerConfig, CompositionError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        debug!("加载容器配置文件: {}", path.display());
        builder = builder.add_source(config::File::from(path).required(false));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| {
            error!("容器配置构建失败: {}", e);
            e
        })?;

    let config: ContainerConfig = settings.try_deserialize()?;
    debug!("容器配置: {:?}", config);
    Ok(config)
}
