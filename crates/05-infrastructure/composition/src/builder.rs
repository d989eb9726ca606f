//! 容器构建器

use crate::error::CompositionResult;
use crate::logging::LoggingConfig;
use crate::settings::load_container_config;
use ioc_abstractions::{ComponentSource, ContainerConfig};
use ioc_common::{Component, ComponentDescriptor};
use ioc_impl::{CompositeComponentSource, IocContainer, PackageScanSource, StaticComponentSource};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 容器构建器
///
/// 使用建造者模式汇总组件来源和配置，`build` 返回已经启动完成的容器。
pub struct ContainerBuilder {
    /// 直接登记的组件
    components: StaticComponentSource,
    /// 其他组件来源
    sources: Vec<Box<dyn ComponentSource>>,
    /// 显式给出的容器配置
    config: Option<ContainerConfig>,
    /// 容器配置文件路径
    config_path: Option<PathBuf>,
    /// 日志配置，为空时不初始化日志
    logging: Option<LoggingConfig>,
}

impl ContainerBuilder {
    /// 创建新的容器构建器
    pub fn new() -> Self {
        Self {
            components: StaticComponentSource::new(),
            sources: Vec::new(),
            config: None,
            config_path: None,
            logging: None,
        }
    }

    /// 添加组件来源
    pub fn add_source<S: ComponentSource + 'static>(mut self, source: S) -> Self {
        debug!("添加组件来源: {}", source.name());
        self.sources.push(Box::new(source));
        self
    }

    /// 登记实现了 [`Component`] 的组件
    pub fn add_component<T: Component>(mut self) -> Self {
        debug!("登记组件: {}", std::any::type_name::<T>());
        self.components = self.components.with_component::<T>();
        self
    }

    /// 登记组件描述符
    pub fn add_descriptor(mut self, descriptor: ComponentDescriptor) -> Self {
        debug!("登记组件描述符: {}", descriptor.name());
        self.components = self.components.with_descriptor(descriptor);
        self
    }

    /// 扫描指定包（含子包）中自动注册的组件
    pub fn scan_package(self, package: impl Into<String>) -> Self {
        let package = package.into();
        info!("添加包扫描: {}", package);
        self.add_source(PackageScanSource::new(package))
    }

    /// 使用指定的容器配置，不再读取配置文件和环境变量
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// 从配置文件加载容器配置，`IOC_` 环境变量覆盖文件中的值
    pub fn load_config<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// 构建并启动容器
    pub async fn build(self) -> CompositionResult<IocContainer> {
        // 只有在明确配置了日志时才初始化日志，避免在测试中重复安装
        if let Some(logging) = &self.logging {
            logging.init()?;
        }

        let config = match self.config {
            Some(config) => config,
            None => load_container_config(self.config_path.as_deref())?,
        };

        let mut source = CompositeComponentSource::new();
        if !self.components.is_empty() {
            source.add_source(Box::new(self.components));
        }
        for extra in self.sources {
            source.add_source(extra);
        }

        info!("开始构建容器: {}, 共 {} 个组件来源", config.name, source.len());
        let mut container = IocContainer::with_config(config);
        container.bootstrap(&source).await?;

        Ok(container)
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
