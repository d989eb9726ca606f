//! 组件来源实现

use async_trait::async_trait;
use ioc_abstractions::{ensure_unique, ComponentSource};
use ioc_common::{global_components, Component, ComponentDescriptor, ContainerError};
use tracing::{debug, info};

/// 静态组件来源
///
/// 直接返回构造时给出的描述符列表。
#[derive(Debug, Clone, Default)]
pub struct StaticComponentSource {
    descriptors: Vec<ComponentDescriptor>,
}

impl StaticComponentSource {
    /// 创建空的静态来源
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加描述符
    pub fn with_descriptor(mut self, descriptor: ComponentDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// 添加实现了 [`Component`] 的组件
    pub fn with_component<T: Component>(self) -> Self {
        self.with_descriptor(T::descriptor())
    }

    /// 描述符数量
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl From<Vec<ComponentDescriptor>> for StaticComponentSource {
    fn from(descriptors: Vec<ComponentDescriptor>) -> Self {
        Self { descriptors }
    }
}

#[async_trait]
impl ComponentSource for StaticComponentSource {
    async fn discover(&self) -> Result<Vec<ComponentDescriptor>, ContainerError> {
        debug!("静态来源提供 {} 个组件", self.descriptors.len());
        Ok(self.descriptors.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// 包扫描来源
///
/// 从全局组件表中挑出属于指定包（含子包）的组件。
/// 全局组件表由 `#[derive(Component)]` 在程序启动时填充。
#[derive(Debug, Clone)]
pub struct PackageScanSource {
    package: String,
}

impl PackageScanSource {
    /// 创建扫描指定包的来源
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }

    /// 扫描的包
    pub fn package(&self) -> &str {
        &self.package
    }
}

#[async_trait]
impl ComponentSource for PackageScanSource {
    async fn discover(&self) -> Result<Vec<ComponentDescriptor>, ContainerError> {
        if self.package.is_empty() {
            return Err(ContainerError::discovery(self.name(), "扫描包名不能为空"));
        }

        let descriptors: Vec<_> = global_components()
            .into_iter()
            .filter(|descriptor| descriptor.belongs_to(&self.package))
            .collect();

        info!("扫描包 {} 发现 {} 个组件", self.package, descriptors.len());
        Ok(descriptors)
    }

    fn name(&self) -> &str {
        &self.package
    }
}

/// 组合来源
///
/// 按添加顺序依次发现，结果拼接在一起。多个来源提供同一类型时报告重复注册。
#[derive(Default)]
pub struct CompositeComponentSource {
    sources: Vec<Box<dyn ComponentSource>>,
}

impl CompositeComponentSource {
    /// 创建空的组合来源
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加来源
    pub fn add_source(&mut self, source: Box<dyn ComponentSource>) {
        self.sources.push(source);
    }

    /// 添加来源（链式）
    pub fn with_source(mut self, source: impl ComponentSource + 'static) -> Self {
        self.add_source(Box::new(source));
        self
    }

    /// 来源数量
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[async_trait]
impl ComponentSource for CompositeComponentSource {
    async fn discover(&self) -> Result<Vec<ComponentDescriptor>, ContainerError> {
        let mut all = Vec::new();
        for source in &self.sources {
            let descriptors = source.discover().await?;
            debug!("来源 {} 提供 {} 个组件", source.name(), descriptors.len());
            all.extend(descriptors);
        }
        ensure_unique(&all)?;
        Ok(all)
    }

    fn name(&self) -> &str {
        "composite"
    }
}
