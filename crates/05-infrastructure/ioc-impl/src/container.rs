//! IoC 容器实现

use crate::factory::DefaultInstanceFactory;
use crate::lifecycle::DefaultLifecycleRunner;
use crate::registry::ComponentRegistryImpl;
use crate::resolver::DefaultDependencyResolver;
use chrono::Utc;
use ioc_abstractions::{
    ensure_unique, ComponentRegistry, ComponentSource, ComponentSummary, ContainerConfig,
    ContainerStats, DependencyGraph, DependencyResolver, InstanceFactory, LifecycleRunner,
    RegistryEntry,
};
use ioc_common::{
    ComponentDescriptor, ComponentInstance, ComponentState, ContainerError, ContainerResult,
    ContainerState, TypeKey,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// IoC 容器
///
/// `bootstrap` 依次执行构造、注入、初始化三个阶段，任何阶段失败都会让容器进入
/// 终止状态 [`ContainerState::Failed`] 并释放已创建的实例。启动成功后注册表只读，
/// 可以在多个线程间共享 `&IocContainer` 并发调用 `get`。
pub struct IocContainer {
    /// 容器配置
    config: ContainerConfig,
    /// 组件注册表
    registry: ComponentRegistryImpl,
    /// 阶段一：实例工厂
    factory: Box<dyn InstanceFactory>,
    /// 阶段二：依赖解析器
    resolver: Box<dyn DependencyResolver>,
    /// 阶段三：生命周期执行器
    lifecycle: Box<dyn LifecycleRunner>,
    /// 容器状态
    state: ContainerState,
    /// 统计信息
    stats: ContainerStats,
    /// 依赖关系图
    graph: DependencyGraph,
}

impl IocContainer {
    /// 使用默认配置创建容器
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// 使用指定配置创建容器
    pub fn with_config(config: ContainerConfig) -> Self {
        let resolver =
            DefaultDependencyResolver::new().with_validation(config.enable_dependency_validation);

        Self {
            config,
            registry: ComponentRegistryImpl::new(),
            factory: Box::new(DefaultInstanceFactory::new()),
            resolver: Box::new(resolver),
            lifecycle: Box::new(DefaultLifecycleRunner::new()),
            state: ContainerState::Empty,
            stats: ContainerStats::default(),
            graph: DependencyGraph::new(),
        }
    }

    /// 替换实例工厂
    pub fn with_factory(mut self, factory: impl InstanceFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    /// 替换依赖解析器
    pub fn with_resolver(mut self, resolver: impl DependencyResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// 替换生命周期执行器
    pub fn with_lifecycle_runner(mut self, lifecycle: impl LifecycleRunner + 'static) -> Self {
        self.lifecycle = Box::new(lifecycle);
        self
    }

    /// 启动容器
    ///
    /// 只能在 [`ContainerState::Empty`] 状态下调用一次。
    pub async fn bootstrap(&mut self, source: &dyn ComponentSource) -> ContainerResult<()> {
        if self.state != ContainerState::Empty {
            return Err(ContainerError::AlreadyBootstrapped { state: self.state });
        }

        info!("启动容器: {} (来源: {})", self.config.name, source.name());

        let result = self.run_phases(source).await;
        match result {
            Ok(()) => {
                self.transition(ContainerState::Ready);
                self.stats.bootstrapped_at = Some(Utc::now());
                info!(
                    "容器 {} 启动完成，共 {} 个组件",
                    self.config.name,
                    self.registry.len()
                );
                if self.config.enable_performance_monitoring {
                    info!(
                        "启动耗时: 构造 {}us, 注入 {}us, 初始化 {}us, 合计 {}us",
                        self.stats.construct_time_us,
                        self.stats.wire_time_us,
                        self.stats.initialize_time_us,
                        self.stats.total_bootstrap_time_us()
                    );
                }
                Ok(())
            }
            Err(err) => {
                error!("容器 {} 启动失败 ({}): {}", self.config.name, self.state, err);
                self.registry.clear();
                self.graph = DependencyGraph::new();
                self.stats = ContainerStats {
                    container_id: self.stats.container_id,
                    ..ContainerStats::default()
                };
                self.transition(ContainerState::Failed);
                Err(err)
            }
        }
    }

    async fn run_phases(&mut self, source: &dyn ComponentSource) -> ContainerResult<()> {
        let descriptors = source.discover().await?;
        ensure_unique(&descriptors)?;
        self.graph = DependencyGraph::from_descriptors(&descriptors);

        // 阶段一：构造
        self.transition(ContainerState::Constructing);
        let started = Instant::now();
        for descriptor in descriptors {
            let instance = self.factory.create(&descriptor)?;
            self.registry.register(Arc::new(descriptor), instance)?;
        }
        self.registry.freeze();
        self.stats.registered_components = self.registry.len();
        self.stats.construct_time_us = elapsed_us(started);
        info!("构造阶段完成: {} 个组件", self.registry.len());

        // 阶段二：注入
        self.transition(ContainerState::Wiring);
        let started = Instant::now();
        self.resolver.resolve(&mut self.registry)?;
        self.stats.wire_time_us = elapsed_us(started);
        self.stats.wired_slots =
            self.count_reached(ComponentState::Wired, |d| d.dependency_slots().len());
        info!("注入阶段完成: {} 个依赖字段", self.stats.wired_slots);

        let cycles = self.graph.cycles();
        self.stats.dependency_cycles = cycles.len();
        if self.config.enable_cycle_report {
            for cycle in &cycles {
                warn!("检测到循环依赖: {}", self.graph.describe_cycle(cycle));
            }
        }

        // 阶段三：初始化
        self.transition(ContainerState::Initializing);
        let started = Instant::now();
        self.lifecycle.initialize_all(&mut self.registry)?;
        self.stats.initialize_time_us = elapsed_us(started);
        self.stats.invoked_hooks =
            self.count_reached(ComponentState::Initialized, |d| d.init_hooks().len());
        info!("初始化阶段完成: {} 个钩子", self.stats.invoked_hooks);

        Ok(())
    }

    /// 统计已到达指定状态的组件上的字段或钩子数量
    fn count_reached(
        &self,
        state: ComponentState,
        count: impl Fn(&ComponentDescriptor) -> usize,
    ) -> usize {
        self.registry
            .all()
            .iter()
            .filter(|entry| entry.state >= state)
            .map(|entry| count(entry.descriptor.as_ref()))
            .sum()
    }

    fn transition(&mut self, next: ContainerState) {
        debug!("容器状态: {} -> {}", self.state, next);
        self.state = next;
        self.stats.state = next;
    }

    fn ensure_ready(&self) -> ContainerResult<()> {
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(ContainerError::NotReady { state: self.state })
        }
    }

    /// 按类型获取单例
    pub fn get<T: Send + Sync + 'static>(&self) -> ContainerResult<Arc<T>> {
        let entry = self.entry(&TypeKey::of::<T>())?;
        Arc::clone(&entry.instance)
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                actual: entry.type_key().name().to_string(),
            })
    }

    /// 按类型键获取类型擦除的单例
    pub fn get_by_key(&self, key: &TypeKey) -> ContainerResult<ComponentInstance> {
        Ok(Arc::clone(&self.entry(key)?.instance))
    }

    /// 按组件名称获取类型擦除的单例
    pub fn get_by_name(&self, name: &str) -> ContainerResult<ComponentInstance> {
        self.ensure_ready()?;
        Ok(Arc::clone(&self.registry.lookup_by_name(name)?.instance))
    }

    fn entry(&self, key: &TypeKey) -> ContainerResult<&RegistryEntry> {
        self.ensure_ready()?;
        self.registry.lookup(key)
    }

    /// 容器就绪且注册了指定类型
    pub fn contains<T: 'static>(&self) -> bool {
        self.state.is_ready() && self.registry.contains(&TypeKey::of::<T>())
    }

    /// 容器状态
    pub fn state(&self) -> ContainerState {
        self.state
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 统计信息
    pub fn stats(&self) -> ContainerStats {
        self.stats.clone()
    }

    /// 所有组件的摘要，按注册顺序
    pub fn components(&self) -> Vec<ComponentSummary> {
        self.registry
            .all()
            .iter()
            .map(ComponentSummary::from)
            .collect()
    }

    /// 依赖关系图
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// 关闭容器并释放所有实例
    pub fn shutdown(mut self) {
        info!("关闭容器: {}，释放 {} 个组件", self.config.name, self.registry.len());
        self.registry.clear();
    }
}

impl Default for IocContainer {
    fn default() -> Self {
        Self::new()
    }
}

fn elapsed_us(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX)
}
