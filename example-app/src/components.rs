//! 示例组件

use ioc_common::Inject;
use ioc_macros::Component;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// 缓存配置
#[derive(Debug, Default, Component)]
#[component(init = "setup_cache")]
pub struct CacheConfig {
    ready: AtomicBool,
}

impl CacheConfig {
    fn setup_cache(&self) {
        self.ready.store(true, Ordering::SeqCst);
        info!("缓存配置完成");
    }

    /// 初始化钩子是否已执行
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

/// 服务配置
#[derive(Debug, Default, Component)]
#[component(init = "setup_service")]
pub struct ServiceConfig {
    ready: AtomicBool,
}

impl ServiceConfig {
    fn setup_service(&self) {
        self.ready.store(true, Ordering::SeqCst);
        info!("服务配置完成");
    }

    /// 初始化钩子是否已执行
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default, Component)]
pub struct ServiceA;

impl ServiceA {
    pub fn do_something(&self) -> &'static str {
        "ServiceA is working!"
    }
}

#[derive(Debug, Default, Component)]
pub struct ServiceB {
    #[inject]
    service_a: Inject<ServiceA>,
}

impl ServiceB {
    /// 调用注入的 ServiceA
    pub fn call_service_a(&self) -> anyhow::Result<&'static str> {
        let service_a = self
            .service_a
            .get()
            .ok_or_else(|| anyhow::anyhow!("ServiceA 尚未注入"))?;
        Ok(service_a.do_something())
    }
}
