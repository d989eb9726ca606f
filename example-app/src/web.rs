//! 模拟的请求分发
//!
//! 没有网络传输，请求路径由命令行给出，响应直接打印。

use crate::components::ServiceB;
use ioc_common::{ContainerError, Inject};
use ioc_composition::IocContainer;
use ioc_macros::Component;
use std::sync::Arc;
use tracing::{debug, warn};

/// 响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    fn html(status: u16, heading: &str) -> Self {
        Self {
            status,
            body: format!("<html><body><h1>{}</h1></body></html>", heading),
        }
    }

    fn not_found() -> Self {
        Self::html(404, "404 Not Found")
    }
}

/// 示例控制器
#[derive(Debug, Default, Component)]
pub struct ExampleController {
    #[inject]
    service_b: Inject<ServiceB>,
}

impl ExampleController {
    /// `/example`
    pub fn example(&self) -> Response {
        Response::html(200, "Hello, this is a mock servlet response!")
    }

    /// `/service`
    pub fn service(&self) -> Response {
        let result = self
            .service_b
            .get()
            .ok_or_else(|| anyhow::anyhow!("ServiceB 尚未注入"))
            .and_then(|service_b| service_b.call_service_a());

        match result {
            Ok(message) => Response::html(200, message),
            Err(e) => {
                warn!("处理 /service 失败: {}", e);
                Response::html(500, "500 Internal Server Error")
            }
        }
    }
}

/// 请求分发器
pub struct Dispatcher {
    controller: Arc<ExampleController>,
}

impl Dispatcher {
    /// 从容器中取出控制器
    pub fn from_container(container: &IocContainer) -> Result<Self, ContainerError> {
        Ok(Self {
            controller: container.get::<ExampleController>()?,
        })
    }

    /// 分发请求路径
    pub fn dispatch(&self, path: &str) -> Response {
        debug!("分发请求: {}", path);
        match path {
            "/example" => self.controller.example(),
            "/service" => self.controller.service(),
            _ => Response::not_found(),
        }
    }
}
