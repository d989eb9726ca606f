//! # 示例应用程序
//!
//! 演示如何通过包扫描启动 IoC 容器，并从容器中取出组件处理请求

mod components;
mod web;

use clap::Parser;
use components::{CacheConfig, ServiceB, ServiceConfig};
use ioc_composition::{ContainerBuilder, IocContainer, LoggingConfig};
use std::path::PathBuf;
use tracing::info;
use web::Dispatcher;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "ioc-demo")]
#[command(about = "Lorn IoC 示例应用")]
struct Args {
    /// 要分发的请求路径
    #[arg(default_values_t = vec!["/example".to_string()])]
    paths: Vec<String>,

    /// 容器配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 使用 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,

    /// 以 JSON 打印组件摘要
    #[arg(long)]
    describe: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logging = LoggingConfig {
        json_format: args.json_logs,
        ..LoggingConfig::default()
    }
    .with_level(parse_log_level(&args.log_level));

    let container = build_container(&args, logging).await?;
    info!("Lorn IoC 示例应用已启动");

    if args.describe {
        println!("{}", serde_json::to_string_pretty(&container.components())?);
        println!("{}", serde_json::to_string_pretty(&container.stats())?);
    }

    demonstrate_components(&container)?;

    let dispatcher = Dispatcher::from_container(&container)?;
    for path in &args.paths {
        let response = dispatcher.dispatch(path);
        println!("{} {} -> {}", response.status, path, response.body);
    }

    container.shutdown();
    info!("应用已关闭");
    Ok(())
}

/// 构建容器
async fn build_container(args: &Args, logging: LoggingConfig) -> anyhow::Result<IocContainer> {
    let mut builder = ContainerBuilder::new()
        .scan_package(module_path!())
        .with_logging(logging);

    if let Some(path) = &args.config {
        builder = builder.load_config(path);
    }

    Ok(builder.build().await?)
}

/// 演示单例组件
fn demonstrate_components(container: &IocContainer) -> anyhow::Result<()> {
    let cache = container.get::<CacheConfig>()?;
    let service = container.get::<ServiceConfig>()?;
    info!("CacheConfig 已初始化: {}", cache.is_ready());
    info!("ServiceConfig 已初始化: {}", service.is_ready());

    let service_b = container.get::<ServiceB>()?;
    info!("ServiceB 调用结果: {}", service_b.call_service_a()?);
    Ok(())
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
