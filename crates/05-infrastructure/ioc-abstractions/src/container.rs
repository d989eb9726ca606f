//! 容器配置与统计信息

use crate::registry::RegistryEntry;
use chrono::{DateTime, Utc};
use ioc_common::{ComponentState, ContainerState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 容器名称，用于日志
    pub name: String,
    /// 注入前先检查所有依赖字段，任何字段都无法解析时不注入任何字段
    pub enable_dependency_validation: bool,
    /// 注入完成后报告循环依赖
    pub enable_cycle_report: bool,
    /// 记录各阶段耗时
    pub enable_performance_monitoring: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            enable_dependency_validation: true,
            enable_cycle_report: true,
            enable_performance_monitoring: false,
        }
    }
}

impl ContainerConfig {
    /// 设置容器名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Serialize)]
pub struct ContainerStats {
    /// 容器实例ID
    pub container_id: Uuid,
    /// 容器状态
    pub state: ContainerState,
    /// 启动完成时间
    pub bootstrapped_at: Option<DateTime<Utc>>,
    /// 已注册组件数量
    pub registered_components: usize,
    /// 已注入的依赖字段数量
    pub wired_slots: usize,
    /// 已执行的初始化钩子数量
    pub invoked_hooks: usize,
    /// 检测到的循环依赖数量
    pub dependency_cycles: usize,
    /// 阶段一耗时（微秒）
    pub construct_time_us: u64,
    /// 阶段二耗时（微秒）
    pub wire_time_us: u64,
    /// 阶段三耗时（微秒）
    pub initialize_time_us: u64,
}

impl Default for ContainerStats {
    fn default() -> Self {
        Self {
            container_id: Uuid::new_v4(),
            state: ContainerState::Empty,
            bootstrapped_at: None,
            registered_components: 0,
            wired_slots: 0,
            invoked_hooks: 0,
            dependency_cycles: 0,
            construct_time_us: 0,
            wire_time_us: 0,
            initialize_time_us: 0,
        }
    }
}

impl ContainerStats {
    /// 启动总耗时（微秒）
    pub fn total_bootstrap_time_us(&self) -> u64 {
        self.construct_time_us + self.wire_time_us + self.initialize_time_us
    }
}

/// 组件摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSummary {
    /// 组件名称
    pub name: String,
    /// 完整类型名称
    pub type_name: String,
    /// 所在包
    pub package: String,
    /// 生命周期状态
    pub state: ComponentState,
    /// 依赖字段（字段名, 依赖类型）
    pub slots: Vec<(String, String)>,
    /// 初始化钩子名称
    pub hooks: Vec<String>,
}

impl From<&RegistryEntry> for ComponentSummary {
    fn from(entry: &RegistryEntry) -> Self {
        let descriptor = &entry.descriptor;
        Self {
            name: descriptor.name().to_string(),
            type_name: descriptor.type_key().name().to_string(),
            package: descriptor.package().to_string(),
            state: entry.state,
            slots: descriptor
                .dependency_slots()
                .iter()
                .map(|slot| (slot.name().to_string(), slot.required().name().to_string()))
                .collect(),
            hooks: descriptor
                .init_hooks()
                .iter()
                .map(|hook| hook.name().to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ContainerConfig::default();
        assert_eq!(config.name, "default");
        assert!(config.enable_dependency_validation);
        assert!(config.enable_cycle_report);
        assert!(!config.enable_performance_monitoring);
    }

    #[test]
    fn test_config_partial_deserialize() {
        let config: ContainerConfig =
            serde_json::from_str(r#"{ "name": "demo", "enable_cycle_report": false }"#).unwrap();

        assert_eq!(config.name, "demo");
        assert!(!config.enable_cycle_report);
        assert!(config.enable_dependency_validation);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = ContainerStats {
            construct_time_us: 10,
            wire_time_us: 20,
            initialize_time_us: 30,
            ..ContainerStats::default()
        };

        assert_eq!(stats.total_bootstrap_time_us(), 60);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["state"], "Empty");
        assert!(json["bootstrapped_at"].is_null());
    }
}
