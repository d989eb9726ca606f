//! 依赖解析器抽象接口

use crate::registry::ComponentRegistry;
use ioc_common::ContainerError;

/// 依赖解析器 trait
///
/// 遍历注册表中每个实例的依赖字段，并注入注册表中对应的单例。
/// 调用前所有实例都已创建，因此注入顺序无关紧要，循环依赖也能正常注入。
pub trait DependencyResolver: Send + Sync {
    /// 注入所有依赖，完成后每个条目都处于 `Wired` 状态
    fn resolve(&self, registry: &mut dyn ComponentRegistry) -> Result<(), ContainerError>;

    /// 检查所有依赖字段是否都能解析，返回全部无法解析的字段
    fn validate(&self, registry: &dyn ComponentRegistry) -> Result<(), Vec<ContainerError>>;
}
