//! 类型元数据
//!
//! 提供组件类型的唯一标识

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 组件类型键
///
/// 以 [`TypeId`] 作为唯一身份，同时保留完整类型名称用于日志和错误信息。
/// 相等性与哈希只取决于 `TypeId`。
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    /// 类型ID
    id: TypeId,
    /// 完整类型名称（含模块路径）
    name: &'static str,
}

impl TypeKey {
    /// 从类型获取类型键
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 类型ID
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// 完整类型名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        // 泛型参数中也可能出现 `::`，只在第一个 `<` 之前截取
        let head = self.name.split('<').next().unwrap_or(self.name);
        let start = head.rfind("::").map_or(0, |idx| idx + 2);
        &self.name[start..]
    }

    /// 判断是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct CacheConfig;
    struct Wrapper<T>(T);

    #[test]
    fn test_type_key_identity() {
        let a = TypeKey::of::<CacheConfig>();
        let b = TypeKey::of::<CacheConfig>();
        let c = TypeKey::of::<String>();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.is::<CacheConfig>());

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn test_short_name() {
        assert_eq!(TypeKey::of::<CacheConfig>().short_name(), "CacheConfig");
        assert_eq!(
            TypeKey::of::<Wrapper<CacheConfig>>().short_name(),
            "Wrapper<ioc_common::metadata::tests::CacheConfig>"
        );
        assert_eq!(TypeKey::of::<u32>().short_name(), "u32");
    }
}
