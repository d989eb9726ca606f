//! 依赖注入字段

use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

/// 依赖注入字段
///
/// 组件用它声明一个需要由容器填充的依赖。字段在阶段二被赋值且只能赋值一次。
/// 字段只持有弱引用，实例的所有权始终属于注册表，因此相互依赖的组件不会形成引用环。
pub struct Inject<T> {
    slot: OnceLock<Weak<T>>,
}

impl<T> Inject<T> {
    /// 创建未注入的字段
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// 获取已注入的依赖
    ///
    /// 字段尚未注入，或容器已经释放实例时返回 `None`。
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.get().and_then(Weak::upgrade)
    }

    /// 是否已注入
    pub fn is_wired(&self) -> bool {
        self.slot.get().is_some()
    }

    /// 注入依赖
    ///
    /// 重复注入返回 `Err`，携带被拒绝的实例。
    pub fn wire(&self, dependency: &Arc<T>) -> Result<(), Arc<T>> {
        self.slot
            .set(Arc::downgrade(dependency))
            .map_err(|_| Arc::clone(dependency))
    }

    /// 判断是否注入了指定实例
    pub fn points_to(&self, other: &Arc<T>) -> bool {
        self.slot
            .get()
            .is_some_and(|weak| std::ptr::eq(weak.as_ptr(), Arc::as_ptr(other)))
    }
}

impl<T> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("type", &std::any::type_name::<T>())
            .field("wired", &self.is_wired())
            .finish()
    }
}
