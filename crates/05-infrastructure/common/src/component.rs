//! 组件描述符定义
//!
//! 组件以显式的描述符向容器声明自己的能力：如何无参构造、有哪些依赖字段、
//! 注入完成后需要执行哪些初始化钩子。描述符在发现阶段结束后不再变化。

use crate::errors::BoxError;
use crate::inject::Inject;
use crate::lifecycle::IntoHookResult;
use crate::metadata::TypeKey;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 类型擦除后的组件实例
pub type ComponentInstance = Arc<dyn Any + Send + Sync>;

/// 组件构造函数类型
pub type ConstructorFn = Arc<dyn Fn() -> Result<ComponentInstance, BoxError> + Send + Sync>;

/// 依赖注入函数类型，参数依次为目标实例和依赖实例
pub type InjectorFn =
    Arc<dyn Fn(&ComponentInstance, &ComponentInstance) -> Result<(), String> + Send + Sync>;

/// 初始化钩子函数类型
pub type HookFn = Arc<dyn Fn(&ComponentInstance) -> Result<(), BoxError> + Send + Sync>;

/// 组件基础 trait
///
/// 通常由 `#[derive(Component)]` 生成实现。
pub trait Component: Send + Sync + 'static {
    /// 获取组件描述符
    fn descriptor() -> ComponentDescriptor
    where
        Self: Sized;
}

/// 依赖字段描述
#[derive(Clone)]
pub struct DependencySlot {
    name: String,
    required: TypeKey,
    injector: InjectorFn,
}

impl DependencySlot {
    /// 字段名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 需要的依赖类型
    pub fn required(&self) -> TypeKey {
        self.required
    }

    /// 将依赖注入到目标实例的字段中
    pub fn inject(&self, target: &ComponentInstance, dependency: &ComponentInstance) -> Result<(), String> {
        (self.injector)(target, dependency)
    }
}

impl fmt::Debug for DependencySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencySlot")
            .field("name", &self.name)
            .field("required", &self.required.name())
            .finish()
    }
}

/// 初始化钩子描述
#[derive(Clone)]
pub struct InitHook {
    name: String,
    hook: HookFn,
}

impl InitHook {
    /// 钩子名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 在目标实例上执行钩子
    pub fn invoke(&self, target: &ComponentInstance) -> Result<(), BoxError> {
        (self.hook)(target)
    }
}

impl fmt::Debug for InitHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitHook").field("name", &self.name).finish()
    }
}

/// 组件描述符
#[derive(Clone)]
pub struct ComponentDescriptor {
    /// 组件类型键
    type_key: TypeKey,
    /// 组件名称
    name: String,
    /// 组件所在的包（模块路径）
    package: String,
    /// 依赖字段，按声明顺序
    dependency_slots: Vec<DependencySlot>,
    /// 初始化钩子，按声明顺序
    init_hooks: Vec<InitHook>,
    /// 无参构造函数
    constructor: Option<ConstructorFn>,
}

impl ComponentDescriptor {
    /// 创建组件描述符构建器
    pub fn builder<T: Send + Sync + 'static>() -> ComponentDescriptorBuilder<T> {
        ComponentDescriptorBuilder::new()
    }

    /// 使用 `Default` 构造、没有依赖和钩子的组件描述符
    pub fn of<T: Default + Send + Sync + 'static>() -> Self {
        Self::builder::<T>().default_constructor().build()
    }

    /// 组件类型键
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// 组件名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 组件所在的包
    pub fn package(&self) -> &str {
        &self.package
    }

    /// 依赖字段
    pub fn dependency_slots(&self) -> &[DependencySlot] {
        &self.dependency_slots
    }

    /// 初始化钩子
    pub fn init_hooks(&self) -> &[InitHook] {
        &self.init_hooks
    }

    /// 是否声明了构造函数
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// 创建一个依赖字段全部未注入的新实例
    pub fn construct(&self) -> Result<ComponentInstance, BoxError> {
        match &self.constructor {
            Some(constructor) => constructor(),
            None => Err(format!("{} 没有声明无参构造函数", self.type_key).into()),
        }
    }

    /// 是否属于指定的包（包含子包）
    pub fn belongs_to(&self, package: &str) -> bool {
        self.package == package
            || self
                .package
                .strip_prefix(package)
                .is_some_and(|rest| rest.starts_with("::"))
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("type_key", &self.type_key.name())
            .field("name", &self.name)
            .field("package", &self.package)
            .field("dependency_slots", &self.dependency_slots)
            .field("init_hooks", &self.init_hooks)
            .field("constructor", &self.constructor.as_ref().map(|_| "<function>"))
            .finish()
    }
}

/// 组件描述符构建器
///
/// ```rust
/// use ioc_common::{ComponentDescriptor, Inject};
///
/// #[derive(Default)]
/// struct ServiceA;
///
/// #[derive(Default)]
/// struct ServiceB {
///     service_a: Inject<ServiceA>,
/// }
///
/// let descriptor = ComponentDescriptor::builder::<ServiceB>()
///     .default_constructor()
///     .inject("service_a", |b: &ServiceB| &b.service_a)
///     .build();
///
/// assert_eq!(descriptor.dependency_slots().len(), 1);
/// ```
pub struct ComponentDescriptorBuilder<T> {
    name: Option<String>,
    package: Option<String>,
    dependency_slots: Vec<DependencySlot>,
    init_hooks: Vec<InitHook>,
    constructor: Option<ConstructorFn>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> ComponentDescriptorBuilder<T> {
    fn new() -> Self {
        Self {
            name: None,
            package: None,
            dependency_slots: Vec::new(),
            init_hooks: Vec::new(),
            constructor: None,
            _marker: PhantomData,
        }
    }

    /// 设置组件名称，默认为简短类型名
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 设置组件所在的包，默认为类型的模块路径
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// 设置可能失败的无参构造函数
    pub fn constructor<F, E>(mut self, constructor: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.constructor = Some(Arc::new(move || {
            constructor()
                .map(|instance| Arc::new(instance) as ComponentInstance)
                .map_err(Into::into)
        }));
        self
    }

    /// 使用 `Default` 作为构造函数
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(|| Ok::<T, BoxError>(T::default()))
    }

    /// 声明依赖字段
    pub fn inject<D, F>(mut self, slot: impl Into<String>, accessor: F) -> Self
    where
        D: Send + Sync + 'static,
        F: Fn(&T) -> &Inject<D> + Send + Sync + 'static,
    {
        let injector: InjectorFn = Arc::new(move |target, dependency| {
            let target = target
                .downcast_ref::<T>()
                .ok_or_else(|| format!("目标实例不是 {}", std::any::type_name::<T>()))?;
            let dependency = Arc::clone(dependency)
                .downcast::<D>()
                .map_err(|_| format!("依赖实例不是 {}", std::any::type_name::<D>()))?;
            accessor(target)
                .wire(&dependency)
                .map_err(|_| "字段已经注入过".to_string())
        });

        self.dependency_slots.push(DependencySlot {
            name: slot.into(),
            required: TypeKey::of::<D>(),
            injector,
        });
        self
    }

    /// 声明初始化钩子，按声明顺序执行
    pub fn init<F, R>(mut self, hook: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: IntoHookResult,
    {
        let hook_fn: HookFn = Arc::new(move |target| {
            let target = target
                .downcast_ref::<T>()
                .ok_or_else(|| format!("目标实例不是 {}", std::any::type_name::<T>()))?;
            callback(target).into_hook_result()
        });

        self.init_hooks.push(InitHook {
            name: hook.into(),
            hook: hook_fn,
        });
        self
    }

    /// 构建组件描述符
    pub fn build(self) -> ComponentDescriptor {
        let type_key = TypeKey::of::<T>();
        let package = self.package.unwrap_or_else(|| {
            let name = type_key.name();
            let head = name.split('<').next().unwrap_or(name);
            head.rfind("::")
                .map_or_else(String::new, |idx| head[..idx].to_string())
        });

        ComponentDescriptor {
            type_key,
            name: self
                .name
                .unwrap_or_else(|| type_key.short_name().to_string()),
            package,
            dependency_slots: self.dependency_slots,
            init_hooks: self.init_hooks,
            constructor: self.constructor,
        }
    }
}
