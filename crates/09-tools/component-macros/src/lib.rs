//! # Component Macros
//!
//! 这个 crate 提供了 `#[derive(Component)]`，为结构体生成组件描述符，
//! 并在程序启动时把组件注册到全局组件表。
//!
//! 生成的代码引用 `ioc_common` 和 `ctor`，使用方需要直接依赖这两个 crate。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use ioc_common::Inject;
//! use ioc_macros::Component;
//!
//! #[derive(Default, Component)]
//! #[component(init = "setup_cache")]
//! pub struct CacheConfig;
//!
//! impl CacheConfig {
//!     fn setup_cache(&self) {}
//! }
//!
//! #[derive(Default, Component)]
//! pub struct ServiceB {
//!     #[inject]
//!     service_a: Inject<ServiceA>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod utils;

/// 组件派生宏
///
/// # 结构体参数
///
/// - `name = "custom_name"` - 自定义组件名称，默认为结构体名
/// - `init = "method"` - 初始化钩子，可以重复声明，按声明顺序执行
/// - `constructor = "path"` - 无参构造函数，返回 `Self`
/// - `try_constructor = "path"` - 无参构造函数，返回 `Result<Self, E>`
/// - `manual` - 不自动注册到全局组件表
///
/// 没有声明构造函数时使用 `Default`。
///
/// # 字段参数
///
/// - `#[inject]` - 标注 `Inject<T>` 类型的依赖字段
#[proc_macro_derive(Component, attributes(component, inject))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
