//! 组件派生宏实现

use crate::utils::{
    expect_lit_str, field_has_attribute, is_inject_type, parse_ident_lit, parse_path_lit,
    registration_fn_name,
};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, Index, Member, Path, Result};

/// 组件构造方式
#[derive(Clone)]
pub enum Constructor {
    /// 使用 `Default`
    Default,
    /// 不会失败的无参函数
    Infallible(Path),
    /// 返回 `Result<Self, E>` 的无参函数
    Fallible(Path),
}

/// `#[component(...)]` 参数
#[derive(Clone)]
pub struct ComponentArgs {
    /// 自定义组件名称
    pub name: Option<String>,
    /// 初始化钩子，按声明顺序
    pub init_hooks: Vec<Ident>,
    /// 构造方式
    pub constructor: Constructor,
    /// 不自动注册到全局组件表
    pub manual: bool,
}

impl Default for ComponentArgs {
    fn default() -> Self {
        Self {
            name: None,
            init_hooks: Vec::new(),
            constructor: Constructor::Default,
            manual: false,
        }
    }
}

impl ComponentArgs {
    /// 从结构体上的所有 `#[component]` 属性中解析参数
    pub fn from_attributes(attrs: &[Attribute]) -> Result<Self> {
        let mut args = Self::default();
        let mut constructor_set = false;

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("component")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit = expect_lit_str(&meta.value()?.parse()?)?;
                    args.name = Some(lit.value());
                } else if meta.path.is_ident("init") {
                    let lit = expect_lit_str(&meta.value()?.parse()?)?;
                    args.init_hooks.push(parse_ident_lit(&lit)?);
                } else if meta.path.is_ident("constructor") || meta.path.is_ident("try_constructor") {
                    if constructor_set {
                        return Err(meta.error("只能声明一个构造函数"));
                    }
                    let lit = expect_lit_str(&meta.value()?.parse()?)?;
                    let path = parse_path_lit(&lit)?;
                    args.constructor = if meta.path.is_ident("constructor") {
                        Constructor::Infallible(path)
                    } else {
                        Constructor::Fallible(path)
                    };
                    constructor_set = true;
                } else if meta.path.is_ident("manual") {
                    args.manual = true;
                } else {
                    return Err(meta.error("未知的 component 参数"));
                }
                Ok(())
            })?;
        }

        Ok(args)
    }
}

/// 依赖字段
struct InjectField {
    member: Member,
    slot_name: String,
}

/// 收集标注了 `#[inject]` 的字段
fn inject_fields(input: &DeriveInput) -> Result<Vec<InjectField>> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Component)] 只能用于结构体",
            ))
        }
    };

    let mut result = Vec::new();
    let iter: Box<dyn Iterator<Item = _>> = match fields {
        Fields::Named(named) => Box::new(named.named.iter()),
        Fields::Unnamed(unnamed) => Box::new(unnamed.unnamed.iter()),
        Fields::Unit => Box::new(std::iter::empty()),
    };

    for (index, field) in iter.enumerate() {
        if !field_has_attribute(field, "inject") {
            continue;
        }
        if !is_inject_type(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "#[inject] 只能用于 `Inject<T>` 类型的字段",
            ));
        }

        let (member, slot_name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };
        result.push(InjectField { member, slot_name });
    }

    Ok(result)
}

/// 展开 `#[derive(Component)]`
pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Component)] 不支持泛型结构体",
        ));
    }

    let args = ComponentArgs::from_attributes(&input.attrs)?;
    let fields = inject_fields(&input)?;
    let struct_name = &input.ident;

    let named = args.name.as_ref().map(|name| quote! { .named(#name) });

    let constructor = match &args.constructor {
        Constructor::Default => quote! { .default_constructor() },
        Constructor::Infallible(path) => quote! {
            .constructor(|| ::core::result::Result::<Self, ::ioc_common::BoxError>::Ok(#path()))
        },
        Constructor::Fallible(path) => quote! { .constructor(#path) },
    };

    let injects = fields.iter().map(|field| {
        let member = &field.member;
        let slot_name = &field.slot_name;
        quote! { .inject(#slot_name, |component: &Self| &component.#member) }
    });

    let hooks = args.init_hooks.iter().map(|hook| {
        let hook_name = hook.to_string();
        quote! { .init(#hook_name, Self::#hook) }
    });

    let component_impl = quote! {
        impl ::ioc_common::Component for #struct_name {
            fn descriptor() -> ::ioc_common::ComponentDescriptor {
                ::ioc_common::ComponentDescriptor::builder::<Self>()
                    .package(::core::module_path!())
                    #named
                    #constructor
                    #(#injects)*
                    #(#hooks)*
                    .build()
            }
        }
    };

    let registration = if args.manual {
        TokenStream::new()
    } else {
        let fn_name = registration_fn_name(struct_name);
        quote! {
            #[doc(hidden)]
            #[::ctor::ctor]
            fn #fn_name() {
                ::ioc_common::register_global_component(
                    <#struct_name as ::ioc_common::Component>::descriptor,
                );
            }
        }
    };

    Ok(quote! {
        #component_impl
        #registration
    })
}
