//! 宏工具函数

use proc_macro2::Span;
use syn::{Expr, ExprLit, Field, Ident, Lit, LitStr, Path, Type};

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            // 检查前一个字符是否为小写，或者下一个字符是否为小写
            let prev_is_lower = chars.get(i - 1).is_some_and(|c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.extend(ch.to_lowercase());
    }

    result
}

/// 生成组件注册函数名
pub fn registration_fn_name(struct_name: &Ident) -> Ident {
    Ident::new(
        &format!("__ioc_register_{}", to_snake_case(&struct_name.to_string())),
        Span::call_site(),
    )
}

/// 检查字段是否有特定属性
pub fn field_has_attribute(field: &Field, attr_name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(attr_name))
}

/// 检查类型是否为 `Inject<T>`
pub fn is_inject_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path.path.segments.last().is_some_and(|segment| {
            segment.ident == "Inject"
                && matches!(segment.arguments, syn::PathArguments::AngleBracketed(_))
        }),
        _ => false,
    }
}

/// 把字符串字面量解析为路径，例如 `"Self::new"` 或 `"factories::build"`
pub fn parse_path_lit(lit: &LitStr) -> syn::Result<Path> {
    lit.parse::<Path>()
        .map_err(|_| syn::Error::new(lit.span(), format!("`{}` 不是有效的路径", lit.value())))
}

/// 把字符串字面量解析为方法名
pub fn parse_ident_lit(lit: &LitStr) -> syn::Result<Ident> {
    lit.parse::<Ident>()
        .map_err(|_| syn::Error::new(lit.span(), format!("`{}` 不是有效的方法名", lit.value())))
}

/// 从表达式中取出字符串字面量
pub fn expect_lit_str(expr: &Expr) -> syn::Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) => Ok(lit_str.clone()),
        other => Err(syn::Error::new_spanned(other, "这里需要字符串字面量")),
    }
}
