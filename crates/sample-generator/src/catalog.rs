//! Primitive type catalog.
//!
//! Maps every [`ScalarKind`] to a fixed placeholder literal and to a call on
//! the runtime data provider. Runtime types (`Uuid`, `Url`, geometry) are
//! addressed through the configured data crate so that generated code only
//! needs that one dependency.

use crate::expr::{join_path, Expr};
use crate::ids::IdProvider;
use proc_macro2::{Ident, Span};
use sample_core::{Category, ScalarKind};

/// Placeholder text for fixed-mode strings.
pub const FIXED_STRING: &str = "Hello World";

/// Placeholder address for fixed-mode URLs.
pub const FIXED_URL: &str = "https://www.rust-lang.org";

fn std_path(text: &str) -> syn::Path {
    match text.split_once("::") {
        Some((first, rest)) => join_path(&syn::Path::from(Ident::new(first, Span::call_site())), rest),
        None => syn::Path::from(Ident::new(text, Span::call_site())),
    }
}

/// Fixed placeholder literal for a scalar kind.
pub fn fixed_literal(kind: ScalarKind, data_crate: &syn::Path, ids: &mut dyn IdProvider) -> Expr {
    match kind {
        k if k.is_integer() => Expr::int(0),
        k if k.is_float() => Expr::float(0.0),
        ScalarKind::String => Expr::call(std_path("String::from"), vec![Expr::string(FIXED_STRING)]),
        ScalarKind::Bool => Expr::bool(true),
        ScalarKind::Bytes => Expr::call(std_path("Vec::new"), vec![]),
        ScalarKind::DateTime => Expr::path(join_path(data_crate, "DateTime::UNIX_EPOCH")),
        ScalarKind::Uuid => Expr::call(
            join_path(data_crate, "Uuid::from_u128"),
            vec![Expr::int(ids.next_id())],
        ),
        ScalarKind::Url => Expr::call(
            join_path(data_crate, "Url::from_static"),
            vec![Expr::string(FIXED_URL)],
        ),
        geometry => Expr::call(
            join_path(data_crate, &format!("{}::default", geometry.type_name())),
            vec![],
        ),
    }
}

/// Expression naming a category on the runtime side.
pub fn category_expr(category: Category, data_crate: &syn::Path) -> Expr {
    let path = join_path(data_crate, &format!("Category::{}", category.variant_name()));
    match category {
        Category::Image { width, height } => Expr::Struct {
            path,
            fields: vec![
                (named("width"), Expr::int(width.into())),
                (named("height"), Expr::int(height.into())),
            ],
        },
        _ => Expr::path(path),
    }
}

fn named(field: &str) -> syn::Member {
    syn::Member::Named(Ident::new(field, Span::call_site()))
}

/// Data-provider call producing a random value of the given kind.
///
/// The category is forwarded only to kinds whose domain accepts categories.
pub fn random_call(kind: ScalarKind, category: Option<Category>, data_crate: &syn::Path) -> Expr {
    let category_arg = match category {
        Some(category) if kind.domain().is_some() => {
            Expr::call(std_path("Some"), vec![category_expr(category, data_crate)])
        }
        _ => Expr::path(std_path("None")),
    };
    Expr::call(
        join_path(data_crate, "DataGenerator::random"),
        vec![category_arg],
    )
    .method(kind.method_name(), vec![])
}
