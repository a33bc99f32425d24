//! Construction expressions and their Rust tokens.
//!
//! Synthesis produces an [`Expr`] tree rather than text so that tests can
//! match on structure. Paths and names are held as `syn` nodes, validated
//! when the tree is built, and [`ToTokens`] turns the tree into a
//! `proc_macro2::TokenStream` through `quote!`.

use crate::error::GenerationError;
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{quote, ToTokens};
use std::fmt;
use syn::{Lit, LitBool, LitFloat, LitInt, LitStr, Member};

/// A Rust value expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Literal token (`0`, `0.0`, `true`, `"text"`)
    Lit(Lit),

    /// Bare path (`Self::Idle`)
    Path(syn::Path),

    /// Function or tuple constructor call (`Self::new(a, b)`, `Some(x)`)
    Call { callee: syn::Path, args: Vec<Expr> },

    MethodCall {
        receiver: Box<Expr>,
        method: Ident,
        args: Vec<Expr>,
    },

    /// `vec![..]`
    Vec(Vec<Expr>),

    /// Map built from key/value pairs, collected into the target map type
    Map(Vec<(Expr, Expr)>),

    /// Braced struct literal (`Self { a: x }`)
    Struct {
        path: syn::Path,
        fields: Vec<(Member, Expr)>,
    },

    /// First element of another type's sample collection
    FirstSample { type_path: syn::Path, member: Ident },
}

impl Expr {
    pub fn int(value: u128) -> Self {
        Expr::Lit(Lit::Int(LitInt::from(Literal::u128_unsuffixed(value))))
    }

    pub fn float(value: f64) -> Self {
        Expr::Lit(Lit::Float(LitFloat::from(Literal::f64_unsuffixed(value))))
    }

    pub fn bool(value: bool) -> Self {
        Expr::Lit(Lit::Bool(LitBool::new(value, Span::call_site())))
    }

    pub fn string(value: &str) -> Self {
        Expr::Lit(Lit::Str(LitStr::new(value, Span::call_site())))
    }

    pub fn path(path: syn::Path) -> Self {
        Expr::Path(path)
    }

    pub fn call(callee: syn::Path, args: Vec<Expr>) -> Self {
        Expr::Call { callee, args }
    }

    pub fn method(self, method: &str, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            receiver: Box::new(self),
            method: Ident::new(method, Span::call_site()),
            args,
        }
    }
}

/// Parse a path such as `::sample_data` or `crate::model::Product`.
pub fn parse_path(text: &str) -> Result<syn::Path, GenerationError> {
    syn::parse_str(text).map_err(|e| GenerationError::InvalidName {
        name: text.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a single identifier. Keywords must be written raw (`r#type`).
pub fn parse_ident(text: &str) -> Result<Ident, GenerationError> {
    syn::parse_str(text).map_err(|e| GenerationError::InvalidName {
        name: text.to_string(),
        reason: e.to_string(),
    })
}

/// Field of a struct literal: named, or positional by index.
pub fn parse_member(name: Option<&str>, idx: usize) -> Result<Member, GenerationError> {
    match name {
        Some(name) => Ok(Member::Named(parse_ident(name)?)),
        None => Ok(Member::Unnamed(syn::Index::from(idx))),
    }
}

/// The `Self` path.
pub fn self_path() -> syn::Path {
    syn::Path::from(Ident::new("Self", Span::call_site()))
}

/// `base` extended by `::`-separated items known to be valid identifiers.
pub fn join_path(base: &syn::Path, items: &str) -> syn::Path {
    let mut path = base.clone();
    for item in items.split("::") {
        path.segments.push(Ident::new(item, Span::call_site()).into());
    }
    path
}

impl ToTokens for Expr {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(match self {
            Expr::Lit(lit) => quote!(#lit),
            Expr::Path(path) => quote!(#path),
            Expr::Call { callee, args } => quote!(#callee(#(#args),*)),
            Expr::MethodCall {
                receiver,
                method,
                args,
            } => quote!(#receiver.#method(#(#args),*)),
            Expr::Vec(items) => quote!(vec![#(#items),*]),
            Expr::Map(entries) => {
                let pairs = entries.iter().map(|(key, value)| quote!((#key, #value)));
                quote!([#(#pairs),*].into_iter().collect())
            }
            Expr::Struct { path, fields } => {
                let fields = fields.iter().map(|(member, value)| quote!(#member: #value));
                quote!(#path { #(#fields),* })
            }
            Expr::FirstSample { type_path, member } => quote!(#type_path::#member().remove(0)),
        });
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_token_stream())
    }
}
