//! Core types for the sample-builder generator.
//!
//! This crate provides the vocabulary shared by the synthesis engine, the
//! runtime data provider and the CLI:
//!
//! - [`Category`] - Semantic hints (`email`, `price`, `image(width:..)`) and their value domains
//! - [`ScalarKind`] / [`TypeRef`] - The closed set of primitive kinds and the recursive type reference built on it
//! - [`TypeShape`] - The canonical parameter list or case list derived from a declaration
//! - [`SampleSchema`] - YAML-loadable declarations annotated with sample directives
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        sample-core                           │
//! │  ┌──────────────┐  ┌──────────────┐  ┌───────────────────┐   │
//! │  │   Category   │  │   TypeRef    │  │   SampleSchema    │   │
//! │  │  (registry)  │  │ (ScalarKind) │  │ (TypeDeclaration) │   │
//! │  └──────────────┘  └──────────────┘  └───────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//!            │                  │                   │
//!            ▼                  ▼                   ▼
//!   ┌──────────────────┐                 ┌──────────────────┐
//!   │   sample-data    │                 │ sample-generator │
//!   │ (runtime values) │                 │ (code synthesis) │
//!   └──────────────────┘                 └──────────────────┘
//! ```

pub mod category;
pub mod schema;
pub mod shape;
pub mod types;

pub use category::{Category, CategoryParseError, SupportedDomain};
pub use schema::{
    Accessor, CaseDeclaration, ConstructorDeclaration, DeclarationKind, MemberDeclaration,
    PayloadDeclaration, SampleDirective, SampleSchema, SchemaDefaults, SchemaError,
    TypeDeclaration,
};
pub use shape::{EnumCase, GenerationMode, Parameter, ParameterSource, TypeShape};
pub use types::{type_key, MapKind, ScalarKind, TypeParseError, TypeRef};
