//! Sample instance synthesis for sample-builder.
//!
//! This crate turns annotated type declarations into Rust source that builds
//! a static collection of sample instances for each type.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   SampleSchema      │  (sample-core, loaded from YAML)
//! └──────────┬──────────┘
//!            │ TypeDeclaration
//!            ▼
//! ┌─────────────────────┐     ┌─────────────────────┐
//! │  extract            │────►│  diagnostics        │
//! │  (TypeShape)        │     │  (DiagnosticSink)   │
//! └──────────┬──────────┘     └─────────────────────┘
//!            │                           ▲
//!            ▼                           │
//! ┌─────────────────────┐     ┌──────────┴──────────┐
//! │  builder            │────►│  synth + catalog    │
//! │  (SampleSet × N)    │     │  (Expr per value)   │
//! └──────────┬──────────┘     └─────────────────────┘
//!            │
//!            ▼
//!   impl Person { pub fn sample() -> Vec<Self> { vec![...] } }
//! ```
//!
//! [`SampleEngine`] drives the whole flow for a schema: it validates every
//! declaration, drops types whose references cannot be satisfied, and
//! synthesizes the survivors in declaration order. Expressions are built as
//! `syn` nodes, turned into tokens with `quote!` and formatted by
//! `prettyplease`.
//!
//! ## Modes
//!
//! - **fixed** - Placeholder literals (`0`, `String::from("Hello World")`, sequential UUIDs)
//! - **randomized** - Calls into the runtime data provider (`DataGenerator::random(..).string()`)

pub mod builder;
pub mod catalog;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod expr;
pub mod extract;
pub mod ids;
pub mod synth;

pub use builder::{build_samples, render_items, SampleSet};
pub use diagnostics::{
    Diagnostic, DiagnosticSink, FixEdit, FixIt, Location, Severity, TracingSink,
};
pub use engine::{GenerationOutput, GeneratorOptions, SampleEngine, GENERATED_HEADER};
pub use error::GenerationError;
pub use expr::{parse_ident, parse_path, Expr};
pub use extract::{check_kind, check_member_categories, extract_shape};
pub use ids::{IdProvider, ProcessIds, SequentialIds};
pub use synth::{ReferenceResolver, ReferenceStatus, Synthesizer};
