//! Error types for sample generation.

use sample_core::{Category, DeclarationKind};

/// Conditions that stop generation for a single type.
///
/// Every variant maps to one error-severity [`Diagnostic`](crate::Diagnostic);
/// the location (type and member) travels with the diagnostic, not the error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("sample generation can only be applied to structs and enums, '{name}' is a {kind}")]
    NotAStructOrEnum { name: String, kind: DeclarationKind },

    #[error("'count' argument must be greater than zero, found {count}")]
    ArgumentNotGreaterThanZero { count: i64 },

    #[error("enum must contain at least one case")]
    EnumWithEmptyCases,

    #[error("'{type_name}' type is not supported")]
    TypeNotSupported { type_name: String },

    #[error("'{category}' category is not compatible with '{type_name}' type. Use '{expected}' type instead.")]
    CategoryMismatch {
        category: Category,
        type_name: String,
        expected: &'static str,
    },

    #[error("'{token}' is not a supported category")]
    CategoryNotSupported { token: String },

    #[error("category can only be applied to stored members")]
    NotAStoredMember,

    #[error("'{type_name}' has no sample collection to reference")]
    DependencyFailed { type_name: String },

    #[error("'{type_name}' refers back to itself through {path}")]
    CyclicReference { type_name: String, path: String },

    #[error("'{name}' is not a valid Rust name: {reason}")]
    InvalidName { name: String, reason: String },
}
