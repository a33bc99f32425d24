//! Diagnostics reported while generating samples.
//!
//! Every problem the generator detects becomes a [`Diagnostic`]: a severity,
//! a stable id, a message, the type (and member) it concerns, and optionally a
//! suggested edit. Diagnostics are pushed into a [`DiagnosticSink`]; errors
//! suppress output for the affected type only.

use crate::error::GenerationError;
use std::fmt;
use tracing::{error, warn};

/// Placeholder case name inserted by the empty-enum fix.
pub const PLACEHOLDER_CASE: &str = "YourCase";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// The type, and optionally the member, a diagnostic points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub type_name: String,
    pub member: Option<String>,
}

impl Location {
    pub fn of_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: None,
        }
    }

    pub fn of_member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: Some(member.into()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}.{member}", self.type_name),
            None => f.write_str(&self.type_name),
        }
    }
}

/// Mechanical edit a fix-it applies to the declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixEdit {
    /// Add a case with the given placeholder name to the enum
    InsertCase { placeholder: String },

    /// Drop the category directive from a member
    RemoveCategory { member: String },
}

/// Suggested fix attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixIt {
    pub message: String,
    pub edit: FixEdit,
}

/// A reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stable identifier (`category_mismatch`)
    pub id: &'static str,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    pub fix_it: Option<FixIt>,
}

impl Diagnostic {
    /// Map a generation error to its diagnostic.
    pub fn from_error(error: &GenerationError, location: Location) -> Self {
        let id = match error {
            GenerationError::NotAStructOrEnum { .. } => "not_a_struct_or_enum",
            GenerationError::ArgumentNotGreaterThanZero { .. } => "argument_not_greater_than_zero",
            GenerationError::EnumWithEmptyCases => "enum_with_empty_cases",
            GenerationError::TypeNotSupported { .. } => "type_not_supported",
            GenerationError::CategoryMismatch { .. } => "category_mismatch",
            GenerationError::CategoryNotSupported { .. } => "category_not_supported",
            GenerationError::NotAStoredMember => "not_a_stored_member",
            GenerationError::DependencyFailed { .. } => "dependency_failed",
            GenerationError::CyclicReference { .. } => "cyclic_reference",
            GenerationError::InvalidName { .. } => "invalid_name",
        };

        let fix_it = match error {
            GenerationError::EnumWithEmptyCases => Some(FixIt {
                message: "add a new enum case".to_string(),
                edit: FixEdit::InsertCase {
                    placeholder: PLACEHOLDER_CASE.to_string(),
                },
            }),
            GenerationError::NotAStoredMember => {
                location.member.clone().map(remove_category_fix)
            }
            _ => None,
        };

        Self {
            id,
            severity: Severity::Error,
            message: error.to_string(),
            location,
            fix_it,
        }
    }

    /// Warning for a category that cannot take effect in fixed mode.
    pub fn redundant_category(type_name: &str, member: &str) -> Self {
        Self {
            id: "redundant_category",
            severity: Severity::Warning,
            message: "category has no effect in fixed mode".to_string(),
            location: Location::of_member(type_name, member),
            fix_it: Some(remove_category_fix(member.to_string())),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

fn remove_category_fix(member: String) -> FixIt {
    FixIt {
        message: "remove the category directive".to_string(),
        edit: FixEdit::RemoveCategory { member },
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {}\n  --> {}",
            self.severity, self.id, self.message, self.location
        )?;
        if let Some(fix_it) = &self.fix_it {
            write!(f, "\n  = help: {}", fix_it.message)?;
        }
        Ok(())
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Sink that logs every diagnostic through `tracing` and counts them.
#[derive(Debug, Default)]
pub struct TracingSink {
    pub errors: usize,
    pub warnings: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => {
                self.errors += 1;
                error!(
                    id = diagnostic.id,
                    location = %diagnostic.location,
                    "{}",
                    diagnostic.message
                );
            }
            Severity::Warning => {
                self.warnings += 1;
                warn!(
                    id = diagnostic.id,
                    location = %diagnostic.location,
                    "{}",
                    diagnostic.message
                );
            }
        }
    }
}
