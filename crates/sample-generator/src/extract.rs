//! Type-shape extraction.
//!
//! Derives the canonical [`TypeShape`] from a declaration:
//!
//! 1. Enums keep their cases, in order, with their payloads.
//! 2. Structs with explicit constructors use the widest one (first wins on
//!    ties). Categories are not attached to constructor parameters.
//! 3. Other structs use their stored members (plain or observed), each with
//!    its parsed category. Computed members are skipped.

use crate::diagnostics::{Diagnostic, Location};
use crate::error::GenerationError;
use sample_core::{
    Category, ConstructorDeclaration, DeclarationKind, EnumCase, GenerationMode,
    MemberDeclaration, Parameter, ParameterSource, PayloadDeclaration, TypeDeclaration, TypeRef,
    TypeShape,
};
use tracing::debug;

/// Extraction failure, with the member it was found on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct ShapeError {
    pub member: Option<String>,
    pub error: GenerationError,
}

impl ShapeError {
    fn of_type(error: GenerationError) -> Self {
        Self {
            member: None,
            error,
        }
    }

    fn of_member(member: impl Into<String>, error: GenerationError) -> Self {
        Self {
            member: Some(member.into()),
            error,
        }
    }

    /// Turn into a diagnostic located in `type_name`.
    pub fn into_diagnostic(self, type_name: &str) -> Diagnostic {
        let location = Location {
            type_name: type_name.to_string(),
            member: self.member,
        };
        Diagnostic::from_error(&self.error, location)
    }
}

/// Reject declarations that are neither structs nor enums.
pub fn check_kind(declaration: &TypeDeclaration) -> Result<(), GenerationError> {
    match declaration.kind {
        DeclarationKind::Struct | DeclarationKind::Enum => Ok(()),
        kind => Err(GenerationError::NotAStructOrEnum {
            name: declaration.name.clone(),
            kind,
        }),
    }
}

fn parse_type(text: &str) -> Result<TypeRef, GenerationError> {
    text.parse().map_err(|err| {
        debug!(type_text = text, error = %err, "Unparseable member type");
        GenerationError::TypeNotSupported {
            type_name: text.trim().to_string(),
        }
    })
}

fn parse_category(token: &str) -> Result<Category, GenerationError> {
    token.parse().map_err(|err| {
        debug!(token, error = %err, "Unparseable category");
        GenerationError::CategoryNotSupported {
            token: token.trim().to_string(),
        }
    })
}

/// Validate category directives on a struct's members.
///
/// Reports categories on computed members, unparseable tokens, categories
/// whose domain does not match the member type, and (as warnings) categories
/// that fixed mode ignores. Members whose type does not parse are left to
/// [`extract_shape`].
pub fn check_member_categories(
    declaration: &TypeDeclaration,
    mode: GenerationMode,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if declaration.kind != DeclarationKind::Struct {
        return diagnostics;
    }

    for (idx, member) in declaration.members.iter().enumerate() {
        let Some(token) = &member.category else {
            continue;
        };
        let member_name = member.display_name(idx);
        let location = Location::of_member(&declaration.name, &member_name);

        if !member.accessor.is_stored() {
            diagnostics.push(Diagnostic::from_error(
                &GenerationError::NotAStoredMember,
                location,
            ));
            continue;
        }

        let category = match parse_category(token) {
            Ok(category) => category,
            Err(error) => {
                diagnostics.push(Diagnostic::from_error(&error, location));
                continue;
            }
        };

        if let Ok(ty) = member.type_text.parse::<TypeRef>() {
            let leaf = ty.leaf();
            let compatible = leaf
                .as_scalar()
                .is_some_and(|kind| category.is_compatible(kind));
            if !compatible {
                let error = GenerationError::CategoryMismatch {
                    category,
                    type_name: leaf.to_string(),
                    expected: category.domain().expected_type(),
                };
                diagnostics.push(Diagnostic::from_error(&error, location));
            }
        }

        if mode == GenerationMode::Fixed {
            diagnostics.push(Diagnostic::redundant_category(
                &declaration.name,
                &member_name,
            ));
        }
    }

    diagnostics
}

/// Derive the canonical shape of a declaration.
pub fn extract_shape(declaration: &TypeDeclaration) -> Result<TypeShape, ShapeError> {
    check_kind(declaration).map_err(ShapeError::of_type)?;

    match declaration.kind {
        DeclarationKind::Enum => extract_enum(declaration),
        _ => match widest_constructor(&declaration.constructors) {
            Some(constructor) => extract_constructor(declaration, constructor),
            None => extract_fields(declaration),
        },
    }
}

fn widest_constructor(constructors: &[ConstructorDeclaration]) -> Option<&ConstructorDeclaration> {
    constructors.iter().fold(None, |best, candidate| match best {
        Some(best) if best.parameters.len() >= candidate.parameters.len() => Some(best),
        _ => Some(candidate),
    })
}

fn payload_parameters(
    payload: &[PayloadDeclaration],
    location: &str,
) -> Result<Vec<Parameter>, ShapeError> {
    payload
        .iter()
        .map(|slot| -> Result<Parameter, ShapeError> {
            let declared_type = parse_type(&slot.type_text)
                .map_err(|error| ShapeError::of_member(location, error))?;
            Ok(Parameter {
                name: slot.name.clone(),
                declared_type,
                category: None,
            })
        })
        .collect()
}

fn extract_enum(declaration: &TypeDeclaration) -> Result<TypeShape, ShapeError> {
    if declaration.cases.is_empty() {
        return Err(ShapeError::of_type(GenerationError::EnumWithEmptyCases));
    }

    let cases = declaration
        .cases
        .iter()
        .map(|case| -> Result<EnumCase, ShapeError> {
            let payload = payload_parameters(&case.payload, &case.name)?;
            Ok(EnumCase::with_payload(case.name.clone(), payload))
        })
        .collect::<Result<Vec<_>, ShapeError>>()?;

    debug!(name = %declaration.name, cases = cases.len(), "Extracted enum shape");
    Ok(TypeShape::Enum {
        name: declaration.name.clone(),
        cases,
    })
}

fn extract_constructor(
    declaration: &TypeDeclaration,
    constructor: &ConstructorDeclaration,
) -> Result<TypeShape, ShapeError> {
    let parameters = payload_parameters(&constructor.parameters, &constructor.name)?;

    debug!(
        name = %declaration.name,
        constructor = %constructor.name,
        arity = parameters.len(),
        "Extracted struct shape from constructor"
    );
    Ok(TypeShape::Struct {
        name: declaration.name.clone(),
        source: ParameterSource::Constructor {
            name: constructor.name.clone(),
        },
        parameters,
    })
}

fn extract_fields(declaration: &TypeDeclaration) -> Result<TypeShape, ShapeError> {
    let stored: Vec<&MemberDeclaration> = declaration
        .members
        .iter()
        .filter(|member| member.accessor.is_stored())
        .collect();

    let parameters = stored
        .iter()
        .enumerate()
        .map(|(idx, member)| -> Result<Parameter, ShapeError> {
            let member_name = member.display_name(idx);
            let declared_type = parse_type(&member.type_text)
                .map_err(|error| ShapeError::of_member(&member_name, error))?;
            let category = member
                .category
                .as_deref()
                .map(parse_category)
                .transpose()
                .map_err(|error| ShapeError::of_member(&member_name, error))?;
            Ok(Parameter {
                name: member.name.clone(),
                declared_type,
                category,
            })
        })
        .collect::<Result<Vec<_>, ShapeError>>()?;

    let tuple = !stored.is_empty() && stored.iter().all(|member| member.name.is_none());

    debug!(
        name = %declaration.name,
        fields = parameters.len(),
        tuple,
        "Extracted struct shape from stored members"
    );
    Ok(TypeShape::Struct {
        name: declaration.name.clone(),
        source: ParameterSource::Fields { tuple },
        parameters,
    })
}
