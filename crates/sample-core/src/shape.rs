//! Canonical shapes of annotated types.
//!
//! A [`TypeShape`] is what the generator actually works from: the ordered
//! parameter list needed to construct a struct, or the ordered case list of an
//! enum. Shapes are derived fresh from a declaration for every generation
//! request and discarded afterwards.

use crate::category::Category;
use crate::types::TypeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How sample values are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Deterministic placeholder literals
    #[serde(alias = "default")]
    Fixed,

    /// Calls into the runtime data provider
    #[default]
    #[serde(alias = "random")]
    Randomized,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Fixed => write!(f, "fixed"),
            GenerationMode::Randomized => write!(f, "randomized"),
        }
    }
}

/// One constructor argument, stored member or enum payload slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Label, absent for positional members and unlabeled payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub declared_type: TypeRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Parameter {
    /// Create a labeled parameter without a category.
    pub fn named(name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            name: Some(name.into()),
            declared_type,
            category: None,
        }
    }

    /// Create an unlabeled parameter.
    pub fn positional(declared_type: TypeRef) -> Self {
        Self {
            name: None,
            declared_type,
            category: None,
        }
    }

    /// Attach a category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// An enum case with its payload, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumCase {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payload: Vec<Parameter>,
}

impl EnumCase {
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: Vec::new(),
        }
    }

    pub fn with_payload(name: impl Into<String>, payload: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Where a struct's canonical parameter list came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterSource {
    /// The widest explicit constructor, called as `Self::name(..)`
    Constructor { name: String },

    /// Stored members, built with a struct literal
    Fields {
        /// Positional members (`struct Pair(i32, i32)`)
        #[serde(default)]
        tuple: bool,
    },
}

/// Canonical shape of an annotated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    Struct {
        name: String,
        source: ParameterSource,
        parameters: Vec<Parameter>,
    },
    Enum {
        name: String,
        cases: Vec<EnumCase>,
    },
}

impl TypeShape {
    pub fn name(&self) -> &str {
        match self {
            TypeShape::Struct { name, .. } | TypeShape::Enum { name, .. } => name,
        }
    }

    /// Every parameter of the shape (struct parameters or all enum payloads).
    pub fn parameters(&self) -> Box<dyn Iterator<Item = &Parameter> + '_> {
        match self {
            TypeShape::Struct { parameters, .. } => Box::new(parameters.iter()),
            TypeShape::Enum { cases, .. } => {
                Box::new(cases.iter().flat_map(|case| case.payload.iter()))
            }
        }
    }

    /// Names of other types this shape refers to, without duplicates.
    pub fn references(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for parameter in self.parameters() {
            for name in parameter.declared_type.references() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}
