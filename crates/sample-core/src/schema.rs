//! Sample schema definitions.
//!
//! A sample schema is the YAML description of the declarations the generator
//! runs over. It stands in for the host front-end: each entry records what a
//! type looks like (kind, members, constructors, cases) together with the
//! sample directive attached to it.
//!
//! ## Type Hierarchy
//!
//! - `SampleSchema` - Defaults, external types and declarations
//! - `TypeDeclaration` - One annotated type with its `SampleDirective`
//! - `MemberDeclaration` - Stored or computed member, with an optional category token
//! - `ConstructorDeclaration` - Explicit constructor and its parameters
//! - `CaseDeclaration` - Enum case and its payload
//!
//! Member types and category tokens are kept as raw text here. They are
//! parsed during shape extraction so that a bad entry is reported against its
//! type instead of rejecting the whole file.

use crate::shape::GenerationMode;
use crate::types::type_key;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Two declarations share a name
    #[error("Type '{0}' is declared more than once")]
    DuplicateType(String),

    /// Type not found in schema
    #[error("Type not found: {0}")]
    TypeNotFound(String),
}

// ============================================================================
// Declarations
// ============================================================================

/// Kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Struct,
    Enum,
    Union,
    Trait,
    TypeAlias,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeclarationKind::Struct => "struct",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Union => "union",
            DeclarationKind::Trait => "trait",
            DeclarationKind::TypeAlias => "type alias",
        };
        f.write_str(name)
    }
}

/// How a member's value is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessor {
    /// Plain stored field
    #[default]
    Stored,

    /// Stored field with change observers attached
    Observed,

    /// Derived value with no storage
    Computed,
}

impl Accessor {
    /// Whether the member occupies storage and takes part in construction.
    pub fn is_stored(&self) -> bool {
        matches!(self, Accessor::Stored | Accessor::Observed)
    }
}

/// A member of a struct declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDeclaration {
    /// Field name, absent for tuple struct members
    #[serde(default)]
    pub name: Option<String>,

    /// Declared type as Rust type text
    #[serde(rename = "type")]
    pub type_text: String,

    #[serde(default)]
    pub accessor: Accessor,

    /// Category token
    #[serde(default)]
    pub category: Option<String>,
}

impl MemberDeclaration {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            type_text: type_text.into(),
            accessor: Accessor::Stored,
            category: None,
        }
    }

    pub fn positional(type_text: impl Into<String>) -> Self {
        Self {
            name: None,
            type_text: type_text.into(),
            accessor: Accessor::Stored,
            category: None,
        }
    }

    pub fn with_category(mut self, token: impl Into<String>) -> Self {
        self.category = Some(token.into());
        self
    }

    pub fn with_accessor(mut self, accessor: Accessor) -> Self {
        self.accessor = accessor;
        self
    }

    /// Name used when reporting against this member.
    pub fn display_name(&self, index: usize) -> String {
        self.name.clone().unwrap_or_else(|| index.to_string())
    }
}

/// A constructor parameter or enum payload slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadDeclaration {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub type_text: String,
}

impl PayloadDeclaration {
    pub fn new(name: Option<&str>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.map(str::to_string),
            type_text: type_text.into(),
        }
    }
}

/// An explicit constructor (`fn new(..) -> Self`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDeclaration {
    pub name: String,

    #[serde(default)]
    pub parameters: Vec<PayloadDeclaration>,
}

/// An enum case declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDeclaration {
    pub name: String,

    #[serde(default)]
    pub payload: Vec<PayloadDeclaration>,
}

/// The sample directive attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDirective {
    /// Number of samples; must be greater than zero
    pub count: i64,

    /// Generation mode, falls back to the schema default
    #[serde(default)]
    pub mode: Option<GenerationMode>,
}

/// A type declaration annotated with a sample directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,

    pub kind: DeclarationKind,

    pub sample: SampleDirective,

    #[serde(default)]
    pub members: Vec<MemberDeclaration>,

    #[serde(default)]
    pub constructors: Vec<ConstructorDeclaration>,

    #[serde(default)]
    pub cases: Vec<CaseDeclaration>,
}

impl TypeDeclaration {
    /// Create an empty declaration of the given kind.
    pub fn new(name: impl Into<String>, kind: DeclarationKind, count: i64) -> Self {
        Self {
            name: name.into(),
            kind,
            sample: SampleDirective { count, mode: None },
            members: Vec::new(),
            constructors: Vec::new(),
            cases: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.sample.mode = Some(mode);
        self
    }

    pub fn with_member(mut self, member: MemberDeclaration) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_constructor(mut self, name: impl Into<String>, parameters: &[(&str, &str)]) -> Self {
        self.constructors.push(ConstructorDeclaration {
            name: name.into(),
            parameters: parameters
                .iter()
                .map(|(name, ty)| PayloadDeclaration::new(Some(name), *ty))
                .collect(),
        });
        self
    }

    pub fn with_case(mut self, name: impl Into<String>, payload: Vec<PayloadDeclaration>) -> Self {
        self.cases.push(CaseDeclaration {
            name: name.into(),
            payload,
        });
        self
    }
}

// ============================================================================
// Schema
// ============================================================================

fn default_version() -> u32 {
    1
}

fn default_member() -> String {
    "sample".to_string()
}

fn default_data_crate() -> String {
    "::sample_data".to_string()
}

/// Schema-wide defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDefaults {
    /// Mode for declarations whose directive names none
    #[serde(default)]
    pub mode: GenerationMode,

    /// Name of the generated associated function
    #[serde(default = "default_member")]
    pub member: String,

    /// Path of the runtime crate emitted calls go through
    #[serde(default = "default_data_crate")]
    pub data_crate: String,
}

impl Default for SchemaDefaults {
    fn default() -> Self {
        Self {
            mode: GenerationMode::default(),
            member: default_member(),
            data_crate: default_data_crate(),
        }
    }
}

/// Full sample schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSchema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub defaults: SchemaDefaults,

    /// Types defined elsewhere that already provide a sample collection
    #[serde(default)]
    pub external_types: Vec<String>,

    /// Annotated declarations, in generation order
    pub types: Vec<TypeDeclaration>,

    /// Cached type lookup (not serialized)
    #[serde(skip)]
    type_map: HashMap<String, usize>,
}

impl SampleSchema {
    /// Create a schema from declarations with default settings.
    pub fn new(types: Vec<TypeDeclaration>) -> Result<Self, SchemaError> {
        let mut schema = Self {
            version: default_version(),
            defaults: SchemaDefaults::default(),
            external_types: Vec::new(),
            types,
            type_map: HashMap::new(),
        };
        schema.build_type_map()?;
        Ok(schema)
    }

    /// Load a schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a schema from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: SampleSchema = serde_yaml::from_str(yaml)?;
        schema.build_type_map()?;
        Ok(schema)
    }

    pub fn with_external_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external_types.extend(names.into_iter().map(Into::into));
        self
    }

    /// Build the internal type lookup map, rejecting duplicate names.
    fn build_type_map(&mut self) -> Result<(), SchemaError> {
        let mut type_map = HashMap::with_capacity(self.types.len());
        for (idx, declaration) in self.types.iter().enumerate() {
            if type_map.insert(declaration.name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateType(declaration.name.clone()));
            }
        }
        self.type_map = type_map;
        Ok(())
    }

    /// Get a declaration by name or by a path ending in its name.
    pub fn get_type(&self, name: &str) -> Option<&TypeDeclaration> {
        self.type_map
            .get(type_key(name))
            .and_then(|&idx| self.types.get(idx))
    }

    /// Get a declaration by name, failing if it does not exist.
    pub fn require_type(&self, name: &str) -> Result<&TypeDeclaration, SchemaError> {
        self.get_type(name)
            .ok_or_else(|| SchemaError::TypeNotFound(name.to_string()))
    }

    /// Get all declared type names.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    /// Whether `name` (or a path ending in it) is listed as an external type.
    pub fn is_external(&self, name: &str) -> bool {
        let key = type_key(name);
        self.external_types
            .iter()
            .any(|external| type_key(external) == key)
    }

    /// Mode a declaration is generated in.
    pub fn effective_mode(&self, declaration: &TypeDeclaration) -> GenerationMode {
        declaration.sample.mode.unwrap_or(self.defaults.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_SCHEMA: &str = r#"
version: 1
defaults:
  mode: fixed
external_types: [Money]
types:
  - name: Person
    kind: struct
    sample: { count: 3 }
    members:
      - { name: id, type: Uuid }
      - { name: email, type: String, category: email }
      - { name: display, type: String, accessor: computed }
    constructors:
      - name: new
        parameters: [{ name: id, type: Uuid }]
  - name: Shape
    kind: enum
    sample: { count: 5, mode: random }
    cases:
      - { name: Circle, payload: [{ type: f64 }] }
      - { name: Empty }
"#;

    #[test]
    fn test_parse_schema() {
        let schema = SampleSchema::from_yaml(SAMPLE_SCHEMA).unwrap();
        assert_eq!(schema.version, 1);
        assert_eq!(schema.type_names(), vec!["Person", "Shape"]);
        assert!(schema.is_external("Money"));
        assert!(!schema.is_external("Person"));

        let person = schema.get_type("Person").unwrap();
        assert_eq!(person.kind, DeclarationKind::Struct);
        assert_eq!(person.sample.count, 3);
        assert_eq!(person.members.len(), 3);
        assert_eq!(person.members[1].category.as_deref(), Some("email"));
        assert_eq!(person.members[2].accessor, Accessor::Computed);
        assert_eq!(person.constructors[0].parameters.len(), 1);

        let shape = schema.get_type("Shape").unwrap();
        assert_eq!(shape.cases.len(), 2);
        assert_eq!(shape.cases[0].payload[0].name, None);
        assert!(shape.cases[1].payload.is_empty());
    }

    #[test]
    fn test_effective_mode() {
        let schema = SampleSchema::from_yaml(SAMPLE_SCHEMA).unwrap();
        let person = schema.require_type("Person").unwrap();
        let shape = schema.require_type("Shape").unwrap();
        assert_eq!(schema.effective_mode(person), GenerationMode::Fixed);
        assert_eq!(schema.effective_mode(shape), GenerationMode::Randomized);
    }

    #[test]
    fn test_defaults_when_omitted() {
        let schema = SampleSchema::from_yaml("types: []").unwrap();
        assert_eq!(schema.version, 1);
        assert_eq!(schema.defaults, SchemaDefaults::default());
        assert_eq!(schema.defaults.member, "sample");
        assert_eq!(schema.defaults.data_crate, "::sample_data");
        assert_eq!(schema.defaults.mode, GenerationMode::Randomized);
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let yaml = r#"
types:
  - { name: A, kind: struct, sample: { count: 1 } }
  - { name: A, kind: enum, sample: { count: 1 } }
"#;
        let err = SampleSchema::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateType(name) if name == "A"));
    }

    #[test]
    fn test_missing_type() {
        let schema = SampleSchema::from_yaml(SAMPLE_SCHEMA).unwrap();
        let err = schema.require_type("Nope").unwrap_err();
        assert_eq!(err.to_string(), "Type not found: Nope");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = SampleSchema::from_yaml("types: [ { name: A } ]").unwrap_err();
        assert!(matches!(err, SchemaError::YamlError(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_SCHEMA.as_bytes()).unwrap();
        let schema = SampleSchema::from_file(file.path()).unwrap();
        assert_eq!(schema.types.len(), 2);

        let err = SampleSchema::from_file("/nonexistent/schema.yaml").unwrap_err();
        assert!(matches!(err, SchemaError::IoError(_)));
    }

    #[test]
    fn test_builder_helpers() {
        let declaration = TypeDeclaration::new("Point3", DeclarationKind::Struct, 2)
            .with_mode(GenerationMode::Fixed)
            .with_member(MemberDeclaration::new("x", "f64"))
            .with_member(MemberDeclaration::positional("f64").with_category("price"))
            .with_constructor("new", &[("x", "f64"), ("y", "f64")]);
        assert_eq!(declaration.sample.mode, Some(GenerationMode::Fixed));
        assert_eq!(declaration.members[1].display_name(1), "1");
        assert_eq!(declaration.constructors[0].parameters[1].name.as_deref(), Some("y"));

        let schema = SampleSchema::new(vec![declaration])
            .unwrap()
            .with_external_types(["Money"]);
        assert!(schema.get_type("Point3").is_some());
        assert!(schema.is_external("Money"));
    }

    #[test]
    fn test_lookup_by_qualified_path() {
        let schema = SampleSchema::new(vec![TypeDeclaration::new(
            "Product",
            DeclarationKind::Struct,
            1,
        )])
        .unwrap()
        .with_external_types(["billing::Money"]);

        assert_eq!(
            schema.get_type("crate::model::Product").map(|t| t.name.as_str()),
            Some("Product")
        );
        assert!(schema.require_type("crate::model::Order").is_err());
        assert!(schema.is_external("Money"));
        assert!(schema.is_external("::billing::Money"));
        assert!(!schema.is_external("Product"));
    }

    #[test]
    fn test_accessor_storage() {
        assert!(Accessor::Stored.is_stored());
        assert!(Accessor::Observed.is_stored());
        assert!(!Accessor::Computed.is_stored());
    }
}
