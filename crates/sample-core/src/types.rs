//! Scalar kinds and type references.
//!
//! [`ScalarKind`] is the closed catalog of primitive kinds the generator knows
//! how to fill. [`TypeRef`] is the recursive type description built on top of
//! it: a scalar, an array of some type, a key/value mapping, or a reference to
//! another annotated type by name.
//!
//! Type references are parsed from Rust type text with `syn`:
//!
//! ```text
//! i32                          -> Scalar(Int32)
//! chrono::DateTime<Utc>        -> Scalar(DateTime)
//! Vec<Vec<String>>             -> Array(Array(Scalar(String)))
//! BTreeMap<String, Vec<u8>>    -> Mapping { kind: BTree, key: String, value: Array(UInt8) }
//! crate::model::Product        -> Reference("crate::model::Product")
//! ```

use crate::category::SupportedDomain;
use quote::ToTokens;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Error returned when type text cannot be turned into a [`TypeRef`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeParseError {
    #[error("empty type")]
    Empty,

    #[error("invalid type '{input}': {reason}")]
    Syntax { input: String, reason: String },

    /// References, tuples, slices and other non-path types
    #[error("type '{0}' is not supported")]
    UnsupportedType(String),

    #[error("'{name}' expects {expected} type argument(s), found {found}")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Generic types other than the known containers cannot be sampled
    #[error("generic type '{0}' is not supported")]
    UnsupportedGenerics(String),
}

/// Primitive kinds with a fixed placeholder and a data-provider method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Bool,
    /// Byte buffer (`Vec<u8>` alias)
    Bytes,
    /// UTC timestamp
    DateTime,
    Uuid,
    Point,
    Rect,
    Size,
    Vector,
    Url,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 22] = [
        ScalarKind::Int,
        ScalarKind::Int8,
        ScalarKind::Int16,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::UInt,
        ScalarKind::UInt8,
        ScalarKind::UInt16,
        ScalarKind::UInt32,
        ScalarKind::UInt64,
        ScalarKind::Float32,
        ScalarKind::Float64,
        ScalarKind::String,
        ScalarKind::Bool,
        ScalarKind::Bytes,
        ScalarKind::DateTime,
        ScalarKind::Uuid,
        ScalarKind::Point,
        ScalarKind::Rect,
        ScalarKind::Size,
        ScalarKind::Vector,
        ScalarKind::Url,
    ];

    /// Rust type name of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::Int => "isize",
            ScalarKind::Int8 => "i8",
            ScalarKind::Int16 => "i16",
            ScalarKind::Int32 => "i32",
            ScalarKind::Int64 => "i64",
            ScalarKind::UInt => "usize",
            ScalarKind::UInt8 => "u8",
            ScalarKind::UInt16 => "u16",
            ScalarKind::UInt32 => "u32",
            ScalarKind::UInt64 => "u64",
            ScalarKind::Float32 => "f32",
            ScalarKind::Float64 => "f64",
            ScalarKind::String => "String",
            ScalarKind::Bool => "bool",
            ScalarKind::Bytes => "Bytes",
            ScalarKind::DateTime => "DateTime",
            ScalarKind::Uuid => "Uuid",
            ScalarKind::Point => "Point",
            ScalarKind::Rect => "Rect",
            ScalarKind::Size => "Size",
            ScalarKind::Vector => "Vector",
            ScalarKind::Url => "Url",
        }
    }

    /// Name of the data-provider method producing values of this kind.
    pub fn method_name(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Bytes => "bytes",
            ScalarKind::DateTime => "datetime",
            ScalarKind::Uuid => "uuid",
            ScalarKind::Point => "point",
            ScalarKind::Rect => "rect",
            ScalarKind::Size => "size",
            ScalarKind::Vector => "vector",
            ScalarKind::Url => "url",
            other => other.type_name(),
        }
    }

    /// Look up a kind by its Rust type name (last path segment).
    pub fn from_type_name(name: &str) -> Option<Self> {
        ScalarKind::ALL
            .into_iter()
            .find(|kind| kind.type_name() == name)
    }

    /// Domain of categories this kind accepts, if any.
    pub fn domain(&self) -> Option<SupportedDomain> {
        match self {
            ScalarKind::String => Some(SupportedDomain::String),
            ScalarKind::Float64 => Some(SupportedDomain::Double),
            ScalarKind::Url => Some(SupportedDomain::UrlLike),
            _ => None,
        }
    }

    /// Check if this is an integer kind.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ScalarKind::Int
                | ScalarKind::Int8
                | ScalarKind::Int16
                | ScalarKind::Int32
                | ScalarKind::Int64
                | ScalarKind::UInt
                | ScalarKind::UInt8
                | ScalarKind::UInt16
                | ScalarKind::UInt32
                | ScalarKind::UInt64
        )
    }

    /// Check if this is a floating point kind.
    pub fn is_float(&self) -> bool {
        matches!(self, ScalarKind::Float32 | ScalarKind::Float64)
    }

    /// Check if this is one of the geometry kinds.
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            ScalarKind::Point | ScalarKind::Rect | ScalarKind::Size | ScalarKind::Vector
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Which standard map type a [`TypeRef::Mapping`] was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapKind {
    #[default]
    Hash,
    BTree,
}

impl MapKind {
    /// Rust type name of this map.
    pub fn type_name(&self) -> &'static str {
        match self {
            MapKind::Hash => "HashMap",
            MapKind::BTree => "BTreeMap",
        }
    }

    fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "HashMap" => Some(MapKind::Hash),
            "BTreeMap" => Some(MapKind::BTree),
            _ => None,
        }
    }
}

/// Recursive description of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Scalar(ScalarKind),
    Array(Box<TypeRef>),
    Mapping {
        kind: MapKind,
        key: Box<TypeRef>,
        value: Box<TypeRef>,
    },
    /// Another annotated type, by path
    Reference(String),
}

impl TypeRef {
    pub fn scalar(kind: ScalarKind) -> Self {
        TypeRef::Scalar(kind)
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    /// A `HashMap` from `key` to `value`.
    pub fn mapping(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::mapping_of(MapKind::Hash, key, value)
    }

    pub fn mapping_of(kind: MapKind, key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Mapping {
            kind,
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeRef::Reference(name.into())
    }

    /// Scalar kind if this is a scalar.
    pub fn as_scalar(&self) -> Option<ScalarKind> {
        match self {
            TypeRef::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The innermost type reached through arrays and mapping values.
    ///
    /// Categories attached to a container member apply to this leaf.
    pub fn leaf(&self) -> &TypeRef {
        match self {
            TypeRef::Array(element) => element.leaf(),
            TypeRef::Mapping { value, .. } => value.leaf(),
            other => other,
        }
    }

    /// All referenced type paths, in order of appearance.
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            TypeRef::Scalar(_) => {}
            TypeRef::Array(element) => element.collect_references(names),
            TypeRef::Mapping { key, value, .. } => {
                key.collect_references(names);
                value.collect_references(names);
            }
            TypeRef::Reference(name) => names.push(name),
        }
    }

    fn from_syn(ty: &syn::Type) -> Result<Self, TypeParseError> {
        match ty {
            syn::Type::Group(group) => TypeRef::from_syn(&group.elem),
            syn::Type::Paren(paren) => TypeRef::from_syn(&paren.elem),
            syn::Type::Path(syn::TypePath { qself: None, path }) => TypeRef::from_path(path),
            other => Err(TypeParseError::UnsupportedType(
                other.to_token_stream().to_string(),
            )),
        }
    }

    fn from_path(path: &syn::Path) -> Result<Self, TypeParseError> {
        let text = path_text(path);
        let Some(last) = path.segments.last() else {
            return Err(TypeParseError::Empty);
        };
        let mut prefix = path.segments.iter().rev().skip(1);
        if prefix.any(|segment| !segment.arguments.is_none()) {
            return Err(TypeParseError::UnsupportedGenerics(text));
        }

        let arguments: Vec<&syn::Type> = match &last.arguments {
            syn::PathArguments::None => Vec::new(),
            syn::PathArguments::AngleBracketed(bracketed) => bracketed
                .args
                .iter()
                .map(|arg| match arg {
                    syn::GenericArgument::Type(ty) => Ok(ty),
                    _ => Err(TypeParseError::UnsupportedGenerics(text.clone())),
                })
                .collect::<Result<_, _>>()?,
            syn::PathArguments::Parenthesized(_) => {
                return Err(TypeParseError::UnsupportedType(
                    path.to_token_stream().to_string(),
                ))
            }
        };

        let name = last.ident.to_string();
        let check_arity = |expected: usize| {
            if arguments.len() == expected {
                Ok(())
            } else {
                Err(TypeParseError::WrongArity {
                    name: name.clone(),
                    expected,
                    found: arguments.len(),
                })
            }
        };

        if name == "Vec" {
            check_arity(1)?;
            return Ok(TypeRef::array(TypeRef::from_syn(arguments[0])?));
        }
        if let Some(kind) = MapKind::from_type_name(&name) {
            check_arity(2)?;
            return Ok(TypeRef::mapping_of(
                kind,
                TypeRef::from_syn(arguments[0])?,
                TypeRef::from_syn(arguments[1])?,
            ));
        }
        match ScalarKind::from_type_name(&name) {
            // DateTime<Utc> carries its time zone as an argument
            Some(ScalarKind::DateTime) if arguments.len() <= 1 => {
                Ok(TypeRef::Scalar(ScalarKind::DateTime))
            }
            Some(kind) => {
                check_arity(0)?;
                Ok(TypeRef::Scalar(kind))
            }
            None if !arguments.is_empty() => Err(TypeParseError::UnsupportedGenerics(text)),
            None => Ok(TypeRef::Reference(text)),
        }
    }
}

/// Name a type path is declared under: its last segment.
///
/// `crate::model::Product` and `Product` both name the declaration `Product`.
pub fn type_key(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path).trim()
}

fn path_text(path: &syn::Path) -> String {
    let segments: Vec<String> = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();
    let joined = segments.join("::");
    if path.leading_colon.is_some() {
        format!("::{joined}")
    } else {
        joined
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Scalar(kind) => write!(f, "{kind}"),
            TypeRef::Array(element) => write!(f, "Vec<{element}>"),
            TypeRef::Mapping { kind, key, value } => {
                write!(f, "{}<{key}, {value}>", kind.type_name())
            }
            TypeRef::Reference(name) => f.write_str(name),
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(TypeParseError::Empty);
        }
        let ty = syn::parse_str::<syn::Type>(s).map_err(|e| TypeParseError::Syntax {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        TypeRef::from_syn(&ty)
    }
}

// ============================================================================
// Serde
// ============================================================================

// Supports both the Rust type text ("Vec<String>") and a map form
// ({"type": "array", "element": "String"}).

impl Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct TypeRefVisitor;

        impl<'de> Visitor<'de> for TypeRefVisitor {
            type Value = TypeRef;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a Rust type string or a map describing a type")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                value.parse().map_err(E::custom)
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                match type_name.as_str() {
                    "array" => {
                        let element: TypeRef = get_field_required(&fields, "element")?;
                        Ok(TypeRef::array(element))
                    }
                    "mapping" | "map" | "btree_map" => {
                        let key: TypeRef = get_field_required(&fields, "key")?;
                        let value: TypeRef = get_field_required(&fields, "value")?;
                        let kind = if type_name == "btree_map" {
                            MapKind::BTree
                        } else {
                            MapKind::Hash
                        };
                        Ok(TypeRef::mapping_of(kind, key, value))
                    }
                    "reference" => {
                        let name: String = get_field_required(&fields, "name")?;
                        Ok(TypeRef::Reference(name))
                    }
                    other => ScalarKind::from_type_name(other)
                        .map(TypeRef::Scalar)
                        .ok_or_else(|| M::Error::custom(format!("unknown type kind: {other}"))),
                }
            }
        }

        deserializer.deserialize_any(TypeRefVisitor)
    }
}

fn get_field_required<T, E>(fields: &HashMap<String, serde_yaml::Value>, name: &'static str) -> Result<T, E>
where
    T: serde::de::DeserializeOwned,
    E: serde::de::Error,
{
    let value = fields.get(name).ok_or_else(|| E::missing_field(name))?;
    serde_yaml::from_value(value.clone()).map_err(E::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> TypeRef {
        text.parse().unwrap()
    }

    #[test]
    fn test_scalar_names() {
        for kind in ScalarKind::ALL {
            assert_eq!(parse(kind.type_name()), TypeRef::Scalar(kind));
        }
    }

    #[test]
    fn test_path_prefixes_are_ignored_for_scalars() {
        assert_eq!(parse("chrono::DateTime<Utc>"), TypeRef::scalar(ScalarKind::DateTime));
        assert_eq!(parse("::uuid::Uuid"), TypeRef::scalar(ScalarKind::Uuid));
        assert_eq!(parse("std::string::String"), TypeRef::scalar(ScalarKind::String));
    }

    #[test]
    fn test_nested_containers() {
        assert_eq!(
            parse("Vec<Vec<String>>"),
            TypeRef::array(TypeRef::array(TypeRef::scalar(ScalarKind::String)))
        );
        assert_eq!(
            parse("std::collections::BTreeMap< String , Vec<u8> >"),
            TypeRef::mapping_of(
                MapKind::BTree,
                TypeRef::scalar(ScalarKind::String),
                TypeRef::array(TypeRef::scalar(ScalarKind::UInt8))
            )
        );
        assert_eq!(
            parse("HashMap<String, i32,>"),
            TypeRef::mapping(
                TypeRef::scalar(ScalarKind::String),
                TypeRef::scalar(ScalarKind::Int32)
            )
        );
    }

    #[test]
    fn test_references() {
        assert_eq!(parse("Product"), TypeRef::reference("Product"));
        assert_eq!(
            parse("crate::model::Product"),
            TypeRef::reference("crate::model::Product")
        );
        assert_eq!(
            parse("HashMap<String, Vec<Product>>").references(),
            vec!["Product"]
        );
        assert_eq!(parse("r#type"), TypeRef::reference("r#type"));
        assert_eq!(parse("::model::Product").to_string(), "::model::Product");
    }

    #[test]
    fn test_type_key() {
        assert_eq!(type_key("Product"), "Product");
        assert_eq!(type_key("crate::model::Product"), "Product");
        assert_eq!(type_key("::model::Product"), "Product");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<TypeRef>().unwrap_err(), TypeParseError::Empty);
        assert!(matches!(
            "Vec<String".parse::<TypeRef>().unwrap_err(),
            TypeParseError::Syntax { .. }
        ));
        assert!(matches!(
            "Vec<String, i32>".parse::<TypeRef>().unwrap_err(),
            TypeParseError::WrongArity { expected: 1, found: 2, .. }
        ));
        assert!(matches!(
            "HashMap<String>".parse::<TypeRef>().unwrap_err(),
            TypeParseError::WrongArity { expected: 2, found: 1, .. }
        ));
        assert_eq!(
            "Option<String>".parse::<TypeRef>().unwrap_err(),
            TypeParseError::UnsupportedGenerics("Option".to_string())
        );
        assert!(matches!(
            "&str".parse::<TypeRef>().unwrap_err(),
            TypeParseError::UnsupportedType(_)
        ));
        assert!(matches!(
            "(String, i32)".parse::<TypeRef>().unwrap_err(),
            TypeParseError::UnsupportedType(_)
        ));
        assert!(matches!(
            "Vec<'a>".parse::<TypeRef>().unwrap_err(),
            TypeParseError::UnsupportedGenerics(_)
        ));
        assert!(matches!(
            "String extra".parse::<TypeRef>().unwrap_err(),
            TypeParseError::Syntax { .. }
        ));
    }

    #[test]
    fn test_display() {
        let ty = parse("BTreeMap<String, Vec<chrono::DateTime<Utc>>>");
        assert_eq!(ty.to_string(), "BTreeMap<String, Vec<DateTime>>");

        for text in [
            "BTreeMap<String, Vec<DateTime>>",
            "HashMap<u8, BTreeMap<String, Product>>",
            "Vec<crate::model::Product>",
        ] {
            let ty = parse(text);
            assert_eq!(ty.to_string(), text);
            assert_eq!(parse(&ty.to_string()), ty);
        }
    }

    #[test]
    fn test_leaf() {
        let ty = parse("Vec<HashMap<u8, Url>>");
        assert_eq!(ty.leaf(), &TypeRef::scalar(ScalarKind::Url));
    }

    #[test]
    fn test_domains() {
        assert_eq!(ScalarKind::String.domain(), Some(SupportedDomain::String));
        assert_eq!(ScalarKind::Float64.domain(), Some(SupportedDomain::Double));
        assert_eq!(ScalarKind::Url.domain(), Some(SupportedDomain::UrlLike));
        assert_eq!(ScalarKind::Float32.domain(), None);
        assert_eq!(ScalarKind::Int32.domain(), None);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(ScalarKind::Int8.method_name(), "i8");
        assert_eq!(ScalarKind::UInt.method_name(), "usize");
        assert_eq!(ScalarKind::String.method_name(), "string");
        assert_eq!(ScalarKind::DateTime.method_name(), "datetime");
    }

    #[test]
    fn test_kind_predicates() {
        assert!(ScalarKind::UInt64.is_integer());
        assert!(!ScalarKind::Float32.is_integer());
        assert!(ScalarKind::Float32.is_float());
        assert!(ScalarKind::Rect.is_geometry());
        assert!(!ScalarKind::Url.is_geometry());
    }

    #[test]
    fn test_deserialize_string_and_map_forms() {
        let from_string: TypeRef = serde_yaml::from_str("Vec<f64>").unwrap();
        assert_eq!(from_string, TypeRef::array(TypeRef::scalar(ScalarKind::Float64)));

        let yaml = r#"
type: mapping
key: String
value:
  type: array
  element: Product
"#;
        let from_map: TypeRef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            from_map,
            TypeRef::mapping(
                TypeRef::scalar(ScalarKind::String),
                TypeRef::array(TypeRef::reference("Product"))
            )
        );

        let scalar: TypeRef = serde_yaml::from_str("type: bool").unwrap();
        assert_eq!(scalar, TypeRef::scalar(ScalarKind::Bool));

        assert!(serde_yaml::from_str::<TypeRef>("type: array").is_err());
    }

    #[test]
    fn test_serialize_as_type_text() {
        let ty = TypeRef::array(TypeRef::reference("Product"));
        let yaml = serde_yaml::to_string(&ty).unwrap();
        assert_eq!(yaml.trim(), "Vec<Product>");

        let ty = parse("BTreeMap<String, u32>");
        let yaml = serde_yaml::to_string(&ty).unwrap();
        assert_eq!(serde_yaml::from_str::<TypeRef>(&yaml).unwrap(), ty);

        let from_map: TypeRef =
            serde_yaml::from_str("{ type: btree_map, key: String, value: u32 }").unwrap();
        assert_eq!(from_map, ty);
    }
}
