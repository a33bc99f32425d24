//! Sample value synthesizer.
//!
//! Maps a [`TypeRef`] (plus an optional category) to a value expression:
//!
//! | Type | Expression |
//! |------|------------|
//! | scalar | catalog literal or data-provider call |
//! | `Vec<T>` | `vec![<T>]` (one element) |
//! | `HashMap<K, V>` | one `(K, V)` pair, category applied to `V` only |
//! | reference | first element of the referenced type's sample collection |
//!
//! Referenced types are never expanded. Whether a reference can be used is
//! decided by a [`ReferenceResolver`].

use crate::catalog;
use crate::engine::GeneratorOptions;
use crate::error::GenerationError;
use crate::expr::{parse_path, Expr};
use crate::ids::IdProvider;
use sample_core::{Category, GenerationMode, Parameter, TypeRef};

/// Whether a referenced type has a sample collection to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceStatus {
    /// Declared (or external) and generated
    Available,
    /// Declared, but its own generation failed
    Failed,
    /// Not known at all
    Unknown,
}

/// Looks up referenced types by name.
pub trait ReferenceResolver {
    fn status(&self, name: &str) -> ReferenceStatus;
}

impl<F> ReferenceResolver for F
where
    F: Fn(&str) -> ReferenceStatus,
{
    fn status(&self, name: &str) -> ReferenceStatus {
        self(name)
    }
}

/// Produces value expressions for one type in one mode.
pub struct Synthesizer<'a> {
    mode: GenerationMode,
    options: &'a GeneratorOptions,
    ids: &'a mut dyn IdProvider,
    resolver: &'a dyn ReferenceResolver,
}

impl<'a> Synthesizer<'a> {
    pub fn new(
        mode: GenerationMode,
        options: &'a GeneratorOptions,
        ids: &'a mut dyn IdProvider,
        resolver: &'a dyn ReferenceResolver,
    ) -> Self {
        Self {
            mode,
            options,
            ids,
            resolver,
        }
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn options(&self) -> &GeneratorOptions {
        self.options
    }

    /// Synthesize the value of one parameter using its declared category.
    pub fn synthesize_parameter(&mut self, parameter: &Parameter) -> Result<Expr, GenerationError> {
        self.synthesize(&parameter.declared_type, parameter.category)
    }

    /// Synthesize one value expression of the given type.
    pub fn synthesize(
        &mut self,
        ty: &TypeRef,
        category: Option<Category>,
    ) -> Result<Expr, GenerationError> {
        match ty {
            TypeRef::Scalar(kind) => Ok(match self.mode {
                GenerationMode::Fixed => {
                    catalog::fixed_literal(*kind, self.options.data_crate(), &mut *self.ids)
                }
                GenerationMode::Randomized => {
                    catalog::random_call(*kind, category, self.options.data_crate())
                }
            }),
            TypeRef::Array(element) => {
                let element = self.synthesize(element, category)?;
                Ok(Expr::Vec(vec![element]))
            }
            TypeRef::Mapping { key, value, .. } => {
                let key = self.synthesize(key, None)?;
                let value = self.synthesize(value, category)?;
                Ok(Expr::Map(vec![(key, value)]))
            }
            TypeRef::Reference(name) => match self.resolver.status(name) {
                ReferenceStatus::Available => Ok(Expr::FirstSample {
                    type_path: parse_path(name)?,
                    member: self.options.member().clone(),
                }),
                ReferenceStatus::Failed => Err(GenerationError::DependencyFailed {
                    type_name: name.clone(),
                }),
                ReferenceStatus::Unknown => Err(GenerationError::TypeNotSupported {
                    type_name: name.clone(),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use quote::quote;
    use sample_core::ScalarKind;

    fn available(_: &str) -> ReferenceStatus {
        ReferenceStatus::Available
    }

    fn render(mode: GenerationMode, ty: &str, category: Option<Category>) -> String {
        let options = GeneratorOptions::default();
        let mut ids = SequentialIds::new();
        let mut synth = Synthesizer::new(mode, &options, &mut ids, &available);
        synth
            .synthesize(&ty.parse().unwrap(), category)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_nested_arrays_fixed() {
        assert_eq!(
            render(GenerationMode::Fixed, "Vec<Vec<String>>", None),
            quote!(vec![vec![String::from("Hello World")]]).to_string()
        );
    }

    #[test]
    fn test_mapping_fixed() {
        assert_eq!(
            render(GenerationMode::Fixed, "HashMap<String, i32>", None),
            quote!([(String::from("Hello World"), 0)].into_iter().collect()).to_string()
        );
    }

    #[test]
    fn test_mapping_category_applies_to_value_only() {
        let rendered = render(
            GenerationMode::Randomized,
            "HashMap<String, String>",
            Some(Category::FirstName),
        );
        assert_eq!(
            rendered,
            quote!([(
                ::sample_data::DataGenerator::random(None).string(),
                ::sample_data::DataGenerator::random(Some(::sample_data::Category::FirstName)).string()
            )]
            .into_iter()
            .collect())
            .to_string()
        );
    }

    #[test]
    fn test_array_category_reaches_element() {
        let rendered = render(GenerationMode::Randomized, "Vec<f64>", Some(Category::Price));
        assert_eq!(
            rendered,
            quote!(vec![::sample_data::DataGenerator::random(Some(::sample_data::Category::Price)).f64()])
                .to_string()
        );
    }

    #[test]
    fn test_reference_reads_first_sample() {
        let options = GeneratorOptions::default();
        let mut ids = SequentialIds::new();
        let mut synth = Synthesizer::new(GenerationMode::Fixed, &options, &mut ids, &available);
        let expr = synth.synthesize(&TypeRef::reference("Product"), None).unwrap();
        assert_eq!(
            expr,
            Expr::FirstSample {
                type_path: parse_path("Product").unwrap(),
                member: crate::expr::parse_ident("sample").unwrap(),
            }
        );
        let qualified = synth
            .synthesize(&"crate::model::Product".parse().unwrap(), None)
            .unwrap();
        assert_eq!(
            qualified.to_string(),
            quote!(crate::model::Product::sample().remove(0)).to_string()
        );
        // References never consume identifiers
        assert_eq!(ids.peek(), 0);
    }

    #[test]
    fn test_reference_failures() {
        let options = GeneratorOptions::default();
        let mut ids = SequentialIds::new();
        let resolver = |name: &str| match name {
            "Broken" => ReferenceStatus::Failed,
            _ => ReferenceStatus::Unknown,
        };
        let mut synth = Synthesizer::new(GenerationMode::Fixed, &options, &mut ids, &resolver);

        assert_eq!(
            synth.synthesize(&TypeRef::reference("Broken"), None),
            Err(GenerationError::DependencyFailed {
                type_name: "Broken".to_string()
            })
        );
        assert_eq!(
            synth.synthesize(&TypeRef::array(TypeRef::reference("Ghost")), None),
            Err(GenerationError::TypeNotSupported {
                type_name: "Ghost".to_string()
            })
        );
    }

    #[test]
    fn test_fixed_uuids_are_fresh() {
        let options = GeneratorOptions::default();
        let mut ids = SequentialIds::new();
        let mut synth = Synthesizer::new(GenerationMode::Fixed, &options, &mut ids, &available);
        let uuid = TypeRef::scalar(ScalarKind::Uuid);
        let a = synth.synthesize(&uuid, None).unwrap().to_string();
        let b = synth.synthesize(&uuid, None).unwrap().to_string();
        assert_ne!(a, b);
        assert_eq!(b, quote!(::sample_data::Uuid::from_u128(1)).to_string());
    }

    #[test]
    fn test_custom_member_and_crate() {
        let options = GeneratorOptions::new("fixtures", "crate::data").unwrap();
        let mut ids = SequentialIds::new();
        let mut synth =
            Synthesizer::new(GenerationMode::Randomized, &options, &mut ids, &available);
        assert_eq!(
            synth
                .synthesize(&TypeRef::reference("Product"), None)
                .unwrap()
                .to_string(),
            quote!(Product::fixtures().remove(0)).to_string()
        );
        assert_eq!(
            synth
                .synthesize(&TypeRef::scalar(ScalarKind::Bool), None)
                .unwrap()
                .to_string(),
            quote!(crate::data::DataGenerator::random(None).bool()).to_string()
        );
    }
}
