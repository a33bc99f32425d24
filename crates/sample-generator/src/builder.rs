//! Sample set builder.
//!
//! Replicates a struct's parameter list, or cycles an enum's cases, `count`
//! times and wraps the resulting construction expressions into the generated
//! `impl` block.

use crate::error::GenerationError;
use crate::expr::{parse_ident, parse_member, parse_path, self_path, Expr};
use crate::synth::Synthesizer;
use proc_macro2::{Ident, TokenStream};
use quote::{quote, ToTokens};
use sample_core::{EnumCase, Parameter, ParameterSource, TypeShape};

/// Generated samples of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    pub type_name: String,
    pub type_path: syn::Path,
    /// Name of the generated associated function
    pub member: Ident,
    pub samples: Vec<Expr>,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Render the `impl` block declaring the sample collection.
    pub fn render(&self) -> String {
        render_items(std::slice::from_ref(self))
    }
}

impl ToTokens for SampleSet {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let type_path = &self.type_path;
        let member = &self.member;
        let samples = &self.samples;
        tokens.extend(quote! {
            impl #type_path {
                pub fn #member() -> Vec<Self> {
                    vec![#(#samples),*]
                }
            }
        });
    }
}

/// Format sample sets as Rust source, one `impl` block each.
pub fn render_items(sets: &[SampleSet]) -> String {
    let tokens = quote!(#(#sets)*);
    match syn::parse2::<syn::File>(tokens.clone()) {
        Ok(file) => prettyplease::unparse(&file),
        Err(_) => tokens.to_string(),
    }
}

/// Build `count` construction expressions for a shape.
pub fn build_samples(
    shape: &TypeShape,
    count: i64,
    synth: &mut Synthesizer<'_>,
) -> Result<SampleSet, GenerationError> {
    let count = usize::try_from(count)
        .ok()
        .filter(|&count| count > 0)
        .ok_or(GenerationError::ArgumentNotGreaterThanZero { count })?;

    let samples = match shape {
        TypeShape::Struct {
            source, parameters, ..
        } => (0..count)
            .map(|_| build_struct(source, parameters, synth))
            .collect::<Result<Vec<_>, _>>()?,
        TypeShape::Enum { cases, .. } => {
            if cases.is_empty() {
                return Err(GenerationError::EnumWithEmptyCases);
            }
            cases
                .iter()
                .cycle()
                .take(count)
                .map(|case| build_case(case, synth))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok(SampleSet {
        type_name: shape.name().to_string(),
        type_path: parse_path(shape.name())?,
        member: synth.options().member().clone(),
        samples,
    })
}

fn self_item(name: &str) -> Result<syn::Path, GenerationError> {
    let mut path = self_path();
    path.segments.push(parse_ident(name)?.into());
    Ok(path)
}

fn build_arguments(
    parameters: &[Parameter],
    synth: &mut Synthesizer<'_>,
) -> Result<Vec<Expr>, GenerationError> {
    parameters
        .iter()
        .map(|parameter| synth.synthesize_parameter(parameter))
        .collect()
}

fn build_fields(
    path: syn::Path,
    parameters: &[Parameter],
    synth: &mut Synthesizer<'_>,
) -> Result<Expr, GenerationError> {
    let fields = parameters
        .iter()
        .enumerate()
        .map(|(idx, parameter)| -> Result<(syn::Member, Expr), GenerationError> {
            Ok((
                parse_member(parameter.name.as_deref(), idx)?,
                synth.synthesize_parameter(parameter)?,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Expr::Struct { path, fields })
}

fn build_struct(
    source: &ParameterSource,
    parameters: &[Parameter],
    synth: &mut Synthesizer<'_>,
) -> Result<Expr, GenerationError> {
    match source {
        ParameterSource::Constructor { name } => Ok(Expr::call(
            self_item(name)?,
            build_arguments(parameters, synth)?,
        )),
        ParameterSource::Fields { tuple: true } => {
            Ok(Expr::call(self_path(), build_arguments(parameters, synth)?))
        }
        ParameterSource::Fields { tuple: false } => build_fields(self_path(), parameters, synth),
    }
}

fn build_case(case: &EnumCase, synth: &mut Synthesizer<'_>) -> Result<Expr, GenerationError> {
    let path = self_item(&case.name)?;
    if case.payload.is_empty() {
        return Ok(Expr::path(path));
    }
    if case.payload.iter().any(|slot| slot.name.is_some()) {
        return build_fields(path, &case.payload, synth);
    }
    Ok(Expr::call(path, build_arguments(&case.payload, synth)?))
}
