//! Batch generation over a whole sample schema.
//!
//! Generation runs in three passes so that one bad declaration never takes
//! down its unrelated siblings:
//!
//! 1. **Prepare** - per declaration: kind check, count check, member category
//!    checks, shape extraction and lookup of every referenced type.
//! 2. **Propagate** - declarations that refer to a failed declaration (or that
//!    sit on a reference cycle) fail as well, until nothing changes.
//! 3. **Synthesize** - surviving declarations are built in declaration order,
//!    so identifier numbering is stable for a given schema.

use crate::builder::{build_samples, render_items, SampleSet};
use crate::diagnostics::{Diagnostic, DiagnosticSink, Location};
use crate::error::GenerationError;
use crate::expr::{parse_ident, parse_path};
use crate::extract::{check_kind, check_member_categories, extract_shape};
use crate::ids::IdProvider;
use crate::synth::{ReferenceStatus, Synthesizer};
use proc_macro2::{Ident, Span};
use sample_core::{
    type_key, GenerationMode, SampleSchema, SchemaDefaults, TypeDeclaration, TypeShape,
};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Header line placed at the top of generated files.
pub const GENERATED_HEADER: &str = "// @generated by sample-builder. Do not edit.";

/// Rendering options shared by every type in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Name of the generated associated function
    member: Ident,
    /// Path of the runtime data crate
    data_crate: syn::Path,
}

impl GeneratorOptions {
    /// Validate a member name and data crate path.
    pub fn new(member: &str, data_crate: &str) -> Result<Self, GenerationError> {
        Ok(Self {
            member: parse_ident(member)?,
            data_crate: parse_path(data_crate)?,
        })
    }

    pub fn member(&self) -> &Ident {
        &self.member
    }

    pub fn data_crate(&self) -> &syn::Path {
        &self.data_crate
    }
}

impl Default for GeneratorOptions {
    /// `sample` and `::sample_data`
    fn default() -> Self {
        let crate_name = Ident::new("sample_data", Span::call_site());
        Self {
            member: Ident::new("sample", Span::call_site()),
            data_crate: syn::Path {
                leading_colon: Some(Default::default()),
                segments: std::iter::once(syn::PathSegment::from(crate_name)).collect(),
            },
        }
    }
}

impl TryFrom<&SchemaDefaults> for GeneratorOptions {
    type Error = GenerationError;

    fn try_from(defaults: &SchemaDefaults) -> Result<Self, Self::Error> {
        Self::new(&defaults.member, &defaults.data_crate)
    }
}

/// Result of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    /// Generated sample sets, in declaration order
    pub sets: Vec<SampleSet>,
    /// Declarations that produced no output
    pub failed: Vec<String>,
}

impl GenerationOutput {
    pub fn get(&self, type_name: &str) -> Option<&SampleSet> {
        self.sets.iter().find(|set| set.type_name == type_name)
    }

    /// Render all sample sets as one Rust source file.
    pub fn render(&self) -> String {
        format!("{GENERATED_HEADER}\n\n{}", render_items(&self.sets))
    }
}

struct Prepared<'s> {
    declaration: &'s TypeDeclaration,
    shape: TypeShape,
    mode: GenerationMode,
}

/// Drives sample generation for a schema.
#[derive(Debug, Clone, Default)]
pub struct SampleEngine {
    options: GeneratorOptions,
}

impl SampleEngine {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Create an engine using the schema's own defaults.
    pub fn for_schema(schema: &SampleSchema) -> Result<Self, GenerationError> {
        Ok(Self::new(GeneratorOptions::try_from(&schema.defaults)?))
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate sample sets for every declaration in the schema.
    pub fn generate(
        &self,
        schema: &SampleSchema,
        ids: &mut dyn IdProvider,
        sink: &mut dyn DiagnosticSink,
    ) -> GenerationOutput {
        let mut failed: BTreeSet<String> = BTreeSet::new();
        let mut failed_order: Vec<String> = Vec::new();
        let mut prepared: Vec<Prepared<'_>> = Vec::new();

        for declaration in &schema.types {
            match prepare(schema, declaration, sink) {
                Some(entry) => prepared.push(entry),
                None => {
                    failed.insert(declaration.name.clone());
                    failed_order.push(declaration.name.clone());
                }
            }
        }

        for (name, path) in find_cycles(&prepared) {
            let error = GenerationError::CyclicReference {
                type_name: name.clone(),
                path,
            };
            sink.report(Diagnostic::from_error(&error, Location::of_type(&name)));
            failed.insert(name);
        }

        // Propagate failures to dependents until stable
        loop {
            let mut changed = false;
            prepared.retain(|entry| {
                let name = &entry.declaration.name;
                if failed.contains(name) {
                    failed_order.push(name.clone());
                    return false;
                }
                let broken = entry
                    .shape
                    .references()
                    .into_iter()
                    .find(|reference| failed.contains(type_key(reference)));
                match broken {
                    Some(reference) => {
                        let error = GenerationError::DependencyFailed {
                            type_name: reference.to_string(),
                        };
                        sink.report(Diagnostic::from_error(&error, Location::of_type(name)));
                        failed.insert(name.clone());
                        failed_order.push(name.clone());
                        changed = true;
                        false
                    }
                    None => true,
                }
            });
            if !changed {
                break;
            }
        }

        let resolver = |name: &str| {
            if failed.contains(type_key(name)) {
                ReferenceStatus::Failed
            } else if schema.get_type(name).is_some() || schema.is_external(name) {
                ReferenceStatus::Available
            } else {
                ReferenceStatus::Unknown
            }
        };

        let mut output = GenerationOutput::default();
        for entry in &prepared {
            let name = &entry.declaration.name;
            let mut synth = Synthesizer::new(entry.mode, &self.options, &mut *ids, &resolver);
            match build_samples(&entry.shape, entry.declaration.sample.count, &mut synth) {
                Ok(set) => {
                    debug!(name = %name, samples = set.len(), mode = %entry.mode, "Generated samples");
                    output.sets.push(set);
                }
                Err(error) => {
                    sink.report(Diagnostic::from_error(&error, Location::of_type(name)));
                    failed_order.push(name.clone());
                }
            }
        }

        output.failed = failed_order;
        info!(
            generated = output.sets.len(),
            failed = output.failed.len(),
            "Sample generation finished"
        );
        output
    }
}

/// Run the per-declaration checks, reporting every problem found.
fn prepare<'s>(
    schema: &SampleSchema,
    declaration: &'s TypeDeclaration,
    sink: &mut dyn DiagnosticSink,
) -> Option<Prepared<'s>> {
    let name = &declaration.name;

    if let Err(error) = check_kind(declaration) {
        sink.report(Diagnostic::from_error(&error, Location::of_type(name)));
        return None;
    }

    let count = declaration.sample.count;
    if count <= 0 {
        let error = GenerationError::ArgumentNotGreaterThanZero { count };
        sink.report(Diagnostic::from_error(&error, Location::of_type(name)));
        return None;
    }

    let mode = schema.effective_mode(declaration);
    let mut has_errors = false;
    for diagnostic in check_member_categories(declaration, mode) {
        has_errors |= diagnostic.is_error();
        sink.report(diagnostic);
    }
    if has_errors {
        return None;
    }

    let shape = match extract_shape(declaration) {
        Ok(shape) => shape,
        Err(error) => {
            sink.report(error.into_diagnostic(name));
            return None;
        }
    };

    for parameter in shape.parameters() {
        for reference in parameter.declared_type.references() {
            if schema.get_type(reference).is_none() && !schema.is_external(reference) {
                let error = GenerationError::TypeNotSupported {
                    type_name: reference.to_string(),
                };
                let location = Location {
                    type_name: name.clone(),
                    member: parameter.name.clone(),
                };
                sink.report(Diagnostic::from_error(&error, location));
                has_errors = true;
            }
        }
    }
    if has_errors {
        return None;
    }

    debug!(name = %name, count, mode = %mode, "Prepared declaration");
    Some(Prepared {
        declaration,
        shape,
        mode,
    })
}

/// Find prepared declarations that can reach themselves through references.
///
/// Returns each such type with the path back to itself, in declaration order.
fn find_cycles(prepared: &[Prepared<'_>]) -> Vec<(String, String)> {
    let edges: HashMap<&str, Vec<&str>> = prepared
        .iter()
        .map(|entry| {
            let references = entry.shape.references().into_iter().map(type_key).collect();
            (entry.declaration.name.as_str(), references)
        })
        .collect();

    let mut cycles = Vec::new();
    for entry in prepared {
        let start = entry.declaration.name.as_str();
        if let Some(path) = path_back_to(start, &edges) {
            cycles.push((start.to_string(), path.join(" -> ")));
        }
    }
    cycles
}

fn path_back_to<'a>(start: &'a str, edges: &HashMap<&'a str, Vec<&'a str>>) -> Option<Vec<&'a str>> {
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut stack: Vec<(&str, Vec<&str>)> = vec![(start, vec![start])];

    while let Some((node, path)) = stack.pop() {
        for &next in edges.get(node).into_iter().flatten() {
            if next == start {
                let mut cycle = path.clone();
                cycle.push(start);
                return Some(cycle);
            }
            if edges.contains_key(next) && visited.insert(next) {
                let mut extended = path.clone();
                extended.push(next);
                stack.push((next, extended));
            }
        }
    }
    None
}
