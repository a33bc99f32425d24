//! Shape command handler.

use crate::console::ConsoleSink;
use crate::ShapeOpts;
use anyhow::Context;
use sample_core::{TypeDeclaration, TypeShape};
use sample_generator::{check_kind, extract_shape, Diagnostic, DiagnosticSink, Location};
use std::io::Write;

/// Run the shape command, writing the extracted shapes as YAML to `out`.
///
/// Declarations whose shape cannot be extracted are reported on stderr and
/// make the command fail after the remaining shapes are printed.
pub fn run_shape<W: Write>(opts: &ShapeOpts, out: &mut W) -> anyhow::Result<()> {
    let schema = opts.schema.load()?;
    let declarations: Vec<&TypeDeclaration> = match &opts.type_name {
        Some(name) => vec![schema
            .require_type(name)
            .with_context(|| format!("Cannot show shape of '{name}'"))?],
        None => schema.types.iter().collect(),
    };

    let mut sink = ConsoleSink::stderr();
    let mut shapes: Vec<TypeShape> = Vec::with_capacity(declarations.len());
    for declaration in declarations {
        match shape_of(declaration) {
            Ok(shape) => shapes.push(shape),
            Err(diagnostic) => sink.report(diagnostic),
        }
    }

    let yaml = serde_yaml::to_string(&shapes).context("Failed to serialize shapes")?;
    out.write_all(yaml.as_bytes())
        .context("Failed to write shapes")?;

    if sink.has_errors() {
        anyhow::bail!("{} type(s) have no extractable shape", sink.errors);
    }
    Ok(())
}

fn shape_of(declaration: &TypeDeclaration) -> Result<TypeShape, Diagnostic> {
    check_kind(declaration)
        .map_err(|error| Diagnostic::from_error(&error, Location::of_type(&declaration.name)))?;
    extract_shape(declaration).map_err(|error| error.into_diagnostic(&declaration.name))
}
