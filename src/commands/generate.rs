//! Generate command handler.

use super::RunSummary;
use crate::console::ConsoleSink;
use crate::GenerateOpts;
use anyhow::Context;
use sample_generator::{ProcessIds, SampleEngine};
use std::io::Write;

/// Run the generate command.
///
/// Output for the types that succeeded is always written, even when other
/// types reported errors.
pub fn run_generate(opts: &GenerateOpts) -> anyhow::Result<RunSummary> {
    let mut schema = opts.schema.load()?;
    if let Some(member) = &opts.member {
        schema.defaults.member = member.clone();
    }
    if let Some(data_crate) = &opts.data_crate {
        schema.defaults.data_crate = data_crate.clone();
    }

    tracing::info!(
        "Generating samples for {} type(s) (member={}, data_crate={})",
        schema.types.len(),
        schema.defaults.member,
        schema.defaults.data_crate
    );

    let engine = SampleEngine::for_schema(&schema)
        .context("Invalid generated member name or data crate path")?;
    let mut sink = ConsoleSink::stderr();
    let output = engine.generate(&schema, &mut ProcessIds, &mut sink);
    let rendered = output.render();

    match &opts.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create output directory {parent:?}"))?;
            }
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write generated code to {path:?}"))?;
            tracing::info!("Wrote {} sample set(s) to {:?}", output.sets.len(), path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write generated code to stdout")?;
        }
    }

    Ok(RunSummary {
        generated: output.sets.len(),
        failed: output.failed,
        errors: sink.errors,
        warnings: sink.warnings,
    })
}
