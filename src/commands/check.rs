//! Check command handler.

use super::RunSummary;
use crate::console::ConsoleSink;
use crate::CheckOpts;
use anyhow::Context;
use sample_generator::{SampleEngine, SequentialIds, TracingSink};

/// Run the check command: full validation, no output file.
///
/// With `--quiet`, diagnostics go to the log instead of the terminal.
pub fn run_check(opts: &CheckOpts) -> anyhow::Result<RunSummary> {
    let schema = opts.schema.load()?;
    let engine = SampleEngine::for_schema(&schema)
        .context("Invalid generated member name or data crate path")?;
    let mut ids = SequentialIds::new();

    let (output, errors, warnings) = if opts.quiet {
        let mut sink = TracingSink::new();
        let output = engine.generate(&schema, &mut ids, &mut sink);
        (output, sink.errors, sink.warnings)
    } else {
        let mut sink = ConsoleSink::stderr();
        let output = engine.generate(&schema, &mut ids, &mut sink);
        (output, sink.errors, sink.warnings)
    };

    let summary = RunSummary {
        generated: output.sets.len(),
        failed: output.failed,
        errors,
        warnings,
    };

    if summary.errors == 0 {
        tracing::info!(
            "Schema is valid: {} type(s), {} warning(s)",
            summary.generated,
            summary.warnings
        );
    } else {
        tracing::error!(
            "{} of {} type(s) failed with {} error(s)",
            summary.failed.len(),
            schema.types.len(),
            summary.errors
        );
    }
    Ok(summary)
}
