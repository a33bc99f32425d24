//! Terminal diagnostic output.

use sample_generator::{Diagnostic, DiagnosticSink, Severity};
use std::io::Write;

/// Writes diagnostics to a terminal stream and counts them.
pub struct ConsoleSink<W: Write> {
    out: W,
    pub errors: usize,
    pub warnings: usize,
}

impl ConsoleSink<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            errors: 0,
            warnings: 0,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticSink for ConsoleSink<W> {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        tracing::debug!(id = diagnostic.id, location = %diagnostic.location, "Diagnostic reported");
        // Diagnostics are best effort once the terminal is gone
        let _ = writeln!(self.out, "{diagnostic}\n");
    }
}
