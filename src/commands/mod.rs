//! Command handlers.
//!
//! This module contains handlers for the generate, check, shape and
//! categories commands.

pub mod categories;
pub mod check;
pub mod generate;
pub mod shape;

pub use categories::render_categories;
pub use check::run_check;
pub use generate::run_generate;
pub use shape::run_shape;

/// Outcome of a generation or check run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Types that produced a sample collection
    pub generated: usize,
    /// Types that produced nothing, in the order they were dropped
    pub failed: Vec<String>,
    pub errors: usize,
    pub warnings: usize,
}

impl RunSummary {
    /// Fail when any error diagnostic was reported.
    pub fn ensure_clean(&self) -> anyhow::Result<()> {
        if self.errors == 0 {
            return Ok(());
        }
        anyhow::bail!(
            "{} error(s) reported, no samples for: {}",
            self.errors,
            self.failed.join(", ")
        )
    }
}
