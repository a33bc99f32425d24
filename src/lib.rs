//! sample-builder library
//!
//! Command handlers behind the `sample-builder` binary. Each handler loads a
//! YAML sample schema, runs it through [`sample_generator::SampleEngine`] and
//! reports diagnostics on stderr.
//!
//! # CLI Usage
//!
//! ```bash
//! # Write generated sample collections to a file
//! sample-builder generate --schema schemas/bookstore.yaml --output src/samples.rs
//!
//! # Validate a schema without writing anything
//! sample-builder check --schema schemas/bookstore.yaml
//!
//! # Same, with diagnostics logged through tracing
//! RUST_LOG=warn sample-builder check --quiet --schema schemas/bookstore.yaml
//!
//! # Show the extracted shape of one type
//! sample-builder shape --schema schemas/bookstore.yaml --type Book
//!
//! # List category tokens
//! sample-builder categories
//! ```

use anyhow::Context;
use clap::Parser;
use sample_core::SampleSchema;
use std::path::{Path, PathBuf};

pub mod commands;
pub mod console;

pub use commands::{render_categories, run_check, run_generate, run_shape, RunSummary};
pub use console::ConsoleSink;

/// Schema location shared by every schema-driven command.
#[derive(Parser, Clone, Debug)]
pub struct SchemaOpts {
    /// Path to the sample schema YAML file
    #[arg(long, value_name = "PATH", env = "SAMPLE_BUILDER_SCHEMA")]
    pub schema: PathBuf,
}

impl SchemaOpts {
    pub fn load(&self) -> anyhow::Result<SampleSchema> {
        load_schema(&self.schema)
    }
}

#[derive(Parser, Clone, Debug)]
pub struct GenerateOpts {
    #[command(flatten)]
    pub schema: SchemaOpts,

    /// Output file (default: stdout)
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Name of the generated associated function (overrides the schema default)
    #[arg(long)]
    pub member: Option<String>,

    /// Path of the runtime data crate in generated code (overrides the schema default)
    #[arg(long)]
    pub data_crate: Option<String>,
}

#[derive(Parser, Clone, Debug)]
pub struct CheckOpts {
    #[command(flatten)]
    pub schema: SchemaOpts,

    /// Log diagnostics through tracing instead of printing them
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Parser, Clone, Debug)]
pub struct ShapeOpts {
    #[command(flatten)]
    pub schema: SchemaOpts,

    /// Only print the shape of this type
    #[arg(long = "type", value_name = "NAME")]
    pub type_name: Option<String>,
}

/// Load and validate a sample schema file.
pub fn load_schema(path: &Path) -> anyhow::Result<SampleSchema> {
    let schema = SampleSchema::from_file(path)
        .with_context(|| format!("Failed to load schema from {path:?}"))?;
    tracing::debug!(
        path = %path.display(),
        types = schema.types.len(),
        "Loaded sample schema"
    );
    Ok(schema)
}
