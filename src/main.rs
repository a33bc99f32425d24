//! Command-line interface for sample-builder
//!
//! # Usage Examples
//!
//! ## Generate
//! ```bash
//! # Print generated sample collections
//! sample-builder generate --schema schemas/bookstore.yaml
//!
//! # Write them into a source file, using a vendored data crate path
//! sample-builder generate --schema schemas/bookstore.yaml \
//!   --output src/samples.rs \
//!   --data-crate crate::sample_data
//! ```
//!
//! ## Validate
//! ```bash
//! SAMPLE_BUILDER_SCHEMA=schemas/bookstore.yaml sample-builder check
//! ```
//!
//! ## Inspect
//! ```bash
//! sample-builder shape --schema schemas/bookstore.yaml --type Book
//! sample-builder categories
//! ```
//!
//! Exit status is 1 when any error diagnostic was reported.

use clap::{Parser, Subcommand};
use sample_builder::{
    render_categories, run_check, run_generate, run_shape, CheckOpts, GenerateOpts, ShapeOpts,
};

#[derive(Parser)]
#[command(name = "sample-builder")]
#[command(about = "Generates static sample instances for annotated Rust types")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sample collections for every type in a schema
    Generate(GenerateOpts),

    /// Validate a schema and report diagnostics without writing code
    Check(CheckOpts),

    /// Print the extracted construction shape of schema types as YAML
    Shape(ShapeOpts),

    /// List the supported value categories
    Categories,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(opts) => run_generate(&opts)?.ensure_clean(),
        Commands::Check(opts) => run_check(&opts)?.ensure_clean(),
        Commands::Shape(opts) => run_shape(&opts, &mut std::io::stdout().lock()),
        Commands::Categories => {
            print!("{}", render_categories());
            Ok(())
        }
    }
}
