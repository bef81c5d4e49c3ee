//! Schematic CLI - Build blueprint entities and inspect their exported form

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{catalog, inspect};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schematic")]
#[command(about = "Validate blueprint entities against a prototype catalog", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug events (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the entities in a JSON file and print their exported records
    Inspect {
        /// JSON file holding an array of entities
        file: String,

        /// Extra catalog file or directory, merged over the bundled one
        #[arg(long = "catalog")]
        catalogs: Vec<String>,
    },

    /// List entity kinds and the prototype names each accepts
    Catalog {
        /// Kind to show, e.g. MiningDrill
        kind: Option<String>,

        /// Extra catalog file or directory, merged over the bundled one
        #[arg(long = "catalog")]
        catalogs: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect { file, catalogs } => inspect::run(&file, &catalogs),
        Commands::Catalog { kind, catalogs } => catalog::run(kind.as_deref(), &catalogs),
    }
}
