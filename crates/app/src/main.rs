//! anamark: command-line driver for the labeling engine.
//!
//! Loads a mesh and replays a recorded UI script (a JSON array of IPC
//! messages) against a labeling session, writing whatever exports the
//! script asks for.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=labeling=info` - Load, clear and export lifecycle
//! - `RUST_LOG=labeling=debug` - Per-sample brush detail
//! - `RUST_LOG=debug` - All debug output
//!
//! # Example
//!
//! ```bash
//! anamark info femur.stl
//! anamark run femur.stl --script session.json --format json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod bridge;
mod commands;
mod config;
mod output;

use commands::{info, run};

/// anamark - per-vertex label painting for surface meshes.
#[derive(Parser)]
#[command(name = "anamark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON config file (defaults to $ANAMARK_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a mesh and print its statistics
    Info {
        /// Input mesh file (STL or OBJ)
        input: PathBuf,
    },

    /// Load a mesh and replay a UI script against it
    Run {
        /// Input mesh file (STL or OBJ)
        input: PathBuf,

        /// JSON array of UI messages
        #[arg(long, short)]
        script: PathBuf,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "labeling=info,anamark=info",
            2 => "labeling=debug,anamark=debug,anamark_config=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let result = config::resolve(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Info { input } => info::run(input, &config, &cli),
        Commands::Run { input, script } => run::run(input, script, &config, &cli),
    });

    if let Err(e) = &result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {}: {}", "Caused by".yellow(), cause);
        }
        std::process::exit(1);
    }

    Ok(())
}
