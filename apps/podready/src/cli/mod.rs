//! # PodReady CLI Module
//!
//! This module implements the CLI interface for the admission host.
//!
//! ## Available Commands
//!
//! - `admit` - Run an admission review through the enabled chain
//! - `features` - Show known feature gates and their effective state
//! - `plugins` - Show registered and enabled admission plugins

mod commands;

use crate::config::Config;
use crate::host::Host;
use clap::{Parser, Subcommand};
use podready_core::AdmissionError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// PodReady - readiness-gate admission host
///
/// Runs admission reviews through the configured mutating plugins.
#[derive(Parser, Debug)]
#[command(name = "podready")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Feature gate overrides, e.g. "PodReadinessGates=true"
    #[arg(long, global = true)]
    pub feature_gates: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an admission review through the chain
    Admit {
        /// Path to the AdmissionReview JSON file, or "-" for stdin
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show feature gates
    Features,

    /// Show admission plugins
    Plugins,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), AdmissionError> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let host = Host::from_config(&config, cli.feature_gates.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Admit { file }) => cmd_admit(&host, &file),
        Some(Commands::Features) | None => cmd_features(&host, json_mode),
        Some(Commands::Plugins) => cmd_plugins(&host, json_mode),
    }
}
