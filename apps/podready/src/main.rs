//! # PodReady - Readiness-Gate Admission Host
//!
//! The main binary wrapping podready-core.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 apps/podready (THE BINARY)           │
//! │                                                      │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────┐  │
//! │  │    CLI      │   │   Config    │   │  Reviews   │  │
//! │  │   (clap)    │   │   (toml)    │   │  (json)    │  │
//! │  └──────┬──────┘   └──────┬──────┘   └─────┬──────┘  │
//! │         └─────────────────┼────────────────┘         │
//! │                           ▼                          │
//! │                   ┌───────────────┐                  │
//! │                   │ podready-core │                  │
//! │                   │  (THE LOGIC)  │                  │
//! │                   └───────────────┘                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! podready features --feature-gates PodReadinessGates=true
//! podready plugins --config podready.toml
//! podready admit -f review.json --feature-gates PodReadinessGates=true
//! cat review.json | podready admit -f -
//! ```

use clap::Parser;
use podready::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries command output.
    // PODREADY_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("PODREADY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "podready=debug,podready_core=debug"
    } else {
        "podready=info,podready_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
