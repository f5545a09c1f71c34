//! # podready
//!
//! Library half of the PodReady host binary, exposed for integration tests.

pub mod cli;
pub mod config;
pub mod files;
pub mod host;
pub mod review;

pub use config::{AdmissionConfig, Config};
pub use host::Host;
