//! # Admission Framework
//!
//! The contract between a request dispatcher and pluggable admission plugins.
//!
//! - [`Attributes`]: everything a plugin may inspect about one request
//! - [`Handler`]: the operations a plugin wants to see
//! - [`MutationInterface`] / [`ValidationInterface`]: plugin capabilities
//! - [`Plugins`]: name → factory registry
//! - [`MutatingChain`]: runs mutating plugins in order

mod attributes;
mod chain;
mod handler;
mod interfaces;
mod plugins;

pub use attributes::Attributes;
pub use chain::MutatingChain;
pub use handler::Handler;
pub use interfaces::{Interface, MutationInterface, Operation, ValidationInterface};
pub use plugins::{Factory, Plugins};
