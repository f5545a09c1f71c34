//! Sequential dispatcher over mutating plugins.

use super::{Attributes, MutationInterface};
use crate::AdmissionError;
use std::sync::Arc;

/// An ordered list of named mutating plugins.
///
/// Each plugin sees the object as left by the plugins before it.
#[derive(Clone, Default)]
pub struct MutatingChain {
    plugins: Vec<(String, Arc<dyn MutationInterface>)>,
}

impl MutatingChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin to the end of the chain.
    pub fn push(&mut self, name: impl Into<String>, plugin: Arc<dyn MutationInterface>) {
        self.plugins.push((name.into(), plugin));
    }

    /// Plugin names in dispatch order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run every plugin that handles the request's operation.
    ///
    /// Stops at the first error and returns it unchanged.
    pub fn admit(&self, attributes: &mut Attributes) -> Result<(), AdmissionError> {
        let operation = attributes.operation();
        for (name, plugin) in &self.plugins {
            if !plugin.handles(operation) {
                tracing::trace!(plugin = %name, %operation, "plugin does not handle operation");
                continue;
            }
            if let Err(err) = plugin.admit(attributes) {
                tracing::debug!(
                    plugin = %name,
                    %operation,
                    resource = %attributes.resource(),
                    error = %err,
                    "admission denied"
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for MutatingChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutatingChain")
            .field("plugins", &self.names())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
