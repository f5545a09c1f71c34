//! Admission plugin registry.

use super::{MutatingChain, MutationInterface};
use crate::AdmissionError;
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;

/// Builds a plugin from an optional configuration stream.
pub type Factory = Box<
    dyn Fn(Option<&mut dyn Read>) -> Result<Arc<dyn MutationInterface>, AdmissionError>
        + Send
        + Sync,
>;

/// Registry of plugin factories, keyed by plugin name.
#[derive(Default)]
pub struct Plugins {
    registry: BTreeMap<String, Factory>,
}

impl Plugins {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`.
    pub fn register(&mut self, name: &str, factory: Factory) -> Result<(), AdmissionError> {
        if self.registry.contains_key(name) {
            return Err(AdmissionError::DuplicatePlugin(name.to_string()));
        }
        tracing::debug!(plugin = name, "registered admission plugin");
        self.registry.insert(name.to_string(), factory);
        Ok(())
    }

    /// Registered plugin names, sorted.
    #[must_use]
    pub fn registered(&self) -> Vec<String> {
        self.registry.keys().cloned().collect()
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// Instantiate a single plugin.
    pub fn new_from_plugin(
        &self,
        name: &str,
        config: Option<&[u8]>,
    ) -> Result<Arc<dyn MutationInterface>, AdmissionError> {
        let factory = self
            .registry
            .get(name)
            .ok_or_else(|| AdmissionError::PluginNotFound(name.to_string()))?;

        match config {
            Some(mut bytes) => factory(Some(&mut bytes)),
            None => factory(None),
        }
    }

    /// Instantiate the named plugins, in order, into a chain.
    ///
    /// `configs` maps plugin names to their raw configuration; plugins
    /// without an entry receive no configuration.
    pub fn new_from_plugins(
        &self,
        names: &[String],
        configs: &BTreeMap<String, Vec<u8>>,
    ) -> Result<MutatingChain, AdmissionError> {
        let mut chain = MutatingChain::new();
        for name in names {
            let config = configs.get(name).map(Vec::as_slice);
            let plugin = self.new_from_plugin(name, config)?;
            chain.push(name.clone(), plugin);
        }
        Ok(chain)
    }
}

impl std::fmt::Debug for Plugins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugins")
            .field("registered", &self.registered())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
