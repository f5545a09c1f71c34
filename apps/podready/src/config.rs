//! # Host Configuration
//!
//! TOML configuration for the admission host.
//!
//! ```toml
//! [feature_gates]
//! PodReadinessGates = true
//!
//! [admission]
//! enable_plugins = ["PodReady"]
//!
//! [admission.plugin_config]
//! PodReady = "podready.yaml"
//! ```
//!
//! Relative `plugin_config` paths are resolved against the directory of the
//! configuration file.

use crate::files::{MAX_CONFIG_FILE_SIZE, read_file};
use podready_core::{AdmissionError, FeatureGates, PLUGIN_NAME};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// =============================================================================
// CONFIG STRUCTURE
// =============================================================================

/// Top-level host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Feature name → enabled. Applied on top of the built-in defaults.
    pub feature_gates: BTreeMap<String, bool>,

    /// Admission chain settings.
    pub admission: AdmissionConfig,
}

/// Which plugins run, in which order, with which configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdmissionConfig {
    /// Plugins to run, in dispatch order.
    pub enable_plugins: Vec<String>,

    /// Plugin name → path of its configuration file.
    pub plugin_config: BTreeMap<String, PathBuf>,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            enable_plugins: vec![PLUGIN_NAME.to_string()],
            plugin_config: BTreeMap::new(),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, AdmissionError> {
        let config: Self =
            toml::from_str(text).map_err(|e| AdmissionError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, AdmissionError> {
        let bytes = read_file(path, MAX_CONFIG_FILE_SIZE)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            AdmissionError::ConfigError(format!("{} is not valid UTF-8: {}", path.display(), e))
        })?;

        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_paths(base);
        }

        tracing::info!(
            path = %path.display(),
            plugins = ?config.admission.enable_plugins,
            "loaded configuration"
        );
        Ok(config)
    }

    /// Structural checks that do not depend on the plugin registry.
    pub fn validate(&self) -> Result<(), AdmissionError> {
        let mut seen = Vec::with_capacity(self.admission.enable_plugins.len());
        for name in &self.admission.enable_plugins {
            if name.trim().is_empty() {
                return Err(AdmissionError::ConfigError(
                    "enable_plugins contains an empty name".to_string(),
                ));
            }
            if seen.contains(&name) {
                return Err(AdmissionError::ConfigError(format!(
                    "plugin {} is enabled more than once",
                    name
                )));
            }
            seen.push(name);
        }

        for name in self.admission.plugin_config.keys() {
            if !self.admission.enable_plugins.contains(name) {
                return Err(AdmissionError::ConfigError(format!(
                    "plugin_config given for {} which is not enabled",
                    name
                )));
            }
        }
        Ok(())
    }

    fn resolve_relative_paths(&mut self, base: &Path) {
        for path in self.admission.plugin_config.values_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Build the feature gate: built-in defaults, then this file, then the
    /// command-line `--feature-gates` string.
    pub fn build_feature_gates(&self, flag: Option<&str>) -> Result<FeatureGates, AdmissionError> {
        let mut gates = FeatureGates::with_defaults();
        gates.set_from_map(&self.feature_gates)?;
        if let Some(flag) = flag {
            gates.set(flag)?;
        }
        Ok(gates)
    }

    /// Read every configured plugin configuration file.
    pub fn read_plugin_configs(&self) -> Result<BTreeMap<String, Vec<u8>>, AdmissionError> {
        let mut configs = BTreeMap::new();
        for (name, path) in &self.admission.plugin_config {
            configs.insert(name.clone(), read_file(path, MAX_CONFIG_FILE_SIZE)?);
        }
        Ok(configs)
    }
}

// =============================================================================
// TESTS
// =============================================================================
