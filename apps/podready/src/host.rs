//! # Admission Host
//!
//! Wires configuration, feature gates, the plugin registry and the chain
//! together. Built once at startup; read-only afterwards.

use crate::config::Config;
use podready_core::{AdmissionError, FeatureGate, FeatureGates, MutatingChain, Plugins, plugin};
use std::sync::Arc;

/// Everything needed to admit requests.
#[derive(Debug)]
pub struct Host {
    /// The gate every plugin was built with.
    pub features: Arc<FeatureGates>,
    /// All registered plugins, enabled or not.
    pub plugins: Plugins,
    /// The enabled plugins, in dispatch order.
    pub chain: MutatingChain,
}

impl Host {
    /// Build the host from `config`, with an optional `--feature-gates` override.
    pub fn from_config(
        config: &Config,
        feature_gates: Option<&str>,
    ) -> Result<Self, AdmissionError> {
        let features = Arc::new(config.build_feature_gates(feature_gates)?);

        let mut plugins = Plugins::new();
        let shared: Arc<dyn FeatureGate> = features.clone();
        plugin::register_all(&mut plugins, shared)?;

        let configs = config.read_plugin_configs()?;
        let chain = plugins.new_from_plugins(&config.admission.enable_plugins, &configs)?;

        for (feature, _, enabled) in features.features() {
            tracing::debug!(feature = feature.name(), enabled, "feature gate");
        }
        tracing::info!(plugins = ?chain.names(), "admission chain ready");

        Ok(Self {
            features,
            plugins,
            chain,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podready_core::POD_READINESS_GATES;

    #[test]
    fn default_config_builds_podready_chain() {
        let host = Host::from_config(&Config::default(), None).expect("host");
        assert_eq!(host.chain.names(), vec!["PodReady"]);
        assert!(!host.features.enabled(POD_READINESS_GATES));
    }

    #[test]
    fn flag_enables_feature() {
        let host =
            Host::from_config(&Config::default(), Some("PodReadinessGates=true")).expect("host");
        assert!(host.features.enabled(POD_READINESS_GATES));
    }

    #[test]
    fn unknown_plugin_fails() {
        let config = Config::from_toml_str("[admission]\nenable_plugins = [\"Missing\"]\n")
            .expect("parse");
        let result = Host::from_config(&config, None);
        assert!(matches!(result, Err(AdmissionError::PluginNotFound(_))));
    }

    #[test]
    fn empty_chain_allowed() {
        let config =
            Config::from_toml_str("[admission]\nenable_plugins = []\n").expect("parse");
        let host = Host::from_config(&config, None).expect("host");
        assert!(host.chain.is_empty());
        assert_eq!(host.plugins.registered(), vec!["PodReady"]);
    }
}
