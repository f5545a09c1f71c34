//! # Feature Gates
//!
//! Named boolean toggles controlling optional behavior.
//!
//! A gate is configured once at startup (through [`FeatureGates`]) and then
//! shared read-only as `Arc<dyn FeatureGate>`. Admission plugins only ever
//! query it.

mod gates;

pub use gates::FeatureGates;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// FEATURE KEYS
// =============================================================================

/// A named feature key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Feature(pub &'static str);

impl Feature {
    /// The feature name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.0)
    }
}

/// Allows extra readiness conditions to be declared on pods and injected at
/// admission time.
pub const POD_READINESS_GATES: Feature = Feature("PodReadinessGates");

// =============================================================================
// FEATURE SPECS
// =============================================================================

/// Maturity of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PreRelease {
    Alpha,
    Beta,
    #[serde(rename = "GA")]
    Ga,
    Deprecated,
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha => f.pad("ALPHA"),
            Self::Beta => f.pad("BETA"),
            Self::Ga => f.pad("GA"),
            Self::Deprecated => f.pad("DEPRECATED"),
        }
    }
}

/// How a feature behaves when nobody overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    /// Value used when the feature is not explicitly set.
    pub default: bool,
    /// Maturity of the feature.
    pub pre_release: PreRelease,
    /// When true, the feature can only be set to its default.
    #[serde(default)]
    pub lock_to_default: bool,
}

impl FeatureSpec {
    /// An alpha feature with the given default.
    #[must_use]
    pub const fn alpha(default: bool) -> Self {
        Self {
            default,
            pre_release: PreRelease::Alpha,
            lock_to_default: false,
        }
    }

    /// A beta feature with the given default.
    #[must_use]
    pub const fn beta(default: bool) -> Self {
        Self {
            default,
            pre_release: PreRelease::Beta,
            lock_to_default: false,
        }
    }

    /// A graduated feature, enabled and locked.
    #[must_use]
    pub const fn ga() -> Self {
        Self {
            default: true,
            pre_release: PreRelease::Ga,
            lock_to_default: true,
        }
    }
}

/// Features this crate knows about, with their default specs.
#[must_use]
pub fn default_features() -> BTreeMap<Feature, FeatureSpec> {
    BTreeMap::from([(POD_READINESS_GATES, FeatureSpec::alpha(false))])
}

// =============================================================================
// FEATURE GATE TRAIT
// =============================================================================

/// Read-only view of a feature gate.
///
/// Implementations must be safe to query from many requests at once.
pub trait FeatureGate: Send + Sync {
    /// Whether the feature is enabled. Unknown features are disabled.
    fn enabled(&self, feature: Feature) -> bool;

    /// Names of every feature the gate knows, sorted.
    fn known_features(&self) -> Vec<&'static str>;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pod_readiness_gates_name() {
        assert_eq!(POD_READINESS_GATES.name(), "PodReadinessGates");
        assert_eq!(POD_READINESS_GATES.to_string(), "PodReadinessGates");
    }

    #[test]
    fn pod_readiness_gates_is_alpha_off_by_default() {
        let defaults = default_features();
        let spec = defaults.get(&POD_READINESS_GATES).copied();
        assert_eq!(spec, Some(FeatureSpec::alpha(false)));
    }

    #[test]
    fn ga_spec_is_locked_on() {
        let spec = FeatureSpec::ga();
        assert!(spec.default);
        assert!(spec.lock_to_default);
        assert_eq!(spec.pre_release.to_string(), "GA");
    }
}
