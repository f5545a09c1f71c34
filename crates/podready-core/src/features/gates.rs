//! Mutable feature gate, configured at startup.

use super::{Feature, FeatureGate, FeatureSpec, default_features};
use crate::AdmissionError;
use std::collections::BTreeMap;

/// A set of known features plus explicit overrides.
///
/// Configuration methods take `&mut self`; once the gate is shared behind an
/// `Arc` it can no longer change.
#[derive(Debug, Clone, Default)]
pub struct FeatureGates {
    known: BTreeMap<Feature, FeatureSpec>,
    overrides: BTreeMap<Feature, bool>,
}

impl FeatureGates {
    /// Create a gate that knows no features.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gate preloaded with [`default_features`].
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            known: default_features(),
            overrides: BTreeMap::new(),
        }
    }

    /// Register features.
    ///
    /// Re-adding a feature with an identical spec is a no-op; a different
    /// spec for a known name is rejected and nothing is added.
    pub fn add(&mut self, features: BTreeMap<Feature, FeatureSpec>) -> Result<(), AdmissionError> {
        for (feature, spec) in &features {
            match self.known.get(feature) {
                Some(existing) if existing != spec => {
                    return Err(AdmissionError::InvalidFeatureGate(format!(
                        "feature gate {} with different spec already exists: {:?}",
                        feature, existing
                    )));
                }
                _ => {}
            }
        }
        self.known.extend(features);
        Ok(())
    }

    /// Apply explicit values by feature name.
    ///
    /// Every entry is validated before any is applied.
    pub fn set_from_map(&mut self, values: &BTreeMap<String, bool>) -> Result<(), AdmissionError> {
        let mut resolved = Vec::with_capacity(values.len());
        for (name, &value) in values {
            let (feature, spec) = self
                .lookup(name)
                .ok_or_else(|| AdmissionError::UnknownFeature(name.clone()))?;
            if spec.lock_to_default && value != spec.default {
                return Err(AdmissionError::InvalidFeatureGate(format!(
                    "cannot set feature gate {} to {}, feature is locked to {}",
                    name, value, spec.default
                )));
            }
            resolved.push((feature, value));
        }

        for (feature, value) in resolved {
            tracing::debug!(feature = feature.name(), enabled = value, "feature gate set");
            self.overrides.insert(feature, value);
        }
        Ok(())
    }

    /// Apply a comma-separated `Name=bool` list, e.g. `"A=true,B=false"`.
    pub fn set(&mut self, value: &str) -> Result<(), AdmissionError> {
        let mut values = BTreeMap::new();
        for entry in value.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (name, raw) = entry.split_once('=').ok_or_else(|| {
                AdmissionError::InvalidFeatureGate(format!("missing bool value for {}", entry))
            })?;
            let name = name.trim();
            let raw = raw.trim();
            let enabled = parse_bool(raw).ok_or_else(|| {
                AdmissionError::InvalidFeatureGate(format!(
                    "invalid value of {}={}, err: not a bool",
                    name, raw
                ))
            })?;
            values.insert(name.to_string(), enabled);
        }
        self.set_from_map(&values)
    }

    /// Every known feature with its spec and effective state, sorted by name.
    #[must_use]
    pub fn features(&self) -> Vec<(Feature, FeatureSpec, bool)> {
        self.known
            .iter()
            .map(|(&feature, &spec)| (feature, spec, self.enabled(feature)))
            .collect()
    }

    fn lookup(&self, name: &str) -> Option<(Feature, FeatureSpec)> {
        self.known
            .iter()
            .find(|(feature, _)| feature.name() == name)
            .map(|(&feature, &spec)| (feature, spec))
    }
}

impl FeatureGate for FeatureGates {
    fn enabled(&self, feature: Feature) -> bool {
        if let Some(&value) = self.overrides.get(&feature) {
            return value;
        }
        self.known.get(&feature).is_some_and(|spec| spec.default)
    }

    fn known_features(&self) -> Vec<&'static str> {
        self.known.keys().map(|feature| feature.name()).collect()
    }
}

/// Boolean spellings accepted on the command line.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{POD_READINESS_GATES, PreRelease};

    const TEST_ALPHA: Feature = Feature("TestAlpha");
    const TEST_GA: Feature = Feature("TestGA");

    fn gate_with_test_features() -> FeatureGates {
        let mut gate = FeatureGates::with_defaults();
        gate.add(BTreeMap::from([
            (TEST_ALPHA, FeatureSpec::alpha(false)),
            (TEST_GA, FeatureSpec::ga()),
        ]))
        .expect("add");
        gate
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let gate = gate_with_test_features();
        assert!(!gate.enabled(POD_READINESS_GATES));
        assert!(!gate.enabled(TEST_ALPHA));
        assert!(gate.enabled(TEST_GA));
    }

    #[test]
    fn unknown_feature_is_disabled() {
        let gate = FeatureGates::new();
        assert!(!gate.enabled(POD_READINESS_GATES));
        assert!(gate.known_features().is_empty());
    }

    #[test]
    fn readding_same_spec_is_noop() {
        let mut gate = FeatureGates::with_defaults();
        gate.add(BTreeMap::from([(
            POD_READINESS_GATES,
            FeatureSpec::alpha(false),
        )]))
        .expect("same spec");
        assert_eq!(gate.known_features(), vec!["PodReadinessGates"]);
    }

    #[test]
    fn readding_different_spec_is_rejected() {
        let mut gate = FeatureGates::with_defaults();
        let result = gate.add(BTreeMap::from([(
            POD_READINESS_GATES,
            FeatureSpec::beta(true),
        )]));
        assert!(matches!(result, Err(AdmissionError::InvalidFeatureGate(_))));
        assert!(!gate.enabled(POD_READINESS_GATES));
    }

    #[test]
    fn set_from_map_overrides_default() {
        let mut gate = gate_with_test_features();
        gate.set_from_map(&BTreeMap::from([("PodReadinessGates".to_string(), true)]))
            .expect("set");
        assert!(gate.enabled(POD_READINESS_GATES));

        gate.set_from_map(&BTreeMap::from([("PodReadinessGates".to_string(), false)]))
            .expect("set");
        assert!(!gate.enabled(POD_READINESS_GATES));
    }

    #[test]
    fn set_from_map_rejects_unknown_and_applies_nothing() {
        let mut gate = gate_with_test_features();
        let result = gate.set_from_map(&BTreeMap::from([
            ("PodReadinessGates".to_string(), true),
            ("NoSuchFeature".to_string(), true),
        ]));
        assert_eq!(
            result,
            Err(AdmissionError::UnknownFeature("NoSuchFeature".into()))
        );
        assert!(!gate.enabled(POD_READINESS_GATES));
    }

    #[test]
    fn locked_feature_only_accepts_default() {
        let mut gate = gate_with_test_features();
        gate.set_from_map(&BTreeMap::from([("TestGA".to_string(), true)]))
            .expect("default value is allowed");

        let result = gate.set_from_map(&BTreeMap::from([("TestGA".to_string(), false)]));
        assert!(matches!(result, Err(AdmissionError::InvalidFeatureGate(_))));
        assert!(gate.enabled(TEST_GA));
    }

    #[test]
    fn set_parses_flag_format() {
        let mut gate = gate_with_test_features();
        gate.set(" PodReadinessGates = true ,, TestAlpha=T ,")
            .expect("set");
        assert!(gate.enabled(POD_READINESS_GATES));
        assert!(gate.enabled(TEST_ALPHA));

        gate.set("TestAlpha=0").expect("set");
        assert!(!gate.enabled(TEST_ALPHA));
    }

    #[test]
    fn set_rejects_missing_value() {
        let mut gate = gate_with_test_features();
        let result = gate.set("PodReadinessGates");
        assert!(matches!(result, Err(AdmissionError::InvalidFeatureGate(_))));
    }

    #[test]
    fn set_rejects_non_bool() {
        let mut gate = gate_with_test_features();
        let result = gate.set("PodReadinessGates=yes");
        assert!(matches!(result, Err(AdmissionError::InvalidFeatureGate(_))));
        assert!(!gate.enabled(POD_READINESS_GATES));
    }

    #[test]
    fn empty_set_is_noop() {
        let mut gate = gate_with_test_features();
        gate.set("").expect("empty");
        assert!(!gate.enabled(POD_READINESS_GATES));
    }

    #[test]
    fn features_listing_is_sorted_with_state() {
        let mut gate = gate_with_test_features();
        gate.set("TestAlpha=true").expect("set");

        let listing: Vec<_> = gate
            .features()
            .into_iter()
            .map(|(feature, spec, enabled)| (feature.name(), spec.pre_release, enabled))
            .collect();

        assert_eq!(
            listing,
            vec![
                ("PodReadinessGates", PreRelease::Alpha, false),
                ("TestAlpha", PreRelease::Alpha, true),
                ("TestGA", PreRelease::Ga, true),
            ]
        );
    }
}
