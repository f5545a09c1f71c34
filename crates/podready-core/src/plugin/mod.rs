//! # Admission Plugins
//!
//! Concrete plugins shipped with the core, plus a helper that registers all
//! of them at once.

pub mod podready;

use crate::AdmissionError;
use crate::admission::Plugins;
use crate::features::FeatureGate;
use std::sync::Arc;

/// Register every plugin in this crate, bound to `features`.
pub fn register_all(
    plugins: &mut Plugins,
    features: Arc<dyn FeatureGate>,
) -> Result<(), AdmissionError> {
    podready::register(plugins, features)
}
