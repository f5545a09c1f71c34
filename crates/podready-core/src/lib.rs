//! # podready-core
//!
//! The admission logic for PodReady - THE LOGIC.
//!
//! This crate implements a mutating admission plugin that injects a readiness
//! gate into newly created pods when the `PodReadinessGates` feature is on,
//! together with the small admission framework the plugin plugs into.
//!
//! ## Architectural Constraints
//!
//! - Pure, synchronous, in-memory: no I/O, no async, no locks
//! - Feature gates are injected as `Arc<dyn FeatureGate>`, never read from a global
//! - Plugins only write to the request's object; everything else is read-only
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use podready_core::{
//!     Attributes, FeatureGates, GroupVersionResource, ObjectMeta, Operation, Plugins, Pod,
//! };
//!
//! let mut gates = FeatureGates::with_defaults();
//! gates.set("PodReadinessGates=true")?;
//!
//! let mut plugins = Plugins::new();
//! podready_core::plugin::register_all(&mut plugins, Arc::new(gates))?;
//! let chain = plugins.new_from_plugins(&["PodReady".to_string()], &Default::default())?;
//!
//! let mut attrs = Attributes::new(
//!     Operation::Create,
//!     GroupVersionResource::new("", "v1", "pods"),
//!     Some(Pod::new(ObjectMeta::namespaced("default", "web")).into()),
//! );
//! chain.admit(&mut attrs)?;
//!
//! let pod = attrs.object().and_then(|o| o.as_pod()).map(|p| p.spec.readiness_gates.len());
//! assert_eq!(pod, Some(1));
//! # Ok::<(), podready_core::AdmissionError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod admission;
pub mod features;
pub mod plugin;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AdmissionError, CORE_GROUP, Fields, GroupResource, GroupVersionResource, Node, NodeSpec,
    Object, ObjectMeta, Pod, PodReadinessGate, PodSpec,
};

// =============================================================================
// RE-EXPORTS: Admission Framework
// =============================================================================

pub use admission::{
    Attributes, Factory, Handler, Interface, MutatingChain, MutationInterface, Operation, Plugins,
    ValidationInterface,
};

// =============================================================================
// RE-EXPORTS: Feature Gates
// =============================================================================

pub use features::{
    Feature, FeatureGate, FeatureGates, FeatureSpec, POD_READINESS_GATES, PreRelease,
    default_features,
};

// =============================================================================
// RE-EXPORTS: Plugins
// =============================================================================

pub use plugin::podready::{PLUGIN_NAME, PodReady, READINESS_CONDITION_TYPE};
