//! # PodReady Admission Plugin
//!
//! On pod creation, appends a fixed readiness gate to the pod spec when the
//! `PodReadinessGates` feature is enabled.
//!
//! | Request                                  | Outcome                         |
//! |------------------------------------------|---------------------------------|
//! | resource other than core `pods`          | admitted, untouched             |
//! | `pods`, feature disabled                 | admitted, untouched             |
//! | `pods`, feature enabled, object not Pod  | `BadRequest`, untouched         |
//! | `pods`, feature enabled, Pod             | admitted, sentinel gate appended|
//!
//! Existing gates are never de-duplicated: admitting the same pod twice
//! appends the sentinel twice.

use crate::admission::{
    Attributes, Factory, Handler, Interface, MutationInterface, Operation, Plugins,
};
use crate::features::{FeatureGate, POD_READINESS_GATES};
use crate::{AdmissionError, GroupResource, Object, PodReadinessGate};
use std::io::Read;
use std::sync::Arc;

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "PodReady";

/// Condition type of the readiness gate injected into new pods.
pub const READINESS_CONDITION_TYPE: &str = "dummy";

const CONVERSION_FAILED: &str = "Resource was marked with kind Pod but was unable to be converted";

/// Register the plugin with `plugins`, bound to `features`.
///
/// The plugin takes no configuration; any supplied stream is ignored.
pub fn register(
    plugins: &mut Plugins,
    features: Arc<dyn FeatureGate>,
) -> Result<(), AdmissionError> {
    let factory: Factory = Box::new(move |_config: Option<&mut dyn Read>| {
        let plugin: Arc<dyn MutationInterface> = Arc::new(PodReady::new(Arc::clone(&features)));
        Ok(plugin)
    });
    plugins.register(PLUGIN_NAME, factory)
}

/// Mutating admission plugin injecting the readiness sentinel into new pods.
pub struct PodReady {
    handler: Handler,
    features: Arc<dyn FeatureGate>,
}

impl PodReady {
    /// Create the plugin. It only handles `Create`.
    #[must_use]
    pub fn new(features: Arc<dyn FeatureGate>) -> Self {
        Self {
            handler: Handler::new(&[Operation::Create]),
            features,
        }
    }

    fn admit_pod(&self, attributes: &mut Attributes) -> Result<(), AdmissionError> {
        if !self.features.enabled(POD_READINESS_GATES) {
            tracing::trace!(feature = %POD_READINESS_GATES, "feature disabled, skipping");
            return Ok(());
        }

        let pod = attributes
            .object_mut()
            .and_then(Object::as_pod_mut)
            .ok_or_else(|| AdmissionError::BadRequest(CONVERSION_FAILED.to_string()))?;

        pod.spec
            .readiness_gates
            .push(PodReadinessGate::new(READINESS_CONDITION_TYPE));

        tracing::debug!(
            namespace = %pod.metadata.namespace,
            pod = %pod.metadata.name,
            gates = pod.spec.readiness_gates.len(),
            "injected readiness gate"
        );
        Ok(())
    }
}

impl Interface for PodReady {
    fn handles(&self, operation: Operation) -> bool {
        self.handler.handles(operation)
    }
}

impl MutationInterface for PodReady {
    fn admit(&self, attributes: &mut Attributes) -> Result<(), AdmissionError> {
        if attributes.resource().group_resource() == GroupResource::core("pods") {
            self.admit_pod(attributes)
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Debug for PodReady {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PodReady")
            .field("handler", &self.handler)
            .field("enabled", &self.features.enabled(POD_READINESS_GATES))
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureGates;
    use crate::{GroupVersionResource, Node, ObjectMeta, Pod};
    use std::collections::BTreeMap;

    fn gate(enabled: bool) -> Arc<dyn FeatureGate> {
        let mut gate = FeatureGates::with_defaults();
        let overrides = BTreeMap::from([("PodReadinessGates".to_string(), enabled)]);
        gate.set_from_map(&overrides).expect("set");
        Arc::new(gate)
    }

    fn create_attrs(resource: GroupVersionResource, object: Object) -> Attributes {
        Attributes::new(Operation::Create, resource, Some(object))
            .with_namespace("default")
    }

    fn pods() -> GroupVersionResource {
        GroupVersionResource::new("", "v1", "pods")
    }

    fn pod() -> Object {
        Pod::new(ObjectMeta::namespaced("default", "pod-name")).into()
    }

    fn gates(attrs: &Attributes) -> Vec<PodReadinessGate> {
        attrs
            .object()
            .and_then(Object::as_pod)
            .map(|p| p.spec.readiness_gates.clone())
            .unwrap_or_default()
    }

    #[test]
    fn handles_create_only() {
        let plugin = PodReady::new(gate(true));
        assert!(plugin.handles(Operation::Create));
        assert!(!plugin.handles(Operation::Update));
        assert!(!plugin.handles(Operation::Delete));
        assert!(!plugin.handles(Operation::Connect));
    }

    #[test]
    fn appends_gate_when_enabled() {
        let plugin = PodReady::new(gate(true));
        let mut attrs = create_attrs(pods(), pod());

        plugin.admit(&mut attrs).expect("admit");

        assert_eq!(
            gates(&attrs),
            vec![PodReadinessGate::new(READINESS_CONDITION_TYPE)]
        );
    }

    #[test]
    fn leaves_pod_alone_when_disabled() {
        let plugin = PodReady::new(gate(false));
        let mut attrs = create_attrs(pods(), pod());

        plugin.admit(&mut attrs).expect("admit");

        assert!(gates(&attrs).is_empty());
    }

    #[test]
    fn non_pod_object_is_bad_request() {
        let plugin = PodReady::new(gate(true));
        let node: Object = Node::new(ObjectMeta::namespaced("default", "node-name")).into();
        let mut attrs = create_attrs(pods(), node.clone());

        let err = plugin.admit(&mut attrs).expect_err("type mismatch");

        assert!(err.is_bad_request());
        assert_eq!(err.to_string(), format!("Bad request: {}", CONVERSION_FAILED));
        assert_eq!(attrs.object(), Some(&node));
    }

    #[test]
    fn non_pod_object_admitted_when_disabled() {
        let plugin = PodReady::new(gate(false));
        let node: Object = Node::new(ObjectMeta::namespaced("default", "node-name")).into();
        let mut attrs = create_attrs(pods(), node);

        plugin.admit(&mut attrs).expect("feature check precedes type check");
    }

    #[test]
    fn missing_object_is_bad_request() {
        let plugin = PodReady::new(gate(true));
        let mut attrs = Attributes::new(Operation::Create, pods(), None);

        let err = plugin.admit(&mut attrs).expect_err("no object");
        assert!(err.is_bad_request());
    }

    #[test]
    fn other_resources_pass_through() {
        let plugin = PodReady::new(gate(true));
        let node: Object = Node::new(ObjectMeta::namespaced("", "worker-1")).into();
        let mut attrs = create_attrs(GroupVersionResource::new("", "v1", "nodes"), node.clone());

        plugin.admit(&mut attrs).expect("admit");
        assert_eq!(attrs.object(), Some(&node));
    }

    #[test]
    fn pods_in_other_groups_pass_through() {
        let plugin = PodReady::new(gate(true));
        let original = pod();
        let mut attrs = create_attrs(
            GroupVersionResource::new("metrics.k8s.io", "v1beta1", "pods"),
            original.clone(),
        );

        plugin.admit(&mut attrs).expect("admit");
        assert_eq!(attrs.object(), Some(&original));
    }

    #[test]
    fn register_binds_plugin_name() {
        let mut plugins = Plugins::new();
        register(&mut plugins, gate(true)).expect("register");

        assert_eq!(plugins.registered(), vec![PLUGIN_NAME]);

        let plugin = plugins
            .new_from_plugin(PLUGIN_NAME, Some(b"ignored: true".as_slice()))
            .expect("build");
        let mut attrs = create_attrs(pods(), pod());
        plugin.admit(&mut attrs).expect("admit");
        assert_eq!(gates(&attrs).len(), 1);
    }

    #[test]
    fn register_twice_is_rejected() {
        let mut plugins = Plugins::new();
        register(&mut plugins, gate(true)).expect("register");
        let result = register(&mut plugins, gate(true));
        assert!(matches!(result, Err(AdmissionError::DuplicatePlugin(_))));
    }
}
