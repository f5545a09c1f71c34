//! Target objects carried by admission requests.
//!
//! Only the fields admission plugins in this crate read or write are modelled.
//! Every other field is kept in an `extra` map and written back unchanged.
//! Objects are a sum over resource kinds; the `kind` field selects the
//! variant on the wire, and kinds without a model stay as raw JSON.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Fields carried through without being modelled.
pub type Fields = Map<String, Value>;

// =============================================================================
// METADATA
// =============================================================================

/// Metadata common to every object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Object name, unique within its namespace.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Namespace, empty for cluster-scoped objects.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl ObjectMeta {
    /// Metadata for a namespaced object.
    #[must_use]
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }
}

// =============================================================================
// POD
// =============================================================================

/// An extra condition a pod must satisfy before it is considered ready.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodReadinessGate {
    /// Condition type in the pod's condition list that gates readiness.
    pub condition_type: String,
}

impl PodReadinessGate {
    /// Create a readiness gate for the given condition type.
    #[must_use]
    pub fn new(condition_type: impl Into<String>) -> Self {
        Self {
            condition_type: condition_type.into(),
        }
    }
}

/// The mutable specification of a pod.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// Node the pod is bound to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    /// Readiness gates, evaluated in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub readiness_gates: Vec<PodReadinessGate>,
    #[serde(flatten)]
    pub extra: Fields,
}

/// A pod.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pod {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: PodSpec,
    /// `apiVersion`, `status` and anything else outside metadata and spec.
    #[serde(flatten)]
    pub extra: Fields,
}

impl Pod {
    /// Create a pod with empty spec.
    #[must_use]
    pub fn new(metadata: ObjectMeta) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    /// Whether any readiness gate has the given condition type.
    #[must_use]
    pub fn has_readiness_gate(&self, condition_type: &str) -> bool {
        self.spec
            .readiness_gates
            .iter()
            .any(|gate| gate.condition_type == condition_type)
    }
}

// =============================================================================
// NODE
// =============================================================================

/// Desired state of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_cidr: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unschedulable: bool,
    #[serde(flatten)]
    pub extra: Fields,
}

/// A node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: NodeSpec,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Node {
    /// Create a node with empty spec.
    #[must_use]
    pub fn new(metadata: ObjectMeta) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }
}

// =============================================================================
// OBJECT
// =============================================================================

/// Any object an admission request may carry.
///
/// Narrowing to a concrete kind goes through the `as_*` accessors, which
/// return `None` on a kind mismatch instead of failing. Kinds without a model
/// land in [`Object::Other`] with every field intact, `kind` included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Pod(Pod),
    Node(Node),
    Other(Fields),
}

impl Object {
    /// The kind name of this object. Empty when an unmodelled object has none.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Pod(_) => "Pod",
            Self::Node(_) => "Node",
            Self::Other(fields) => fields.get("kind").and_then(Value::as_str).unwrap_or_default(),
        }
    }

    /// The object's metadata, for modelled kinds.
    #[must_use]
    pub const fn metadata(&self) -> Option<&ObjectMeta> {
        match self {
            Self::Pod(pod) => Some(&pod.metadata),
            Self::Node(node) => Some(&node.metadata),
            Self::Other(_) => None,
        }
    }

    /// View this object as a pod.
    #[must_use]
    pub const fn as_pod(&self) -> Option<&Pod> {
        match self {
            Self::Pod(pod) => Some(pod),
            Self::Node(_) | Self::Other(_) => None,
        }
    }

    /// Mutably view this object as a pod.
    pub const fn as_pod_mut(&mut self) -> Option<&mut Pod> {
        match self {
            Self::Pod(pod) => Some(pod),
            Self::Node(_) | Self::Other(_) => None,
        }
    }

    /// View this object as a node.
    #[must_use]
    pub const fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Pod(_) | Self::Other(_) => None,
        }
    }
}

// Parsed pods and nodes keep `kind` in `extra`; built ones get it on output.

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match self {
            Self::Pod(pod) => serde_json::to_value(pod),
            Self::Node(node) => serde_json::to_value(node),
            Self::Other(fields) => return fields.serialize(serializer),
        }
        .map_err(S::Error::custom)?;

        let mut fields = match value {
            Value::Object(fields) => fields,
            other => return other.serialize(serializer),
        };
        if !fields.contains_key("kind") {
            fields.insert("kind".to_string(), Value::String(self.kind().to_string()));
        }
        fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Object {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Fields::deserialize(deserializer)?;
        let kind = fields.get("kind").and_then(Value::as_str).map(str::to_owned);

        match kind.as_deref() {
            Some("Pod") => serde_json::from_value(Value::Object(fields))
                .map(Self::Pod)
                .map_err(D::Error::custom),
            Some("Node") => serde_json::from_value(Value::Object(fields))
                .map(Self::Node)
                .map_err(D::Error::custom),
            _ => Ok(Self::Other(fields)),
        }
    }
}

impl From<Pod> for Object {
    fn from(pod: Pod) -> Self {
        Self::Pod(pod)
    }
}

impl From<Node> for Object {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

// =============================================================================
// TESTS
// =============================================================================
