//! # Core Type Definitions
//!
//! This module contains the shared types of the admission substrate:
//! - Resource identifiers (`GroupVersionResource`, `GroupResource`)
//! - The polymorphic target object (`Object` and its variants)
//! - Error types (`AdmissionError`)

mod object;

pub use object::{Fields, Node, NodeSpec, Object, ObjectMeta, Pod, PodReadinessGate, PodSpec};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// RESOURCE IDENTIFIERS
// =============================================================================

/// The legacy core API group is the empty string.
pub const CORE_GROUP: &str = "";

/// A fully qualified resource: group, version and plural resource name.
///
/// The version is carried for completeness; admission decisions compare
/// on [`GroupResource`] so that every served version behaves the same.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GroupVersionResource {
    /// API group, empty for the core group.
    #[serde(default)]
    pub group: String,
    /// API version, e.g. `v1`.
    #[serde(default)]
    pub version: String,
    /// Plural resource name, e.g. `pods`.
    pub resource: String,
}

impl GroupVersionResource {
    /// Create a new group-version-resource triple.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
        }
    }

    /// Drop the version, keeping group and resource.
    #[must_use]
    pub fn group_resource(&self) -> GroupResource {
        GroupResource {
            group: self.group.clone(),
            resource: self.resource.clone(),
        }
    }
}

impl fmt::Display for GroupVersionResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}/{}", self.version, self.resource)
        } else {
            write!(f, "{}/{}/{}", self.group, self.version, self.resource)
        }
    }
}

/// A resource within a group, without version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GroupResource {
    /// API group, empty for the core group.
    pub group: String,
    /// Plural resource name.
    pub resource: String,
}

impl GroupResource {
    /// Create a new group-resource pair.
    #[must_use]
    pub fn new(group: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            resource: resource.into(),
        }
    }

    /// A resource in the core API group.
    #[must_use]
    pub fn core(resource: impl Into<String>) -> Self {
        Self::new(CORE_GROUP, resource)
    }
}

impl fmt::Display for GroupResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.resource)
        } else {
            write!(f, "{}.{}", self.resource, self.group)
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building or running an admission chain.
///
/// Admission plugins surface the request-facing variants (`BadRequest`,
/// `Forbidden`); the remaining variants come from registration, feature-gate
/// configuration and the host process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    /// The request is malformed or inconsistent with its declared resource.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request is well-formed but not permitted.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A feature name was not registered with the gate.
    #[error("Unrecognized feature gate: {0}")]
    UnknownFeature(String),

    /// A feature gate value or spec could not be applied.
    #[error("Invalid feature gate: {0}")]
    InvalidFeatureGate(String),

    /// No plugin is registered under the requested name.
    #[error("Unknown admission plugin: {0}")]
    PluginNotFound(String),

    /// A plugin name was registered twice.
    #[error("Admission plugin {0:?} was registered twice")]
    DuplicatePlugin(String),

    /// Host configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AdmissionError {
    /// HTTP-style status code the host reports for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Forbidden(_) => 403,
            _ => 500,
        }
    }

    /// Machine-readable reason reported alongside the status code.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BadRequest",
            Self::Forbidden(_) => "Forbidden",
            _ => "InternalError",
        }
    }

    /// Whether this error is a `BadRequest`.
    #[must_use]
    pub const fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
