//! # Admission Review Types
//!
//! JSON request/response envelope exchanged with the host.
//!
//! ```json
//! {
//!   "apiVersion": "admission.k8s.io/v1",
//!   "kind": "AdmissionReview",
//!   "request": {
//!     "uid": "705ab4f5",
//!     "operation": "CREATE",
//!     "resource": {"group": "", "version": "v1", "resource": "pods"},
//!     "namespace": "default",
//!     "object": {"kind": "Pod", "metadata": {"name": "web"}, "spec": {}}
//!   }
//! }
//! ```

use podready_core::{
    AdmissionError, Attributes, Fields, GroupVersionResource, MutatingChain, Object, Operation,
};
use serde::{Deserialize, Serialize};

/// API version written on responses.
pub const REVIEW_API_VERSION: &str = "admission.k8s.io/v1";

/// Kind written on responses.
pub const REVIEW_KIND: &str = "AdmissionReview";

// =============================================================================
// ENVELOPE
// =============================================================================

/// Review envelope: a request on the way in, a response on the way out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReview {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<AdmissionRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<AdmissionResponse>,
}

fn default_api_version() -> String {
    REVIEW_API_VERSION.to_string()
}

fn default_kind() -> String {
    REVIEW_KIND.to_string()
}

impl AdmissionReview {
    /// Wrap a response in an envelope.
    #[must_use]
    pub fn from_response(response: AdmissionResponse) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            request: None,
            response: Some(response),
        }
    }

    /// Parse an envelope from JSON bytes. The request must be present.
    pub fn request_from_slice(bytes: &[u8]) -> Result<AdmissionRequest, AdmissionError> {
        let review: Self = serde_json::from_slice(bytes)
            .map_err(|e| AdmissionError::SerializationError(e.to_string()))?;
        review
            .request
            .ok_or_else(|| AdmissionError::SerializationError("review has no request".to_string()))
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// A single admission request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionRequest {
    #[serde(default)]
    pub uid: String,
    pub operation: Operation,
    pub resource: GroupVersionResource,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub_resource: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<Object>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_object: Option<Object>,
    #[serde(default)]
    pub dry_run: bool,
    /// Request fields plugins do not see, such as `userInfo`.
    #[serde(flatten)]
    pub extra: Fields,
}

impl AdmissionRequest {
    /// Split into the request uid and the attributes plugins see.
    #[must_use]
    pub fn into_attributes(self) -> (String, Attributes) {
        let mut attributes = Attributes::new(self.operation, self.resource, self.object)
            .with_subresource(self.sub_resource)
            .with_namespace(self.namespace)
            .with_name(self.name)
            .with_dry_run(self.dry_run);
        if let Some(old) = self.old_object {
            attributes = attributes.with_old_object(old);
        }
        (self.uid, attributes)
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Failure details for a denied request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: u16,
    pub reason: String,
    pub message: String,
}

impl From<&AdmissionError> for Status {
    fn from(err: &AdmissionError) -> Self {
        Self {
            code: err.status_code(),
            reason: err.reason().to_string(),
            message: err.to_string(),
        }
    }
}

/// The outcome of one admission request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionResponse {
    pub uid: String,
    pub allowed: bool,
    /// The object after mutation, present only when allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<Object>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl AdmissionResponse {
    /// Build a response from the chain outcome and the final object.
    #[must_use]
    pub fn from_outcome(
        uid: String,
        outcome: &Result<(), AdmissionError>,
        object: Option<Object>,
    ) -> Self {
        match outcome {
            Ok(()) => Self {
                uid,
                allowed: true,
                object,
                status: None,
            },
            Err(err) => Self {
                uid,
                allowed: false,
                object: None,
                status: Some(Status::from(err)),
            },
        }
    }
}

/// Run `request` through `chain`.
pub fn run(chain: &MutatingChain, request: AdmissionRequest) -> AdmissionResponse {
    let (uid, mut attributes) = request.into_attributes();
    let outcome = chain.admit(&mut attributes);
    AdmissionResponse::from_outcome(uid, &outcome, attributes.into_object())
}

// =============================================================================
// TESTS
// =============================================================================
