//! Per-request attributes handed to admission plugins.

use super::Operation;
use crate::{GroupVersionResource, Object};

/// Everything a plugin may inspect about a single request.
///
/// The dispatcher owns the attributes for the lifetime of the request.
/// Plugins receive `&mut Attributes` but only ever write through
/// [`Attributes::object_mut`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    operation: Operation,
    resource: GroupVersionResource,
    subresource: String,
    namespace: String,
    name: String,
    object: Option<Object>,
    old_object: Option<Object>,
    dry_run: bool,
}

impl Attributes {
    /// Create attributes for a request against `resource`.
    #[must_use]
    pub fn new(
        operation: Operation,
        resource: GroupVersionResource,
        object: Option<Object>,
    ) -> Self {
        Self {
            operation,
            resource,
            subresource: String::new(),
            namespace: String::new(),
            name: String::new(),
            object,
            old_object: None,
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_subresource(mut self, subresource: impl Into<String>) -> Self {
        self.subresource = subresource.into();
        self
    }

    #[must_use]
    pub fn with_old_object(mut self, old_object: Object) -> Self {
        self.old_object = Some(old_object);
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn resource(&self) -> &GroupVersionResource {
        &self.resource
    }

    pub fn subresource(&self) -> &str {
        &self.subresource
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of the carried object, if any.
    pub fn kind(&self) -> Option<&str> {
        self.object.as_ref().map(Object::kind)
    }

    pub fn object(&self) -> Option<&Object> {
        self.object.as_ref()
    }

    /// The object being admitted, for plugins that mutate it.
    pub fn object_mut(&mut self) -> Option<&mut Object> {
        self.object.as_mut()
    }

    pub fn old_object(&self) -> Option<&Object> {
        self.old_object.as_ref()
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Consume the attributes, returning the (possibly mutated) object.
    pub fn into_object(self) -> Option<Object> {
        self.object
    }
}
