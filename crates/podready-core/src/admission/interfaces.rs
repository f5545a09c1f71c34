//! Plugin capabilities and request operations.

use super::Attributes;
use crate::AdmissionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of request being admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Create,
    Update,
    Delete,
    Connect,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 4] = [
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::Connect,
    ];

    /// The wire token for this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base capability of every admission plugin.
pub trait Interface: Send + Sync {
    /// Whether the plugin wants to see requests with this operation.
    ///
    /// Dispatchers must not call a plugin for operations it does not handle.
    fn handles(&self, operation: Operation) -> bool;
}

/// A plugin that may change the object before it is persisted.
pub trait MutationInterface: Interface {
    /// Make an admission decision, mutating the request's object in place.
    fn admit(&self, attributes: &mut Attributes) -> Result<(), AdmissionError>;
}

/// A plugin that may only accept or reject.
pub trait ValidationInterface: Interface {
    /// Make an admission decision without changing the request.
    fn validate(&self, attributes: &Attributes) -> Result<(), AdmissionError>;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admission::Handler;
    use crate::{GroupVersionResource, Object, ObjectMeta, Pod};

    struct DenyNamed {
        handler: Handler,
        name: &'static str,
    }

    impl Interface for DenyNamed {
        fn handles(&self, operation: Operation) -> bool {
            self.handler.handles(operation)
        }
    }

    impl ValidationInterface for DenyNamed {
        fn validate(&self, attributes: &Attributes) -> Result<(), AdmissionError> {
            if attributes.name() == self.name {
                return Err(AdmissionError::Forbidden(format!(
                    "{} is reserved",
                    self.name
                )));
            }
            Ok(())
        }
    }

    #[test]
    fn operation_wire_tokens() {
        let tokens: Vec<_> = Operation::ALL.iter().map(|op| op.to_string()).collect();
        assert_eq!(tokens, vec!["CREATE", "UPDATE", "DELETE", "CONNECT"]);

        let parsed: Operation = serde_json::from_str("\"CONNECT\"").expect("parse");
        assert_eq!(parsed, Operation::Connect);
    }

    #[test]
    fn validation_plugin_reads_without_mutating() {
        let plugin = DenyNamed {
            handler: Handler::new(&[Operation::Create]),
            name: "reserved",
        };
        let object: Object = Pod::new(ObjectMeta::namespaced("default", "reserved")).into();
        let attrs = Attributes::new(
            Operation::Create,
            GroupVersionResource::new("", "v1", "pods"),
            Some(object),
        )
        .with_name("reserved");

        assert!(plugin.handles(Operation::Create));
        assert!(!plugin.handles(Operation::Delete));
        assert!(matches!(
            plugin.validate(&attrs),
            Err(AdmissionError::Forbidden(_))
        ));
    }
}
