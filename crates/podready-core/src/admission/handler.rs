//! Operation filter embedded by plugins.

use super::Operation;
use std::collections::BTreeSet;

/// The set of operations a plugin handles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Handler {
    operations: BTreeSet<Operation>,
}

impl Handler {
    /// Create a handler for the given operations.
    #[must_use]
    pub fn new(operations: &[Operation]) -> Self {
        Self {
            operations: operations.iter().copied().collect(),
        }
    }

    /// Whether the operation is in the handled set.
    #[must_use]
    pub fn handles(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    /// The handled operations, sorted.
    #[must_use]
    pub fn operations(&self) -> Vec<Operation> {
        self.operations.iter().copied().collect()
    }
}
