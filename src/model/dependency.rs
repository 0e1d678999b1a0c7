//! Directed dependencies between applications.

use super::Ref;
use serde::{Deserialize, Serialize};

/// `from` depends on `to`.
///
/// Seen from `to` this is a northbound dependency, seen from `from` a
/// southbound one. Unsaved dependencies have no id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationDependency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub from: Ref,
    pub to: Ref,
}

impl ApplicationDependency {
    #[must_use]
    pub const fn new(from: Ref, to: Ref) -> Self {
        Self { id: None, from, to }
    }

    /// Same endpoints, ignoring the id.
    #[must_use]
    pub fn same_edge(&self, other: &Self) -> bool {
        self.from.id == other.from.id && self.to.id == other.to.id
    }
}
