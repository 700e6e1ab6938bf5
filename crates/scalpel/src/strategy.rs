//! Mutation strategies
//!
//! Each step of a path is emitted either by descending into the matching
//! slot of the replacement, or by rebuilding the node around the changed
//! child. Keyed containers and shared pointers take the rebuild route.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::reflect::{NodeKind, Ownership};

/// How a change below a container reaches the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationStrategy {
    /// Descend into the child's own slot
    InPlace,
    /// Rebuild the node and store a fresh child
    Rebuild,
}

impl MutationStrategy {
    /// Strategy for stepping out of a node of `kind` whose referent has
    /// `ownership`
    ///
    /// Map values and shared referents are never written where they live.
    #[inline]
    #[must_use]
    pub fn for_node(kind: NodeKind, ownership: Ownership) -> Self {
        match (kind, ownership) {
            (NodeKind::Map, _) | (_, Ownership::Shared) => Self::Rebuild,
            _ => Self::InPlace,
        }
    }

    /// Strategy name (for logging)
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::InPlace => "in-place",
            Self::Rebuild => "rebuild",
        }
    }
}

impl Display for MutationStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::ScalarKind;

    #[test]
    fn keyed_containers_rebuild() {
        assert_eq!(
            MutationStrategy::for_node(NodeKind::Map, Ownership::Exclusive),
            MutationStrategy::Rebuild
        );
    }

    #[test]
    fn shared_pointers_rebuild() {
        assert_eq!(
            MutationStrategy::for_node(NodeKind::Reference, Ownership::Shared),
            MutationStrategy::Rebuild
        );
    }

    #[test]
    fn exclusive_nodes_descend_in_place() {
        for kind in [
            NodeKind::Struct,
            NodeKind::Sequence,
            NodeKind::Reference,
            NodeKind::Leaf(ScalarKind::I32),
        ] {
            assert_eq!(
                MutationStrategy::for_node(kind, Ownership::Exclusive),
                MutationStrategy::InPlace
            );
        }
        assert_eq!(
            MutationStrategy::for_node(NodeKind::Reference, Ownership::Borrowed),
            MutationStrategy::InPlace
        );
    }

    #[test]
    fn display_name() {
        assert_eq!(MutationStrategy::Rebuild.to_string(), "rebuild");
    }
}
