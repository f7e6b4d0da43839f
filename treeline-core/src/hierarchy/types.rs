//! Placement types for the hierarchy store

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::EntityId;

/// One entity's placement in the tree.
///
/// `parent_id == None` marks a root. Among the direct children of one
/// parent, `position` values are dense: exactly `0..k-1`, assigned by the
/// store's renumbering pass. The `position` field defaults to zero when
/// absent so legacy snapshots (which omitted it) still load; the store
/// normalizes on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyEntry {
    /// Identity of the placed entity.
    pub id: EntityId,
    /// Parent entity, or `None` for a root.
    #[serde(default)]
    pub parent_id: Option<EntityId>,
    /// Ordinal among the siblings sharing `parent_id`.
    #[serde(default)]
    pub position: u32,
}

impl HierarchyEntry {
    /// Creates a new entry.
    #[must_use]
    pub const fn new(id: EntityId, parent_id: Option<EntityId>, position: u32) -> Self {
        Self {
            id,
            parent_id,
            position,
        }
    }

    /// Returns true if this entry is a root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns the slot this entry currently occupies.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        Slot {
            parent_id: self.parent_id,
            position: self.position,
        }
    }
}

/// A requested insertion point: the gap at ordinal `position` among the
/// children of `parent_id`.
///
/// A slot is a request, not a stored entity; a position past the end of the
/// sibling group clamps to append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Target parent, or `None` for the root level.
    pub parent_id: Option<EntityId>,
    /// Requested ordinal among the target parent's children.
    pub position: u32,
}

impl Slot {
    /// Creates a new slot.
    #[must_use]
    pub const fn new(parent_id: Option<EntityId>, position: u32) -> Self {
        Self {
            parent_id,
            position,
        }
    }

    /// A slot at the root level.
    #[must_use]
    pub const fn root(position: u32) -> Self {
        Self::new(None, position)
    }

    /// A slot under the given parent.
    #[must_use]
    pub const fn child_of(parent: EntityId, position: u32) -> Self {
        Self::new(Some(parent), position)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parent_id {
            Some(parent) => write!(f, "({parent}, {})", self.position),
            None => write!(f, "(root, {})", self.position),
        }
    }
}
