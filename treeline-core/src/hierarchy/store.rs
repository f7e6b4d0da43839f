//! The ordered hierarchy store
//!
//! The store keeps a single flat list of entries. The list order is the
//! document order the renderer walks; within it, the relative order of
//! entries sharing a parent defines sibling order, and the renumbering pass
//! keeps each sibling group's `position` values dense. Every mutation is
//! computed on a working copy and published whole, so a failed operation
//! leaves the previous state untouched.

use std::collections::{HashMap, HashSet};

use super::error::{HierarchyError, HierarchyResult};
use super::types::{HierarchyEntry, Slot};
use crate::models::{Entity, EntityId};

/// Owns the authoritative ordered list of entity placements.
///
/// # Example
///
/// ```
/// use treeline_core::{Entity, EntityId, HierarchyStore, Slot};
/// use uuid::Uuid;
///
/// let a = Entity::new(EntityId::from_uuid(Uuid::from_u128(1)));
/// let b = Entity::new(EntityId::from_uuid(Uuid::from_u128(2)));
///
/// let mut store = HierarchyStore::new();
/// store.add_entity(a, Slot::root(0)).unwrap();
/// store.add_entity(b, Slot::root(1)).unwrap();
///
/// // Move B in front of A.
/// store.move_entity(b.id, Slot::root(0)).unwrap();
/// let roots: Vec<_> = store.children(None).iter().map(|e| e.id).collect();
/// assert_eq!(roots, vec![b.id, a.id]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyStore {
    entries: Vec<HierarchyEntry>,
}

impl HierarchyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from persisted entries, normalizing positions.
    ///
    /// Siblings are ordered by their stored `position` (stable, so entries
    /// with equal or missing positions keep their relative list order), then
    /// renumbered densely. This is what makes legacy snapshots without
    /// position fields load correctly.
    #[must_use]
    pub fn from_entries(mut entries: Vec<HierarchyEntry>) -> Self {
        entries.sort_by_key(|entry| entry.position);
        Self::renumber(&mut entries);
        Self { entries }
    }

    /// Returns the full entry list in document order.
    #[must_use]
    pub fn entries(&self) -> &[HierarchyEntry] {
        &self.entries
    }

    /// Returns the number of placed entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entity is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the entity is placed in the tree.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entry(id).is_some()
    }

    /// Returns the entry for an entity, if placed.
    #[must_use]
    pub fn entry(&self, id: EntityId) -> Option<&HierarchyEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Returns the parent of an entity (`None` for roots and unknown ids).
    #[must_use]
    pub fn parent_of(&self, id: EntityId) -> Option<EntityId> {
        self.entry(id).and_then(|entry| entry.parent_id)
    }

    /// Returns the direct children of a parent, ordered by position.
    ///
    /// Pass `None` for the root level. The flat list is kept
    /// order-consistent, so filtering preserves sibling order.
    #[must_use]
    pub fn children(&self, parent: Option<EntityId>) -> Vec<&HierarchyEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.parent_id == parent)
            .collect()
    }

    /// Returns all transitive descendants of an entity, pre-order.
    #[must_use]
    pub fn descendants(&self, id: EntityId) -> Vec<EntityId> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        self.collect_subtree(id, &mut out, &mut seen);
        out.remove(0);
        out.into_iter().map(|entity| entity.id).collect()
    }

    /// Returns true if `ancestor` appears on `id`'s parent chain.
    ///
    /// The walk is cycle-safe: a corrupted chain terminates instead of
    /// looping.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: EntityId, id: EntityId) -> bool {
        let mut visited = HashSet::new();
        let mut current = self.entry(id).and_then(|entry| entry.parent_id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            if !visited.insert(parent) {
                return false;
            }
            current = self.entry(parent).and_then(|entry| entry.parent_id);
        }
        false
    }

    /// Relocates an entity to a slot.
    ///
    /// The entry is removed from the working list, spliced back in at the
    /// requested ordinal under the new parent, and the whole list is
    /// renumbered in one pass. A position past the end of the target sibling
    /// group clamps to append. Moving an entity to its exact current slot is
    /// a visible no-op. Self-parenting is not rejected here; callers guard
    /// against cycles at the drag layer.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::EntityNotFound`] if the entity is not
    /// placed; the store is left unchanged.
    pub fn move_entity(&mut self, id: EntityId, slot: Slot) -> HierarchyResult<()> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(HierarchyError::EntityNotFound(id))?;

        let mut working = self.entries.clone();
        working.remove(index);
        Self::splice(&mut working, id, slot);
        self.entries = working;
        tracing::debug!(entity = %id, slot = %slot, "moved entity");
        Ok(())
    }

    /// Places a not-yet-present entity at a slot.
    ///
    /// Insertion reuses the same splice-and-renumber routine as
    /// [`Self::move_entity`], including the clamp-to-append policy.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::EntityExists`] if the entity already has an
    /// entry; the store is left unchanged.
    pub fn add_entity(&mut self, entity: Entity, slot: Slot) -> HierarchyResult<()> {
        if self.contains(entity.id) {
            return Err(HierarchyError::EntityExists(entity.id));
        }

        let mut working = self.entries.clone();
        Self::splice(&mut working, entity.id, slot);
        self.entries = working;
        tracing::debug!(entity = %entity.id, slot = %slot, "placed entity");
        Ok(())
    }

    /// Removes an entity and its whole subtree.
    ///
    /// Returns the removed set in pre-order (the entity first, then each
    /// child subtree in sibling order) so collaborators can cascade their
    /// own deletions. The cascade is mandatory: skipping it orphans
    /// descendant payloads and state.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::EntityNotFound`] if the entity is not
    /// placed; the store is left unchanged.
    pub fn remove_entity(&mut self, id: EntityId) -> HierarchyResult<Vec<Entity>> {
        if !self.contains(id) {
            return Err(HierarchyError::EntityNotFound(id));
        }

        let mut removed = Vec::new();
        let mut seen = HashSet::new();
        self.collect_subtree(id, &mut removed, &mut seen);
        let removed_ids: HashSet<EntityId> = removed.iter().map(|entity| entity.id).collect();

        let mut working: Vec<HierarchyEntry> = self
            .entries
            .iter()
            .filter(|entry| !removed_ids.contains(&entry.id))
            .copied()
            .collect();
        Self::renumber(&mut working);
        self.entries = working;
        tracing::debug!(entity = %id, removed = removed.len(), "removed subtree");
        Ok(removed)
    }

    /// Checks the store's structural invariants.
    ///
    /// Verifies dense per-parent positions consistent with list order, that
    /// every non-root parent is itself placed, and that parent chains are
    /// acyclic. Intended as a diagnostic for tests and debug assertions;
    /// the mutation paths maintain these invariants themselves.
    #[must_use]
    pub fn validate(&self) -> bool {
        let mut counters: HashMap<Option<EntityId>, u32> = HashMap::new();
        for entry in &self.entries {
            let counter = counters.entry(entry.parent_id).or_insert(0);
            if entry.position != *counter {
                return false;
            }
            *counter += 1;
            if let Some(parent) = entry.parent_id
                && !self.contains(parent)
            {
                return false;
            }
        }

        for entry in &self.entries {
            let mut visited = HashSet::new();
            let mut current = Some(entry.id);
            while let Some(id) = current {
                if !visited.insert(id) {
                    return false;
                }
                current = self.entry(id).and_then(|e| e.parent_id);
            }
        }
        true
    }

    /// Collects `id` plus all transitive descendants, pre-order.
    ///
    /// Acyclic parent chains are a caller obligation; the `seen` set keeps
    /// the walk terminating on corrupted data anyway.
    fn collect_subtree(&self, id: EntityId, out: &mut Vec<Entity>, seen: &mut HashSet<EntityId>) {
        if !seen.insert(id) {
            return;
        }
        out.push(Entity::new(id));
        let child_ids: Vec<EntityId> = self
            .entries
            .iter()
            .filter(|entry| entry.parent_id == Some(id))
            .map(|entry| entry.id)
            .collect();
        for child in child_ids {
            self.collect_subtree(child, out, seen);
        }
    }

    /// Splices an entry for `id` into `working` at the slot's ordinal and
    /// renumbers every sibling group.
    fn splice(working: &mut Vec<HierarchyEntry>, id: EntityId, slot: Slot) {
        let index = Self::insertion_index(working, slot);
        working.insert(index, HierarchyEntry::new(id, slot.parent_id, slot.position));
        Self::renumber(working);
    }

    /// Finds the list index corresponding to the slot's sibling ordinal.
    ///
    /// Walks the list counting entries that share the slot's parent; the
    /// first point where the count reaches the requested position is the
    /// insertion index. If the count never gets there (position at or past
    /// the sibling count), the insertion point is the end of the list.
    fn insertion_index(entries: &[HierarchyEntry], slot: Slot) -> usize {
        let mut ordinal = 0;
        for (index, entry) in entries.iter().enumerate() {
            if ordinal == slot.position {
                return index;
            }
            if entry.parent_id == slot.parent_id {
                ordinal += 1;
            }
        }
        entries.len()
    }

    /// Assigns dense positions in a single pass: one counter per distinct
    /// parent, incremented as the list is walked. Preserves the relative
    /// order of every sibling group.
    fn renumber(entries: &mut [HierarchyEntry]) {
        let mut counters: HashMap<Option<EntityId>, u32> = HashMap::new();
        for entry in entries.iter_mut() {
            let counter = counters.entry(entry.parent_id).or_insert(0);
            entry.position = *counter;
            *counter += 1;
        }
    }
}
