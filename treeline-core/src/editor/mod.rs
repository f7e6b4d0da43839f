//! Editor facade
//!
//! [`EditorCore`] wires the collaborating stores together the way an
//! embedding application would: one allocator, one hierarchy store, one item
//! store, one state store and one drag coordinator, with the cross-store
//! choreography (insertion auto-expand, removal cascade, snapshot assembly)
//! in a single place. The renderer talks to the individual stores for
//! reads and to this facade for compound mutations.

use crate::drag::{DragCoordinator, DropOutcome};
use crate::hierarchy::{HierarchyResult, HierarchyStore, Slot};
use crate::item::{BasicItemStore, ItemPatch, ItemStore};
use crate::models::{
    Entity, EntityAllocator, EntityId, Item, ItemAction, ItemContent, RandomEntityAllocator,
    SequentialEntityAllocator,
};
use crate::snapshot::{SNAPSHOT_FORMAT_VERSION, Snapshot};
use crate::state::{SelectionMode, SelectionStateStore, StateUpdate};

/// Identifiers of the built-in item actions.
pub mod action_ids {
    /// Insert a new structural node as the first child of the target.
    pub const ADD_NODE: &str = "add-node";
    /// Insert a new text block as the first child of the target.
    pub const ADD_TEXT: &str = "add-text";
}

/// The action menu attached to freshly inserted node items.
#[must_use]
pub fn default_item_actions() -> Vec<ItemAction> {
    vec![
        ItemAction::new(action_ids::ADD_NODE, "Add node"),
        ItemAction::new(action_ids::ADD_TEXT, "Add text"),
    ]
}

/// An item without an identity yet: everything [`EditorCore::insert`] needs
/// to build the real [`Item`] once an entity has been allocated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    /// Explicit label; when absent a default derived from the new id is used.
    pub label: Option<String>,
    /// Optional icon name.
    pub icon: Option<String>,
    /// Actions to offer on the new item, if any.
    pub actions: Option<Vec<ItemAction>>,
    /// Content payload.
    pub content: ItemContent,
}

impl ItemDraft {
    /// Draft for a structural node carrying the default action menu.
    #[must_use]
    pub fn node() -> Self {
        Self {
            actions: Some(default_item_actions()),
            content: ItemContent::Node,
            ..Self::default()
        }
    }

    /// Draft for an empty text block. Text blocks offer no actions.
    #[must_use]
    pub fn text() -> Self {
        Self {
            content: ItemContent::Text {
                value: String::new(),
            },
            ..Self::default()
        }
    }

    /// Sets an explicit label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builds the item for a freshly allocated entity.
    fn into_item(self, id: EntityId) -> Item {
        let label = self.label.unwrap_or_else(|| match &self.content {
            ItemContent::Text { .. } => format!("<Text-{id}>"),
            _ => format!("<New Entity: {id}>"),
        });
        Item {
            id,
            label,
            icon: self.icon,
            actions: self.actions,
            content: self.content,
        }
    }
}

/// Result of [`EditorCore::trigger_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A built-in action inserted a new entity.
    Inserted(EntityId),
    /// The action id is not one of the built-ins; the embedding application
    /// owns it.
    Unhandled,
}

/// Composes the stores into one editing surface.
///
/// Each store keeps its own single responsibility; the facade only holds
/// the choreography that must span them.
#[derive(Debug)]
pub struct EditorCore {
    allocator: Box<dyn EntityAllocator>,
    hierarchy: HierarchyStore,
    items: BasicItemStore,
    state: SelectionStateStore,
    drag: DragCoordinator,
}

impl EditorCore {
    /// Creates an empty editor with random entity ids.
    #[must_use]
    pub fn new() -> Self {
        Self::with_allocator(Box::new(RandomEntityAllocator::new()))
    }

    /// Creates an empty editor with the given allocator.
    #[must_use]
    pub fn with_allocator(allocator: Box<dyn EntityAllocator>) -> Self {
        Self {
            allocator,
            hierarchy: HierarchyStore::new(),
            items: BasicItemStore::new(),
            state: SelectionStateStore::new(),
            drag: DragCoordinator::new(),
        }
    }

    /// Creates an editor seeded with a single root node labelled "Root",
    /// using deterministic entity ids.
    #[must_use]
    pub fn seeded() -> Self {
        let mut editor = Self::with_allocator(Box::new(SequentialEntityAllocator::new()));
        // The store is empty, so the insertion cannot fail.
        let _ = editor.insert(ItemDraft::node().with_label("Root"), Slot::root(0));
        editor
    }

    /// Restores an editor from a snapshot.
    ///
    /// Hierarchy positions are normalized on load and the allocator resumes
    /// at the persisted counter.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            allocator: Box::new(SequentialEntityAllocator::starting_at(snapshot.counter)),
            hierarchy: HierarchyStore::from_entries(snapshot.hierarchy),
            items: BasicItemStore::from_items(snapshot.items),
            state: SelectionStateStore::from_states(snapshot.state, SelectionMode::default()),
            drag: DragCoordinator::new(),
        }
    }

    /// Assembles the persistence snapshot.
    ///
    /// Items and states are collected in hierarchy document order, so state
    /// recorded for entities that have since left the tree is pruned here.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let hierarchy = self.hierarchy.entries().to_vec();
        let items = hierarchy
            .iter()
            .filter_map(|entry| self.items.get_item(entry.id).cloned())
            .collect();
        let state = hierarchy
            .iter()
            .map(|entry| (entry.id, self.state.state(entry.id)))
            .collect();
        Snapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            saved_at: chrono::Utc::now(),
            items,
            hierarchy,
            state,
            counter: self.allocator.issued(),
        }
    }

    /// Returns the hierarchy store.
    #[must_use]
    pub const fn hierarchy(&self) -> &HierarchyStore {
        &self.hierarchy
    }

    /// Returns the item store.
    #[must_use]
    pub const fn items(&self) -> &BasicItemStore {
        &self.items
    }

    /// Returns the state store.
    #[must_use]
    pub const fn state(&self) -> &SelectionStateStore {
        &self.state
    }

    /// Returns the drag coordinator.
    #[must_use]
    pub const fn drag_coordinator(&self) -> &DragCoordinator {
        &self.drag
    }

    /// Replaces the drag coordinator (e.g. to install a compatibility
    /// predicate or a different drop guard).
    pub fn set_drag_coordinator(&mut self, drag: DragCoordinator) {
        self.drag = drag;
    }

    /// Allocates an entity, places it at `slot`, registers the drafted item
    /// and auto-expands the target parent so the insertion is visible.
    ///
    /// # Errors
    ///
    /// Propagates hierarchy placement errors; nothing is registered when
    /// placement fails.
    pub fn insert(&mut self, draft: ItemDraft, slot: Slot) -> HierarchyResult<EntityId> {
        let entity = self.allocator.create_entity();
        self.hierarchy.add_entity(entity, slot)?;
        self.items.add_item(draft.into_item(entity.id));
        if let Some(parent) = slot.parent_id {
            self.state.update(parent, StateUpdate::open(true));
        }
        tracing::info!(entity = %entity.id, slot = %slot, "inserted entity");
        Ok(entity.id)
    }

    /// Removes an entity and its subtree, cascading through the item and
    /// state stores.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::EntityNotFound`](crate::hierarchy::HierarchyError)
    /// if the entity is not placed; no store is touched.
    pub fn remove(&mut self, id: EntityId) -> HierarchyResult<Vec<Entity>> {
        let removed = self.hierarchy.remove_entity(id)?;
        for entity in &removed {
            self.items.remove_item(entity.id);
            self.state.remove(entity.id);
        }
        tracing::info!(entity = %id, removed = removed.len(), "removed entity subtree");
        Ok(removed)
    }

    /// Dispatches a built-in action against a target entity (or the root
    /// level when `target` is `None`).
    ///
    /// Built-in insertions land at position 0 under the target so the new
    /// item appears at the top of the expanded parent.
    ///
    /// # Errors
    ///
    /// Propagates hierarchy errors from the insertion.
    pub fn trigger_action(
        &mut self,
        target: Option<EntityId>,
        action_id: &str,
    ) -> HierarchyResult<ActionOutcome> {
        let draft = match action_id {
            action_ids::ADD_NODE => ItemDraft::node(),
            action_ids::ADD_TEXT => ItemDraft::text(),
            _ => return Ok(ActionOutcome::Unhandled),
        };
        let id = self.insert(draft, Slot::new(target, 0))?;
        Ok(ActionOutcome::Inserted(id))
    }

    /// Merges a patch into an entity's item. Returns false if the entity has
    /// no item.
    pub fn update_item(&mut self, id: EntityId, patch: ItemPatch) -> bool {
        self.items.update_item(id, patch)
    }

    /// Merges a state update (open/selected flags) for an entity.
    pub fn update_state(&mut self, id: EntityId, update: StateUpdate) {
        self.state.update(id, update);
    }

    /// Switches between single- and multi-select, typically tracking a
    /// modifier key in the embedding application.
    pub fn set_multi_select(&mut self, enabled: bool) {
        self.state.set_mode(if enabled {
            SelectionMode::Multi
        } else {
            SelectionMode::Single
        });
    }

    /// Returns the selected items in hierarchy document order.
    #[must_use]
    pub fn selection(&self) -> Vec<&Item> {
        self.hierarchy
            .entries()
            .iter()
            .filter(|entry| self.state.state(entry.id).is_selected)
            .filter_map(|entry| self.items.get_item(entry.id))
            .collect()
    }

    /// Begins (`Some`) or cancels (`None`) a drag session.
    pub fn drag(&mut self, entity: Option<EntityId>) {
        self.drag.drag(entity);
    }

    /// Returns true if slots under `target` should be offered for the live
    /// drag session.
    #[must_use]
    pub fn can_target(&self, target: EntityId) -> bool {
        self.drag.can_target(&self.hierarchy, target)
    }

    /// Completes the live drag session against a slot (or none).
    ///
    /// # Errors
    ///
    /// Propagates the underlying move failure; the session ends regardless.
    pub fn drop(&mut self, slot: Option<Slot>) -> HierarchyResult<DropOutcome> {
        self.drag.drop(&mut self.hierarchy, slot)
    }
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new()
    }
}
