//! Item store interface and in-memory implementation
//!
//! The item store maps entity ids to display payloads. It is a collaborator
//! of the core rather than part of it (the hierarchy and state stores key
//! off entity ids and never look inside an item), so the interface is a
//! trait and [`BasicItemStore`] is the batteries-included implementation.

use std::collections::HashMap;

use crate::models::{EntityId, Item, ItemAction, ItemContent};

/// A partial item change, merged into the stored item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    /// New label, if changed.
    pub label: Option<String>,
    /// New icon, if changed.
    pub icon: Option<String>,
    /// New content payload, if changed.
    pub content: Option<ItemContent>,
    /// New action list, if changed.
    pub actions: Option<Vec<ItemAction>>,
}

impl ItemPatch {
    /// A patch that only changes the label.
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// A patch that only changes the content.
    #[must_use]
    pub fn content(content: ItemContent) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }
}

/// Maps entity ids to display payloads.
pub trait ItemStore {
    /// Returns the item for an entity, if known.
    fn get_item(&self, id: EntityId) -> Option<&Item>;

    /// Registers an item, replacing any previous payload for the same id.
    fn add_item(&mut self, item: Item);

    /// Merges a patch into an entity's item. Returns false if the entity is
    /// unknown.
    fn update_item(&mut self, id: EntityId, patch: ItemPatch) -> bool;

    /// Removes an entity's item, returning it if present. Called for every
    /// id in a removal cascade.
    fn remove_item(&mut self, id: EntityId) -> Option<Item>;

    /// Returns the actions offered for an entity, if any.
    fn get_actions(&self, id: EntityId) -> Option<&[ItemAction]> {
        self.get_item(id).and_then(|item| item.actions.as_deref())
    }
}

/// HashMap-backed item store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicItemStore {
    items: HashMap<EntityId, Item>,
}

impl BasicItemStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a list of items (e.g. a loaded snapshot).
    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    /// Returns the number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemStore for BasicItemStore {
    fn get_item(&self, id: EntityId) -> Option<&Item> {
        self.items.get(&id)
    }

    fn add_item(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    fn update_item(&mut self, id: EntityId, patch: ItemPatch) -> bool {
        let Some(item) = self.items.get_mut(&id) else {
            return false;
        };
        if let Some(label) = patch.label {
            item.label = label;
        }
        if let Some(icon) = patch.icon {
            item.icon = Some(icon);
        }
        if let Some(content) = patch.content {
            item.content = content;
        }
        if let Some(actions) = patch.actions {
            item.actions = Some(actions);
        }
        true
    }

    fn remove_item(&mut self, id: EntityId) -> Option<Item> {
        self.items.remove(&id)
    }
}
