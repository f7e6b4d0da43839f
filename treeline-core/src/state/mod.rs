//! Per-entity UI state
//!
//! The state store tracks `{is_open, is_selected}` per entity, independent
//! of placement. Entries materialize lazily (reading an unknown id yields
//! the all-false default) and are dropped explicitly when an entity's
//! removal cascades through. The selection mode decides whether selecting
//! one entity clears every other recorded selection (single-select, the
//! default) or leaves them alone (multi-select, typically driven by a
//! modifier key held in the embedding application).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::EntityId;

/// Ephemeral UI state for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityState {
    /// Whether the entity's children are shown.
    #[serde(default)]
    pub is_open: bool,
    /// Whether the entity is part of the current selection.
    #[serde(default)]
    pub is_selected: bool,
}

/// A partial state change, merged into an entity's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateUpdate {
    /// New open flag, if the update touches it.
    pub is_open: Option<bool>,
    /// New selected flag, if the update touches it.
    pub is_selected: Option<bool>,
}

impl StateUpdate {
    /// An update that only sets the open flag.
    #[must_use]
    pub const fn open(value: bool) -> Self {
        Self {
            is_open: Some(value),
            is_selected: None,
        }
    }

    /// An update that only sets the selected flag.
    #[must_use]
    pub const fn selected(value: bool) -> Self {
        Self {
            is_open: None,
            is_selected: Some(value),
        }
    }

    /// Returns true if the update touches the selected flag at all.
    ///
    /// Single-select exclusivity triggers on touch, not on the value: even
    /// re-affirming a selection clears the others.
    #[must_use]
    pub const fn touches_selection(&self) -> bool {
        self.is_selected.is_some()
    }

    /// Merges this update into a state.
    pub fn apply(self, state: &mut EntityState) {
        if let Some(is_open) = self.is_open {
            state.is_open = is_open;
        }
        if let Some(is_selected) = self.is_selected {
            state.is_selected = is_selected;
        }
    }
}

/// Selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Selecting an entity clears every other selection.
    #[default]
    Single,
    /// Selections are independent.
    Multi,
}

/// Owns the per-entity `{open, selected}` flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStateStore {
    states: HashMap<EntityId, EntityState>,
    mode: SelectionMode,
}

impl SelectionStateStore {
    /// Creates an empty store in single-select mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given mode.
    #[must_use]
    pub fn with_mode(mode: SelectionMode) -> Self {
        Self {
            states: HashMap::new(),
            mode,
        }
    }

    /// Builds a store from persisted states.
    #[must_use]
    pub fn from_states(states: HashMap<EntityId, EntityState>, mode: SelectionMode) -> Self {
        Self { states, mode }
    }

    /// Returns the current selection mode.
    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switches the selection mode.
    ///
    /// Existing selections are kept; only subsequent updates take the new
    /// branch. (Clearing on entry would make a held modifier key destructive.)
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// Returns an entity's state, defaulting to all-false when unseen.
    #[must_use]
    pub fn state(&self, id: EntityId) -> EntityState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    /// Merges a partial update into an entity's state.
    ///
    /// In single-select mode, an update touching `is_selected` first clears
    /// the selected flag on every recorded state, then applies the merge to
    /// the target.
    pub fn update(&mut self, id: EntityId, update: StateUpdate) {
        if matches!(self.mode, SelectionMode::Single) && update.touches_selection() {
            for state in self.states.values_mut() {
                state.is_selected = false;
            }
        }
        let state = self.states.entry(id).or_default();
        update.apply(state);
    }

    /// Drops an entity's recorded state, returning it if present.
    ///
    /// Called as part of the removal cascade alongside the hierarchy and
    /// item stores.
    pub fn remove(&mut self, id: EntityId) -> Option<EntityState> {
        self.states.remove(&id)
    }

    /// Returns the ids of all currently selected entities, in no particular
    /// order. Use hierarchy order for display.
    #[must_use]
    pub fn selected(&self) -> Vec<EntityId> {
        self.states
            .iter()
            .filter(|(_, state)| state.is_selected)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Returns all recorded states.
    #[must_use]
    pub const fn states(&self) -> &HashMap<EntityId, EntityState> {
        &self.states
    }

    /// Keeps only the states whose entity passes the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(EntityId) -> bool) {
        self.states.retain(|id, _| keep(*id));
    }
}
