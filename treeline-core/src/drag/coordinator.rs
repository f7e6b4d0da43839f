//! Drag session state machine
//!
//! At most one drag session is live at a time. The coordinator tracks the
//! dragged entity, answers which drop targets may be offered, and on drop
//! delegates the actual relocation to the hierarchy store. Target vetting is
//! advisory: the renderer is expected to consult [`DragCoordinator::can_target`]
//! before offering slots, but `drop` itself performs no policy checks, only
//! session tracking and delegation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hierarchy::{HierarchyResult, HierarchyStore, Slot};
use crate::models::EntityId;

/// Compatibility predicate deciding whether `source` may be offered drop
/// slots under `target`. Supplied by the embedding application.
pub type SlotMatcher = Box<dyn Fn(EntityId, EntityId) -> bool + Send + Sync>;

/// Which targets are suppressed while their subtree is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropGuard {
    /// Only the dragged entity itself is excluded. Dropping into a
    /// descendant is *not* prevented and will corrupt the parent chain;
    /// some hosts rely on the permissive behavior.
    SelfOnly,
    /// The dragged entity and its whole subtree are excluded, keeping the
    /// parent chain acyclic.
    #[default]
    ExcludeDescendants,
}

impl DropGuard {
    /// Returns true if `target` may be offered while `source` is dragged.
    #[must_use]
    pub fn allows(self, hierarchy: &HierarchyStore, source: EntityId, target: EntityId) -> bool {
        if source == target {
            return false;
        }
        match self {
            Self::SelfOnly => true,
            Self::ExcludeDescendants => !hierarchy.is_ancestor(source, target),
        }
    }
}

/// How a drop resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The dragged entity was moved to the slot.
    Moved {
        /// The entity that moved.
        entity: EntityId,
        /// Where it went.
        slot: Slot,
    },
    /// Nothing moved: no live session, or the drop landed outside any slot.
    Cancelled,
}

/// Tracks the in-flight drag session.
///
/// State machine: `Idle --drag(Some)--> Dragging --drag(None)/drop--> Idle`.
/// After any drop (with or without a slot, successful or not) the session
/// is over.
pub struct DragCoordinator {
    current: Option<EntityId>,
    guard: DropGuard,
    matcher: SlotMatcher,
}

impl DragCoordinator {
    /// Creates a coordinator with the default guard and an always-true
    /// compatibility predicate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: None,
            guard: DropGuard::default(),
            matcher: Box::new(|_, _| true),
        }
    }

    /// Sets the drop guard policy.
    #[must_use]
    pub fn with_guard(mut self, guard: DropGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Sets the compatibility predicate.
    #[must_use]
    pub fn with_matcher(mut self, matcher: SlotMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Returns the configured guard policy.
    #[must_use]
    pub const fn guard(&self) -> DropGuard {
        self.guard
    }

    /// Returns the entity currently being dragged, if any.
    #[must_use]
    pub const fn current(&self) -> Option<EntityId> {
        self.current
    }

    /// Returns true if a drag session is live.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.current.is_some()
    }

    /// Begins a session (`Some`) or cancels the live one (`None`).
    ///
    /// Cancelling is a pure reset: no mutation has happened yet, so there
    /// is nothing to compensate.
    pub fn drag(&mut self, entity: Option<EntityId>) {
        if let Some(entity) = entity {
            tracing::debug!(entity = %entity, "drag started");
        }
        self.current = entity;
    }

    /// Applies the compatibility predicate to an arbitrary pair.
    #[must_use]
    pub fn has_matching_slot(&self, source: EntityId, target: EntityId) -> bool {
        (self.matcher)(source, target)
    }

    /// Returns true if slots under `target` should be offered for the live
    /// session: a session exists, the guard allows the target, and the
    /// compatibility predicate matches.
    ///
    /// Advisory: a caller that skips this check can still force the move
    /// through `drop`.
    #[must_use]
    pub fn can_target(&self, hierarchy: &HierarchyStore, target: EntityId) -> bool {
        let Some(source) = self.current else {
            return false;
        };
        self.guard.allows(hierarchy, source, target) && self.has_matching_slot(source, target)
    }

    /// Ends the session, moving the dragged entity if a slot was hit.
    ///
    /// With a live session and a slot, delegates to
    /// [`HierarchyStore::move_entity`]; with no session or no slot, nothing
    /// mutates. The session ends in every case, including when the move
    /// fails.
    ///
    /// # Errors
    ///
    /// Propagates [`HierarchyError::EntityNotFound`](crate::hierarchy::HierarchyError)
    /// if the dragged entity vanished from the store mid-session.
    pub fn drop(
        &mut self,
        hierarchy: &mut HierarchyStore,
        slot: Option<Slot>,
    ) -> HierarchyResult<DropOutcome> {
        let session = self.current.take();
        match (session, slot) {
            (Some(entity), Some(slot)) => {
                hierarchy.move_entity(entity, slot)?;
                tracing::debug!(entity = %entity, slot = %slot, "drop completed");
                Ok(DropOutcome::Moved { entity, slot })
            }
            _ => Ok(DropOutcome::Cancelled),
        }
    }
}

impl Default for DragCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DragCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragCoordinator")
            .field("current", &self.current)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}
