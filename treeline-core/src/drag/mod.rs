//! Drag-and-drop coordination
//!
//! This module provides a pure data model for drag-and-drop over the tree,
//! with no toolkit dependencies, so the whole protocol is property-testable.
//!
//! - `coordinator` - The drag session state machine ([`DragCoordinator`]):
//!   what is being dragged, which targets may be offered, and how a drop
//!   resolves into a hierarchy move.
//! - `zones` - Drop-zone geometry: translating a pointer position over a row
//!   into a [`DropPosition`] and onward into a [`Slot`](crate::hierarchy::Slot).

mod coordinator;
mod zones;

pub use coordinator::{DragCoordinator, DropGuard, DropOutcome, SlotMatcher};
pub use zones::{
    DropPosition, RowKind, ZoneConfig, drop_position_for, indicator_y, is_valid_drop_position,
    row_index_at, slot_for,
};
