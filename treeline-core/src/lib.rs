//! Treeline Core Library
//!
//! This crate provides the core functionality for the Treeline tree editor
//! widget: an ordered hierarchy store, a drag-and-drop coordination protocol,
//! and a selection/expansion state manager, together with snapshot
//! persistence. The visual tree renderer is not part of this crate; it is
//! expected to query these stores and feed gestures back into them.
//!
//! # Crate Structure
//!
//! - [`models`] - Core data structures (entity ids, allocators, items)
//! - [`hierarchy`] - Ordered hierarchy store (placement, move, cascade removal)
//! - [`drag`] - Drag session coordination and drop-zone geometry
//! - [`state`] - Per-entity `{open, selected}` state with selection modes
//! - [`item`] - Item store interface and the in-memory implementation
//! - [`editor`] - Facade wiring allocator, stores and drag coordination
//! - [`snapshot`] - Snapshot data model, file store and debounced writer
//! - [`config`] - Editor settings (TOML)
//! - [`tracing`] - Structured logging setup and span/field conventions
//!
//! # Example
//!
//! ```
//! use treeline_core::{DropOutcome, EditorCore, Slot};
//!
//! let mut editor = EditorCore::seeded();
//! let root = editor.hierarchy().entries()[0].id;
//!
//! // Add a child node under the root via the built-in action.
//! editor.trigger_action(Some(root), treeline_core::action_ids::ADD_NODE).unwrap();
//! assert_eq!(editor.hierarchy().children(Some(root)).len(), 1);
//!
//! // The parent auto-expanded to reveal the insertion.
//! assert!(editor.state().state(root).is_open);
//!
//! // Drag the child to the root level, before the current root.
//! let child = editor.hierarchy().children(Some(root))[0].id;
//! editor.drag(Some(child));
//! let outcome = editor.drop(Some(Slot::root(0))).unwrap();
//! assert!(matches!(outcome, DropOutcome::Moved { .. }));
//! ```

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod drag;
pub mod editor;
pub mod hierarchy;
pub mod item;
pub mod models;
pub mod snapshot;
pub mod state;
pub mod tracing;

// =============================================================================
// Convenience re-exports
//
// These flat re-exports exist for the property and integration test suites.
// Embedding applications should prefer the modular paths (e.g.
// `treeline_core::hierarchy::HierarchyStore`) over the flat namespace.
// =============================================================================

pub use config::{
    DragSettings, EditorSettings, LoggingSettings, SettingsError, SettingsResult, SnapshotSettings,
};
pub use drag::{
    DragCoordinator, DropGuard, DropOutcome, DropPosition, RowKind, SlotMatcher, ZoneConfig,
    drop_position_for, indicator_y, is_valid_drop_position, row_index_at, slot_for,
};
pub use editor::{ActionOutcome, EditorCore, ItemDraft, action_ids, default_item_actions};
pub use hierarchy::{
    HierarchyEntry, HierarchyError, HierarchyResult, HierarchyStore, Slot,
};
pub use item::{BasicItemStore, ItemPatch, ItemStore};
pub use models::{
    Entity, EntityAllocator, EntityId, GroupStyle, Item, ItemAction, ItemContent, LayoutKind,
    RandomEntityAllocator, SequentialEntityAllocator,
};
pub use snapshot::{
    SNAPSHOT_FORMAT_VERSION, Snapshot, SnapshotError, SnapshotResult, SnapshotStore,
    SnapshotWriter,
};
pub use state::{EntityState, SelectionMode, SelectionStateStore, StateUpdate};
pub use crate::tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult, init_tracing,
    is_tracing_initialized,
};
