//! Drop-zone geometry
//!
//! Pure helpers for translating a pointer position over a rendered row into
//! a drop intent, and a drop intent into a hierarchy [`Slot`]. Keeping the
//! math out of the renderer makes the zone behavior testable without any
//! toolkit.
//!
//! A container row (an item whose content can hold children) exposes three
//! zones: the top edge inserts before it, the bottom edge inserts after it,
//! and the middle drops *into* it. A leaf row only has before/after halves.

use crate::hierarchy::{HierarchyEntry, Slot};
use crate::models::ItemContent;

/// Drop intent relative to a target row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    /// Insert before the target (indicator line above the row).
    Before,
    /// Insert after the target (indicator line below the row).
    After,
    /// Insert as the target's last child (no line indicator).
    Into,
}

/// Row classification for zone purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// The row's item cannot hold children (text blocks).
    Leaf,
    /// The row's item can hold children and accepts `Into` drops.
    Container,
}

impl RowKind {
    /// Classifies an item content payload.
    #[must_use]
    pub const fn for_content(content: &ItemContent) -> Self {
        if content.is_container() {
            Self::Container
        } else {
            Self::Leaf
        }
    }
}

/// Geometry configuration for zone calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneConfig {
    /// Height of one rendered row in pixels.
    pub row_height: f64,
    /// Fraction of the row height forming each before/after edge zone on
    /// container rows (e.g. `0.25` = top and bottom quarters).
    pub edge_ratio: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            row_height: 28.0,
            edge_ratio: 0.25,
        }
    }
}

/// Resolves the drop position for a pointer at `y_in_row` (relative to the
/// row's top edge).
///
/// Container rows split into before / into / after zones; leaf rows split at
/// the midline into before / after.
#[must_use]
pub fn drop_position_for(y_in_row: f64, kind: RowKind, config: &ZoneConfig) -> DropPosition {
    match kind {
        RowKind::Container => {
            let edge = config.row_height * config.edge_ratio;
            if y_in_row < edge {
                DropPosition::Before
            } else if y_in_row > config.row_height - edge {
                DropPosition::After
            } else {
                DropPosition::Into
            }
        }
        RowKind::Leaf => {
            if y_in_row < config.row_height / 2.0 {
                DropPosition::Before
            } else {
                DropPosition::After
            }
        }
    }
}

/// Returns the Y coordinate for the drop indicator line, or `None` for
/// `Into` (which highlights the row instead of drawing a line).
///
/// Before sits at the top boundary of the row, After at the bottom.
#[must_use]
pub fn indicator_y(row_index: u32, position: DropPosition, config: &ZoneConfig) -> Option<f64> {
    match position {
        DropPosition::Before => Some(f64::from(row_index) * config.row_height),
        DropPosition::After => Some((f64::from(row_index) + 1.0) * config.row_height),
        DropPosition::Into => None,
    }
}

/// Returns the row index under a Y coordinate in the list view.
#[must_use]
pub fn row_index_at(y: f64, config: &ZoneConfig) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (y / config.row_height) as u32;
    index
}

/// Returns true if the position is offerable for the row kind: leaves never
/// accept `Into`.
#[must_use]
pub const fn is_valid_drop_position(position: DropPosition, kind: RowKind) -> bool {
    match kind {
        RowKind::Leaf => !matches!(position, DropPosition::Into),
        RowKind::Container => true,
    }
}

/// Maps a resolved drop position onto the slot it requests.
///
/// Before takes the target's own ordinal (shifting it down), After takes the
/// next ordinal, and Into appends inside the target (`child_count` is the
/// target's current number of children).
#[must_use]
pub const fn slot_for(position: DropPosition, target: &HierarchyEntry, child_count: u32) -> Slot {
    match position {
        DropPosition::Before => Slot::new(target.parent_id, target.position),
        DropPosition::After => Slot::new(target.parent_id, target.position + 1),
        DropPosition::Into => Slot::new(Some(target.id), child_count),
    }
}
