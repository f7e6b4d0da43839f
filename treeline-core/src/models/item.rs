//! Item payload model
//!
//! Items are the displayable payloads keyed by entity id. The content is a
//! closed tagged variant: adding a kind is a compile-time-checked change in
//! every `match` that dispatches on it. Serde attributes keep the JSON shape
//! identical to the snapshot wire format (`"type": "layout-group"`,
//! `"layoutType"`, `"actionId"`, ...).

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// An action offered in an item's action menu.
///
/// The core only carries these descriptors; wiring the menu and dispatching
/// the action is the embedding application's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAction {
    /// Identifier passed back when the action is triggered.
    pub action_id: String,
    /// Human-readable menu label.
    pub label: String,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ItemAction {
    /// Creates a new action descriptor without an icon.
    #[must_use]
    pub fn new(action_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            label: label.into(),
            icon: None,
        }
    }
}

/// Layout direction of a layout group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Children flow in reading order.
    #[default]
    Flow,
    /// Children are arranged on a column grid.
    Grid,
}

/// Visual style of a layout group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupStyle {
    /// Children rendered as cards.
    Cards,
    /// No decoration.
    #[default]
    None,
}

/// Content payload of an item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ItemContent {
    /// A plain structural node.
    #[default]
    Node,
    /// A text block.
    Text {
        /// The text value.
        #[serde(default)]
        value: String,
    },
    /// A layout container for arranging children.
    #[serde(rename_all = "camelCase")]
    LayoutGroup {
        /// Layout direction.
        layout_type: LayoutKind,
        /// Visual style.
        style: GroupStyle,
        /// Column count (used by grid layouts).
        columns: u32,
    },
}

impl ItemContent {
    /// Returns true if this content kind can hold children.
    ///
    /// Text blocks are leaves; everything else is a container and may be
    /// offered as an "into" drop target.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        !matches!(self, Self::Text { .. })
    }
}

/// A displayable item keyed by entity id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Identity of the entity this item belongs to.
    pub id: EntityId,
    /// Display label.
    pub label: String,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Actions offered for this item, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ItemAction>>,
    /// Content payload.
    #[serde(default)]
    pub content: ItemContent,
}

impl Item {
    /// Creates a new item with the given label and content.
    #[must_use]
    pub fn new(id: EntityId, label: impl Into<String>, content: ItemContent) -> Self {
        Self {
            id,
            label: label.into(),
            icon: None,
            actions: None,
            content,
        }
    }

    /// Sets the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the action list.
    #[must_use]
    pub fn with_actions(mut self, actions: Vec<ItemAction>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Returns true if this item's content can hold children.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        self.content.is_container()
    }
}
