//! Error types for hierarchy operations

use crate::models::EntityId;

/// Errors that can occur during hierarchy mutations.
///
/// Out-of-range slot positions are not errors (they clamp to append), so
/// the only failure modes concern entity identity. A failed operation leaves
/// the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    /// The referenced entity has no entry in the store.
    #[error("entity not found in hierarchy: {0}")]
    EntityNotFound(EntityId),

    /// The entity is already placed; use a move instead of an add.
    #[error("entity already placed in hierarchy: {0}")]
    EntityExists(EntityId),
}

/// Result type for hierarchy operations.
pub type HierarchyResult<T> = Result<T, HierarchyError>;
