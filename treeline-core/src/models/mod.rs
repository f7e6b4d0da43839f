//! Core data structures for Treeline
//!
//! This module contains the entity identity types, the allocator interface
//! with its two implementations, and the item payload model shared by the
//! hierarchy, state and item stores.

mod entity;
mod item;

pub use entity::{
    Entity, EntityAllocator, EntityId, RandomEntityAllocator, SequentialEntityAllocator,
};
pub use item::{GroupStyle, Item, ItemAction, ItemContent, LayoutKind};
