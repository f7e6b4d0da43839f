//! Entity identity and allocation
//!
//! Entities are opaque identities: everything else (placement, state, item
//! payload) is keyed by [`EntityId`]. Allocation is a collaborator concern
//! and the stores never mint ids themselves, so the allocator is a trait
//! with two implementations: random UUIDs for interactive use, and a
//! deterministic counter-derived variant whose progress is what the
//! snapshot `counter` field persists.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entity in the tree.
///
/// Equality is by value; the id says nothing about placement or payload.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Creates a new random entity ID.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an entity ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An entity: an opaque identity referenced by the hierarchy, state and item
/// stores. Never duplicated; stores hold the id, not a copy of anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity {
    /// The entity's identity.
    pub id: EntityId,
}

impl Entity {
    /// Wraps an existing id as an entity.
    #[must_use]
    pub const fn new(id: EntityId) -> Self {
        Self { id }
    }
}

impl From<EntityId> for Entity {
    fn from(id: EntityId) -> Self {
        Self { id }
    }
}

impl From<Entity> for EntityId {
    fn from(entity: Entity) -> Self {
        entity.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Issues unique entities.
///
/// The core never validates uniqueness itself; an allocator must never hand
/// out an id twice. `issued()` reports how many entities have been created so
/// the count can ride along in a snapshot.
pub trait EntityAllocator: fmt::Debug + Send {
    /// Creates an entity with a never-before-seen id.
    fn create_entity(&mut self) -> Entity;

    /// Returns how many entities this allocator has issued.
    fn issued(&self) -> u64;
}

/// Allocator producing random (UUID v4) entity ids.
#[derive(Debug, Default)]
pub struct RandomEntityAllocator {
    issued: u64,
}

impl RandomEntityAllocator {
    /// Creates a new allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityAllocator for RandomEntityAllocator {
    fn create_entity(&mut self) -> Entity {
        self.issued += 1;
        Entity::new(EntityId::random())
    }

    fn issued(&self) -> u64 {
        self.issued
    }
}

/// Deterministic allocator deriving ids from a monotonic counter.
///
/// Restoring a snapshot resumes the allocator at the persisted counter, so
/// ids issued after a reload continue the original sequence. The counter is
/// offset by one when deriving the UUID so the nil UUID is never issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequentialEntityAllocator {
    next: u64,
}

impl SequentialEntityAllocator {
    /// Creates an allocator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator resuming at a previously persisted counter.
    #[must_use]
    pub const fn starting_at(counter: u64) -> Self {
        Self { next: counter }
    }
}

impl EntityAllocator for SequentialEntityAllocator {
    fn create_entity(&mut self) -> Entity {
        let id = EntityId::from_uuid(Uuid::from_u128(u128::from(self.next) + 1));
        self.next += 1;
        Entity::new(id)
    }

    fn issued(&self) -> u64 {
        self.next
    }
}
