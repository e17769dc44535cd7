//! Core entity storage: positions, conviction, and the move primitive.
//!
//! Structure-of-Arrays layout (every `Vec` field has exactly `count`
//! elements; the `EntityId` value is the index into all of them):
//!
//! ```ignore
//! let pos = store.positions[entity.index()];  // O(1), cache-friendly
//! ```
//!
//! # Conviction rules
//!
//! Conviction is a scalar in `[-1, 1]`.  The exact value `-1` is the
//! compromised sentinel: the entity is being oppressed and its conviction is
//! latched — normal (non-forced) writes are ignored until a forced write
//! resets it.  Forced writes always land (still clamped to the range).

use crowd_core::{EntityId, Vec2};

/// Sentinel conviction value denoting "compromised / being oppressed".
///
/// Only ever written exactly, so `==` comparison against it is sound.
pub const COMPROMISED_CONVICTION: f32 = -1.0;

/// SoA storage for all simulated entities.
pub struct EntityStore {
    /// Number of entities.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// World position of each entity.  Indexed by `EntityId`.
    pub positions: Vec<Vec2>,

    /// Conviction of each entity.  Private so the latch/clamp rules above
    /// cannot be bypassed by direct indexing.
    convictions: Vec<f32>,

    /// Base movement speed in world units per second.  Movement deltas from
    /// the controllers are direction vectors scaled by a speed *ratio*; this
    /// converts them to units.
    move_speed: f32,
}

impl EntityStore {
    /// Build a store with every entity at the given position and conviction 0.
    pub fn new(positions: Vec<Vec2>, move_speed: f32) -> Self {
        let count = positions.len();
        Self {
            count,
            positions,
            convictions: vec![0.0; count],
            move_speed,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `EntityId`s in ascending index order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.count as u32).map(EntityId)
    }

    // ── Position ──────────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self, entity: EntityId) -> Vec2 {
        self.positions[entity.index()]
    }

    #[inline]
    pub fn set_position(&mut self, entity: EntityId, position: Vec2) {
        self.positions[entity.index()] = position;
    }

    /// Apply a movement delta issued by a controller.
    ///
    /// `delta` is a direction vector already scaled by the agent's speed
    /// ratio; the store converts it to world units via its base move speed
    /// and the tick duration.
    #[inline]
    pub fn apply_move(&mut self, entity: EntityId, delta: Vec2, dt_secs: f32) {
        let i = entity.index();
        self.positions[i] = self.positions[i] + delta * (self.move_speed * dt_secs);
    }

    // ── Conviction ────────────────────────────────────────────────────────

    #[inline]
    pub fn conviction(&self, entity: EntityId) -> f32 {
        self.convictions[entity.index()]
    }

    /// `true` while the entity's conviction equals the compromised sentinel.
    #[inline]
    pub fn is_compromised(&self, entity: EntityId) -> bool {
        self.convictions[entity.index()] == COMPROMISED_CONVICTION
    }

    /// Write a conviction value.
    ///
    /// Non-forced writes are ignored while the entity is compromised (the
    /// sentinel latches until a forced reset).  All writes are clamped to
    /// `[-1, 1]`.
    pub fn set_conviction(&mut self, entity: EntityId, value: f32, forced: bool) {
        if !forced && self.is_compromised(entity) {
            return;
        }
        self.convictions[entity.index()] = value.clamp(COMPROMISED_CONVICTION, 1.0);
    }

    /// Accumulate conviction under the normal (non-forced) rules.
    #[inline]
    pub fn add_conviction(&mut self, entity: EntityId, delta: f32) {
        let current = self.conviction(entity);
        self.set_conviction(entity, current + delta, false);
    }
}
