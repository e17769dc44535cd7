//! Oppression registry: who is taken away, by whom, and who to pursue next.
//!
//! The registry is also the lookup-by-id seam for cross-agent calls: every
//! controller registers its slot index at build time, and the tick loop
//! resolves a victim's controller through [`OppressionRegistry::controller_slot`]
//! instead of holding raw references between agents.  Entities without a
//! controller (the player) simply have no slot.

use rustc_hash::{FxHashMap, FxHashSet};

use crowd_core::EntityId;

use crate::store::EntityStore;

/// Tracks taken-away entities and resolves oppression targets.
#[derive(Default)]
pub struct OppressionRegistry {
    /// Entities currently being (or having been) taken away.
    taken: FxHashSet<EntityId>,

    /// victim → abductor, for the entries in `taken`.
    held_by: FxHashMap<EntityId, EntityId>,

    /// entity → controller slot in the simulation's controller list.
    controllers: FxHashMap<EntityId, usize>,
}

impl OppressionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Controller lookup ─────────────────────────────────────────────────

    /// Record that `entity` is driven by the controller at `slot`.
    pub fn register_controller(&mut self, entity: EntityId, slot: usize) {
        self.controllers.insert(entity, slot);
    }

    /// Controller slot for `entity`, or `None` if it has no controller.
    #[inline]
    pub fn controller_slot(&self, entity: EntityId) -> Option<usize> {
        self.controllers.get(&entity).copied()
    }

    // ── Taken-away set ────────────────────────────────────────────────────

    /// Mark `victim` as taken away by `abductor`.
    pub fn take_away(&mut self, abductor: EntityId, victim: EntityId) {
        self.taken.insert(victim);
        self.held_by.insert(victim, abductor);
    }

    /// Clear a completed abduction.  Idempotent — a second call for the same
    /// entity is a no-op.
    pub fn remove_taken(&mut self, entity: EntityId) {
        self.taken.remove(&entity);
        self.held_by.remove(&entity);
    }

    #[inline]
    pub fn is_taken(&self, entity: EntityId) -> bool {
        self.taken.contains(&entity)
    }

    #[inline]
    pub fn taken_count(&self) -> usize {
        self.taken.len()
    }

    /// Abductor currently holding `victim`, if any.
    pub fn abductor_of(&self, victim: EntityId) -> Option<EntityId> {
        self.held_by.get(&victim).copied()
    }

    // ── Target resolution ─────────────────────────────────────────────────

    /// Pick an oppression target for `of`: the nearest entity that is not
    /// the caller, not compromised, not already taken, and holds strictly
    /// positive conviction (oppressors go after the converted).
    ///
    /// Returns `None` when no entity qualifies; the caller falls back to
    /// patrol.  Ties resolve to the lowest `EntityId` for determinism.
    pub fn oppression_target(
        &self,
        of: EntityId,
        entities: &EntityStore,
    ) -> Option<EntityId> {
        let origin = entities.position(of);
        let mut best: Option<(f32, EntityId)> = None;

        for candidate in entities.entity_ids() {
            if candidate == of
                || entities.is_compromised(candidate)
                || self.is_taken(candidate)
                || entities.conviction(candidate) <= 0.0
            {
                continue;
            }
            let dist = origin.distance(entities.position(candidate));
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, candidate));
            }
        }

        best.map(|(_, id)| id)
    }
}
