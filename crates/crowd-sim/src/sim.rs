//! The `Sim` struct and its tick loop.

use crowd_core::{AgentRng, AiConfig, EntityId, SimClock, SimConfig, Vec2};
use crowd_world::{
    COMPROMISED_CONVICTION, CueSink, EntityStore, ExitProvider, OppressionRegistry,
    PatrolProvider,
};

use crowd_ai::{AgentAi, AiContext, AiState};
use crowd_alert::{AlertCone, AlertOutcome};

use crate::SimObserver;

/// The main simulation runner.
///
/// `Sim<P, E, C>` holds all simulation state: the entity store, the
/// oppression registry, one controller (plus RNG) per non-player entity,
/// and the player's alert cone.  Controllers tick sequentially in ascending
/// slot order; the one cross-agent effect (an abductor's exit order) is
/// applied through the registry's controller lookup before the next agent
/// ticks, so ordering is deterministic within a tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PatrolProvider, E: ExitProvider, C: CueSink> {
    /// Global configuration (tick step, seed).
    pub config: SimConfig,

    /// Controller tuning bounds.
    pub ai_config: AiConfig,

    /// Fixed-step clock.
    pub clock: SimClock,

    /// All entity positions and convictions.
    pub entities: EntityStore,

    /// Taken-away set, oppression targets, controller lookup.
    pub registry: OppressionRegistry,

    /// One controller per non-player entity, indexed by slot.
    pub agents: Vec<AgentAi>,

    /// Per-controller deterministic RNGs, parallel to `agents`.
    pub rngs: Vec<AgentRng>,

    /// Patrol waypoint source.
    pub patrol: P,

    /// Exit waypoint source.
    pub exits: E,

    /// Outward audio/visual cues.
    pub cues: C,

    /// The player's alert cone.
    pub cone: AlertCone,

    /// Entity controlling the cone; `None` for headless crowds.
    pub(crate) player: Option<EntityId>,
}

impl<P: PatrolProvider, E: ExitProvider, C: CueSink> Sim<P, E, C> {
    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance the whole simulation by one step.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.now_secs();
        let dt = self.clock.dt_secs;
        let tick = self.clock.current_tick;

        observer.on_tick_start(tick);

        for slot in 0..self.agents.len() {
            let order = self.agents[slot].tick(
                &mut self.rngs[slot],
                &mut AiContext::new(
                    now,
                    dt,
                    &self.ai_config,
                    &mut self.entities,
                    &mut self.registry,
                    &self.patrol,
                    &self.exits,
                    &mut self.cues,
                ),
            );

            if let Some(order) = order {
                observer.on_take_away(tick, self.agents[slot].entity(), order.victim);
                // Victims without a controller (the player) are skipped.
                if let Some(victim_slot) = self.registry.controller_slot(order.victim) {
                    self.agents[victim_slot].set_exit_target(
                        order.exit,
                        order.delay,
                        now,
                        &self.ai_config,
                        &mut self.cues,
                    );
                }
            }
        }

        self.cone.tick(now, &mut self.cues);

        observer.on_tick_end(tick, self.registry.taken_count());
        self.clock.advance();
    }

    /// Run exactly `n` ticks.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    // ── Cone entry points ─────────────────────────────────────────────────

    /// Grow the cone while the player holds the control.  No-op without a
    /// player or during the post-release cooldown.
    pub fn grow_cone(&mut self) {
        if self.player.is_none() || self.cone.in_cooldown(self.clock.now_secs()) {
            return;
        }
        self.cone.grow(self.clock.dt_secs);
    }

    /// Aim the cone from the player's position toward `toward`.
    pub fn aim_cone(&mut self, toward: Vec2) {
        let Some(player) = self.player else { return };
        self.cone.aim(self.entities.position(player), toward);
    }

    /// Release (or cancel) the cone, distributing alert intensity among the
    /// agents inside it.
    pub fn release_cone(&mut self, cancel: bool) -> AlertOutcome {
        let Some(player) = self.player else {
            return AlertOutcome::default();
        };
        self.cone.release(
            cancel,
            player,
            self.clock.now_secs(),
            &mut self.agents,
            &mut self.entities,
            &mut self.cues,
        )
    }

    // ── Host entry points ─────────────────────────────────────────────────

    /// Put `entity`'s controller into the witness state for `duration`
    /// seconds.  No-op for entities without a controller.
    pub fn set_witness(&mut self, entity: EntityId, duration: f32) {
        let now = self.clock.now_secs();
        if let Some(slot) = self.registry.controller_slot(entity) {
            self.agents[slot].set_witness(duration, now, &self.entities, &mut self.cues);
        }
    }

    /// Force `entity`'s conviction to the compromised sentinel; its
    /// controller becomes an oppressor on its next tick.
    pub fn compromise(&mut self, entity: EntityId) {
        self.entities
            .set_conviction(entity, COMPROMISED_CONVICTION, true);
    }

    /// Current controller state for `entity`, or `None` if it has no
    /// controller.
    pub fn agent_state(&self, entity: EntityId) -> Option<AiState> {
        self.registry
            .controller_slot(entity)
            .map(|slot| self.agents[slot].state())
    }

    /// Declare the run over, firing the matching cue.
    pub fn finish(&mut self, victory: bool) {
        if victory {
            self.cues.play_victory();
        } else {
            self.cues.play_defeat();
        }
    }
}
