//! The `AgentAi` state machine.
//!
//! # Per-tick evaluation order
//!
//! 1. **Oppressor sync** — the oppressor flag mirrors the owning entity's
//!    compromised sentinel every tick; either edge forces a state reset
//!    (into pursuit, or out of an in-progress abduction).
//! 2. **Re-pursuit cooldown** — a successful abductor re-enters pursuit once
//!    its armed cooldown elapses.
//! 3. **Per-state body** — pursuit acquisition/timeout and witness expiry,
//!    then the shared pathfinding routine.
//!
//! # Pathfinding
//!
//! Target-reached transitions are gated by a resampled per-target delay.
//! When the gate is open and the current target is reached (or there is no
//! target), the controller records the reach, resamples speed/delay, runs
//! the state-specific completion action, and then — like on every other
//! tick — moves toward whatever target now resolves for the current state.

use tracing::debug;

use crowd_core::{AgentRng, AiConfig, EntityId, Vec2};
use crowd_world::{CueSink, EntityStore};

use crate::{AiContext, AiState};

// ── ExitOrder ─────────────────────────────────────────────────────────────────

/// Cross-agent effect produced when an abductor captures its pursuit target.
///
/// The orchestrator resolves `victim`'s controller through the registry and
/// applies [`AgentAi::set_exit_target`] with these values before any other
/// agent ticks.  Victims without a controller are skipped silently.
///
/// `exit` is `None` when the scene has no exit points; the victim still
/// enters the taken-away state and completes it vacuously.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitOrder {
    pub victim: EntityId,
    pub exit:   Option<Vec2>,
    pub delay:  f32,
}

// ── AgentAi ───────────────────────────────────────────────────────────────────

/// Finite-state controller for one entity.
///
/// Created 1:1 with its owning entity and lives exactly as long; all state
/// transitions happen inside [`tick`][Self::tick] or one of the public entry
/// points.
pub struct AgentAi {
    entity: EntityId,

    state: AiState,
    /// State before the most recent target-reached transition; drives the
    /// taken-away cleanup side effect.
    previous_state: AiState,

    // ── Roaming ───────────────────────────────────────────────────────────
    /// Waypoint for the waypoint-driven states.  Pursuit resolves the live
    /// victim position instead; see `resolve_target`.
    current_target: Option<Vec2>,
    target_reached_time: f64,
    delay_before_next_target: f32,
    speed_ratio: f32,

    // ── Oppression ────────────────────────────────────────────────────────
    oppressor: bool,
    target_entity: Option<EntityId>,
    pursuit_secs: f32,
    /// Armed when an abduction completes; holds the completion time.
    re_pursuit_at: Option<f64>,
    re_pursuit_delay: f32,

    // ── Witness ───────────────────────────────────────────────────────────
    witness_start: f64,
    witness_duration: f32,
}

impl AgentAi {
    /// Controller for `entity`, starting on patrol with an immediately-due
    /// first waypoint request.
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            state:                    AiState::RoamingPatrol,
            previous_state:           AiState::RoamingPatrol,
            current_target:           None,
            target_reached_time:      0.0,
            delay_before_next_target: 0.0,
            speed_ratio:              1.0,
            oppressor:                false,
            target_entity:            None,
            pursuit_secs:             0.0,
            re_pursuit_at:            None,
            re_pursuit_delay:         0.0,
            witness_start:            0.0,
            witness_duration:         0.0,
        }
    }

    // ── Read accessors ────────────────────────────────────────────────────

    #[inline]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[inline]
    pub fn state(&self) -> AiState {
        self.state
    }

    #[inline]
    pub fn is_oppressor(&self) -> bool {
        self.oppressor
    }

    /// Entity currently being pursued or escorted, if any.
    #[inline]
    pub fn target_entity(&self) -> Option<EntityId> {
        self.target_entity
    }

    /// Current speed ratio in `(0, 1]`.
    #[inline]
    pub fn speed_ratio(&self) -> f32 {
        self.speed_ratio
    }

    /// Pause applied after the most recent target-reached event, seconds.
    #[inline]
    pub fn delay_before_next_target(&self) -> f32 {
        self.delay_before_next_target
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the controller by one simulation step.
    pub fn tick(&mut self, rng: &mut AgentRng, ctx: &mut AiContext<'_>) -> Option<ExitOrder> {
        self.sync_oppressor(ctx);
        self.check_re_pursuit(ctx.now);

        match self.state {
            AiState::RoamingPatrol | AiState::BeingTakenAway | AiState::TakeAwayTarget => {
                self.pathfind(rng, ctx)
            }

            AiState::Witness => {
                if !self.witness_active(ctx.now) {
                    self.state = AiState::RoamingPatrol;
                    ctx.cues.set_witness_sign(self.entity, false);
                }
                self.pathfind(rng, ctx)
            }

            AiState::GoToTarget => {
                if self.target_entity.is_none() {
                    self.target_entity = ctx.registry.oppression_target(self.entity, ctx.entities);
                }
                match self.target_entity {
                    None => {
                        // Nobody to pursue right now.
                        self.state = AiState::RoamingPatrol;
                    }
                    Some(victim) => {
                        self.pursuit_secs += ctx.dt;
                        if self.pursuit_secs >= ctx.config.max_pursuit_secs {
                            debug!(
                                entity = %self.entity,
                                victim = %victim,
                                "pursuit timed out, returning to patrol"
                            );
                            self.state = AiState::RoamingPatrol;
                            self.target_entity = None;
                        }
                    }
                }
                self.pathfind(rng, ctx)
            }
        }
    }

    fn sync_oppressor(&mut self, ctx: &AiContext<'_>) {
        let compromised = ctx.entities.is_compromised(self.entity);
        if !self.oppressor && compromised {
            self.oppressor = true;
            self.state = AiState::GoToTarget;
            self.pursuit_secs = 0.0;
        } else if self.oppressor && !compromised {
            // Conviction restored externally; abandon whatever the
            // oppression was doing.
            self.oppressor = false;
            self.state = AiState::RoamingPatrol;
        }
    }

    fn check_re_pursuit(&mut self, now: f64) {
        if let Some(armed) = self.re_pursuit_at
            && now > armed + self.re_pursuit_delay as f64
        {
            self.re_pursuit_at = None;
            self.state = AiState::GoToTarget;
            self.pursuit_secs = 0.0;
        }
    }

    #[inline]
    fn witness_active(&self, now: f64) -> bool {
        self.witness_start + self.witness_duration as f64 > now
    }

    // ── Pathfinding ───────────────────────────────────────────────────────

    fn pathfind(&mut self, rng: &mut AgentRng, ctx: &mut AiContext<'_>) -> Option<ExitOrder> {
        let mut order = None;

        let gate_open =
            ctx.now >= self.target_reached_time + self.delay_before_next_target as f64;
        if gate_open && self.reached_current_target(ctx) {
            self.target_reached_time = ctx.now;
            self.speed_ratio = rng.gen_range(ctx.config.minimum_speed_ratio..=1.0);
            self.delay_before_next_target =
                rng.gen_range(0.0..=ctx.config.max_delay_before_next_target);

            if self.previous_state == AiState::BeingTakenAway {
                ctx.registry.remove_taken(self.entity);
            }
            // The violence indicator clears on every reach event: this is
            // also where a returning abductor loses its indicator.
            ctx.cues.set_violence_sign(self.entity, false);

            self.previous_state = self.state;

            match self.state {
                AiState::BeingTakenAway => self.complete_taken_away(rng, ctx),
                AiState::RoamingPatrol => self.next_patrol_target(rng, ctx),
                AiState::GoToTarget => order = self.complete_capture(ctx),
                AiState::TakeAwayTarget => self.complete_take_away(rng, ctx),
                // A witnessing agent has no target; a gated reach only
                // resamples speed and delay.
                AiState::Witness => {}
            }
        }

        self.move_towards_target(ctx);
        order
    }

    /// Victim delivered to the exit: return to patrol after a longer-than-
    /// usual pause, conviction forced back to the neutral baseline.
    fn complete_taken_away(&mut self, rng: &mut AgentRng, ctx: &mut AiContext<'_>) {
        self.speed_ratio = rng.gen_range(ctx.config.minimum_speed_ratio..=1.0);
        self.state = AiState::RoamingPatrol;
        let [min, max] = ctx.config.taken_away_cooldown;
        self.delay_before_next_target = rng.gen_range(min..=max);
        ctx.entities.set_conviction(self.entity, 0.0, true);
    }

    fn next_patrol_target(&mut self, rng: &mut AgentRng, ctx: &mut AiContext<'_>) {
        let position = ctx.entities.position(self.entity);
        let conviction = ctx.entities.conviction(self.entity);
        self.current_target = ctx.patrol.next_target(position, conviction, rng);
    }

    /// Pursuit target caught: register the abduction, head for the nearest
    /// exit, and order the victim there too.
    fn complete_capture(&mut self, ctx: &mut AiContext<'_>) -> Option<ExitOrder> {
        let victim = self.target_entity?;

        self.state = AiState::TakeAwayTarget;
        ctx.registry.take_away(self.entity, victim);
        ctx.cues.set_violence_sign(self.entity, true);

        let position = ctx.entities.position(self.entity);
        self.current_target = ctx.exits.closest_exit(position);
        self.speed_ratio = ctx.config.take_away_speed_ratio;

        debug!(abductor = %self.entity, victim = %victim, "capture, escorting to exit");

        Some(ExitOrder {
            victim,
            exit:  self.current_target,
            delay: self.delay_before_next_target,
        })
    }

    /// Exit reached with the victim in tow: drop back to patrol and arm the
    /// re-pursuit cooldown.
    fn complete_take_away(&mut self, rng: &mut AgentRng, ctx: &mut AiContext<'_>) {
        ctx.entities
            .set_conviction(self.entity, ctx.config.conviction_after_take_away, true);
        self.state = AiState::RoamingPatrol;
        let position = ctx.entities.position(self.entity);
        self.current_target = ctx.patrol.next_target_after_take_away(position, rng);
        self.target_entity = None;
        self.re_pursuit_at = Some(ctx.now);
        let [min, max] = ctx.config.re_pursuit_cooldown;
        self.re_pursuit_delay = rng.gen_range(min..=max);
    }

    fn reached_current_target(&self, ctx: &AiContext<'_>) -> bool {
        match self.resolve_target(ctx) {
            // No target for this state — vacuously reached.
            None => true,
            Some(target) => {
                let position = ctx.entities.position(self.entity);
                position.distance(target) <= ctx.config.target_reached_distance
            }
        }
    }

    /// The movement target the current state resolves to, if any.
    fn resolve_target(&self, ctx: &AiContext<'_>) -> Option<Vec2> {
        match self.state {
            AiState::GoToTarget => self.target_entity.map(|e| ctx.entities.position(e)),
            AiState::RoamingPatrol | AiState::TakeAwayTarget | AiState::BeingTakenAway => {
                self.current_target
            }
            AiState::Witness => None,
        }
    }

    fn move_towards_target(&self, ctx: &mut AiContext<'_>) {
        let Some(target) = self.resolve_target(ctx) else {
            return;
        };
        let position = ctx.entities.position(self.entity);
        let direction = (target - position).normalized_or_zero();
        if direction == Vec2::ZERO {
            // Standing on the target; no usable direction.
            return;
        }
        ctx.entities
            .apply_move(self.entity, direction * self.speed_ratio, ctx.dt);
    }

    // ── Public entry points ───────────────────────────────────────────────

    /// Deliver an alert of `intensity` to this agent.
    ///
    /// Only a witnessing agent accepts; everyone else returns `false` and is
    /// left untouched.
    pub fn alert(
        &mut self,
        intensity: f32,
        entities: &mut EntityStore,
        cues: &mut dyn CueSink,
    ) -> bool {
        if self.state != AiState::Witness {
            return false;
        }

        cues.play_alert();
        debug!(entity = %self.entity, intensity, "witness alerted");
        entities.add_conviction(self.entity, intensity);
        true
    }

    /// Put this agent into the witness state for `duration` seconds.
    ///
    /// Rejected without effect while the owning entity is compromised — an
    /// oppressor cannot witness.
    pub fn set_witness(
        &mut self,
        duration: f32,
        now: f64,
        entities: &EntityStore,
        cues: &mut dyn CueSink,
    ) {
        if entities.is_compromised(self.entity) {
            return;
        }

        cues.set_witness_sign(self.entity, true);
        self.state = AiState::Witness;
        self.witness_start = now;
        self.witness_duration = duration;
    }

    /// Force this agent into the taken-away state, heading for `exit`.
    ///
    /// Invoked by the orchestrator on behalf of an abductor (the only
    /// cross-agent mutation in the system).
    pub fn set_exit_target(
        &mut self,
        exit: Option<Vec2>,
        delay: f32,
        now: f64,
        config: &AiConfig,
        cues: &mut dyn CueSink,
    ) {
        self.speed_ratio = config.take_away_speed_ratio;
        self.state = AiState::BeingTakenAway;
        self.current_target = exit;
        self.delay_before_next_target = delay;
        self.target_reached_time = now;

        cues.play_take_away();
    }
}
