//! The alert cone: growth, aiming, release, and intensity distribution.

use tracing::debug;

use crowd_core::{AlertConfig, EntityId, Vec2};
use crowd_world::{CueSink, EntityStore};

use crowd_ai::AgentAi;

use crate::geometry::in_cone;

// ── AlertOutcome ──────────────────────────────────────────────────────────────

/// Result of one cone release.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AlertOutcome {
    /// Agents inside the cone triangle (witnessing or not).
    pub qualifying: usize,
    /// Per-agent share of the conviction impact.
    pub intensity: f32,
    /// Sum of shares actually accepted, accrued back onto the caller.
    pub accepted_total: f32,
}

// ── AlertCone ─────────────────────────────────────────────────────────────────

/// Player-controlled area-of-effect alert.
///
/// Inactive (`size == 0`) between uses.  The host grows and aims it while
/// the control is held and releases it once; a cooldown then gates the next
/// activation, and a short-lived indicator is driven through the cue sink
/// by [`tick`][Self::tick].
pub struct AlertCone {
    config: AlertConfig,

    size:      f32,
    angle_deg: f32,

    apex:  Vec2,
    left:  Vec2,
    right: Vec2,

    /// Time of the last non-empty release; drives cooldown and indicator.
    alert_time: Option<f64>,
    sign_shown: bool,
}

impl AlertCone {
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            size:       0.0,
            angle_deg:  0.0,
            apex:       Vec2::ZERO,
            left:       Vec2::ZERO,
            right:      Vec2::ZERO,
            alert_time: None,
            sign_shown: false,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn is_active(&self) -> bool {
        self.size > 0.0 && self.angle_deg > 0.0
    }

    /// `true` while the post-release lockout is running.
    pub fn in_cooldown(&self, now: f64) -> bool {
        match self.alert_time {
            None => false,
            Some(t) => t + self.config.cooldown_secs as f64 > now,
        }
    }

    /// Edge endpoints for rendering, while active.
    pub fn edges(&self) -> Option<(Vec2, Vec2)> {
        self.is_active().then_some((self.left, self.right))
    }

    /// `true` while the post-release indicator should be visible.
    pub fn sign_visible(&self, now: f64) -> bool {
        match self.alert_time {
            None => false,
            Some(t) => t + self.config.sign_secs as f64 >= now,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Grow the cone while the control is held.
    ///
    /// Size and angle start at their configured minimum on the first growth
    /// tick and then increase linearly, clamped to their maximum.
    pub fn grow(&mut self, dt: f32) {
        if self.size == 0.0 {
            self.size = self.config.minimum_size;
            self.alert_time = None;
        } else if self.size < self.config.maximum_size {
            self.size =
                (self.size + self.config.growth_per_sec * dt).min(self.config.maximum_size);
        }

        if self.angle_deg == 0.0 {
            self.angle_deg = self.config.minimum_angle_deg;
        } else if self.angle_deg < self.config.maximum_angle_deg {
            self.angle_deg = (self.angle_deg + self.config.angle_growth_per_sec * dt)
                .min(self.config.maximum_angle_deg);
        }
    }

    /// Point the cone from `origin` toward `toward`, recomputing the edge
    /// endpoints from the current size and angle.
    pub fn aim(&mut self, origin: Vec2, toward: Vec2) {
        let direction = (toward - origin).normalized_or_zero();

        self.apex = origin;
        self.left = direction.rotated_deg(-self.angle_deg / 2.0) * self.size + origin;
        self.right = direction.rotated_deg(self.angle_deg / 2.0) * self.size + origin;
    }

    /// Release (or cancel) the cone.
    ///
    /// Unless cancelled, every agent inside the triangle receives an even
    /// share of `conviction_impact(caller conviction)`; the caller accrues
    /// whatever the witnesses accepted, the cooldown arms, and the alert cue
    /// fires.  Either way the cone deflates to inactive.
    pub fn release(
        &mut self,
        cancel: bool,
        caller: EntityId,
        now: f64,
        agents: &mut [AgentAi],
        entities: &mut EntityStore,
        cues: &mut dyn CueSink,
    ) -> AlertOutcome {
        let mut outcome = AlertOutcome::default();

        if !cancel {
            outcome = self.alert_in_cone(caller, agents, entities, cues);

            if self.size > 0.0 {
                self.alert_time = Some(now);
                cues.play_alert();
            }
        }

        self.size = 0.0;
        self.angle_deg = 0.0;
        self.left = Vec2::ZERO;
        self.right = Vec2::ZERO;

        outcome
    }

    /// Per-tick indicator upkeep: toggles the alert sign through the cue
    /// sink when its visibility changes.
    pub fn tick(&mut self, now: f64, cues: &mut dyn CueSink) {
        let visible = self.sign_visible(now);
        if visible != self.sign_shown {
            self.sign_shown = visible;
            cues.set_alert_sign(visible);
        }
    }

    // ── Distribution ──────────────────────────────────────────────────────

    fn alert_in_cone(
        &self,
        caller: EntityId,
        agents: &mut [AgentAi],
        entities: &mut EntityStore,
        cues: &mut dyn CueSink,
    ) -> AlertOutcome {
        let qualifying: Vec<usize> = agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| {
                in_cone(entities.position(agent.entity()), self.apex, self.left, self.right)
            })
            .map(|(i, _)| i)
            .collect();

        if qualifying.is_empty() {
            return AlertOutcome::default();
        }

        let conviction = entities.conviction(caller);
        let intensity =
            self.config.conviction_impact.evaluate(conviction) / qualifying.len() as f32;

        let mut accepted_total = 0.0;
        for i in qualifying.iter().copied() {
            if agents[i].alert(intensity, entities, cues) {
                accepted_total += intensity;
            }
        }

        if accepted_total > 0.0 {
            debug!(caller = %caller, accepted_total, "alert conviction accrued to caller");
            entities.add_conviction(caller, accepted_total);
        }

        AlertOutcome {
            qualifying: qualifying.len(),
            intensity,
            accepted_total,
        }
    }
}
