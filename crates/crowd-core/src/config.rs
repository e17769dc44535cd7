//! Simulation configuration.
//!
//! All tuning numbers live here, read-only for the lifetime of a run.
//! Typically constructed in code or loaded from a TOML/JSON file by the
//! application crate (enable the `serde` feature) and passed to the
//! simulation builder, which calls `validate()` before accepting them.

use crate::curve::ResponseCurve;
use crate::error::{CrowdError, CrowdResult};

// ── AiConfig ──────────────────────────────────────────────────────────────────

/// Tuning for the per-agent controllers.
///
/// All durations are in seconds, distances in world units, and speeds are
/// ratios in `(0, 1]` applied to the entity store's base move speed.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiConfig {
    /// Give up an oppression pursuit after this long without a capture.
    pub max_pursuit_secs: f32,

    /// Lower bound when resampling the speed ratio on a target-reached event.
    /// The upper bound is always 1.
    pub minimum_speed_ratio: f32,

    /// Upper bound when resampling the pause before the next target.
    pub max_delay_before_next_target: f32,

    /// An agent has reached its target when within this distance of it.
    pub target_reached_distance: f32,

    /// Fixed speed ratio while abducting or being abducted.
    pub take_away_speed_ratio: f32,

    /// Conviction forced onto an abductor once it drops its victim at an exit.
    pub conviction_after_take_away: f32,

    /// `[min, max]` pause a returned victim waits at the exit before
    /// resuming patrol.
    pub taken_away_cooldown: [f32; 2],

    /// `[min, max]` cooldown before a successful abductor starts hunting
    /// again.
    pub re_pursuit_cooldown: [f32; 2],
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            max_pursuit_secs:             12.0,
            minimum_speed_ratio:          0.4,
            max_delay_before_next_target: 2.0,
            target_reached_distance:      0.25,
            take_away_speed_ratio:        0.75,
            conviction_after_take_away:   0.0,
            taken_away_cooldown:          [2.0, 5.0],
            re_pursuit_cooldown:          [4.0, 10.0],
        }
    }
}

impl AiConfig {
    /// Check every numeric bound; `Err(CrowdError::Config)` names the first
    /// violated one.
    pub fn validate(&self) -> CrowdResult<()> {
        if !(self.minimum_speed_ratio > 0.0 && self.minimum_speed_ratio <= 1.0) {
            return Err(CrowdError::Config(format!(
                "minimum_speed_ratio must be in (0, 1], got {}",
                self.minimum_speed_ratio
            )));
        }
        if !(self.take_away_speed_ratio > 0.0 && self.take_away_speed_ratio <= 1.0) {
            return Err(CrowdError::Config(format!(
                "take_away_speed_ratio must be in (0, 1], got {}",
                self.take_away_speed_ratio
            )));
        }
        if self.max_pursuit_secs <= 0.0 {
            return Err(CrowdError::Config(format!(
                "max_pursuit_secs must be positive, got {}",
                self.max_pursuit_secs
            )));
        }
        if self.max_delay_before_next_target < 0.0 {
            return Err(CrowdError::Config(format!(
                "max_delay_before_next_target must be non-negative, got {}",
                self.max_delay_before_next_target
            )));
        }
        if self.target_reached_distance <= 0.0 {
            return Err(CrowdError::Config(format!(
                "target_reached_distance must be positive, got {}",
                self.target_reached_distance
            )));
        }
        validate_range("taken_away_cooldown", self.taken_away_cooldown)?;
        validate_range("re_pursuit_cooldown", self.re_pursuit_cooldown)?;
        Ok(())
    }
}

// ── AlertConfig ───────────────────────────────────────────────────────────────

/// Tuning for the player alert cone.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlertConfig {
    /// Cone length on the first growth tick.
    pub minimum_size: f32,
    /// Cone length ceiling.
    pub maximum_size: f32,
    /// Length growth in units per second while held.
    pub growth_per_sec: f32,

    /// Opening angle on the first growth tick, degrees.
    pub minimum_angle_deg: f32,
    /// Opening angle ceiling, degrees.
    pub maximum_angle_deg: f32,
    /// Angle growth in degrees per second while held.
    pub angle_growth_per_sec: f32,

    /// Re-trigger lockout after a release.
    pub cooldown_secs: f32,
    /// How long the alert indicator stays visible after a release.
    pub sign_secs: f32,

    /// Total conviction an alert distributes, keyed by the caller's own
    /// conviction.
    pub conviction_impact: ResponseCurve,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            minimum_size:         1.0,
            maximum_size:         5.0,
            growth_per_sec:       1.0,
            minimum_angle_deg:    45.0,
            maximum_angle_deg:    45.0,
            angle_growth_per_sec: 10.0,
            cooldown_secs:        1.0,
            sign_secs:            0.5,
            conviction_impact:    ResponseCurve::new(vec![(0.0, 0.2), (1.0, 1.0)]),
        }
    }
}

impl AlertConfig {
    pub fn validate(&self) -> CrowdResult<()> {
        if !(self.minimum_size > 0.0 && self.minimum_size <= self.maximum_size) {
            return Err(CrowdError::Config(format!(
                "cone size bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.minimum_size, self.maximum_size
            )));
        }
        if !(self.minimum_angle_deg > 0.0 && self.minimum_angle_deg <= self.maximum_angle_deg) {
            return Err(CrowdError::Config(format!(
                "cone angle bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.minimum_angle_deg, self.maximum_angle_deg
            )));
        }
        if self.growth_per_sec < 0.0 || self.angle_growth_per_sec < 0.0 {
            return Err(CrowdError::Config(
                "cone growth rates must be non-negative".into(),
            ));
        }
        if self.cooldown_secs < 0.0 || self.sign_secs < 0.0 {
            return Err(CrowdError::Config(
                "cooldown_secs and sign_secs must be non-negative".into(),
            ));
        }
        if self.conviction_impact.is_empty() {
            return Err(CrowdError::Config(
                "conviction_impact curve must have at least one key".into(),
            ));
        }
        Ok(())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Seconds per tick.
    pub dt_secs: f32,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_secs: 1.0 / 30.0,
            seed:    0,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> CrowdResult<()> {
        if self.dt_secs <= 0.0 {
            return Err(CrowdError::Config(format!(
                "dt_secs must be positive, got {}",
                self.dt_secs
            )));
        }
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn validate_range(name: &str, range: [f32; 2]) -> CrowdResult<()> {
    let [min, max] = range;
    if min < 0.0 || min > max {
        return Err(CrowdError::Config(format!(
            "{name} must satisfy 0 <= min <= max, got [{min}, {max}]"
        )));
    }
    Ok(())
}
