//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter with a
//! fixed step.  The mapping to seconds is held in `SimClock`:
//!
//!   now_secs = tick * dt_secs
//!
//! The controller timer fields ("time recorded at" values compared against
//! `now`) are `f64` seconds; using the tick counter as the canonical unit
//! keeps runs reproducible — the host never feeds a wall clock in.
//!
//! The default step is 1/30 s.  Hosts that integrate with a frame loop set
//! `dt_secs` to their frame duration; the rest of the framework is agnostic.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64` to avoid overflow: at 30 ticks per second a u64 lasts far
/// longer than any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-step simulation clock.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick — advanced by `SimClock::advance()` each step.
    pub current_tick: Tick,
    /// How many seconds one tick represents.
    pub dt_secs: f32,
}

impl SimClock {
    /// Create a clock at tick 0 with the given step.
    pub fn new(dt_secs: f32) -> Self {
        Self {
            current_tick: Tick::ZERO,
            dt_secs,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    ///
    /// Accumulated in `f64` so long runs don't lose timer resolution.
    #[inline]
    pub fn now_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.dt_secs as f64
    }

    /// How many ticks span `secs` seconds? (rounds up — a timer armed for
    /// `secs` never expires early)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        (secs / self.dt_secs).ceil() as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.now_secs())
    }
}
