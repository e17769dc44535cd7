//! `crowd-sim` — tick orchestrator for the rust_crowd simulation.
//!
//! # Tick shape
//!
//! ```text
//! for each tick:
//!   ① Controllers — every agent's state machine advances once, in
//!                   ascending slot order, on one thread.
//!   ② Orders      — an abductor's ExitOrder is applied to its victim's
//!                   controller immediately, before the next agent ticks
//!                   (no agent observes a half-applied abduction).
//!   ③ Cone upkeep — the alert indicator toggles through the cue sink.
//!   ④ Clock       — the fixed-step clock advances.
//! ```
//!
//! The host drives everything else between ticks: growing/aiming/releasing
//! the cone, marking witnesses, compromising entities, declaring the
//! outcome.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use crowd_core::{AiConfig, AlertConfig, SimConfig};
//! use crowd_sim::{NoopObserver, SimBuilder};
//! use crowd_world::{EntityStore, ExitPoints, NoopCues, PatrolPoints};
//!
//! let entities = EntityStore::new(positions, 2.0);
//! let mut sim = SimBuilder::new(
//!         SimConfig::default(), AiConfig::default(), AlertConfig::default(),
//!         entities, PatrolPoints::new(patrol), ExitPoints::new(exits), NoopCues,
//!     )
//!     .player(player_id)
//!     .build()?;
//! sim.run_ticks(600, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
