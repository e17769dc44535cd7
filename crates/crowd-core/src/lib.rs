//! `crowd-core` — foundational types for the `rust_crowd` simulation.
//!
//! This crate is a dependency of every other `crowd-*` crate.  It
//! intentionally has no `crowd-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `EntityId`, `WaypointId`                              |
//! | [`vec2`]    | `Vec2` planar vector, distance, in-plane rotation     |
//! | [`time`]    | `Tick`, `SimClock` (fixed-step seconds)               |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`curve`]   | `ResponseCurve` — clamped piecewise-linear curve      |
//! | [`config`]  | `AiConfig`, `AlertConfig`, `SimConfig`                |
//! | [`error`]   | `CrowdError`, `CrowdResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod curve;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vec2;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AiConfig, AlertConfig, SimConfig};
pub use curve::ResponseCurve;
pub use error::{CrowdError, CrowdResult};
pub use ids::{EntityId, WaypointId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick};
pub use vec2::Vec2;
