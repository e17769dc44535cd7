//! `crowd-world` — the environment the agent controllers act against.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`store`]     | `EntityStore` — SoA positions/convictions + move primitive     |
//! | [`registry`]  | `OppressionRegistry` — taken-away set, target/controller lookup |
//! | [`waypoints`] | `PatrolProvider`/`ExitProvider` traits, default implementations |
//! | [`loader`]    | CSV waypoint loader (`kind,x,y` rows)                          |
//! | [`cues`]      | `CueSink` — injected audio/visual cue interface                |
//! | [`error`]     | `WorldError`, `WorldResult<T>`                                 |
//!
//! # Mutation model
//!
//! Everything here is mutated in place from the sequential tick loop; there
//! is no locking and no interior mutability.  Correctness relies on the
//! single-threaded tick contract, not on synchronization.

pub mod cues;
pub mod error;
pub mod loader;
pub mod registry;
pub mod store;
pub mod waypoints;


pub use cues::{CueSink, NoopCues};
pub use error::{WorldError, WorldResult};
pub use loader::{WaypointSet, load_waypoints_csv, load_waypoints_reader};
pub use registry::OppressionRegistry;
pub use store::{COMPROMISED_CONVICTION, EntityStore};
pub use waypoints::{ExitPoints, ExitProvider, PatrolPoints, PatrolProvider};
