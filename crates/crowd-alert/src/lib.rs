//! `crowd-alert` — the player's alert cone.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`geometry`] | Barycentric point-in-triangle test                        |
//! | [`cone`]     | `AlertCone` — grow/aim/release lifecycle and distribution |
//!
//! # Lifecycle
//!
//! While the player holds the control, the host calls
//! [`AlertCone::grow`] each tick and [`AlertCone::aim`] with the pointed
//! direction; on release, [`AlertCone::release`] queries every agent
//! controller inside the cone triangle and splits the conviction impact
//! evenly among them.  Witnessing agents accept their share; the caller's
//! own conviction accrues the sum actually accepted.

pub mod cone;
pub mod geometry;


pub use cone::{AlertCone, AlertOutcome};
pub use geometry::in_cone;
