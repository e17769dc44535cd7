//! `crowd-ai` — the per-agent finite-state controller.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`state`]      | `AiState` — the five behavior states                          |
//! | [`context`]    | `AiContext<'a>` — collaborators bundled for one tick          |
//! | [`controller`] | `AgentAi` — the state machine, pathfinding, entry points      |
//!
//! # Tick model
//!
//! Controllers are host-driven: the orchestrator calls
//! [`AgentAi::tick`] once per agent per simulation step, in ascending id
//! order, on a single thread.  A tick may return an [`ExitOrder`] — the one
//! cross-agent effect in the system (an abductor forcing its victim into the
//! taken-away state).  The orchestrator resolves the victim's controller by
//! id through the registry and applies the order before the next agent
//! ticks, so no agent ever observes a half-applied abduction.

pub mod context;
pub mod controller;
pub mod state;

#[cfg(test)]
mod tests;

pub use context::AiContext;
pub use controller::{AgentAi, ExitOrder};
pub use state::AiState;
