//! The behavior states of an agent controller.

use std::fmt;

/// Exactly one state is active per agent at any time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiState {
    /// Wandering between patrol waypoints.
    #[default]
    RoamingPatrol,
    /// Oppressor closing in on a pursuit target.
    GoToTarget,
    /// Oppressor escorting a captured entity to an exit.
    TakeAwayTarget,
    /// Captured entity being escorted to an exit.
    BeingTakenAway,
    /// Receptive to player alerts for a limited time.
    Witness,
}

impl fmt::Display for AiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AiState::RoamingPatrol => "roaming-patrol",
            AiState::GoToTarget => "go-to-target",
            AiState::TakeAwayTarget => "take-away-target",
            AiState::BeingTakenAway => "being-taken-away",
            AiState::Witness => "witness",
        };
        f.write_str(name)
    }
}
