use thiserror::Error;

use crowd_core::{CrowdError, EntityId};

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CrowdError),

    #[error("player entity {0} out of range for {1} entities")]
    PlayerOutOfRange(EntityId, usize),
}

pub type SimResult<T> = Result<T, SimError>;
