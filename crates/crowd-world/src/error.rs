use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("waypoint parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WorldResult<T> = Result<T, WorldError>;
