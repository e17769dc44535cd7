//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `CrowdError` via `From` impls, or keep them separate.  Behavioral
//! fallbacks inside the AI core are `Option`-shaped "expected absence" and
//! never surface as errors; `CrowdError` exists for construction-time
//! problems (bad configuration, malformed input data).

use thiserror::Error;

/// The top-level error type for `crowd-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CrowdError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `crowd-*` crates.
pub type CrowdResult<T> = Result<T, CrowdError>;
