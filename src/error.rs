use thiserror::Error;

/// Errors raised by the relativity math and the simulation layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RelativityError {
    #[error("invalid velocity {speed}: speed must be below c = 1")]
    InvalidVelocity { speed: f64 },

    #[error("malformed vector: expected 3 components (t, x, y), got {len}")]
    MalformedVector { len: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, RelativityError>;
