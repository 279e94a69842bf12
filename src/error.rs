//! Crate error type
//!
//! Collisions and obstacle retirement are ordinary control flow; only
//! configuration and storage problems surface as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Viewport dimensions that cannot hold a simulation (zero, negative, NaN)
    #[error("invalid viewport {width}x{height}: dimensions must be finite and positive")]
    InvalidViewport { width: f32, height: f32 },

    /// A tuning value outside its allowed range
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    /// Best-score backend unavailable or rejected the operation
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
