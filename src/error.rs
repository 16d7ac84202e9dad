//! Error types for the loading surfaces (tuning, settings, catalog feeds)
//!
//! The simulation itself never fails: degenerate numbers are normalised
//! with [`crate::sanitize`] instead of being reported.

/// Errors raised while loading configuration or catalog data
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Document could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error from the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value would break the simulation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<String> for EngineError {
    /// Converts a String into `EngineError::InvalidConfig`.
    fn from(msg: String) -> Self {
        EngineError::InvalidConfig(msg)
    }
}

/// Result alias for the loading surfaces
pub type Result<T> = std::result::Result<T, EngineError>;
