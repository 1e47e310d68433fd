// src/core/error.rs

//! Error types shared by the sieves, factorisers and the driver.

use thiserror::Error;

/// Result type alias for sievefactor operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Error type for sievefactor operations
#[derive(Error, Debug)]
pub enum SieveError {
    /// A worker task did not complete; the result of the whole call is untrustworthy.
    #[error("Computation failed during {stage}: {reason}")]
    ComputationFailed {
        /// Which phase was running (e.g. "parallel sieve")
        stage: &'static str,
        /// Panic message or lock failure description
        reason: String,
    },

    /// A worker pool was used (or released again) after it had been released.
    #[error("Worker pool '{pool}' has already been released")]
    PoolReleased {
        /// Label of the pool
        pool: &'static str,
    },

    /// The underlying thread pool could not be created
    #[error("Unable to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),

    /// Input outside the domain of an operation
    #[error("Invalid input {value}: {reason}")]
    InvalidInput {
        /// The rejected value
        value: u64,
        /// Why it was rejected
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SieveError {
    /// Builds a `ComputationFailed` from a panic payload caught at a join point.
    pub fn from_panic(stage: &'static str, payload: Box<dyn std::any::Any + Send>) -> Self {
        let reason = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "worker task panicked".to_string()
        };
        SieveError::ComputationFailed { stage, reason }
    }

    /// True for errors caused by misuse of a released resource.
    pub fn is_programmer_error(&self) -> bool {
        matches!(self, SieveError::PoolReleased { .. })
    }
}
