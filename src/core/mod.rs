// src/core/mod.rs

pub mod error;
pub mod threads;
pub mod worker_pool;

// Re-export main types for convenience
pub use error::{Result, SieveError};
pub use worker_pool::WorkerPool;
