// src/config/mod.rs

pub mod sieve_config;

// Re-export main types for convenience
pub use sieve_config::SieveFactorConfig;
