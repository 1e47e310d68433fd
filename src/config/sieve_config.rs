// src/config/sieve_config.rs

use serde::{Deserialize, Serialize};
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use std::path::Path;

/// Runtime configuration of the sieve/factorisation driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SieveFactorConfig {
    /// Sieve bound N; the factorised batch lies just below N²
    pub bound: u64,

    /// Threads for the parallel sieve (0 or negative: one per hardware thread)
    pub sieve_threads: isize,

    /// Threads for the parallel factoriser (0 or negative: one per hardware thread)
    pub factor_threads: isize,

    /// How many integers below N² to factorise
    pub batch_size: u64,

    /// Timed repetitions per measurement (the median is reported)
    pub iterations: usize,

    /// Persist the factor lists after timing
    pub write_results: bool,

    /// Output directory for factor files and benchmark JSON
    pub output_dir: String,

    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for SieveFactorConfig {
    fn default() -> Self {
        SieveFactorConfig {
            bound: 2_000_000,
            sieve_threads: 0, // Use hardware parallelism
            factor_threads: 0,
            batch_size: 100,
            iterations: 7,
            write_results: false,
            output_dir: ".".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl SieveFactorConfig {
    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let d = SieveFactorConfig::default();
        Config::builder()
            .set_default("bound", d.bound)?
            .set_default("sieve_threads", d.sieve_threads as i64)?
            .set_default("factor_threads", d.factor_threads as i64)?
            .set_default("batch_size", d.batch_size)?
            .set_default("iterations", d.iterations as u64)?
            .set_default("write_results", d.write_results)?
            .set_default("output_dir", d.output_dir)?
            .set_default("log_level", d.log_level)
    }

    fn environment() -> Environment {
        // Override with environment variables (prefix: SIEVEFACTOR_), e.g. SIEVEFACTOR_SIEVE_THREADS
        Environment::with_prefix("SIEVEFACTOR")
            .prefix_separator("_")
            .try_parsing(true)
    }

    /// Load configuration with precedence: config file → env vars → defaults
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        // Try to load from config files (TOML preferred, YAML fallback)
        if Path::new("sievefactor.toml").exists() {
            builder = builder.add_source(File::with_name("sievefactor.toml"));
        } else if Path::new("sievefactor.yaml").exists() {
            builder = builder.add_source(File::with_name("sievefactor.yaml"));
        }

        builder = builder.add_source(Self::environment());
        builder.build()?.try_deserialize()
    }

    /// Load configuration with custom file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(Self::environment());
        builder.build()?.try_deserialize()
    }
}
