// src/lib.rs

pub mod benchmark;
pub mod config;
pub mod core;
pub mod factor;
pub mod integer_math;
pub mod output;

pub use crate::core::{Result, SieveError, WorkerPool};
pub use crate::factor::{FactorList, Factoriser, ParallelFactoriser, SequentialFactoriser};
pub use crate::integer_math::{ParallelSieve, PrimeSource, SequentialSieve};
