// src/benchmark/mod.rs

pub mod results;
pub mod runner;

pub use results::{BenchmarkResult, BenchmarkSuite, SpeedupComparison};
pub use runner::{median, time_median, BenchmarkRunner};
