// src/benchmark/results.rs

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Median timing of one measured operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub name: String,
    pub threads: usize,
    pub median_time_ns: u64,
    pub iterations: usize,
}

/// Sequential vs parallel comparison of one phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedupComparison {
    pub phase: String,
    pub sequential: BenchmarkResult,
    pub parallel: BenchmarkResult,
}

impl SpeedupComparison {
    pub fn speedup(&self) -> f64 {
        if self.parallel.median_time_ns == 0 {
            return f64::INFINITY;
        }
        self.sequential.median_time_ns as f64 / self.parallel.median_time_ns as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSuite {
    pub timestamp: DateTime<Utc>,
    pub bound: u64,
    pub batch_size: u64,
    pub cpu_threads: usize,
    pub comparisons: Vec<SpeedupComparison>,
}

impl BenchmarkSuite {
    pub fn new(bound: u64, batch_size: u64) -> Self {
        BenchmarkSuite {
            timestamp: Utc::now(),
            bound,
            batch_size,
            cpu_threads: num_cpus::get(),
            comparisons: Vec::new(),
        }
    }

    pub fn add_comparison(&mut self, comparison: SpeedupComparison) {
        self.comparisons.push(comparison);
    }

    pub fn save_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let suite = serde_json::from_str(&json)?;
        Ok(suite)
    }

    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(80));
        println!("SIEVE / FACTORISATION SUMMARY (N = {}, K = {})", self.bound, self.batch_size);
        println!("{}", "=".repeat(80));
        println!("{:<16} {:>18} {:>18} {:>12}", "Phase", "Sequential (ns)", "Parallel (ns)", "Speedup");
        println!("{}", "-".repeat(80));
        for c in &self.comparisons {
            println!(
                "{:<16} {:>18} {:>18} {:>11.2}x",
                c.phase,
                c.sequential.median_time_ns,
                c.parallel.median_time_ns,
                c.speedup()
            );
        }
        println!("{}", "=".repeat(80));
    }
}
