// src/benchmark/runner.rs

use std::time::Instant;

use log::info;

use crate::benchmark::results::{BenchmarkResult, BenchmarkSuite, SpeedupComparison};
use crate::core::error::Result;
use crate::factor::{Factoriser, ParallelFactoriser, SequentialFactoriser};
use crate::integer_math::{ParallelSieve, SequentialSieve};

/// Median of the samples; the mean of the two middle values for an even count.
pub fn median(samples: &mut [u64]) -> u64 {
    if samples.is_empty() {
        return 0;
    }
    samples.sort_unstable();
    let mid = samples.len() / 2;
    if samples.len() % 2 == 0 {
        (samples[mid - 1] + samples[mid]) / 2
    } else {
        samples[mid]
    }
}

/// Runs `op` `iterations` times and returns the median elapsed nanoseconds and the last output.
pub fn time_median<T, F>(iterations: usize, mut op: F) -> Result<(u64, T)>
where
    F: FnMut() -> Result<T>,
{
    let mut samples = Vec::with_capacity(iterations.max(1));
    let start = Instant::now();
    let mut last = op()?;
    samples.push(start.elapsed().as_nanos() as u64);
    for _ in 1..iterations {
        let start = Instant::now();
        last = op()?;
        samples.push(start.elapsed().as_nanos() as u64);
    }
    Ok((median(&mut samples), last))
}

/// Times the sequential and parallel implementations against each other.
pub struct BenchmarkRunner {
    bound: u64,
    batch_size: u64,
    iterations: usize,
    sieve_threads: isize,
    factor_threads: isize,
    suite: BenchmarkSuite,
}

impl BenchmarkRunner {
    pub fn new(bound: u64, batch_size: u64, iterations: usize, sieve_threads: isize, factor_threads: isize) -> Self {
        BenchmarkRunner {
            bound,
            batch_size,
            iterations,
            sieve_threads,
            factor_threads,
            suite: BenchmarkSuite::new(bound, batch_size),
        }
    }

    /// The integers `[N² - K, N²)` that are factorised.
    pub fn batch(&self) -> std::ops::Range<u64> {
        let square = self.bound * self.bound;
        square.saturating_sub(self.batch_size)..square
    }

    /// Times both sieves and returns the parallel sieve's primes.
    pub fn run_sieves(&mut self) -> Result<Vec<u64>> {
        let bound = self.bound;
        let (seq_ns, _) = time_median(self.iterations, || Ok(SequentialSieve::new().sieve(bound)))?;
        info!("Sequential sieve: {} ns", seq_ns);

        // A fresh sieve (and pool) per run, released before the next one.
        let threads = self.sieve_threads;
        let mut pool_threads = 0;
        let (par_ns, primes) = time_median(self.iterations, || {
            let mut sieve = ParallelSieve::new(threads)?;
            pool_threads = sieve.threads();
            let primes = sieve.sieve(bound);
            sieve.shutdown()?;
            primes
        })?;
        info!("Parallel sieve: {} ns", par_ns);

        self.suite.add_comparison(SpeedupComparison {
            phase: "sieve".to_string(),
            sequential: self.result("sequential sieve", 1, seq_ns),
            parallel: self.result("parallel sieve", pool_threads, par_ns),
        });
        Ok(primes)
    }

    /// Times sequential and parallel factorisation of the whole batch.
    pub fn run_factorisation(&mut self, primes: &[u64]) -> Result<()> {
        let batch = self.batch();

        let sequential = SequentialFactoriser::new(primes);
        let (seq_ns, _) = time_median(self.iterations, || {
            batch.clone().try_for_each(|n| sequential.factorise(n).map(|_| ()))
        })?;
        info!("Sequential factorisation: {} ns", seq_ns);

        let mut parallel = ParallelFactoriser::new(primes, self.factor_threads)?;
        let (par_ns, _) = time_median(self.iterations, || {
            batch.clone().try_for_each(|n| parallel.factorise(n).map(|_| ()))
        })?;
        let threads = parallel.threads();
        parallel.shutdown()?;
        info!("Parallel factorisation: {} ns", par_ns);

        self.suite.add_comparison(SpeedupComparison {
            phase: "factorise".to_string(),
            sequential: self.result("sequential factorisation", 1, seq_ns),
            parallel: self.result("parallel factorisation", threads, par_ns),
        });
        Ok(())
    }

    fn result(&self, name: &str, threads: usize, median_time_ns: u64) -> BenchmarkResult {
        BenchmarkResult {
            name: name.to_string(),
            threads,
            median_time_ns,
            iterations: self.iterations.max(1),
        }
    }

    pub fn suite(&self) -> &BenchmarkSuite {
        &self.suite
    }

    pub fn into_suite(self) -> BenchmarkSuite {
        self.suite
    }
}
