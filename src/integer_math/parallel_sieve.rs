// src/integer_math/parallel_sieve.rs
//
// Parallel segmented sieve of Eratosthenes.
//
// The sieve bootstraps itself: to find the primes below `to` it first finds the
// primes below floor(sqrt(to)) + 1 by calling itself recursively, then splits the
// remaining range [floor(sqrt(to)) + 1, to) into word-aligned sub-ranges that are
// crossed off concurrently with the (now immutable) small primes.
//
//   [3, 6)  [6, 27)  [27, 677)  [677, N)       for N just above 676²
//   base    round 1  round 2    round 3, split over the workers
//
// Every round is joined before the next one starts, and each worker writes to its
// own storage words only, so no locking is needed while sieving.

use log::{debug, info, trace};
use num::integer::Roots;

use crate::core::error::Result;
use crate::core::worker_pool::WorkerPool;
use crate::integer_math::bit_field::{BitField, SPAN_PER_WORD};
use crate::integer_math::prime_catalogue::PrimeCatalogue;
use crate::integer_math::PrimeSource;

/// Ranges ending at or below this bound are sieved sequentially without recursion.
pub const SEQUENTIAL_BASE_BOUND: u64 = 24;

pub struct ParallelSieve {
    pool: WorkerPool,
}

impl ParallelSieve {
    /// Creates a sieve with its own pool of `threads` workers (non-positive means hardware default).
    pub fn new(threads: isize) -> Result<Self> {
        Ok(ParallelSieve {
            pool: WorkerPool::new("sieve", threads)?,
        })
    }

    /// Sieves once with a temporary pool that is released before returning.
    pub fn run(bound: u64, threads: isize) -> Result<Vec<u64>> {
        let mut sieve = ParallelSieve::new(threads)?;
        let primes = sieve.sieve(bound);
        sieve.shutdown()?;
        primes
    }

    pub fn threads(&self) -> usize {
        self.pool.threads()
    }

    /// All primes strictly below `bound`, ascending.
    pub fn sieve(&self, bound: u64) -> Result<Vec<u64>> {
        self.pool.ensure_open()?;
        if bound <= 2 {
            return Ok(Vec::new());
        }
        if bound == 3 {
            return Ok(vec![2]);
        }

        let mut field = BitField::new(bound);
        let mut catalogue = PrimeCatalogue::new();
        catalogue.push_round(vec![2]);
        self.sieve_below(&mut field, bound, &mut catalogue)?;

        info!(
            "Parallel sieve found {} primes below {} in {} rounds using {} threads",
            catalogue.len(),
            bound,
            catalogue.rounds().len(),
            self.threads()
        );
        Ok(catalogue.into_vec())
    }

    /// Releases the worker pool. Any later call fails with `PoolReleased`.
    pub fn shutdown(&mut self) -> Result<()> {
        self.pool.release()
    }

    fn sieve_below(&self, field: &mut BitField, to: u64, catalogue: &mut PrimeCatalogue) -> Result<()> {
        if to <= SEQUENTIAL_BASE_BOUND {
            let mut segment = field.segment(3, to);
            segment.eratosthenes();
            let round = segment.collect_primes();
            trace!("Base round [3, {}) -> {:?}", to, round);
            catalogue.push_round(round);
            return Ok(());
        }

        let from = to.sqrt() + 1;
        self.sieve_below(field, from, catalogue)?;

        // Complete and read-only from here on.
        let small_primes: Vec<u64> = catalogue
            .iter()
            .filter(|&p| p > 2)
            .take_while(|&p| p * p < to)
            .collect();

        let cuts = partition(from, to, self.threads());
        debug!(
            "Sieving [{}, {}) in {} partitions with {} base primes",
            from,
            to,
            cuts.len() - 1,
            small_primes.len()
        );

        let small_primes = &small_primes;
        let tasks: Vec<_> = field
            .split(&cuts)
            .into_iter()
            .map(|mut segment| {
                move || {
                    for &p in small_primes {
                        segment.cross_off(p);
                    }
                    segment.collect_primes()
                }
            })
            .collect();

        for round in self.pool.run_all("parallel sieve", tasks)? {
            catalogue.push_round(round);
        }
        Ok(())
    }
}

impl PrimeSource for ParallelSieve {
    fn primes_below(&self, bound: u64) -> Result<Vec<u64>> {
        self.sieve(bound)
    }
}

/// Cut points splitting `[from, to)` into at most `workers` contiguous sub-ranges.
///
/// Interior cut points are multiples of `SPAN_PER_WORD`. When the range holds fewer
/// whole storage words than workers, the range is returned as one piece.
pub fn partition(from: u64, to: u64, workers: usize) -> Vec<u64> {
    debug_assert!(from < to && workers > 0);
    let first_aligned = from.next_multiple_of(SPAN_PER_WORD);
    let last_aligned = ((to - 1) / SPAN_PER_WORD) * SPAN_PER_WORD;
    let words_per_worker = last_aligned.saturating_sub(first_aligned) / SPAN_PER_WORD / workers as u64;
    if words_per_worker == 0 {
        return vec![from, to];
    }

    let chunk = words_per_worker * SPAN_PER_WORD;
    let mut cuts = Vec::with_capacity(workers + 1);
    cuts.push(from);
    for i in 1..workers as u64 {
        cuts.push(first_aligned + chunk * i);
    }
    cuts.push(to);
    cuts
}
