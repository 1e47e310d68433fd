// src/factor/parallel_factoriser.rs
//
// Parallel trial division of one value at a time.
//
// Worker k examines the primes at indices k, k + W, k + 2W, ... (W workers). All
// workers divide the same SharedQuotient. A worker stops its stride once p² exceeds
// the quotient it observes; since the quotient only shrinks, a stale observation can
// only keep a worker going longer, never stop it before a factor.

use std::sync::Arc;

use log::{debug, trace};

use crate::core::error::{Result, SieveError};
use crate::core::worker_pool::WorkerPool;
use crate::factor::factor_list::FactorList;
use crate::factor::shared_quotient::SharedQuotient;
use crate::factor::Factoriser;

pub struct ParallelFactoriser {
    primes: Arc<[u64]>,
    pool: WorkerPool,
}

impl ParallelFactoriser {
    /// Creates a factoriser with its own pool of `threads` workers (non-positive means hardware default).
    pub fn new(primes: impl Into<Arc<[u64]>>, threads: isize) -> Result<Self> {
        let primes = primes.into();
        let pool = WorkerPool::new("factor", threads)?;
        debug!(
            "Parallel factoriser over {} primes with {} workers",
            primes.len(),
            pool.threads()
        );
        Ok(ParallelFactoriser { primes, pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.threads()
    }

    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    /// Factorises every value in order, reusing the pool.
    pub fn factorise_all<I>(&self, values: I) -> Result<Vec<FactorList>>
    where
        I: IntoIterator<Item = u64>,
    {
        values.into_iter().map(|n| self.factorise(n)).collect()
    }

    /// Releases the worker pool. Any later call fails with `PoolReleased`.
    pub fn shutdown(&mut self) -> Result<()> {
        self.pool.release()
    }
}

impl Factoriser for ParallelFactoriser {
    fn factorise(&self, n: u64) -> Result<FactorList> {
        self.pool.ensure_open()?;
        if n == 0 {
            return Err(SieveError::InvalidInput {
                value: n,
                reason: "zero has no prime factorisation".to_string(),
            });
        }

        let quotient = SharedQuotient::new(n);
        let workers = self.pool.threads();
        let shared = &quotient;
        let primes: &[u64] = &self.primes;
        let tasks: Vec<_> = (0..workers)
            .map(|worker| move || scan_stride(primes, worker, workers, shared))
            .collect();

        let mut list = FactorList::new(n);
        for partial in self.pool.run_all("parallel factorisation", tasks)? {
            list.extend(partial?);
        }
        let remainder = quotient.into_inner();
        if remainder > 1 {
            list.push(remainder);
        }
        list.sort();

        trace!("{}", list);
        debug_assert!(list.is_consistent(), "factors of {} do not multiply back: {:?}", n, list);
        Ok(list)
    }
}

/// One worker's share: primes `worker, worker + stride, ...` divided out of `quotient`.
fn scan_stride(primes: &[u64], worker: usize, stride: usize, quotient: &SharedQuotient) -> Result<Vec<u64>> {
    let mut local = Vec::new();
    for &p in primes.iter().skip(worker).step_by(stride) {
        if p.saturating_mul(p) > quotient.observe() {
            break;
        }
        while quotient.divide_if_divisible(p)? {
            local.push(p);
        }
    }
    Ok(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::sequential_factoriser::SequentialFactoriser;
    use crate::integer_math::SequentialSieve;

    #[test]
    fn test_matches_sequential() {
        let primes = SequentialSieve::new().sieve(10_000);
        let sequential = SequentialFactoriser::new(primes.clone());
        let parallel = ParallelFactoriser::new(primes, 4).unwrap();
        for n in (99_999_000u64..100_000_000).step_by(7) {
            assert_eq!(
                parallel.factorise(n).unwrap(),
                sequential.factorise(n).unwrap(),
                "n = {}",
                n
            );
        }
    }

    #[test]
    fn test_more_workers_than_primes() {
        let parallel = ParallelFactoriser::new(vec![2, 3, 5, 7], 16).unwrap();
        assert_eq!(parallel.factorise(2 * 3 * 3 * 7 * 11).unwrap().factors(), &[2, 3, 3, 7, 11]);
    }

    #[test]
    fn test_one_and_zero() {
        let parallel = ParallelFactoriser::new(vec![2, 3, 5], 2).unwrap();
        assert!(parallel.factorise(1).unwrap().is_empty());
        assert!(matches!(parallel.factorise(0), Err(SieveError::InvalidInput { .. })));
    }

    #[test]
    fn test_factorise_all_keeps_order() {
        let parallel = ParallelFactoriser::new(vec![2, 3, 5, 7], 3).unwrap();
        let lists = parallel.factorise_all([12, 35, 49]).unwrap();
        let values: Vec<u64> = lists.iter().map(|l| l.value()).collect();
        assert_eq!(values, vec![12, 35, 49]);
        assert_eq!(lists[2].factors(), &[7, 7]);
    }

    #[test]
    fn test_shutdown_then_factorise_fails() {
        let mut parallel = ParallelFactoriser::new(vec![2, 3], 2).unwrap();
        parallel.shutdown().unwrap();
        let err = parallel.factorise(6).unwrap_err();
        assert!(matches!(err, SieveError::PoolReleased { pool: "factor" }));
    }
}
