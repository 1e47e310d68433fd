// src/integer_math/sequential_sieve.rs

use log::debug;

use crate::core::error::Result;
use crate::integer_math::bit_field::BitField;
use crate::integer_math::PrimeSource;

/// Single-threaded odd-only sieve of Eratosthenes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSieve;

impl SequentialSieve {
    pub fn new() -> Self {
        SequentialSieve
    }

    /// All primes strictly below `bound`, ascending.
    pub fn sieve(&self, bound: u64) -> Vec<u64> {
        if bound <= 2 {
            return Vec::new();
        }
        if bound == 3 {
            return vec![2];
        }

        let mut field = BitField::new(bound);
        let mut segment = field.segment(3, bound);
        segment.eratosthenes();

        let mut primes = vec![2];
        primes.extend(segment.collect_primes());
        debug!("Sequential sieve found {} primes below {}", primes.len(), bound);
        primes
    }
}

impl PrimeSource for SequentialSieve {
    fn primes_below(&self, bound: u64) -> Result<Vec<u64>> {
        Ok(self.sieve(bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_bounds() {
        let sieve = SequentialSieve::new();
        assert!(sieve.sieve(0).is_empty());
        assert!(sieve.sieve(1).is_empty());
        assert!(sieve.sieve(2).is_empty());
        assert_eq!(sieve.sieve(3), vec![2]);
        assert_eq!(sieve.sieve(4), vec![2, 3]);
    }

    #[test]
    fn test_bound_is_exclusive() {
        let sieve = SequentialSieve::new();
        assert_eq!(sieve.sieve(7), vec![2, 3, 5]);
        assert_eq!(sieve.sieve(8), vec![2, 3, 5, 7]);
    }

    #[test]
    fn test_known_prime_counts() {
        let sieve = SequentialSieve::new();
        assert_eq!(sieve.sieve(100).len(), 25);
        assert_eq!(sieve.sieve(1_000).len(), 168);
        assert_eq!(sieve.sieve(100_000).len(), 9_592);
        assert_eq!(sieve.sieve(1_000_000).len(), 78_498);
    }

    #[test]
    fn test_primes_below_trait() {
        let primes = SequentialSieve.primes_below(30).unwrap();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }
}
