// src/integer_math/mod.rs

pub mod bit_field;
pub mod parallel_sieve;
pub mod prime_catalogue;
pub mod sequential_sieve;

use crate::core::error::Result;

pub use bit_field::{BitField, BitSegment};
pub use parallel_sieve::ParallelSieve;
pub use prime_catalogue::{PrimeCatalogue, PrimeRound};
pub use sequential_sieve::SequentialSieve;

/// Produces the ascending primes strictly below a bound.
pub trait PrimeSource {
    fn primes_below(&self, bound: u64) -> Result<Vec<u64>>;
}
