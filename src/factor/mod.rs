// src/factor/mod.rs

pub mod factor_list;
pub mod parallel_factoriser;
pub mod sequential_factoriser;
pub mod shared_quotient;

use crate::core::error::Result;

pub use factor_list::FactorList;
pub use parallel_factoriser::ParallelFactoriser;
pub use sequential_factoriser::{trial_division, SequentialFactoriser};
pub use shared_quotient::SharedQuotient;

/// Factorises values into primes using a fixed ascending prime list.
pub trait Factoriser {
    fn factorise(&self, n: u64) -> Result<FactorList>;
}
