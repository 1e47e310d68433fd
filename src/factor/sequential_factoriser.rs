// src/factor/sequential_factoriser.rs

use std::sync::Arc;

use log::{trace, warn};

use crate::core::error::{Result, SieveError};
use crate::factor::factor_list::FactorList;
use crate::factor::Factoriser;

/// Trial division by an ascending prime list on the calling thread.
#[derive(Debug, Clone)]
pub struct SequentialFactoriser {
    primes: Arc<[u64]>,
}

impl SequentialFactoriser {
    pub fn new(primes: impl Into<Arc<[u64]>>) -> Self {
        SequentialFactoriser {
            primes: primes.into(),
        }
    }

    pub fn primes(&self) -> &[u64] {
        &self.primes
    }
}

impl Factoriser for SequentialFactoriser {
    fn factorise(&self, n: u64) -> Result<FactorList> {
        trial_division(n, &self.primes)
    }
}

/// Factorises `n` by dividing out each prime of `primes` (ascending) while `p² <= remaining`.
///
/// A remainder above 1 is appended as a final prime factor. That is only guaranteed
/// to be prime when `primes` covers every prime up to `sqrt(n)`.
pub fn trial_division(n: u64, primes: &[u64]) -> Result<FactorList> {
    if n == 0 {
        return Err(SieveError::InvalidInput {
            value: n,
            reason: "zero has no prime factorisation".to_string(),
        });
    }

    let mut list = FactorList::new(n);
    let mut remaining = n;
    let mut covered = false;
    for &p in primes {
        if p.saturating_mul(p) > remaining {
            covered = true;
            break;
        }
        while remaining % p == 0 {
            list.push(p);
            remaining /= p;
        }
        if remaining == 1 {
            covered = true;
            break;
        }
    }

    if remaining > 1 {
        if !covered {
            warn!(
                "Prime list ends at {:?}, remainder {} of {} may be composite",
                primes.last(),
                remaining,
                n
            );
        }
        list.push(remaining);
    }
    trace!("{}", list);
    debug_assert!(list.is_consistent(), "factors of {} do not multiply back: {:?}", n, list);
    Ok(list)
}
