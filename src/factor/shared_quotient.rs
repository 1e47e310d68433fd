// src/factor/shared_quotient.rs

//! The not-yet-extracted part of one input, shared by every worker of a parallel
//! factorisation call.
//!
//! The value only ever shrinks, by exact division under the mutex. Readers may
//! therefore observe it without the lock: a stale observation can only be larger
//! than the true value, which at worst costs one extra locked divisibility test and
//! never hides a factor.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::core::error::{Result, SieveError};

pub struct SharedQuotient {
    value: AtomicU64,
    lock: Mutex<()>,
}

impl SharedQuotient {
    pub fn new(value: u64) -> Self {
        SharedQuotient {
            value: AtomicU64::new(value),
            lock: Mutex::new(()),
        }
    }

    /// Lock-free read, used as the optimistic pre-check.
    pub fn observe(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    /// Divides the value by `p` once if `p` divides it. Returns whether it did.
    pub fn divide_if_divisible(&self, p: u64) -> Result<bool> {
        debug_assert!(p >= 2, "dividing by {} would never shrink the quotient", p);
        let _guard = self.lock.lock().map_err(|_| SieveError::ComputationFailed {
            stage: "parallel factorisation",
            reason: "shared quotient lock poisoned".to_string(),
        })?;

        let current = self.value.load(Ordering::Acquire);
        if current % p != 0 {
            return Ok(false);
        }
        let next = current / p;
        debug_assert!(next < current);
        self.value.store(next, Ordering::Release);
        Ok(true)
    }

    pub fn into_inner(self) -> u64 {
        self.value.into_inner()
    }
}
