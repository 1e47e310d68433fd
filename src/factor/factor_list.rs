// src/factor/factor_list.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prime factors, with multiplicity, of one input value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorList {
    value: u64,
    factors: Vec<u64>,
}

impl FactorList {
    pub fn new(value: u64) -> Self {
        FactorList {
            value,
            factors: Vec::new(),
        }
    }

    /// The integer that was factorised.
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn factors(&self) -> &[u64] {
        &self.factors
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn push(&mut self, factor: u64) {
        self.factors.push(factor);
    }

    pub fn extend<I: IntoIterator<Item = u64>>(&mut self, factors: I) {
        self.factors.extend(factors);
    }

    /// Puts the factors in ascending order.
    pub fn sort(&mut self) {
        self.factors.sort_unstable();
    }

    /// Product of all factors, or `None` on overflow.
    pub fn product(&self) -> Option<u64> {
        self.factors.iter().try_fold(1u64, |acc, &f| acc.checked_mul(f))
    }

    /// True when the factors multiply back to the original value exactly.
    pub fn is_consistent(&self) -> bool {
        self.product() == Some(self.value)
    }

    pub fn into_factors(self) -> Vec<u64> {
        self.factors
    }
}

impl fmt::Display for FactorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.value)?;
        for (i, factor) in self.factors.iter().enumerate() {
            if i > 0 {
                write!(f, "*")?;
            }
            write!(f, "{}", factor)?;
        }
        Ok(())
    }
}
