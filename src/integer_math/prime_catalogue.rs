// src/integer_math/prime_catalogue.rs

/// Ascending primes discovered by one sieve partition or recursion phase.
pub type PrimeRound = Vec<u64>;

/// Primes collected round by round, in production order.
///
/// Rounds are appended in ascending partition order, so flattening them yields a
/// single ascending sequence without gaps or duplicates.
#[derive(Debug, Clone, Default)]
pub struct PrimeCatalogue {
    rounds: Vec<PrimeRound>,
    count: usize,
}

impl PrimeCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a round; every value must exceed every value already catalogued.
    pub fn push_round(&mut self, round: PrimeRound) {
        debug_assert!(round.windows(2).all(|w| w[0] < w[1]), "round is not strictly ascending");
        debug_assert!(
            match (self.largest(), round.first()) {
                (Some(last), Some(&first)) => last < first,
                _ => true,
            },
            "round overlaps earlier rounds"
        );
        self.count += round.len();
        self.rounds.push(round);
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn rounds(&self) -> &[PrimeRound] {
        &self.rounds
    }

    pub fn largest(&self) -> Option<u64> {
        self.rounds.iter().rev().find_map(|round| round.last().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.rounds.iter().flat_map(|round| round.iter().copied())
    }

    /// Flattens the rounds into one ascending array.
    pub fn into_vec(self) -> Vec<u64> {
        let mut primes = Vec::with_capacity(self.count);
        for round in self.rounds {
            primes.extend(round);
        }
        primes
    }
}
