// tests/factorisation_tests.rs
//
// Parallel trial division against the sequential reference near 10^12.

use std::sync::OnceLock;
use std::thread;

use proptest::prelude::*;
use sievefactor::{Factoriser, FactorList, ParallelFactoriser, ParallelSieve, SequentialFactoriser};

const TOP: u64 = 1_000_000_000_000;

/// Every prime a little past 10^6, enough to factorise anything below 10^12.
fn primes() -> &'static [u64] {
    static PRIMES: OnceLock<Vec<u64>> = OnceLock::new();
    PRIMES.get_or_init(|| ParallelSieve::run(1_000_100, 0).unwrap())
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let primes = primes();
    if n <= *primes.last().unwrap() {
        return primes.binary_search(&n).is_ok();
    }
    primes.iter().take_while(|&&p| p * p <= n).all(|&p| n % p != 0)
}

fn assert_valid(list: &FactorList) {
    assert_eq!(list.product(), Some(list.value()), "product mismatch for {}", list.value());
    assert!(list.factors().iter().all(|&f| is_prime(f)), "non-prime factor in {}", list);
}

#[cfg(test)]
mod factorisation {
    use super::*;

    #[test]
    fn test_stress_range_below_ten_to_twelve() {
        let sequential = SequentialFactoriser::new(primes());
        let parallel: Vec<ParallelFactoriser> = [1, 2, 4, 8]
            .into_iter()
            .map(|t| ParallelFactoriser::new(primes(), t).unwrap())
            .collect();

        for n in TOP - 1000..TOP {
            let expected = sequential.factorise(n).unwrap();
            assert_valid(&expected);
            for factoriser in &parallel {
                let got = factoriser.factorise(n).unwrap();
                assert_eq!(got, expected, "n = {} with {} workers", n, factoriser.threads());
            }
        }
    }

    #[test]
    fn test_known_factorisations() {
        let parallel = ParallelFactoriser::new(primes(), 4).unwrap();
        let powers_of_ten: Vec<u64> = [vec![2; 12], vec![5; 12]].concat();
        assert_eq!(parallel.factorise(TOP).unwrap().factors(), &powers_of_ten[..]);
        assert_eq!(parallel.factorise(999_999_999_989).unwrap().factors(), &[999_999_999_989]);
        assert_eq!(parallel.factorise(999_983 * 999_979).unwrap().factors(), &[999_979, 999_983]);
        assert_eq!(parallel.factorise(2).unwrap().factors(), &[2]);
    }

    #[test]
    fn test_concurrent_calls_are_isolated() {
        let shared = ParallelFactoriser::new(primes(), 4).unwrap();
        let sequential = SequentialFactoriser::new(primes());

        thread::scope(|scope| {
            let handles: Vec<_> = (0..4u64)
                .map(|k| {
                    let shared = &shared;
                    scope.spawn(move || {
                        let start = TOP - 10_000 * (k + 1);
                        (start..start + 200)
                            .map(|n| shared.factorise(n).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            for (k, handle) in handles.into_iter().enumerate() {
                let start = TOP - 10_000 * (k as u64 + 1);
                for (i, list) in handle.join().unwrap().into_iter().enumerate() {
                    assert_eq!(list, sequential.factorise(start + i as u64).unwrap());
                }
            }
        });
    }

    #[test]
    fn test_separate_factorisers_in_parallel() {
        thread::scope(|scope| {
            let a = scope.spawn(|| {
                let f = ParallelFactoriser::new(primes(), 3).unwrap();
                f.factorise_all(TOP - 500..TOP - 400).unwrap()
            });
            let b = scope.spawn(|| {
                let f = ParallelFactoriser::new(primes(), 5).unwrap();
                f.factorise_all(TOP - 300..TOP - 200).unwrap()
            });
            for list in a.join().unwrap().iter().chain(b.join().unwrap().iter()) {
                assert_valid(list);
            }
        });
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_product_matches_input(n in 1u64..TOP, threads in 1isize..=8) {
            let parallel = ParallelFactoriser::new(primes(), threads).unwrap();
            let list = parallel.factorise(n).unwrap();
            prop_assert_eq!(list.product(), Some(n));
            prop_assert!(list.factors().windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(list, SequentialFactoriser::new(primes()).factorise(n).unwrap());
        }
    }
}
