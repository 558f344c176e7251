//! Probabilistic primality testing and random prime generation.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;

/// Primes used for trial division before any Miller-Rabin round.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Default number of Miller-Rabin rounds (error probability at most 4^-40).
pub const DEFAULT_ROUNDS: usize = 40;

/// Source of primality decisions and random primes.
///
/// Parameter generation only talks to this trait, so callers can plug in a
/// different test (for example a deterministic one in tests) without touching
/// the safe-prime search.
pub trait PrimalityTest {
    /// Returns `true` if `n` is prime with overwhelming probability.
    fn is_prime<R: CryptoRngCore + ?Sized>(&self, n: &BigUint, rng: &mut R) -> bool;

    /// Draws a random prime of exactly `bits` bits.
    ///
    /// Returns `None` if no prime was found within `attempts` odd candidates or
    /// if `bits < 2`.
    fn random_prime<R: CryptoRngCore + ?Sized>(
        &self,
        bits: u64,
        attempts: usize,
        rng: &mut R,
    ) -> Option<BigUint> {
        if bits < 2 {
            return None;
        }

        for _ in 0..attempts {
            let mut candidate = rng.gen_biguint(bits);
            candidate.set_bit(bits - 1, true);
            candidate.set_bit(0, true);

            if self.is_prime(&candidate, rng) {
                return Some(candidate);
            }
        }

        None
    }
}

/// Miller-Rabin test with random bases, preceded by small-prime trial division.
#[derive(Clone, Copy, Debug)]
pub struct MillerRabin {
    rounds: usize,
}

impl MillerRabin {
    /// Creates a tester running `rounds` random-base rounds.
    pub fn new(rounds: usize) -> Self {
        Self { rounds }
    }

    /// Returns the configured number of rounds.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl Default for MillerRabin {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

impl PrimalityTest for MillerRabin {
    fn is_prime<R: CryptoRngCore + ?Sized>(&self, n: &BigUint, rng: &mut R) -> bool {
        if *n < BigUint::from(2u32) {
            return false;
        }

        for &p in SMALL_PRIMES.iter() {
            if *n == BigUint::from(p) {
                return true;
            }
            if (n % p).is_zero() {
                return false;
            }
        }

        // n is odd and larger than every trial divisor from here on.
        let n_minus_one = n - 1u32;
        let s = n_minus_one
            .trailing_zeros()
            .unwrap_or_else(|| unreachable!("n - 1 is non-zero for n > 97"));
        let d = &n_minus_one >> s;
        let two = BigUint::from(2u32);

        'witness: for _ in 0..self.rounds {
            let a = rng.gen_biguint_range(&two, &n_minus_one);
            let mut x = a.modpow(&d, n);

            if x.is_one() || x == n_minus_one {
                continue;
            }

            for _ in 1..s {
                x = x.modpow(&two, n);
                if x == n_minus_one {
                    continue 'witness;
                }
            }

            return false;
        }

        true
    }
}

/// Returns `true` if both `p` and `(p - 1) / 2` are prime.
pub fn is_safe_prime<T, R>(test: &T, p: &BigUint, rng: &mut R) -> bool
where
    T: PrimalityTest + ?Sized,
    R: CryptoRngCore + ?Sized,
{
    if !test.is_prime(p, rng) {
        return false;
    }
    let q = (p - 1u32) >> 1u32;
    test.is_prime(&q, rng)
}
