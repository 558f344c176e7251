//! Number-theoretic building blocks: entropy, primality and secret handling.

/// Primality testing and random prime generation.
pub mod prime;
/// Cryptographically secure random number generation.
pub mod rng;

use num_bigint::BigUint;

pub use prime::{is_safe_prime, MillerRabin, PrimalityTest};
pub use rng::SecureRng;

/// Overwrites the limbs of `value` with zeros in place, leaving it equal to zero.
///
/// `assign_from_slice` reuses the existing allocation, so the old limbs are
/// overwritten before the buffer is truncated.
pub(crate) fn wipe(value: &mut BigUint) {
    let digits = value.bits().div_ceil(32) as usize;
    value.assign_from_slice(&vec![0u32; digits]);
}
