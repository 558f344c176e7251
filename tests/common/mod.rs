//! Common test utilities shared across integration tests.
#![allow(dead_code)]

use digest::consts::U8;
use digest::{FixedOutput, HashMarker, Output, OutputSizeUser, Update};
use elgamal_signature::DomainParameters;
use num_bigint::BigUint;

/// A 64-bit safe prime: both `p` and `(p - 1) / 2` are prime.
pub const SAFE_PRIME_64: u64 = 11_881_870_593_822_888_767;

/// A generator of the full group modulo [`SAFE_PRIME_64`].
pub const GENERATOR_64: u32 = 5;

/// Initialize test tracing (call once at the beginning of tests).
///
/// Subsequent calls are safe and will be ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("elgamal_signature=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Deterministic 64-bit FNV-1a digest used as a fixed test hash.
#[derive(Clone, Debug)]
pub struct Fnv64 {
    state: u64,
}

impl Default for Fnv64 {
    fn default() -> Self {
        Self {
            state: 0xcbf2_9ce4_8422_2325,
        }
    }
}

impl HashMarker for Fnv64 {}

impl OutputSizeUser for Fnv64 {
    type OutputSize = U8;
}

impl Update for Fnv64 {
    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(0x0000_0100_0000_01b3);
        }
    }
}

impl FixedOutput for Fnv64 {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.state.to_be_bytes());
    }
}

/// Fixed 64-bit parameters with the FNV-1a test digest.
pub fn fixed_params() -> DomainParameters<Fnv64> {
    DomainParameters::new(
        64,
        BigUint::from(SAFE_PRIME_64),
        BigUint::from(GENERATOR_64),
        Fnv64::default(),
    )
    .expect("fixed parameters are well-formed")
}
