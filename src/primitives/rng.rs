//! Entropy source for parameter, key and nonce sampling.

use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::error;

/// Operating-system backed random number generator.
///
/// Every secret in this crate (private keys, ephemeral keys) and every public
/// parameter (safe primes, generators) is drawn from a `CryptoRng`. This type is
/// the default source used by the top-level helper functions.
///
/// A failing OS source is fatal: the failure is logged and the call panics
/// instead of handing back a partially filled buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a handle to the operating system's entropy source.
    pub fn new() -> Self {
        Self(OsRng)
    }

    fn fill_or_abort(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.0.try_fill_bytes(dest) {
            error!(len = dest.len(), "entropy source failed: {e}");
            panic!("operating system entropy source failed: {e}");
        }
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_or_abort(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_or_abort(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill_or_abort(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}
