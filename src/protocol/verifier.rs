use digest::Digest;
use num_traits::Zero;
use tracing::{debug, trace};

use super::{DomainParameters, PublicKey, Signature};

/// Verifier for ElGamal signatures under one public key.
///
/// Verification never fails with an error: malformed or forged signatures
/// simply yield `false`.
pub struct Verifier<'a, D> {
    params: &'a DomainParameters<D>,
    public_key: &'a PublicKey,
}

impl<'a, D: Digest + Clone> Verifier<'a, D> {
    /// Creates a verifier for `public_key` under `params`.
    pub fn new(params: &'a DomainParameters<D>, public_key: &'a PublicKey) -> Self {
        Self { params, public_key }
    }

    /// Returns `true` if `0 < r < p` and `0 < s < p - 1`.
    pub fn is_well_formed(&self, signature: &Signature) -> bool {
        let r = signature.r();
        let s = signature.s();
        !r.is_zero() && !s.is_zero() && r < self.params.modulus() && *s < self.params.order()
    }

    /// Checks `g^H == y^r * r^s (mod p)`.
    ///
    /// Out-of-range signatures are rejected before any exponentiation.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        if !self.is_well_formed(signature) {
            trace!("signature components out of range");
            return false;
        }

        let p = self.params.modulus();
        let r = signature.r();
        let h = self.params.hash_message(message);

        let lhs = self.params.generator().modpow(&h, p);
        let rhs = (self.public_key.value().modpow(r, p) * r.modpow(signature.s(), p)) % p;

        let valid = lhs == rhs;
        debug!(valid, "verified signature");
        valid
    }
}
