use digest::Digest;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use tracing::{debug, trace, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{DomainParameters, PrivateKey};
use crate::config::{Config, RetryLimits};
use crate::primitives::wipe;
use crate::{Error, Result};

/// An ElGamal signature `(r, s)`.
///
/// A well-formed signature satisfies `0 < r < p` and `0 < s < p - 1`. The
/// constructor does not enforce this; the [`Verifier`](super::Verifier)
/// rejects out-of-range values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Creates a signature from its components.
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// Returns `r = g^k mod p`.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// Returns `s = (H - x*r) * k^-1 mod (p - 1)`.
    pub fn s(&self) -> &BigUint {
        &self.s
    }
}

/// Per-signature secret `k`.
///
/// Automatically zeroized when dropped. Never leaves the signer.
pub(crate) struct EphemeralKey {
    k: BigUint,
}

impl EphemeralKey {
    pub(crate) fn new(k: BigUint) -> Self {
        Self { k }
    }

    pub(crate) fn k(&self) -> &BigUint {
        &self.k
    }
}

impl Zeroize for EphemeralKey {
    fn zeroize(&mut self) {
        wipe(&mut self.k);
    }
}

impl Drop for EphemeralKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for EphemeralKey {}

/// Signer holding a private key and the domain parameters it belongs to.
///
/// # Security
///
/// - A fresh ephemeral key is drawn for every signature and discarded afterwards
/// - Always use a cryptographically secure RNG; a predictable or repeated `k`
///   reveals the private key
pub struct Signer<'a, D> {
    params: &'a DomainParameters<D>,
    private_key: &'a PrivateKey,
    limits: RetryLimits,
}

impl<'a, D: Digest + Clone> Signer<'a, D> {
    /// Creates a signer after checking that the private key lies in `[1, p - 2]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signing`] if the private key is out of range.
    pub fn new(params: &'a DomainParameters<D>, private_key: &'a PrivateKey) -> Result<Self> {
        let x = private_key.expose_secret();
        if x.is_zero() || *x >= params.order() {
            return Err(Error::Signing(
                "private key must lie in [1, p - 2]".to_string(),
            ));
        }

        Ok(Self {
            params,
            private_key,
            limits: RetryLimits::default(),
        })
    }

    /// Creates a signer whose retry ceilings come from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signing`] if the private key is out of range.
    pub fn with_config(
        params: &'a DomainParameters<D>,
        private_key: &'a PrivateKey,
        config: &Config,
    ) -> Result<Self> {
        Ok(Self::new(params, private_key)?.with_limits(config.limits))
    }

    /// Replaces the retry ceilings.
    pub fn with_limits(mut self, limits: RetryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Signs `message`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Signing`] if no usable ephemeral key was found within
    /// `limits.nonce_attempts` draws, or [`Error::InverseNotFound`] if an
    /// ephemeral key coprime to `p - 1` turned out not to be invertible.
    pub fn sign<R>(&self, message: &[u8], rng: &mut R) -> Result<Signature>
    where
        R: CryptoRngCore + ?Sized,
    {
        let h = self.params.hash_message(message);
        let order = self.params.order();
        let low = BigUint::from(2u32);
        let high = self.params.modulus() + 1u32;

        for attempt in 1..=self.limits.nonce_attempts {
            let ephemeral = EphemeralKey::new(rng.gen_biguint_range(&low, &high));
            if !ephemeral.k().gcd(&order).is_one() {
                trace!(attempt, "ephemeral key shares a factor with p - 1");
                continue;
            }

            if let Some(signature) = self.sign_with_ephemeral(&h, &ephemeral)? {
                debug!(attempt, "signed message");
                return Ok(signature);
            }
            trace!(attempt, "s = 0, drawing a new ephemeral key");
        }

        warn!(
            attempts = self.limits.nonce_attempts,
            "ephemeral key search exhausted"
        );
        Err(Error::Signing(format!(
            "no usable ephemeral key found in {} attempts",
            self.limits.nonce_attempts
        )))
    }

    /// Computes `(r, s)` for hash `h` and ephemeral key `k`.
    ///
    /// Returns `None` when `s = 0`, in which case the caller must draw a new `k`.
    pub(crate) fn sign_with_ephemeral(
        &self,
        h: &BigUint,
        ephemeral: &EphemeralKey,
    ) -> Result<Option<Signature>> {
        let p = self.params.modulus();
        let order = self.params.order();
        let k = ephemeral.k();

        let r = self.params.generator().modpow(k, p);
        let k_inv = k.modinv(&order).ok_or(Error::InverseNotFound)?;

        // (H - x*r) mod (p - 1), kept non-negative
        let xr = (self.private_key.expose_secret() * &r) % &order;
        let difference = ((h % &order) + &order - xr) % &order;
        let s = (difference * k_inv) % &order;

        if s.is_zero() {
            return Ok(None);
        }

        Ok(Some(Signature::new(r, s)))
    }
}

#[cfg(test)]
mod tests {
    use sha2::Sha256;

    use super::*;
    use crate::protocol::{KeyPair, KeyPairGenerator, Verifier};
    use crate::SecureRng;

    fn small_params() -> DomainParameters<Sha256> {
        DomainParameters::new(5, BigUint::from(23u32), BigUint::from(5u32), Sha256::new())
            .unwrap()
    }

    #[test]
    fn known_signature() {
        let params = small_params();
        let key = PrivateKey::new(BigUint::from(6u32));
        let signer = Signer::new(&params, &key).unwrap();

        let signature = signer
            .sign_with_ephemeral(&BigUint::from(17u32), &EphemeralKey::new(BigUint::from(7u32)))
            .unwrap()
            .expect("s is non-zero");

        assert_eq!(signature.r(), &BigUint::from(17u32));
        assert_eq!(signature.s(), &BigUint::from(13u32));
    }

    #[test]
    fn zero_s_is_reported() {
        let params = small_params();
        let key = PrivateKey::new(BigUint::from(6u32));
        let signer = Signer::new(&params, &key).unwrap();

        // r = 5^7 mod 23 = 17 and x*r = 102 = 14 (mod 22), so H = 14 gives s = 0.
        let result = signer
            .sign_with_ephemeral(&BigUint::from(14u32), &EphemeralKey::new(BigUint::from(7u32)))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn non_invertible_ephemeral_is_an_invariant_violation() {
        let params = small_params();
        let key = PrivateKey::new(BigUint::from(6u32));
        let signer = Signer::new(&params, &key).unwrap();

        let result = signer
            .sign_with_ephemeral(&BigUint::from(17u32), &EphemeralKey::new(BigUint::from(4u32)));
        assert!(matches!(result, Err(Error::InverseNotFound)));
    }

    #[test]
    fn rejects_out_of_range_private_key() {
        let params = small_params();

        for x in [0u32, 22, 23, 100] {
            let key = PrivateKey::new(BigUint::from(x));
            assert!(matches!(
                Signer::new(&params, &key),
                Err(Error::Signing(_))
            ));
        }

        let key = PrivateKey::new(BigUint::from(21u32));
        assert!(Signer::new(&params, &key).is_ok());
    }

    #[test]
    fn signatures_are_in_range_and_verify() {
        let params = small_params();
        let mut rng = SecureRng::new();
        let pair: KeyPair = KeyPairGenerator::new(&params).generate(&mut rng);
        let signer = Signer::new(&params, pair.private_key()).unwrap();
        let verifier = Verifier::new(&params, pair.public_key());

        for i in 0..100u32 {
            let message = i.to_be_bytes();
            let signature = signer.sign(&message, &mut rng).unwrap();

            assert!(!signature.r().is_zero() && signature.r() < params.modulus());
            assert!(!signature.s().is_zero() && signature.s() < &params.order());
            assert!(verifier.verify(&message, &signature));
        }
    }

    #[test]
    fn nonce_ceiling_is_enforced() {
        let params = small_params();
        let mut rng = SecureRng::new();
        let key = PrivateKey::new(BigUint::from(6u32));
        let limits = RetryLimits {
            nonce_attempts: 1,
            ..RetryLimits::default()
        };
        let signer = Signer::new(&params, &key).unwrap().with_limits(limits);

        // With one draw from [2, 23], most ephemeral keys share a factor with 22.
        let failures = (0..200)
            .filter(|_| signer.sign(b"message", &mut rng).is_err())
            .count();
        assert!(failures > 0);
    }

    #[test]
    fn config_limits_reach_signer() {
        let params = small_params();
        let mut rng = SecureRng::new();
        let key = PrivateKey::new(BigUint::from(6u32));
        let mut config = Config::default();
        config.limits.nonce_attempts = 1;

        let signer = Signer::with_config(&params, &key, &config).unwrap();
        assert_eq!(signer.limits, config.limits);

        let failures = (0..200)
            .filter(|_| matches!(signer.sign(b"message", &mut rng), Err(Error::Signing(_))))
            .count();
        assert!(failures > 0);

        let out_of_range = PrivateKey::new(BigUint::from(22u32));
        assert!(matches!(
            Signer::with_config(&params, &out_of_range, &config),
            Err(Error::Signing(_))
        ));
    }
}
