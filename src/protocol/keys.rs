use core::fmt;

use num_bigint::{BigUint, RandBigInt};
use rand_core::CryptoRngCore;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::DomainParameters;
use crate::primitives::wipe;

/// Secret signing exponent `x`.
///
/// # Security
///
/// - The value is overwritten with zeros when dropped
/// - `Debug` output never contains the exponent
/// - Keep the key inside the signing party's trust boundary
#[derive(Clone)]
pub struct PrivateKey {
    x: BigUint,
}

impl PrivateKey {
    /// Wraps an existing secret exponent.
    ///
    /// The range `[1, p - 2]` is checked when the key is handed to a
    /// [`Signer`](super::Signer), since it depends on the domain parameters.
    pub fn new(x: BigUint) -> Self {
        Self { x }
    }

    /// Returns the secret exponent.
    pub fn expose_secret(&self) -> &BigUint {
        &self.x
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        wipe(&mut self.x);
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Public verification value `y = g^x mod p`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    y: BigUint,
}

impl PublicKey {
    /// Wraps a public value.
    pub fn new(y: BigUint) -> Self {
        Self { y }
    }

    /// Returns `y`.
    pub fn value(&self) -> &BigUint {
        &self.y
    }
}

/// A private key together with its public key.
#[derive(Clone, Debug)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Derives the key pair for `private_key` under `params`.
    pub fn from_private_key<D>(params: &DomainParameters<D>, private_key: PrivateKey) -> Self {
        let y = params
            .generator()
            .modpow(private_key.expose_secret(), params.modulus());
        Self {
            private_key,
            public_key: PublicKey::new(y),
        }
    }

    /// Returns the private half.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Returns the public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Splits the pair into its halves.
    pub fn into_parts(self) -> (PrivateKey, PublicKey) {
        (self.private_key, self.public_key)
    }

    /// Returns `true` if `y == g^x mod p` under `params`.
    pub fn is_consistent<D>(&self, params: &DomainParameters<D>) -> bool {
        let expected = params
            .generator()
            .modpow(self.private_key.expose_secret(), params.modulus());
        expected == self.public_key.y
    }
}

/// Generator of key pairs for a fixed set of domain parameters.
pub struct KeyPairGenerator<'a, D> {
    params: &'a DomainParameters<D>,
}

impl<'a, D> KeyPairGenerator<'a, D> {
    /// Creates a key generator bound to `params`.
    pub fn new(params: &'a DomainParameters<D>) -> Self {
        Self { params }
    }

    /// Draws `x` uniformly from `[1, p - 2]` and computes `y = g^x mod p`.
    pub fn generate<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> KeyPair {
        let low = BigUint::from(1u32);
        let x = rng.gen_biguint_range(&low, &self.params.order());
        let pair = KeyPair::from_private_key(self.params, PrivateKey::new(x));
        debug!(modulus_bits = self.params.modulus().bits(), "generated key pair");
        pair
    }
}
