//! The four ElGamal signature operations.
//!
//! Control flow is linear: [`generate_system`] produces [`DomainParameters`],
//! [`generate_keys`] derives a [`KeyPair`] from them, [`sign`] produces a
//! [`Signature`] and [`verify`] checks it. None of these keep state between
//! calls. The struct APIs ([`ParameterGenerator`], [`KeyPairGenerator`],
//! [`Signer`], [`Verifier`]) accept an explicit RNG and configuration.

/// Message hashing shared by signer and verifier.
pub mod hashing;
/// Key pair types and generation.
pub mod keys;
/// Domain parameters and their generation.
pub mod params;
/// Signature type and signing.
pub mod signer;
/// Signature verification.
pub mod verifier;

use digest::Digest;

pub use hashing::hash_to_integer;
pub use keys::{KeyPair, KeyPairGenerator, PrivateKey, PublicKey};
pub use params::{DomainParameters, ParameterGenerator, MIN_BIT_LENGTH};
pub use signer::{Signature, Signer};
pub use verifier::Verifier;

use crate::{Config, Result, SecureRng};

/// Generates domain parameters for a `bit_length`-bit safe prime using the
/// default configuration and the operating system RNG.
///
/// # Errors
///
/// Returns [`Error::ParameterGeneration`](crate::Error::ParameterGeneration) if
/// `bit_length` is too small or a search ceiling is reached.
///
/// # Examples
///
/// ```rust
/// use elgamal_signature::generate_system;
/// use sha2::{Digest, Sha256};
///
/// let params = generate_system(64, Sha256::new()).unwrap();
/// assert_eq!(params.modulus().bits(), 64);
/// ```
pub fn generate_system<D>(bit_length: u64, hasher: D) -> Result<DomainParameters<D>>
where
    D: Digest + Clone,
{
    let mut rng = SecureRng::new();
    ParameterGenerator::new(Config::default()).generate(bit_length, hasher, &mut rng)
}

/// Generates a key pair for `params` using the operating system RNG.
pub fn generate_keys<D>(params: &DomainParameters<D>) -> KeyPair {
    let mut rng = SecureRng::new();
    KeyPairGenerator::new(params).generate(&mut rng)
}

/// Signs `message` with `private_key` using the operating system RNG.
///
/// # Errors
///
/// Returns [`Error::Signing`](crate::Error::Signing) if the private key is out of
/// range or no ephemeral key was found within the default ceiling.
///
/// # Examples
///
/// ```rust
/// use elgamal_signature::{generate_keys, generate_system, sign, verify};
/// use sha2::{Digest, Sha256};
///
/// let params = generate_system(64, Sha256::new()).unwrap();
/// let keys = generate_keys(&params);
///
/// let signature = sign(&params, "hello", keys.private_key()).unwrap();
/// assert!(verify(&params, "hello", &signature, keys.public_key()));
/// assert!(!verify(&params, "hellp", &signature, keys.public_key()));
/// ```
pub fn sign<D, M>(
    params: &DomainParameters<D>,
    message: M,
    private_key: &PrivateKey,
) -> Result<Signature>
where
    D: Digest + Clone,
    M: AsRef<[u8]>,
{
    let mut rng = SecureRng::new();
    Signer::new(params, private_key)?.sign(message.as_ref(), &mut rng)
}

/// Returns `true` if `signature` is a valid signature on `message` under `public_key`.
pub fn verify<D, M>(
    params: &DomainParameters<D>,
    message: M,
    signature: &Signature,
    public_key: &PublicKey,
) -> bool
where
    D: Digest + Clone,
    M: AsRef<[u8]>,
{
    Verifier::new(params, public_key).verify(message.as_ref(), signature)
}
