//! # ElGamal Digital Signatures
//!
//! Domain-parameter generation, key generation, signing and verification for
//! the ElGamal signature scheme over the multiplicative group modulo a safe
//! prime `p = 2q + 1`.
//!
//! The hash algorithm is supplied by the caller as any [`digest::Digest`]
//! implementation and is stored in the [`DomainParameters`] as a prototype that
//! is cloned for every message.
//!
//! ## Example
//!
//! ```rust
//! use elgamal_signature::{KeyPairGenerator, ParameterGenerator, SecureRng, Signer, Verifier};
//! use sha2::{Digest, Sha256};
//!
//! let mut rng = SecureRng::new();
//! let params = ParameterGenerator::default()
//!     .generate(128, Sha256::new(), &mut rng)
//!     .unwrap();
//! let keys = KeyPairGenerator::new(&params).generate(&mut rng);
//!
//! let signature = Signer::new(&params, keys.private_key())
//!     .unwrap()
//!     .sign(b"attack at dawn", &mut rng)
//!     .unwrap();
//!
//! let verifier = Verifier::new(&params, keys.public_key());
//! assert!(verifier.verify(b"attack at dawn", &signature));
//! assert!(!verifier.verify(b"attack at dusk", &signature));
//! ```
//!
//! ## Security
//!
//! Arithmetic is not constant-time. Parameters, keys and ephemeral values
//! must come from a cryptographically secure RNG such as [`SecureRng`].

/// Retry ceilings and generator policy.
pub mod config;
/// Error types.
pub mod error;
/// Entropy, primality and secret-wiping primitives.
pub mod primitives;
/// Parameter generation, key generation, signing and verification.
pub mod protocol;

pub use config::{Config, GeneratorCheck, RetryLimits};
pub use error::Error;
pub use primitives::{is_safe_prime, MillerRabin, PrimalityTest, SecureRng};
pub use protocol::{
    generate_keys, generate_system, hash_to_integer, sign, verify, DomainParameters, KeyPair,
    KeyPairGenerator, ParameterGenerator, PrivateKey, PublicKey, Signature, Signer, Verifier,
};

/// Result type for library operations.
pub type Result<T> = core::result::Result<T, Error>;
