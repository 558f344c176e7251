//! Message hashing shared by the signer and the verifier.

use digest::Digest;
use num_bigint::BigUint;

/// Hashes `message` with a fresh clone of `hasher` and reads the digest as a
/// big-endian unsigned integer.
///
/// The prototype is never updated, so one instance can be shared across
/// threads and calls. Any bytes already absorbed by the prototype become a
/// prefix of every message. The result is not reduced modulo anything and may
/// exceed `p - 1` when the digest is wider than the modulus.
pub fn hash_to_integer<D: Digest + Clone>(hasher: &D, message: &[u8]) -> BigUint {
    let digest = hasher.clone().chain_update(message).finalize();
    BigUint::from_bytes_be(&digest)
}

#[cfg(test)]
mod tests {
    use sha2::Sha256;

    use super::*;

    #[test]
    fn matches_direct_digest() {
        let expected = BigUint::from_bytes_be(&Sha256::digest(b"hello"));
        assert_eq!(hash_to_integer(&Sha256::new(), b"hello"), expected);
    }

    #[test]
    fn prototype_is_not_consumed() {
        let hasher = Sha256::new();
        let first = hash_to_integer(&hasher, b"message");
        let second = hash_to_integer(&hasher, b"message");
        assert_eq!(first, second);
    }

    #[test]
    fn prototype_state_is_a_prefix() {
        let hasher = Sha256::new().chain_update(b"context:");
        let expected = BigUint::from_bytes_be(&Sha256::digest(b"context:message"));
        assert_eq!(hash_to_integer(&hasher, b"message"), expected);
    }
}
