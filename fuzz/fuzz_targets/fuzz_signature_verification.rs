#![no_main]

use elgamal_signature::{DomainParameters, PublicKey, Signature, Verifier};
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use sha2::{Digest, Sha256};

const SAFE_PRIME_64: u64 = 11_881_870_593_822_888_767;

fuzz_target!(|data: &[u8]| {
    if data.len() < 24 {
        return;
    }

    let Ok(params) = DomainParameters::new(
        64,
        BigUint::from(SAFE_PRIME_64),
        BigUint::from(5u32),
        Sha256::new(),
    ) else {
        return;
    };

    let r = BigUint::from_bytes_be(&data[..8]);
    let s = BigUint::from_bytes_be(&data[8..16]);
    let y = BigUint::from_bytes_be(&data[16..24]);
    let message = &data[24..];

    let public_key = PublicKey::new(y);
    let verifier = Verifier::new(&params, &public_key);
    let signature = Signature::new(r, s);

    if !verifier.is_well_formed(&signature) {
        assert!(!verifier.verify(message, &signature));
    }
});
