use core::fmt;

use digest::Digest;
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand_core::CryptoRngCore;
use tracing::{debug, trace, warn};

use super::hashing::hash_to_integer;
use crate::config::{Config, GeneratorCheck};
use crate::primitives::{is_safe_prime, MillerRabin, PrimalityTest};
use crate::{Error, Result};

/// Smallest bit length for which a safe prime `2pp + 1` with a prime `pp` exists.
pub const MIN_BIT_LENGTH: u64 = 3;

/// Public domain parameters of an ElGamal signature system.
///
/// Holds the safe prime modulus `p`, the generator `g`, the requested bit length
/// and a prototype of the hash algorithm. The value is immutable once built and
/// is passed by reference to key generation, signing and verification.
///
/// # Invariants
///
/// - `p` is odd and at least 5
/// - `g` lies in `[2, p - 1]`
#[derive(Clone)]
pub struct DomainParameters<D> {
    bit_length: u64,
    modulus: BigUint,
    generator: BigUint,
    hasher: D,
}

impl<D: Digest + Clone> DomainParameters<D> {
    /// Builds parameters from caller-supplied values.
    ///
    /// Only the structural invariants are checked here. Use
    /// [`DomainParameters::check_safe_prime`] to test primality of imported values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if the bit length is zero, the modulus is
    /// even or below 5, or the generator is outside `[2, p - 1]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use elgamal_signature::DomainParameters;
    /// use num_bigint::BigUint;
    /// use sha2::{Digest, Sha256};
    ///
    /// let params =
    ///     DomainParameters::new(5, BigUint::from(23u32), BigUint::from(5u32), Sha256::new())
    ///         .unwrap();
    /// assert_eq!(params.modulus(), &BigUint::from(23u32));
    /// ```
    pub fn new(bit_length: u64, modulus: BigUint, generator: BigUint, hasher: D) -> Result<Self> {
        if bit_length == 0 {
            return Err(Error::InvalidParams(
                "bit length must be positive".to_string(),
            ));
        }

        if modulus < BigUint::from(5u32) {
            return Err(Error::InvalidParams(
                "modulus must be at least 5".to_string(),
            ));
        }

        if !modulus.bit(0) {
            return Err(Error::InvalidParams("modulus must be odd".to_string()));
        }

        if generator < BigUint::from(2u32) || generator >= modulus {
            return Err(Error::InvalidParams(
                "generator must lie in [2, p - 1]".to_string(),
            ));
        }

        Ok(Self {
            bit_length,
            modulus,
            generator,
            hasher,
        })
    }

    /// Hashes a message to the integer `H` used by signing and verification.
    pub fn hash_message(&self, message: &[u8]) -> BigUint {
        hash_to_integer(&self.hasher, message)
    }

    /// Returns `true` if the modulus and `(p - 1) / 2` both pass `test`.
    pub fn check_safe_prime<T, R>(&self, test: &T, rng: &mut R) -> bool
    where
        T: PrimalityTest + ?Sized,
        R: CryptoRngCore + ?Sized,
    {
        is_safe_prime(test, &self.modulus, rng)
    }
}

impl<D> DomainParameters<D> {
    /// Returns the requested bit length.
    pub fn bit_length(&self) -> u64 {
        self.bit_length
    }

    /// Returns the safe prime modulus `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Returns the generator `g`.
    pub fn generator(&self) -> &BigUint {
        &self.generator
    }

    /// Returns the hash algorithm prototype.
    pub fn hasher(&self) -> &D {
        &self.hasher
    }

    /// Returns `p - 1`, the modulus for exponent arithmetic.
    pub fn order(&self) -> BigUint {
        &self.modulus - 1u32
    }
}

impl<D> fmt::Debug for DomainParameters<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainParameters")
            .field("bit_length", &self.bit_length)
            .field("modulus", &self.modulus)
            .field("generator", &self.generator)
            .finish_non_exhaustive()
    }
}

impl GeneratorCheck {
    /// Decides whether `g` is an acceptable generator for the safe prime `p`.
    pub fn accepts(&self, g: &BigUint, p: &BigUint) -> bool {
        if *g < BigUint::from(2u32) || g >= p {
            return false;
        }

        let p_minus_one = p - 1u32;
        match self {
            GeneratorCheck::Legacy => !(&p_minus_one % g).is_one(),
            GeneratorCheck::FullOrder => {
                let q = &p_minus_one >> 1u32;
                !g.modpow(&BigUint::from(2u32), p).is_one() && !g.modpow(&q, p).is_one()
            }
        }
    }
}

/// Generator of fresh domain parameters.
///
/// Searches for a safe prime `p = 2pp + 1` and a generator `g`, with every
/// search bounded by the ceilings in [`Config`].
#[derive(Clone, Debug)]
pub struct ParameterGenerator<T = MillerRabin> {
    config: Config,
    primality: T,
}

impl ParameterGenerator<MillerRabin> {
    /// Creates a generator using Miller-Rabin with the configured number of rounds.
    pub fn new(config: Config) -> Self {
        let primality = MillerRabin::new(config.primality_rounds);
        Self { config, primality }
    }
}

impl Default for ParameterGenerator<MillerRabin> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<T: PrimalityTest> ParameterGenerator<T> {
    /// Creates a generator with a caller-supplied primality test.
    pub fn with_primality_test(config: Config, primality: T) -> Self {
        Self { config, primality }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generates a complete parameter set for a modulus of `bit_length` bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterGeneration`] if `bit_length` is below
    /// [`MIN_BIT_LENGTH`] or a retry ceiling is exhausted.
    pub fn generate<D, R>(
        &self,
        bit_length: u64,
        hasher: D,
        rng: &mut R,
    ) -> Result<DomainParameters<D>>
    where
        D: Digest + Clone,
        R: CryptoRngCore + ?Sized,
    {
        if bit_length < MIN_BIT_LENGTH {
            return Err(Error::ParameterGeneration(format!(
                "bit length must be at least {MIN_BIT_LENGTH}, got {bit_length}"
            )));
        }

        let modulus = self.safe_prime(bit_length, rng)?;
        let generator = self.choose_generator(&modulus, rng)?;
        debug!(
            bit_length,
            modulus_bits = modulus.bits(),
            check = ?self.config.generator_check,
            "generated domain parameters"
        );

        Ok(DomainParameters {
            bit_length,
            modulus,
            generator,
            hasher,
        })
    }

    fn safe_prime<R>(&self, bit_length: u64, rng: &mut R) -> Result<BigUint>
    where
        R: CryptoRngCore + ?Sized,
    {
        let limits = &self.config.limits;

        for attempt in 1..=limits.safe_prime_attempts {
            let pp = self
                .primality
                .random_prime(bit_length - 1, limits.prime_candidate_attempts, rng)
                .ok_or_else(|| {
                    warn!(bits = bit_length - 1, "random prime search exhausted");
                    Error::ParameterGeneration(format!(
                        "no {}-bit prime found in {} candidates",
                        bit_length - 1,
                        limits.prime_candidate_attempts
                    ))
                })?;

            let p = (pp << 1u32) + 1u32;
            if self.primality.is_prime(&p, rng) {
                debug!(attempt, "found safe prime");
                return Ok(p);
            }
            trace!(attempt, "2pp + 1 composite, retrying");
        }

        warn!(
            attempts = limits.safe_prime_attempts,
            "safe prime search exhausted"
        );
        Err(Error::ParameterGeneration(format!(
            "no {bit_length}-bit safe prime found in {} attempts",
            limits.safe_prime_attempts
        )))
    }

    fn choose_generator<R>(&self, p: &BigUint, rng: &mut R) -> Result<BigUint>
    where
        R: CryptoRngCore + ?Sized,
    {
        let check = self.config.generator_check;
        let attempts = self.config.limits.generator_attempts;
        let low = BigUint::from(2u32);

        for attempt in 1..=attempts {
            let g = rng.gen_biguint_range(&low, p);
            if check.accepts(&g, p) {
                return Ok(g);
            }
            trace!(attempt, "generator candidate rejected");
        }

        warn!(attempts, ?check, "generator search exhausted");
        Err(Error::ParameterGeneration(format!(
            "no generator accepted in {attempts} attempts"
        )))
    }
}

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use sha2::Sha256;

    use super::*;
    use crate::config::RetryLimits;
    use crate::SecureRng;

    const SAFE_PRIME_64: u64 = 11_881_870_593_822_888_767;

    #[test]
    fn generated_modulus_is_safe_prime() {
        let mut rng = SecureRng::new();
        let generator = ParameterGenerator::default();
        let params = generator.generate(64, Sha256::new(), &mut rng).unwrap();

        assert_eq!(params.bit_length(), 64);
        assert_eq!(params.modulus().bits(), 64);
        assert!(params.check_safe_prime(&MillerRabin::default(), &mut rng));
        assert!(params.generator() >= &BigUint::from(2u32));
        assert!(params.generator() < params.modulus());
    }

    #[test]
    fn smallest_bit_length() {
        let mut rng = SecureRng::new();
        let params = ParameterGenerator::default()
            .generate(MIN_BIT_LENGTH, Sha256::new(), &mut rng)
            .unwrap();
        assert_eq!(params.modulus(), &BigUint::from(7u32));
    }

    #[test]
    fn rejects_tiny_bit_length() {
        let mut rng = SecureRng::new();
        let generator = ParameterGenerator::default();

        for bits in [0, 1, 2] {
            let result = generator.generate(bits, Sha256::new(), &mut rng);
            assert!(matches!(result, Err(Error::ParameterGeneration(_))));
        }
    }

    #[test]
    fn safe_prime_ceiling_is_enforced() {
        let mut rng = SecureRng::new();
        let config = Config {
            limits: RetryLimits {
                prime_candidate_attempts: 1,
                ..RetryLimits::default()
            },
            ..Config::default()
        };

        // A single odd candidate per draw almost never yields a 512-bit prime.
        let result = ParameterGenerator::new(config).generate(512, Sha256::new(), &mut rng);
        assert!(matches!(result, Err(Error::ParameterGeneration(_))));
    }

    #[test]
    fn full_order_generator_has_order_p_minus_one() {
        let mut rng = SecureRng::new();
        let config = Config {
            generator_check: GeneratorCheck::FullOrder,
            ..Config::default()
        };
        let params = ParameterGenerator::new(config)
            .generate(48, Sha256::new(), &mut rng)
            .unwrap();

        let p = params.modulus();
        let q = params.order() >> 1u32;
        let g = params.generator();
        assert!(!g.modpow(&BigUint::from(2u32), p).is_one());
        assert!(!g.modpow(&q, p).is_one());
        assert!(g.modpow(&params.order(), p).is_one());
    }

    #[test]
    fn legacy_check() {
        let p = BigUint::from(SAFE_PRIME_64);
        // (p - 1) mod 3 == 1
        assert!(!GeneratorCheck::Legacy.accepts(&BigUint::from(3u32), &p));
        assert!(GeneratorCheck::Legacy.accepts(&BigUint::from(2u32), &p));
        assert!(GeneratorCheck::Legacy.accepts(&(&p - 1u32), &p));
    }

    #[test]
    fn full_order_check() {
        let p = BigUint::from(SAFE_PRIME_64);
        // 2 is a quadratic residue here, so its order is (p - 1) / 2.
        assert!(!GeneratorCheck::FullOrder.accepts(&BigUint::from(2u32), &p));
        assert!(!GeneratorCheck::FullOrder.accepts(&(&p - 1u32), &p));
        assert!(!GeneratorCheck::FullOrder.accepts(&BigUint::zero(), &p));
        assert!(GeneratorCheck::FullOrder.accepts(&BigUint::from(5u32), &p));
    }

    #[test]
    fn new_validates_structure() {
        let hasher = Sha256::new();
        let p = BigUint::from(23u32);

        assert!(DomainParameters::new(5, p.clone(), BigUint::from(5u32), hasher.clone()).is_ok());
        assert!(DomainParameters::new(0, p.clone(), BigUint::from(5u32), hasher.clone()).is_err());
        assert!(
            DomainParameters::new(2, BigUint::from(3u32), BigUint::from(2u32), hasher.clone())
                .is_err()
        );
        assert!(
            DomainParameters::new(5, BigUint::from(24u32), BigUint::from(5u32), hasher.clone())
                .is_err()
        );
        assert!(DomainParameters::new(5, p.clone(), BigUint::one(), hasher.clone()).is_err());
        assert!(DomainParameters::new(5, p.clone(), p.clone(), hasher.clone()).is_err());
        assert!(DomainParameters::new(5, p, BigUint::zero(), hasher).is_err());
    }

    #[test]
    fn debug_omits_hasher() {
        let params =
            DomainParameters::new(5, BigUint::from(23u32), BigUint::from(5u32), Sha256::new())
                .unwrap();
        let rendered = format!("{params:?}");
        assert!(rendered.contains("modulus: 23"));
        assert!(!rendered.contains("Sha256"));
    }
}
