//! Tunable limits for the rejection-sampling loops and generator selection.

use serde::{Deserialize, Serialize};

use crate::primitives::prime::DEFAULT_ROUNDS;
use crate::{Error, Result};

/// Default location of the optional TOML configuration file.
const DEFAULT_CONFIG_PATH: &str = "config/elgamal.toml";

/// Library configuration.
///
/// Every loop that samples until a condition holds is bounded by one of the
/// ceilings in [`RetryLimits`], so a caller can cap worst-case latency.
/// Hand the config to [`ParameterGenerator::new`](crate::ParameterGenerator::new)
/// and [`Signer::with_config`](crate::Signer::with_config); the free functions
/// such as [`sign`](crate::sign) always use the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Retry ceilings for parameter, generator and nonce searches.
    pub limits: RetryLimits,
    /// Acceptance rule applied to generator candidates.
    pub generator_check: GeneratorCheck,
    /// Number of Miller-Rabin rounds per primality test.
    pub primality_rounds: usize,
}

/// Retry ceilings for each rejection-sampling loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryLimits {
    /// Random primes `pp` tried before giving up on finding `p = 2pp + 1` prime.
    pub safe_prime_attempts: usize,
    /// Odd candidates tried when drawing each random prime `pp`.
    pub prime_candidate_attempts: usize,
    /// Generator candidates tried before giving up.
    pub generator_attempts: usize,
    /// Ephemeral keys tried per signature before giving up.
    pub nonce_attempts: usize,
}

/// Rule used to accept a generator candidate `g` for a safe prime `p`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorCheck {
    /// Rejects `g` when `(p - 1) mod g == 1`.
    ///
    /// This filter does not bound the order of `g`. It is the default so that
    /// generated systems match existing deployments.
    #[default]
    Legacy,
    /// Accepts `g` only when `g^2 != 1` and `g^((p-1)/2) != 1 (mod p)`, so `g`
    /// generates the whole group of order `p - 1`.
    FullOrder,
}

impl Default for RetryLimits {
    fn default() -> Self {
        Self {
            safe_prime_attempts: 100_000,
            prime_candidate_attempts: 1_000_000,
            generator_attempts: 10_000,
            nonce_attempts: 10_000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: RetryLimits::default(),
            generator_check: GeneratorCheck::default(),
            primality_rounds: DEFAULT_ROUNDS,
        }
    }
}

impl Config {
    /// Loads configuration from `.env` file, TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `ELGAMAL_` prefix, nested keys separated by `__`
    /// 2. TOML configuration file (if exists)
    /// 3. Built-in defaults
    ///
    /// The TOML file path can be set via `ELGAMAL_CONFIG_PATH`. If not set, defaults
    /// to `./config/elgamal.toml`. A missing file is silently skipped.
    ///
    /// # Environment Variable Examples
    /// ```bash
    /// ELGAMAL_GENERATOR_CHECK=full_order
    /// ELGAMAL_PRIMALITY_ROUNDS=64
    /// ELGAMAL_LIMITS__SAFE_PRIME_ATTEMPTS=500000
    /// ELGAMAL_LIMITS__NONCE_ATTEMPTS=100
    /// ```
    ///
    /// # Errors
    /// Returns an error if a source is malformed or the merged values fail
    /// [`Config::validate`].
    pub fn from_env() -> Result<Self> {
        use figment::providers::{Env, Format, Serialized, Toml};
        use figment::Figment;

        // Attempt to load .env file (silently ignore if it doesn't exist)
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("ELGAMAL_CONFIG_PATH")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("ELGAMAL_").ignore(&["CONFIG_PATH"]).split("__"))
            .extract()
            .map_err(Box::new)?;

        config.validate()?;
        Ok(config)
    }

    /// Validates that every ceiling allows at least one attempt.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;
        let ceilings = [
            ("limits.safe_prime_attempts", limits.safe_prime_attempts),
            ("limits.prime_candidate_attempts", limits.prime_candidate_attempts),
            ("limits.generator_attempts", limits.generator_attempts),
            ("limits.nonce_attempts", limits.nonce_attempts),
        ];

        for (name, value) in ceilings {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be positive")));
            }
        }

        if self.primality_rounds == 0 {
            return Err(Error::InvalidConfig(
                "primality_rounds must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
