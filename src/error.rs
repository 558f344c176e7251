//! Error types for ElGamal signatures

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Domain parameters could not be generated.
    #[error("Parameter generation failed: {0}")]
    ParameterGeneration(String),

    /// Domain parameters supplied by the caller are malformed.
    #[error("Invalid domain parameters: {0}")]
    InvalidParams(String),

    /// A signature could not be produced.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The ephemeral key had no inverse modulo `p - 1` despite passing the gcd filter.
    #[error("Internal invariant violated: ephemeral key is not invertible modulo p - 1")]
    InverseNotFound,

    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration sources could not be read or merged.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}
