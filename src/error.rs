//! Error types for the claim release engine

use thiserror::Error;

/// Result type alias for the claim release engine
pub type Result<T> = std::result::Result<T, Error>;

/// Claim release engine errors
///
/// Deliberately small: per-request filtering has no error path at all
/// (anomalous inputs degrade to documented pass-through outcomes), so
/// only configuration, custom-scope validation, and registry persistence
/// can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A custom scope definition failed validation
    #[error("Invalid custom scope: {0}")]
    InvalidScope(String),

    /// Service registry persistence failure
    #[error("Service registry error: {0}")]
    Registry(String),
}
