//! Error types for spotprice
//!
//! There are two error types: `SpotPriceError` (main error enum) and
//! `ConfigError` (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns `SpotPriceError`.
//! The CLI maps errors to exit codes at the boundary (see `exit_codes`), and
//! the gateway handler maps them to status-coded envelopes (see `event`).
//!
//! Nothing inside the lookup pipeline recovers from an error locally. A lookup
//! either completes every page and aggregates, or fails as a whole.
//!
//! ## When to Use Which Error
//!
//! - `Validation`: malformed or missing input (empty instance type, unknown OS,
//!   non-numeric duration). Always raised before any network call.
//! - `Fetch`: the upstream call failed (network, auth, throttling) or returned
//!   a page we could not read. Carries the SDK error as `source` when there is one.
//! - `NoData`: the query succeeded but matched zero price entries. Distinct from
//!   a real zero price.
//! - `ConfigError`: configuration file parsing and validation issues.
//!   Converted to `SpotPriceError::Config` via `#[from]`.

use thiserror::Error;

/// Main error type for spotprice
#[derive(Error, Debug)]
pub enum SpotPriceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("Fetch error: {message}")]
    Fetch {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("No spot price data for {instance_type} in the requested window")]
    NoData { instance_type: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpotPriceError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SpotPriceError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an upstream failure, keeping the original error as the source
    pub fn fetch<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SpotPriceError::Fetch {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// A fetch failure with no underlying error (malformed page, deadline)
    pub fn fetch_msg(message: impl Into<String>) -> Self {
        SpotPriceError::Fetch {
            message: message.into(),
            source: None,
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SpotPriceError>;
