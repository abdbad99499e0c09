//! # Storefront Error Types
//!
//! Typed error handling for the storefront checkout engine.
//! All fallible operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for catalog, cart, and checkout operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Product not found in catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Price mismatch or invalid amount
    #[error("Invalid price: {message}")]
    InvalidPrice { message: String },

    /// A field value that does not satisfy its catalog declaration
    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Provider-side failures map to a plain 500: the caller gets a
    /// generic server error rather than processor internals.
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::InvalidRequest(_) => 400,
            ShopError::ProductNotFound { .. } => 404,
            ShopError::InvalidPrice { .. } => 400,
            ShopError::InvalidField { .. } => 400,
            ShopError::Provider { .. } => 500,
            ShopError::Network(_) => 500,
            ShopError::Serialization(_) => 500,
            ShopError::Internal(_) => 500,
        }
    }

    /// True when the error should be hidden behind a generic message
    /// in HTTP responses (processor internals stay in the logs).
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, ShopError::Provider { .. } | ShopError::Network(_))
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;
