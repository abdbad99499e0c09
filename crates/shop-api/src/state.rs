//! # Application State
//!
//! Shared state for the Axum application: the checkout provider, the
//! product catalog, and server configuration.

use shop_core::{BoxedCheckoutProvider, Catalog};
use shop_stripe::StripeCheckout;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Fallback origin for redirect targets when the request carries none
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout provider
    pub provider: BoxedCheckoutProvider,
    /// Product catalog
    pub catalog: Catalog,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Stripe provider
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let catalog = load_catalog()?;

        let stripe = StripeCheckout::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self {
            provider: Arc::new(stripe),
            catalog,
            config,
        })
    }

    /// Assemble state from parts (used by tests to substitute a stub provider)
    pub fn with_provider(
        provider: BoxedCheckoutProvider,
        catalog: Catalog,
        config: AppConfig,
    ) -> Self {
        Self {
            provider,
            catalog,
            config,
        }
    }
}

/// Load the product catalog from config
fn load_catalog() -> anyhow::Result<Catalog> {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = Catalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.products.len(), path);
            return Ok(catalog);
        }
    }

    // Empty catalog keeps the checkout endpoint functional without config
    tracing::warn!("No product catalog found, using empty catalog");
    Ok(Catalog::new())
}
