//! # shop-stripe
//!
//! Stripe checkout provider for storefront-rs.
//!
//! Implements `shop_core::CheckoutProvider` against the Stripe Checkout
//! Sessions API: dynamic line items built from the posted cart, one-time
//! card payments, hosted payment page.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::StripeCheckout;
//! use shop_core::{CheckoutProvider, RedirectUrls};
//!
//! // Create provider from environment (STRIPE_SECRET_KEY)
//! let provider = StripeCheckout::from_env()?;
//!
//! // Create checkout session
//! let urls = RedirectUrls::from_origin("https://shop.example.com");
//! let session = provider.create_session(&items, &urls).await?;
//!
//! // Redirect the customer using session.id
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckout;
pub use config::StripeConfig;
