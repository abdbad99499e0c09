//! # shop-core
//!
//! Core types for the storefront checkout engine.
//!
//! This crate provides:
//! - `Catalog` and `CatalogItem` for the configurable product catalog
//! - `FieldSpec` and `FieldValue` for per-item configuration
//! - `CartStore` and `CartItem` for client cart state
//! - `CheckoutItem`, `LineItem`, and `CheckoutSession` for the checkout flow
//! - `CheckoutProvider` trait for payment processor implementations
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{CartStore, Currency};
//!
//! // Assemble a cart
//! let mut cart = CartStore::new(Currency::USD);
//! let cart_id = cart.add(catalog.get_active("game")?, values)?;
//!
//! // Hand the whole set to checkout
//! let items: Vec<CheckoutItem> =
//!     serde_json::from_value(cart.checkout_payload()["items"].clone())?;
//! let session = provider.create_session(&items, &urls).await?;
//!
//! // Redirect the customer using session.id
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod fields;
pub mod provider;

// Re-exports for convenience
pub use cart::{CartItem, CartStore};
pub use catalog::{
    from_minor_units, to_minor_units, Catalog, CatalogItem, Currency, ItemKind, Price, Surcharge,
};
pub use checkout::{
    build_description, build_line_items, CheckoutItem, CheckoutSession, LineItem, RedirectUrls,
    RESERVED_KEYS,
};
pub use error::{ShopError, ShopResult};
pub use fields::{FieldKind, FieldSpec, FieldValue};
pub use provider::{BoxedCheckoutProvider, CheckoutProvider};
