//! # Checkout Provider Trait
//!
//! Seam between the storefront and the external payment processor. The
//! server holds a boxed provider; the Stripe implementation lives in its
//! own crate, and tests substitute stubs.

use crate::checkout::{CheckoutItem, CheckoutSession, RedirectUrls};
use crate::error::ShopResult;
use async_trait::async_trait;
use std::sync::Arc;

/// A payment processor capable of hosting a checkout session.
///
/// One invocation is one session: creation is not idempotent-safe to
/// retry blindly, so implementations make a single attempt and surface
/// failures to the caller.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a hosted checkout session for the given cart items.
    ///
    /// # Arguments
    /// * `items` - Ordered wire cart items, already known to be non-empty
    ///   by the caller (implementations still reject an empty slice)
    /// * `urls` - Success/cancel redirect targets for the hosted page
    async fn create_session(
        &self,
        items: &[CheckoutItem],
        urls: &RedirectUrls,
    ) -> ShopResult<CheckoutSession>;

    /// Provider name, for logging
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedCheckoutProvider = Arc<dyn CheckoutProvider>;
