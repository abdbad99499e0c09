//! # Request Handlers
//!
//! Axum request handlers for the storefront API: checkout session
//! creation and catalog reads.

use crate::state::AppState;
use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use shop_core::{CheckoutItem, RedirectUrls, ShopError};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout request: the client's cart, verbatim
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Items to purchase; `None` when the field is missing entirely
    #[serde(default)]
    pub items: Option<Vec<CheckoutItem>>,
}

/// Create checkout response: the session identifier the client redirects with
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    pub id: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn shop_error_response(err: ShopError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    // Processor internals stay in the logs; the caller gets one message field
    let message = if err.is_provider_failure() {
        "Checkout session creation failed".to_string()
    } else {
        err.to_string()
    };
    (status, Json(ErrorResponse::new(message)))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a checkout session from the posted cart.
///
/// Rejects a missing, non-array, or empty item list before the provider is
/// ever consulted. Redirect targets derive from the `Origin` header, with
/// the configured base URL as fallback.
#[instrument(skip(state, headers, payload))]
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateCheckoutRequest>, JsonRejection>,
) -> Result<Json<CreateCheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!(
                "Malformed checkout request: {}",
                rejection.body_text()
            ))),
        )
    })?;

    let items = match request.items {
        Some(items) if !items.is_empty() => items,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No items in cart")),
            ))
        }
    };

    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(&state.config.base_url);
    let urls = RedirectUrls::from_origin(origin);

    info!("Creating checkout: {} items, origin={}", items.len(), origin);

    let session = state
        .provider
        .create_session(&items, &urls)
        .await
        .map_err(|e| {
            error!("Failed to create checkout session: {}", e);
            shop_error_response(e)
        })?;

    info!("Created checkout session: {}", session.id);

    Ok(Json(CreateCheckoutResponse { id: session.id }))
}

/// List products available for purchase
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    let products: Vec<_> = state.catalog.active_products().collect();
    Json(serde_json::json!({
        "products": products,
        "count": products.len()
    }))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let product = state.catalog.get(&product_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!(
                "Product not found: {}",
                product_id
            ))),
        )
    })?;

    Ok(Json(product.clone()))
}
