//! # Checkout Mapping
//!
//! Conversion from wire cart items to the line items submitted to the
//! payment processor: price-to-minor-unit conversion, description
//! generation, and redirect URL derivation.

use crate::catalog::{to_minor_units, Currency};
use crate::error::{ShopError, ShopResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys of a wire cart item that carry identity rather than configuration.
/// These never appear in a generated line-item description.
pub const RESERVED_KEYS: [&str; 6] = ["name", "price", "cartId", "id", "type", "image"];

/// A cart item as posted to the checkout endpoint.
///
/// `name` and `price` (major currency units) are required; everything else
/// rides along as arbitrary key/value configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub name: String,
    pub price: f64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A priced, described unit submitted to the payment processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Currency code
    pub currency: Currency,

    /// Product name
    pub name: String,

    /// Generated description, absent when the item has no configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit amount in minor currency units
    pub unit_amount: i64,

    /// Always 1: duplicate configurations are not merged into quantities
    pub quantity: u32,
}

impl LineItem {
    /// Build a line item from a wire cart item
    pub fn from_checkout_item(item: &CheckoutItem, currency: Currency) -> ShopResult<Self> {
        let unit_amount = to_minor_units(item.price);
        if unit_amount < 0 {
            return Err(ShopError::InvalidPrice {
                message: format!("unit amount must be non-negative, got {}", unit_amount),
            });
        }

        Ok(Self {
            currency,
            name: item.name.clone(),
            description: build_description(&item.fields),
            unit_amount,
            quantity: 1,
        })
    }
}

/// Map every cart item to a line item, preserving order.
///
/// Fails on an empty cart before any provider work happens.
pub fn build_line_items(items: &[CheckoutItem], currency: Currency) -> ShopResult<Vec<LineItem>> {
    if items.is_empty() {
        return Err(ShopError::InvalidRequest("cart has no items".into()));
    }
    items
        .iter()
        .map(|item| LineItem::from_checkout_item(item, currency))
        .collect()
}

/// Assemble a description from the item's non-reserved fields.
///
/// Each pair is formatted as `key: value` and joined with `", "`; keys come
/// out in sorted order. Null and empty values are omitted entirely.
pub fn build_description(fields: &Map<String, Value>) -> Option<String> {
    let parts: Vec<String> = fields
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .filter_map(|(key, value)| {
            let rendered = render_value(value)?;
            if rendered.is_empty() {
                return None;
            }
            Some(format!("{}: {}", key, rendered))
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Readable textual form of a structured field value
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(render_value)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => serde_json::to_string(value).ok(),
    }
}

/// A hosted checkout session issued by the payment processor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Processor-issued opaque session id
    pub id: String,

    /// Hosted payment page URL
    pub url: String,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl CheckoutSession {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            created_at: Utc::now(),
        }
    }
}

/// Redirect targets derived from the storefront's originating address
#[derive(Debug, Clone)]
pub struct RedirectUrls {
    origin: String,
}

impl RedirectUrls {
    /// Build from an origin like `https://shop.example.com`
    pub fn from_origin(origin: impl Into<String>) -> Self {
        let origin: String = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn success_url(&self) -> String {
        format!("{}?success=true", self.origin)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}?canceled=true", self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> CheckoutItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_widget_example() {
        let widget = item(json!({"name": "Widget", "price": 12.5, "color": "red"}));
        let line = LineItem::from_checkout_item(&widget, Currency::USD).unwrap();

        assert_eq!(line.name, "Widget");
        assert_eq!(line.description.as_deref(), Some("color: red"));
        assert_eq!(line.unit_amount, 1250);
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_unit_amount_boundaries() {
        let cheap = item(json!({"name": "A", "price": 19.994}));
        let dear = item(json!({"name": "B", "price": 19.995}));

        assert_eq!(
            LineItem::from_checkout_item(&cheap, Currency::USD)
                .unwrap()
                .unit_amount,
            1999
        );
        assert_eq!(
            LineItem::from_checkout_item(&dear, Currency::USD)
                .unwrap()
                .unit_amount,
            2000
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        let bad = item(json!({"name": "A", "price": -1.0}));
        assert!(matches!(
            LineItem::from_checkout_item(&bad, Currency::USD),
            Err(ShopError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_description_excludes_reserved_keys() {
        let full = item(json!({
            "name": "Game Development",
            "price": 70.0,
            "cartId": "abc123xyz",
            "id": "game",
            "type": "service",
            "image": "https://img.example/game.jpg",
            "engine": "Stormworks Lua",
            "features": ["Netcode", "AI"],
            "complexity": 2
        }));

        let desc = build_description(&full.fields).unwrap();
        assert_eq!(
            desc,
            "complexity: 2, engine: Stormworks Lua, features: Netcode, AI"
        );
        for key in RESERVED_KEYS {
            assert!(!desc.contains(key), "reserved key {} leaked", key);
        }
    }

    #[test]
    fn test_description_omits_null_and_empty_values() {
        let sparse = item(json!({
            "name": "Web Development",
            "price": 30.0,
            "projName": null,
            "addons": [],
            "stack": "Static Site"
        }));

        assert_eq!(
            build_description(&sparse.fields).as_deref(),
            Some("stack: Static Site")
        );

        let bare = item(json!({"name": "Mystery Script", "price": 5.0}));
        assert_eq!(build_description(&bare.fields), None);
    }

    #[test]
    fn test_description_renders_objects_as_json() {
        let nested = item(json!({
            "name": "X",
            "price": 1.0,
            "meta": {"a": 1}
        }));
        assert_eq!(
            build_description(&nested.fields).as_deref(),
            Some(r#"meta: {"a":1}"#)
        );
    }

    #[test]
    fn test_line_items_preserve_order() {
        let items = vec![
            item(json!({"name": "First", "price": 1.0})),
            item(json!({"name": "Second", "price": 2.0})),
            item(json!({"name": "Third", "price": 3.0})),
        ];

        let lines = build_line_items(&items, Currency::USD).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(),
            vec!["First", "Second", "Third"]
        );
        assert!(lines.iter().all(|l| l.quantity == 1));
    }

    #[test]
    fn test_empty_cart_rejected() {
        assert!(matches!(
            build_line_items(&[], Currency::USD),
            Err(ShopError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_redirect_urls() {
        let urls = RedirectUrls::from_origin("https://shop.example.com");
        assert_eq!(urls.success_url(), "https://shop.example.com?success=true");
        assert_eq!(urls.cancel_url(), "https://shop.example.com?canceled=true");

        let trailing = RedirectUrls::from_origin("http://localhost:3000/");
        assert_eq!(trailing.cancel_url(), "http://localhost:3000?canceled=true");
    }
}
