//! # Cart Store
//!
//! In-memory cart state: an ordered collection of configured items.
//! The store is an explicit value object passed to whoever needs it; there
//! is no ambient global and no persistence, so state is lost on reload.

use crate::catalog::{from_minor_units, CatalogItem, Currency, ItemKind, Price};
use crate::error::{ShopError, ShopResult};
use crate::fields::FieldValue;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A configured item sitting in the cart.
///
/// Carries the catalog item's identity data merged with the validated
/// field values and the price resolved at add-time. The price is frozen
/// here so cart totals stay stable even if catalog data changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Cart-local identifier, used only for removal
    pub cart_id: Uuid,

    /// Catalog item id
    pub product_id: String,

    /// Kind tag
    pub kind: ItemKind,

    /// Display name
    pub name: String,

    /// Optional image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Resolved price (base plus any surcharge)
    pub price: Price,

    /// Validated field values, keyed by field id
    pub values: BTreeMap<String, FieldValue>,
}

impl CartItem {
    /// Flat wire shape consumed by the checkout endpoint.
    ///
    /// Reserved keys (`name`, `price`, `cartId`, `id`, `type`, `image`)
    /// carry the item identity; every configured field value travels under
    /// its own key. Absent values are omitted rather than sent as null.
    pub fn to_wire(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".into(), json!(self.name));
        map.insert("price".into(), json!(from_minor_units(self.price.cents)));
        map.insert("cartId".into(), json!(self.cart_id.to_string()));
        map.insert("id".into(), json!(self.product_id));
        map.insert("type".into(), json!(self.kind.as_str()));
        if let Some(ref url) = self.image_url {
            map.insert("image".into(), json!(url));
        }
        for (key, value) in &self.values {
            map.insert(
                key.clone(),
                serde_json::to_value(value).unwrap_or(Value::Null),
            );
        }
        Value::Object(map)
    }
}

/// Ordered cart of configured items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartStore {
    items: Vec<CartItem>,
    currency: Currency,
}

impl CartStore {
    /// Create an empty cart
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Configure and add a catalog item, returning the new cart-local id.
    ///
    /// Supplied values are validated against the item's field declarations;
    /// unset select and number fields take their defaults. The price is
    /// resolved here, once.
    pub fn add(
        &mut self,
        item: &CatalogItem,
        values: BTreeMap<String, FieldValue>,
    ) -> ShopResult<Uuid> {
        if !item.active {
            return Err(ShopError::InvalidRequest(format!(
                "Product is not available: {}",
                item.id
            )));
        }

        for key in values.keys() {
            if item.field(key).is_none() {
                return Err(ShopError::InvalidField {
                    field: key.clone(),
                    message: "not declared by this product".into(),
                });
            }
        }

        let mut resolved: BTreeMap<String, FieldValue> = BTreeMap::new();
        for spec in &item.fields {
            match values.get(&spec.id) {
                Some(value) => {
                    spec.validate(value)?;
                    resolved.insert(spec.id.clone(), value.clone());
                }
                None => {
                    if let Some(default) = spec.default_value() {
                        resolved.insert(spec.id.clone(), default);
                    }
                }
            }
        }

        let surcharge_units = item
            .surcharge
            .as_ref()
            .and_then(|rule| resolved.get(&rule.field))
            .and_then(FieldValue::as_number);

        let cart_id = Uuid::new_v4();
        self.items.push(CartItem {
            cart_id,
            product_id: item.id.clone(),
            kind: item.kind,
            name: item.name.clone(),
            image_url: item.image_url.clone(),
            price: item.resolved_price(surcharge_units, self.currency),
            values: resolved,
        });

        Ok(cart_id)
    }

    /// Remove an item by its cart-local id
    pub fn remove(&mut self, cart_id: Uuid) -> Option<CartItem> {
        let pos = self.items.iter().position(|i| i.cart_id == cart_id)?;
        Some(self.items.remove(pos))
    }

    /// Sum of resolved prices
    pub fn total(&self) -> Price {
        let cents: i64 = self.items.iter().map(|i| i.price.cents).sum();
        Price::from_cents(cents, self.currency)
    }

    /// Items in insertion order
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The `{ "items": [...] }` body for the checkout endpoint
    pub fn checkout_payload(&self) -> Value {
        json!({
            "items": self.items.iter().map(CartItem::to_wire).collect::<Vec<_>>()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Surcharge;
    use crate::fields::{FieldKind, FieldSpec};

    fn game_item() -> CatalogItem {
        CatalogItem {
            id: "game".into(),
            kind: ItemKind::Service,
            name: "Game Development".into(),
            headline: "High-octane logic".into(),
            description: "Game systems in Lua and C#".into(),
            image_url: Some("https://img.example/game.jpg".into()),
            base_price: 50.0,
            fields: vec![
                FieldSpec {
                    id: "engine".into(),
                    label: "Engine Architecture".into(),
                    kind: FieldKind::Select {
                        options: vec!["Unity C#".into(), "Stormworks Lua".into()],
                    },
                },
                FieldSpec {
                    id: "features".into(),
                    label: "Core Systems".into(),
                    kind: FieldKind::Multi {
                        options: vec!["Netcode".into(), "Physics".into(), "AI".into()],
                    },
                },
                FieldSpec {
                    id: "complexity".into(),
                    label: "Complexity Index".into(),
                    kind: FieldKind::Number {
                        min: 1,
                        max: 10,
                        default: 5,
                    },
                },
            ],
            surcharge: Some(Surcharge {
                field: "complexity".into(),
                rate: 10.0,
            }),
            active: true,
        }
    }

    fn mystery_item() -> CatalogItem {
        CatalogItem {
            id: "rnd_code".into(),
            kind: ItemKind::Product,
            name: "Mystery Script".into(),
            headline: "Algorithmic luck of the draw".into(),
            description: "A random utility script.".into(),
            image_url: None,
            base_price: 5.0,
            fields: vec![],
            surcharge: None,
            active: true,
        }
    }

    #[test]
    fn test_add_resolves_price_with_surcharge() {
        let mut cart = CartStore::new(Currency::USD);
        let mut values = BTreeMap::new();
        values.insert("complexity".into(), FieldValue::Number(8));

        cart.add(&game_item(), values).unwrap();

        // 50 base + 8 * 10
        assert_eq!(cart.items()[0].price.cents, 13000);
    }

    #[test]
    fn test_add_applies_defaults() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add(&game_item(), BTreeMap::new()).unwrap();

        let item = &cart.items()[0];
        assert_eq!(
            item.values.get("engine"),
            Some(&FieldValue::Text("Unity C#".into()))
        );
        assert_eq!(item.values.get("complexity"), Some(&FieldValue::Number(5)));
        // multi fields have no implicit value
        assert!(item.values.get("features").is_none());
        // default complexity 5 drives the surcharge
        assert_eq!(item.price.cents, 10000);
    }

    #[test]
    fn test_add_rejects_invalid_values() {
        let mut cart = CartStore::new(Currency::USD);

        let mut values = BTreeMap::new();
        values.insert("complexity".into(), FieldValue::Number(11));
        assert!(cart.add(&game_item(), values).is_err());

        let mut values = BTreeMap::new();
        values.insert("warranty".into(), FieldValue::Text("extended".into()));
        assert!(matches!(
            cart.add(&game_item(), values),
            Err(ShopError::InvalidField { .. })
        ));

        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_inactive_product() {
        let mut item = mystery_item();
        item.active = false;

        let mut cart = CartStore::new(Currency::USD);
        assert!(cart.add(&item, BTreeMap::new()).is_err());
    }

    #[test]
    fn test_remove_by_cart_id() {
        let mut cart = CartStore::new(Currency::USD);
        let first = cart.add(&mystery_item(), BTreeMap::new()).unwrap();
        let second = cart.add(&mystery_item(), BTreeMap::new()).unwrap();
        assert_ne!(first, second);

        let removed = cart.remove(first).unwrap();
        assert_eq!(removed.cart_id, first);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].cart_id, second);

        assert!(cart.remove(first).is_none());
    }

    #[test]
    fn test_total_is_stable_after_catalog_change() {
        let mut item = mystery_item();
        let mut cart = CartStore::new(Currency::USD);
        cart.add(&item, BTreeMap::new()).unwrap();

        // catalog repricing after the fact must not move the cart total
        item.base_price = 99.0;
        cart.add(&item, BTreeMap::new()).unwrap();

        assert_eq!(cart.total().cents, 500 + 9900);
        assert_eq!(cart.items()[0].price.cents, 500);
    }

    #[test]
    fn test_wire_shape() {
        let mut cart = CartStore::new(Currency::USD);
        let mut values = BTreeMap::new();
        values.insert("engine".into(), FieldValue::Text("Stormworks Lua".into()));
        values.insert(
            "features".into(),
            FieldValue::List(vec!["Netcode".into(), "AI".into()]),
        );
        values.insert("complexity".into(), FieldValue::Number(2));
        cart.add(&game_item(), values).unwrap();

        let wire = cart.items()[0].to_wire();
        assert_eq!(wire["name"], "Game Development");
        assert_eq!(wire["price"], 70.0);
        assert_eq!(wire["id"], "game");
        assert_eq!(wire["type"], "service");
        assert_eq!(wire["image"], "https://img.example/game.jpg");
        assert_eq!(wire["engine"], "Stormworks Lua");
        assert_eq!(wire["features"], json!(["Netcode", "AI"]));
        assert_eq!(wire["complexity"], 2);
        assert!(wire["cartId"].is_string());

        let payload = cart.checkout_payload();
        assert_eq!(payload["items"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_wire_omits_absent_image() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add(&mystery_item(), BTreeMap::new()).unwrap();

        let wire = cart.items()[0].to_wire();
        assert!(wire.get("image").is_none());
    }
}
