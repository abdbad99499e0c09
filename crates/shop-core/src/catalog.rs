//! # Catalog Types
//!
//! Product catalog types for the storefront.
//! The catalog is reference data, loaded from `config/products.toml`.

use crate::error::{ShopError, ShopResult};
use crate::fields::FieldSpec;
use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    CAD,
    EUR,
    GBP,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::CAD => "cad",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::CAD => "C$",
            Currency::EUR => "€",
            Currency::GBP => "£",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Convert a price in major currency units to integer minor units (cents).
///
/// Rounds half away from zero on the decimal value: the product is first
/// rounded to a tenth of a cent to cancel binary-float noise, then to whole
/// cents. So `19.994` gives `1999` and `19.995` gives `2000`, even though
/// neither has an exact f64 representation.
pub fn to_minor_units(amount: f64) -> i64 {
    let tenths_of_cents = (amount * 1000.0).round();
    (tenths_of_cents / 10.0).round() as i64
}

/// Convert from minor units back to a decimal amount
pub fn from_minor_units(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Price with amount held in minor currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in minor currency units (cents for USD)
    pub cents: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a new price from a decimal amount
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            cents: to_minor_units(amount),
            currency,
        }
    }

    /// Create a price from minor units
    pub fn from_cents(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> f64 {
        from_minor_units(self.cents)
    }

    /// Format for display (e.g., "$10.00")
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.as_decimal())
    }
}

/// Catalog item kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Custom work quoted per configuration
    Service,
    /// Recurring offering, still charged as a one-time payment at checkout
    Subscription,
    /// Fixed deliverable
    Product,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Service => "service",
            ItemKind::Subscription => "subscription",
            ItemKind::Product => "product",
        }
    }
}

/// Field-dependent surcharge rule for a catalog item.
///
/// Names a numeric field and a per-unit rate in major currency units.
/// The resolved price is `base_price + value * rate`, computed once when
/// the item is added to a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surcharge {
    /// Id of the number field that drives the surcharge
    pub field: String,
    /// Rate per field unit, in major currency units
    pub rate: f64,
}

/// A configurable item in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique item identifier (e.g., "game")
    pub id: String,

    /// Kind tag
    pub kind: ItemKind,

    /// Display name
    pub name: String,

    /// Short headline shown on the grid card
    pub headline: String,

    /// Long description
    pub description: String,

    /// Optional image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Base price in major currency units
    pub base_price: f64,

    /// Configurable field declarations, in display order
    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    /// Optional field-dependent surcharge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surcharge: Option<Surcharge>,

    /// Whether this item is available for purchase
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl CatalogItem {
    /// Find a field declaration by id
    pub fn field(&self, field_id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Resolve the price for a given surcharge field value.
    ///
    /// `surcharge_units` is the validated value of the surcharge field,
    /// or `None` when the item has no surcharge rule.
    pub fn resolved_price(&self, surcharge_units: Option<i64>, currency: Currency) -> Price {
        let amount = match (&self.surcharge, surcharge_units) {
            (Some(rule), Some(units)) => self.base_price + units as f64 * rule.rate,
            _ => self.base_price,
        };
        Price::new(amount, currency)
    }
}

/// Product catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<CatalogItem>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add an item to the catalog
    pub fn add(&mut self, item: CatalogItem) {
        self.products.push(item);
    }

    /// Find an item by id
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Find an active item by id, as an error-carrying lookup
    pub fn get_active(&self, id: &str) -> ShopResult<&CatalogItem> {
        self.products
            .iter()
            .find(|p| p.id == id && p.active)
            .ok_or_else(|| ShopError::ProductNotFound {
                product_id: id.to_string(),
            })
    }

    /// All items available for purchase
    pub fn active_products(&self) -> impl Iterator<Item = &CatalogItem> {
        self.products.iter().filter(|p| p.active)
    }

    /// Load catalog from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
