//! # Configurable Fields
//!
//! Per-item configuration declared by the catalog and filled in by the
//! customer. Values are validated against the declaration before they are
//! persisted into a cart item.

use crate::error::{ShopError, ShopResult};
use serde::{Deserialize, Serialize};

/// Kind-specific constraints of a configurable field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    /// Single choice from an option set
    Select { options: Vec<String> },

    /// Any subset of an option set
    Multi { options: Vec<String> },

    /// Free text
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },

    /// Bounded integer
    Number { min: i64, max: i64, default: i64 },
}

/// A configurable field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field identifier, also the key under which the value travels
    pub id: String,

    /// Display label
    pub label: String,

    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Value used when the customer leaves the field untouched.
    ///
    /// Selects fall back to their first option and numbers to their
    /// declared default; multi and text fields have no implicit value.
    pub fn default_value(&self) -> Option<FieldValue> {
        match &self.kind {
            FieldKind::Select { options } => {
                options.first().map(|o| FieldValue::Text(o.clone()))
            }
            FieldKind::Number { default, .. } => Some(FieldValue::Number(*default)),
            FieldKind::Multi { .. } | FieldKind::Text { .. } => None,
        }
    }

    /// Check a user-supplied value against this declaration
    pub fn validate(&self, value: &FieldValue) -> ShopResult<()> {
        match (&self.kind, value) {
            (FieldKind::Select { options }, FieldValue::Text(choice)) => {
                if options.iter().any(|o| o == choice) {
                    Ok(())
                } else {
                    Err(self.invalid(format!("'{}' is not one of the options", choice)))
                }
            }
            (FieldKind::Multi { options }, FieldValue::List(choices)) => {
                match choices.iter().find(|c| !options.contains(*c)) {
                    Some(bad) => Err(self.invalid(format!("'{}' is not one of the options", bad))),
                    None => Ok(()),
                }
            }
            (FieldKind::Text { .. }, FieldValue::Text(_)) => Ok(()),
            (FieldKind::Number { min, max, .. }, FieldValue::Number(n)) => {
                if n < min {
                    Err(self.invalid(format!("value {} is below min {}", n, min)))
                } else if n > max {
                    Err(self.invalid(format!("value {} is above max {}", n, max)))
                } else {
                    Ok(())
                }
            }
            (_, other) => Err(self.invalid(format!("unexpected value type: {:?}", other))),
        }
    }

    fn invalid(&self, message: String) -> ShopError {
        ShopError::InvalidField {
            field: self.id.clone(),
            message,
        }
    }
}

/// A user-chosen field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    List(Vec<String>),
    Text(String),
}

impl FieldValue {
    /// Integer view, for surcharge resolution
    pub fn as_number(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}
