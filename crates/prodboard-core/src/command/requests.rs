// ── Form drafts ──
//
// `ProductDraft` is the raw, user-typed input for create and update.
// Price stays text until submission; `parse_price` applies
// leading-integer semantics so `"20.9"` becomes `20` and `"12 EUR"`
// becomes `12`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::Product;

/// Raw form input for the create and update workflows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            description: description.into(),
        }
    }

    /// Seed a draft from an existing product (the update form).
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
        }
    }

    /// Normalize the price field, rejecting input with no leading digits.
    pub fn parsed_price(&self) -> Result<i64, CoreError> {
        parse_price(&self.price).ok_or_else(|| CoreError::ValidationFailed {
            message: format!("price must start with a whole number, got {:?}", self.price),
        })
    }
}

/// Leading-integer parse: optional surrounding whitespace, an optional
/// sign, then decimal digits. Anything after the digits is ignored.
///
/// Returns `None` when there are no leading digits or the value does not
/// fit in an `i64`.
pub fn parse_price(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
