// ── API-to-domain type conversions ──
//
// Bridges `prodboard_api` wire types and `prodboard_core::model` domain
// types in both directions.

use prodboard_api::{ProductBody, ProductResponse, RecordId};

use crate::command::ProductDraft;
use crate::error::CoreError;
use crate::model::{Product, ProductId};

impl From<RecordId> for ProductId {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Number(n) => Self::Number(n),
            RecordId::Text(s) => Self::Text(s),
        }
    }
}

impl From<&ProductId> for RecordId {
    fn from(id: &ProductId) -> Self {
        match id {
            ProductId::Number(n) => Self::Number(*n),
            ProductId::Text(s) => Self::Text(s.clone()),
        }
    }
}

impl From<ProductResponse> for Product {
    fn from(p: ProductResponse) -> Self {
        Self {
            id: p.id.into(),
            name: p.name,
            price: p.price,
            description: p.description.unwrap_or_default(),
        }
    }
}

/// Validate a draft and build the request body.
pub(crate) fn draft_to_body(draft: &ProductDraft) -> Result<ProductBody, CoreError> {
    Ok(ProductBody {
        name: draft.name.clone(),
        price: draft.parsed_price()?,
        description: draft.description.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn draft_price_is_truncated_in_body() {
        let body = draft_to_body(&ProductDraft::new("C", "20.9", "x")).unwrap();
        assert_eq!(body.price, 20);
        assert_eq!(body.name, "C");
        assert_eq!(body.description, "x");
    }

    #[test]
    fn invalid_draft_yields_no_body() {
        assert!(draft_to_body(&ProductDraft::new("C", "n/a", "x")).is_err());
    }

    #[test]
    fn ids_survive_the_trip() {
        let text = ProductId::from("abc");
        assert_eq!(ProductId::from(RecordId::from(&text)), text);
        assert_eq!(
            ProductId::from(RecordId::Number(9)),
            ProductId::Number(9)
        );
    }
}
