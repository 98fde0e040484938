// Wire types for the `products` resource.
//
// Field names match the JSON exchanged with the server verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote store.
///
/// The server may use numeric or string ids; both are accepted and
/// rendered back into request paths exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Success envelope: every non-delete response wraps its payload in `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// A product as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: RecordId,
    pub name: String,
    pub price: i64,
    /// Missing and `null` both arrive as `None`.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for `POST` and `PUT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductBody {
    pub name: String,
    pub price: i64,
    pub description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn record_id_accepts_numbers_and_strings() {
        let n: RecordId = serde_json::from_str("7").unwrap();
        let s: RecordId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(n, RecordId::Number(7));
        assert_eq!(s, RecordId::Text("abc-1".into()));
        assert_eq!(n.to_string(), "7");
        assert_eq!(s.to_string(), "abc-1");
    }

    #[test]
    fn product_without_description_defaults_to_empty() {
        let p: ProductResponse =
            serde_json::from_str(r#"{"id":1,"name":"A","price":10}"#).unwrap();
        assert_eq!(p.description, None);
    }

    #[test]
    fn null_description_is_accepted() {
        let p: ProductResponse =
            serde_json::from_str(r#"{"id":2,"name":"B","price":5,"description":null}"#).unwrap();
        assert_eq!(p.description, None);
    }

    #[test]
    fn product_body_wire_shape() {
        let body = ProductBody {
            name: "Desk".into(),
            price: 150,
            description: "Oak, 160cm".into(),
        };
        insta::assert_json_snapshot!(body, @r#"
        {
          "name": "Desk",
          "price": 150,
          "description": "Oak, 160cm"
        }
        "#);
    }
}
