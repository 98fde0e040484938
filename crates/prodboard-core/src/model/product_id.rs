// ── Product identity ──
//
// Identifiers are assigned by the remote store and never invented locally.
// The store may hand out numbers or strings; both are kept as received.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned product identifier.
///
/// Ordering: numeric ids compare numerically, string ids lexicographically,
/// and every numeric id sorts before every string id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl Ord for ProductId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for ProductId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Integers parse as `Number`, anything else as `Text`.
impl FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_owned()), Self::Number))
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_compare_by_value() {
        assert!(ProductId::Number(2) < ProductId::Number(10));
    }

    #[test]
    fn string_ids_compare_lexicographically() {
        assert!(ProductId::from("10") < ProductId::from("2"));
    }

    #[test]
    fn numbers_sort_before_strings() {
        let mut ids = vec![
            ProductId::from("a"),
            ProductId::Number(5),
            ProductId::from("B"),
            ProductId::Number(-1),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                ProductId::Number(-1),
                ProductId::Number(5),
                ProductId::from("B"),
                ProductId::from("a"),
            ]
        );
    }

    #[test]
    fn parse_prefers_numbers() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::Number(42));
        assert_eq!(
            "sku-42".parse::<ProductId>().unwrap(),
            ProductId::from("sku-42")
        );
    }
}
