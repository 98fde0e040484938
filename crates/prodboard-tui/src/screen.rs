//! Screen identifiers, in sidebar order.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Products, // 1
    Overview, // 2
}

impl ScreenId {
    /// All screens in sidebar order.
    pub const ALL: [ScreenId; 2] = [Self::Products, Self::Overview];

    /// Numeric key for this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Products => 1,
            Self::Overview => 2,
        }
    }

    /// Screen from a numeric key. Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Products),
            2 => Some(Self::Overview),
            _ => None,
        }
    }

    /// Next screen in sidebar order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Overview => "Overview",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
