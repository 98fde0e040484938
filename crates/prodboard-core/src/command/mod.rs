// ── Command API ──
//
// All write operations flow through a unified `Command` enum. Commands are
// not serialized through a channel: each one is an independent request,
// and whichever response arrives last is the one reflected locally.

pub mod requests;

use crate::model::{Product, ProductId};

pub use requests::ProductDraft;

/// All possible write operations against the products collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { draft: ProductDraft },
    Update { id: ProductId, draft: ProductDraft },
    Delete { id: ProductId },
}

impl Command {
    /// Short verb for log lines and notifications.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Outcome of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Server-confirmed new product, appended locally.
    Created(Product),
    /// Server's canonical representation, swapped in for every match.
    Updated(Product),
    /// `removed` counts local items dropped (0 if none matched).
    Deleted { id: ProductId, removed: usize },
}
