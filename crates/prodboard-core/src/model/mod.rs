// ── Domain model ──
//
// Canonical product types consumed by the CLI and TUI. Wire types from
// prodboard-api are converted into these in `convert.rs`.

pub mod product;
pub mod product_id;

pub use product::Product;
pub use product_id::ProductId;
