// ── Local collection state ──

mod collection;

pub use collection::{ProductStore, Snapshot};
