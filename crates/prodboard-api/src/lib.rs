// prodboard-api: Async Rust client for the `products` REST resource.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ProductClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{Envelope, ProductBody, ProductResponse, RecordId};
