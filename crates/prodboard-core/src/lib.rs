// prodboard-core: Item collection controller between prodboard-api and consumers (CLI/TUI).

pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod modal;
pub mod model;
pub mod session;
pub mod store;
pub mod stream;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::requests::{ProductDraft, parse_price};
pub use command::{Command, CommandResult};
pub use config::{ControllerConfig, DEFAULT_ENDPOINT, TlsVerification};
pub use controller::{ConnectionState, Controller};
pub use error::CoreError;
pub use modal::{ActiveModal, ModalPhase, ModalState, ModalTarget, Submission};
pub use model::{Product, ProductId};
pub use session::Session;
pub use store::ProductStore;
pub use stream::{ProductStream, ProductWatchStream};
pub use view::{
    DEFAULT_PAGE_SIZE, PageView, PriceSummary, SortDirection, SortKey, SortState, ViewQuery,
};
