// ── Item collection controller ──
//
// Owns the local product collection and keeps it consistent with the
// remote one. Local state only ever trails a successful response: loads
// replace the collection, creates append, updates swap by id, deletes
// remove by id. Failures are logged and returned, leaving state untouched.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use prodboard_api::transport::{TlsMode, TransportConfig};
use prodboard_api::{ProductClient, RecordId};

use crate::command::{Command, CommandResult, ProductDraft};
use crate::config::{ControllerConfig, TlsVerification};
use crate::convert::draft_to_body;
use crate::error::CoreError;
use crate::model::{Product, ProductId};
use crate::store::ProductStore;
use crate::stream::ProductStream;

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Commands are not queued:
/// each runs as soon as it is called, so concurrent commands race and the
/// last response to arrive decides the local state.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    store: Arc<ProductStore>,
    connection_state: watch::Sender<ConnectionState>,
    client: Mutex<Option<ProductClient>>,
}

impl Controller {
    /// Create a new Controller from configuration. Does NOT connect --
    /// call [`connect()`](Self::connect) to build the HTTP client.
    pub fn new(config: ControllerConfig) -> Self {
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);

        Self {
            inner: Arc::new(ControllerInner {
                config,
                store: Arc::new(ProductStore::new()),
                connection_state,
                client: Mutex::new(None),
            }),
        }
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// Access the underlying store.
    pub fn store(&self) -> &Arc<ProductStore> {
        &self.inner.store
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Build the HTTP client. No request is sent; call
    /// [`load()`](Self::load) to fetch the collection.
    pub async fn connect(&self) -> Result<(), CoreError> {
        self.inner
            .connection_state
            .send_replace(ConnectionState::Connecting);

        let config = &self.inner.config;
        let transport = build_transport(config);

        match ProductClient::new(config.url.as_str(), &transport) {
            Ok(client) => {
                debug!(base_url = %client.base_url(), "HTTP client ready");
                *self.inner.client.lock().await = Some(client);
                self.inner
                    .connection_state
                    .send_replace(ConnectionState::Connected);
                info!(url = %config.url, "connected");
                Ok(())
            }
            Err(e) => {
                self.inner
                    .connection_state
                    .send_replace(ConnectionState::Failed);
                warn!(error = %e, "failed to build HTTP client");
                Err(self.lift(e))
            }
        }
    }

    /// Drop the HTTP client. The local collection is kept.
    pub async fn disconnect(&self) {
        *self.inner.client.lock().await = None;
        self.inner
            .connection_state
            .send_replace(ConnectionState::Disconnected);
        debug!("disconnected");
    }

    // ── Load ─────────────────────────────────────────────────────

    /// Fetch the full collection and replace local state with it.
    ///
    /// On failure the collection is left as it was and the error returned.
    /// There is no retry. Returns the number of products loaded.
    pub async fn load(&self) -> Result<usize, CoreError> {
        let client = self.client().await?;
        match client.list_products().await {
            Ok(products) => {
                let products: Vec<Product> = products.into_iter().map(Product::from).collect();
                let count = products.len();
                self.inner.store.replace_all(products);
                debug!(count, "collection loaded");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "failed to load products");
                Err(self.lift(e))
            }
        }
    }

    // ── Command execution ────────────────────────────────────────

    /// Execute a command against the API and patch the collection on success.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        let verb = cmd.verb();
        let result = self.route(cmd).await;
        if let Err(ref e) = result {
            warn!(error = %e, "{verb} failed");
        }
        result
    }

    async fn route(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        let client = self.client().await?;
        let store = &self.inner.store;

        match cmd {
            Command::Create { draft } => {
                let body = draft_to_body(&draft)?;
                let created = Product::from(
                    client
                        .create_product(&body)
                        .await
                        .map_err(|e| self.lift(e))?,
                );
                store.append(created.clone());
                debug!(id = %created.id, "product created");
                Ok(CommandResult::Created(created))
            }
            Command::Update { id, draft } => {
                let body = draft_to_body(&draft)?;
                let updated = Product::from(
                    client
                        .update_product(&RecordId::from(&id), &body)
                        .await
                        .map_err(|e| self.lift(e))?,
                );
                let replaced = store.replace_by_id(&id, updated.clone());
                debug!(%id, replaced, "product updated");
                Ok(CommandResult::Updated(updated))
            }
            Command::Delete { id } => {
                client
                    .delete_product(&RecordId::from(&id))
                    .await
                    .map_err(|e| self.lift(e))?;
                let removed = store.remove_by_id(&id);
                debug!(%id, removed, "product deleted");
                Ok(CommandResult::Deleted { id, removed })
            }
        }
    }

    pub async fn create(&self, draft: ProductDraft) -> Result<Product, CoreError> {
        match self.execute(Command::Create { draft }).await? {
            CommandResult::Created(p) => Ok(p),
            other => Err(unexpected(&other)),
        }
    }

    pub async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, CoreError> {
        match self.execute(Command::Update { id, draft }).await? {
            CommandResult::Updated(p) => Ok(p),
            other => Err(unexpected(&other)),
        }
    }

    /// Returns how many local entries were removed.
    pub async fn delete(&self, id: ProductId) -> Result<usize, CoreError> {
        match self.execute(Command::Delete { id }).await? {
            CommandResult::Deleted { removed, .. } => Ok(removed),
            other => Err(unexpected(&other)),
        }
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: connect, run closure, disconnect.
    ///
    /// The closure decides whether to `load()`; write-only commands can
    /// skip the initial fetch. Errors from `connect()` are converted into
    /// the closure's error type.
    pub async fn oneshot<F, Fut, T, E>(config: ControllerConfig, f: F) -> Result<T, E>
    where
        F: FnOnce(Controller) -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: From<CoreError>,
    {
        let controller = Controller::new(config);
        controller.connect().await?;
        let result = f(controller.clone()).await;
        controller.disconnect().await;
        result
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    /// Subscribe to collection snapshots.
    pub fn products(&self) -> ProductStream {
        ProductStream::new(self.inner.store.subscribe())
    }

    pub fn products_snapshot(&self) -> Arc<Vec<Arc<Product>>> {
        self.inner.store.snapshot()
    }

    /// First product whose id renders as `raw` (so `"3"` finds both
    /// numeric 3 and string "3").
    pub fn find_product(&self, raw: &str) -> Option<Arc<Product>> {
        self.inner
            .store
            .snapshot()
            .iter()
            .find(|p| p.id.to_string() == raw)
            .cloned()
    }

    // ── Private helpers ──────────────────────────────────────────

    async fn client(&self) -> Result<ProductClient, CoreError> {
        self.inner
            .client
            .lock()
            .await
            .clone()
            .ok_or(CoreError::ControllerDisconnected)
    }

    /// Convert an API error, filling in the configured timeout.
    fn lift(&self, err: prodboard_api::Error) -> CoreError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.inner.config.timeout.as_secs(),
            },
            other => other,
        }
    }
}

fn unexpected(result: &CommandResult) -> CoreError {
    CoreError::Internal(format!("unexpected command result: {result:?}"))
}

fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
        bearer_token: config.api_token.clone(),
    }
}
