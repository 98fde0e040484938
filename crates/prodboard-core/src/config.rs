// ── Runtime connection configuration ──
//
// These types describe *how* to reach the products API. They carry the
// credential and transport tuning but never touch disk; the CLI/TUI
// builds a `ControllerConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::view::DEFAULT_PAGE_SIZE;

/// Endpoint used when no profile or flag names one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single products API.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// API endpoint (e.g., `http://localhost:3000`). `/api/` is appended by the client.
    pub url: Url,
    /// Optional bearer token.
    pub api_token: Option<SecretString>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Rows per page for paginated views.
    pub page_size: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            api_token: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
