// ── Core error types ──
//
// User-facing errors from prodboard-core. Consumers never see reqwest
// errors or JSON parse failures directly; the `From<prodboard_api::Error>`
// impl folds them into transport and application failures.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport failures ───────────────────────────────────────────
    #[error("Cannot connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Controller disconnected")]
    ControllerDisconnected,

    // ── Application failures (server answered) ───────────────────────
    /// The server's message, verbatim.
    #[error("{message}")]
    AuthenticationFailed { message: String },

    /// The server's message, verbatim.
    #[error("{message}")]
    NotFound { message: String },

    /// The server's message, verbatim.
    #[error("{message}")]
    Rejected {
        message: String,
        status: Option<u16>,
    },

    // ── Local failures ───────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::Timeout { .. } | Self::ControllerDisconnected
        )
    }

    /// The server answered with a non-success status.
    pub fn is_application(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. } | Self::NotFound { .. } | Self::Rejected { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<prodboard_api::Error> for CoreError {
    fn from(err: prodboard_api::Error) -> Self {
        match err {
            prodboard_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if let Some(status) = e.status() {
                    CoreError::Rejected {
                        message: e.to_string(),
                        status: Some(status.as_u16()),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            prodboard_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            prodboard_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            prodboard_api::Error::Unauthorized { message } => {
                CoreError::AuthenticationFailed { message }
            }
            prodboard_api::Error::Api {
                status: 404,
                message,
            } => CoreError::NotFound { message },
            prodboard_api::Error::Api { status, message } => CoreError::Rejected {
                message,
                status: Some(status),
            },
            prodboard_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
