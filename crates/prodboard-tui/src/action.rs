//! Messages flowing through the panel's event loop.

use std::sync::Arc;

use prodboard_core::{CommandResult, CoreError, Product, Submission};

use crate::screen::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Toast shown in the top-right corner until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    fn at(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::at(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::at(NotificationLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::at(NotificationLevel::Error, message)
    }
}

/// Result of a load, flattened for display.
pub type LoadOutcome = Result<usize, String>;

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Data Events (from the controller) ─────────────────────────
    ProductsUpdated(Arc<Vec<Arc<Product>>>),
    Reload,
    LoadFinished(LoadOutcome),

    // ── Connection Status ─────────────────────────────────────────
    Connecting,
    Connected,
    Disconnected(String),

    // ── Writes ────────────────────────────────────────────────────
    Submit(Submission),
    SubmissionFinished {
        ticket: u64,
        /// `Command::verb` of the submitted write.
        verb: &'static str,
        outcome: Arc<Result<CommandResult, CoreError>>,
    },

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
