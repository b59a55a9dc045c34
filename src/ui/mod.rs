//! Presentation controllers
//!
//! The popup and full-report surfaces. Controllers hold view state and talk
//! to the host platform through the [`Clipboard`] and [`ViewLauncher`]
//! traits; rendering frameworks consume the view models they expose.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;

pub mod output;
pub mod popup;

#[cfg(test)]
mod tests;

pub use output::{ReportView, ReportViewController};
pub use popup::{PopupController, PopupView};

/// How long terminal status messages stay visible before auto-dismissal.
pub const STATUS_DISMISS_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
#[error("clipboard error: {0}")]
pub struct ClipboardError(pub String);

/// Writes a single string to the system clipboard. Failure is reported to
/// the user, never fatal to the surrounding flow.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Opens the full-report view in a new top-level surface. No parameters are
/// passed; the view reads the last report from storage.
#[async_trait]
pub trait ViewLauncher: Send + Sync {
    async fn open_report_view(&self) -> anyhow::Result<()>;
}

/// Export formats offered by the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON of the full report.
    Json,
    /// The Markdown document with bracketed issue blocks.
    Formatted,
}

/// Tone of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Scanning,
    Success,
    Error,
}

/// A transient status line shown on the popup.
///
/// Terminal states (success, error) auto-dismiss after
/// [`STATUS_DISMISS_AFTER`]; a scanning status stays until replaced.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    expires_at: Option<Instant>,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        let expires_at = match kind {
            StatusKind::Scanning => None,
            StatusKind::Success | StatusKind::Error => {
                Some(Instant::now() + STATUS_DISMISS_AFTER)
            }
        };
        Self {
            text: text.into(),
            kind,
            expires_at,
        }
    }

    /// Whether the auto-dismiss deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}
