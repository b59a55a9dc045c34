//! Popup surface controller.
//!
//! Drives the scan button: triggers a scan through the coordinator,
//! persists the result as the last report, and offers clipboard export and
//! navigation to the full-report view.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::messaging::TargetId;
use crate::report::{ScanReport, format_report, to_pretty_json};
use crate::scan::ScanCoordinator;
use crate::storage::ReportStore;

use super::{Clipboard, ExportFormat, StatusKind, StatusMessage, ViewLauncher};

/// What the popup renders: counts from the last report and control state.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub failed_count: usize,
    pub review_count: usize,
    /// Whether a report exists to show and export.
    pub has_results: bool,
    /// The scan control is disabled while a scan is in flight.
    pub scan_disabled: bool,
}

/// Controller behind the popup surface.
///
/// Holds the in-memory last-report slot for this popup session. At most one
/// scan is in flight at a time per controller; a second surface with its
/// own controller racing on the storage slot is an accepted last-wins race.
pub struct PopupController {
    coordinator: Arc<ScanCoordinator>,
    store: Arc<dyn ReportStore>,
    clipboard: Arc<dyn Clipboard>,
    launcher: Arc<dyn ViewLauncher>,
    last_report: Mutex<Option<ScanReport>>,
    scanning: AtomicBool,
    status: Mutex<Option<StatusMessage>>,
}

impl PopupController {
    pub fn new(
        coordinator: Arc<ScanCoordinator>,
        store: Arc<dyn ReportStore>,
        clipboard: Arc<dyn Clipboard>,
        launcher: Arc<dyn ViewLauncher>,
    ) -> Self {
        Self {
            coordinator,
            store,
            clipboard,
            launcher,
            last_report: Mutex::new(None),
            scanning: AtomicBool::new(false),
            status: Mutex::new(None),
        }
    }

    /// Load the persisted last report into this session, if one exists.
    /// Startup path; a storage failure leaves the popup empty rather than
    /// blocking it.
    pub async fn load_last_report(&self) {
        match self.store.load_last_report().await {
            Ok(Some(report)) => {
                *self.last_report.lock().expect("popup report lock poisoned") = Some(report);
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "failed to load last scan report"),
        }
    }

    /// Whether a scan is currently in flight.
    pub fn is_scanning(&self) -> bool {
        self.scanning.load(Ordering::SeqCst)
    }

    /// Current status message, if any and not yet auto-dismissed.
    pub fn status(&self) -> Option<StatusMessage> {
        let status = self.status.lock().expect("popup status lock poisoned");
        status.clone().filter(|s| !s.is_expired())
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> PopupView {
        let report = self.last_report.lock().expect("popup report lock poisoned");
        let (failed_count, review_count) = report
            .as_ref()
            .map(|r| {
                (
                    r.summary.total_automated_failures,
                    r.summary.total_needs_review,
                )
            })
            .unwrap_or((0, 0));
        PopupView {
            failed_count,
            review_count,
            has_results: report.is_some(),
            scan_disabled: self.is_scanning(),
        }
    }

    /// Scan the given page and persist the result as the last report.
    ///
    /// Ignored while a scan is already in flight (the control is disabled).
    /// A persist failure is surfaced as status text but does not discard
    /// the results already in hand.
    pub async fn scan_page(&self, target: TargetId) {
        if self.scanning.swap(true, Ordering::SeqCst) {
            debug!("scan already in flight, ignoring request");
            return;
        }
        self.set_status("Scanning page...", StatusKind::Scanning);

        match self.coordinator.scan(target).await {
            Ok(report) => {
                let persisted = self.store.save_last_report(&report).await;
                *self.last_report.lock().expect("popup report lock poisoned") = Some(report);
                match persisted {
                    Ok(()) => {
                        self.set_status("Scan completed successfully!", StatusKind::Success)
                    }
                    Err(error) => {
                        warn!(%error, "failed to persist scan report");
                        self.set_status(
                            format!("Scan completed but results could not be saved: {error}"),
                            StatusKind::Error,
                        );
                    }
                }
            }
            Err(error) => {
                self.set_status(format!("Scan failed: {error}"), StatusKind::Error);
            }
        }

        self.scanning.store(false, Ordering::SeqCst);
    }

    /// Copy the last report to the clipboard in the requested format.
    pub async fn copy_to_clipboard(&self, export: ExportFormat) {
        let report = self
            .last_report
            .lock()
            .expect("popup report lock poisoned")
            .clone();
        let Some(report) = report else {
            self.set_status("No scan results to copy", StatusKind::Error);
            return;
        };

        let text = match export {
            ExportFormat::Json => match to_pretty_json(&report) {
                Ok(json) => json,
                Err(error) => {
                    warn!(%error, "failed to serialize report");
                    self.set_status("Failed to copy to clipboard", StatusKind::Error);
                    return;
                }
            },
            ExportFormat::Formatted => format_report(&report),
        };

        match self.clipboard.write(&text).await {
            Ok(()) => self.set_status("Copied!", StatusKind::Success),
            Err(error) => {
                warn!(%error, "clipboard write failed");
                self.set_status("Failed to copy to clipboard", StatusKind::Error);
            }
        }
    }

    /// Open the full-report view.
    pub async fn open_details(&self) {
        if let Err(error) = self.launcher.open_report_view().await {
            warn!(%error, "failed to open report view");
            self.set_status("Failed to open details page", StatusKind::Error);
        }
    }

    fn set_status(&self, text: impl Into<String>, kind: StatusKind) {
        *self.status.lock().expect("popup status lock poisoned") =
            Some(StatusMessage::new(text, kind));
    }
}
