//! Presentation controller tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::output::{EMPTY_STATE_MESSAGE, ReportView, ReportViewController, SectionTone};
use super::*;
use crate::engine::{RawFinding, RawIncomplete, RawNode, RawScanResults, RawViolations};
use crate::messaging::{ExecuteScanResponse, TargetId};
use crate::report::{ScanReport, Severity, normalize};
use crate::scan::{PageMessenger, ScanCoordinator, ScriptInjector};
use crate::storage::{MemoryStore, ReportStore, StorageError};

struct OkInjector;

#[async_trait]
impl ScriptInjector for OkInjector {
    async fn inject(&self, _target: TargetId, _files: &[&str]) -> anyhow::Result<()> {
        Ok(())
    }
}

struct DeniedInjector;

#[async_trait]
impl ScriptInjector for DeniedInjector {
    async fn inject(&self, _target: TargetId, _files: &[&str]) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("cannot access restricted page"))
    }
}

struct CannedMessenger {
    reply: ExecuteScanResponse,
}

#[async_trait]
impl PageMessenger for CannedMessenger {
    async fn wait_ready(&self, _target: TargetId) {}

    async fn request_scan(&self, _target: TargetId) -> Option<ExecuteScanResponse> {
        Some(self.reply.clone())
    }
}

#[derive(Default)]
struct FakeClipboard {
    writes: Mutex<Vec<String>>,
    fail: bool,
}

impl FakeClipboard {
    fn failing() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn last_write(&self) -> Option<String> {
        self.writes.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Clipboard for FakeClipboard {
    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError("clipboard unavailable".to_string()));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct FakeLauncher {
    opened: Mutex<usize>,
    fail: bool,
}

#[async_trait]
impl ViewLauncher for FakeLauncher {
    async fn open_report_view(&self) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("window creation denied");
        }
        *self.opened.lock().unwrap() += 1;
        Ok(())
    }
}

struct FailingStore;

#[async_trait]
impl ReportStore for FailingStore {
    async fn load_last_report(&self) -> Result<Option<ScanReport>, StorageError> {
        Err(StorageError("backend unavailable".to_string()))
    }

    async fn save_last_report(&self, _report: &ScanReport) -> Result<(), StorageError> {
        Err(StorageError("backend unavailable".to_string()))
    }
}

fn sample_raw_results() -> RawScanResults {
    RawScanResults {
        automated: Some(RawViolations {
            violations: vec![RawFinding {
                id: "image-alt".to_string(),
                description: "Images must have alt text".to_string(),
                help: Some("Add alt attribute".to_string()),
                help_url: None,
                impact: Some("critical".to_string()),
                tags: Vec::new(),
                nodes: vec![RawNode {
                    target: vec!["img.logo".to_string()],
                    html: "<img>".to_string(),
                }],
            }],
        }),
        needs_review: Some(RawIncomplete {
            incomplete: vec![RawFinding {
                id: "color-contrast".to_string(),
                description: "Contrast may be insufficient".to_string(),
                help: None,
                help_url: None,
                impact: None,
                tags: Vec::new(),
                nodes: vec![RawNode {
                    target: vec!["p.fine".to_string()],
                    html: "<p class=\"fine\">".to_string(),
                }],
            }],
        }),
    }
}

fn sample_report() -> ScanReport {
    normalize(&sample_raw_results(), "https://example.com")
}

struct PopupHarness {
    popup: PopupController,
    store: Arc<MemoryStore>,
    clipboard: Arc<FakeClipboard>,
    launcher: Arc<FakeLauncher>,
}

fn popup_with(injector: Arc<dyn ScriptInjector>, clipboard: FakeClipboard) -> PopupHarness {
    let coordinator = Arc::new(ScanCoordinator::new(
        injector,
        Arc::new(CannedMessenger {
            reply: ExecuteScanResponse::ok(sample_raw_results(), "https://example.com"),
        }),
    ));
    let store = Arc::new(MemoryStore::new());
    let clipboard = Arc::new(clipboard);
    let launcher = Arc::new(FakeLauncher::default());
    let popup = PopupController::new(
        coordinator,
        store.clone(),
        clipboard.clone(),
        launcher.clone(),
    );
    PopupHarness {
        popup,
        store,
        clipboard,
        launcher,
    }
}

#[tokio::test]
async fn popup_scan_persists_report_and_updates_counts() {
    let h = popup_with(Arc::new(OkInjector), FakeClipboard::default());
    h.popup.scan_page(1).await;

    let view = h.popup.view();
    assert_eq!(view.failed_count, 1);
    assert_eq!(view.review_count, 1);
    assert!(view.has_results);
    assert!(!view.scan_disabled);

    let status = h.popup.status().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.text, "Scan completed successfully!");

    let persisted = h.store.load_last_report().await.unwrap().unwrap();
    assert_eq!(persisted.summary.total_automated_failures, 1);
}

#[tokio::test]
async fn popup_scan_failure_shows_error_status() {
    let h = popup_with(Arc::new(DeniedInjector), FakeClipboard::default());
    h.popup.scan_page(1).await;

    let view = h.popup.view();
    assert!(!view.has_results);
    assert!(!view.scan_disabled);

    let status = h.popup.status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.starts_with("Scan failed:"));
    assert!(h.store.load_last_report().await.unwrap().is_none());
}

#[tokio::test]
async fn popup_persist_failure_keeps_results_in_hand() {
    let coordinator = Arc::new(ScanCoordinator::new(
        Arc::new(OkInjector),
        Arc::new(CannedMessenger {
            reply: ExecuteScanResponse::ok(sample_raw_results(), "https://example.com"),
        }),
    ));
    let popup = PopupController::new(
        coordinator,
        Arc::new(FailingStore),
        Arc::new(FakeClipboard::default()),
        Arc::new(FakeLauncher::default()),
    );

    popup.scan_page(1).await;

    // Results still display even though the persist failed.
    let view = popup.view();
    assert!(view.has_results);
    assert_eq!(view.failed_count, 1);

    let status = popup.status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("could not be saved"));
}

#[tokio::test]
async fn popup_loads_persisted_report_at_startup() {
    let h = popup_with(Arc::new(OkInjector), FakeClipboard::default());
    h.store.save_last_report(&sample_report()).await.unwrap();

    h.popup.load_last_report().await;
    let view = h.popup.view();
    assert!(view.has_results);
    assert_eq!(view.failed_count, 1);
}

#[tokio::test]
async fn popup_copy_without_results_is_an_error() {
    let h = popup_with(Arc::new(OkInjector), FakeClipboard::default());
    h.popup.copy_to_clipboard(ExportFormat::Json).await;

    assert_eq!(h.popup.status().unwrap().text, "No scan results to copy");
    assert!(h.clipboard.last_write().is_none());
}

#[tokio::test]
async fn popup_copies_json_export() {
    let h = popup_with(Arc::new(OkInjector), FakeClipboard::default());
    h.popup.scan_page(1).await;
    h.popup.copy_to_clipboard(ExportFormat::Json).await;

    let copied = h.clipboard.last_write().unwrap();
    let report: ScanReport = serde_json::from_str(&copied).unwrap();
    assert_eq!(report.summary.total_automated_failures, 1);
}

#[tokio::test]
async fn popup_copies_formatted_export() {
    let h = popup_with(Arc::new(OkInjector), FakeClipboard::default());
    h.popup.scan_page(1).await;
    h.popup.copy_to_clipboard(ExportFormat::Formatted).await;

    let copied = h.clipboard.last_write().unwrap();
    assert!(copied.starts_with("# Accessibility Scan Report"));
    assert!(copied.contains("[WCAG]"));
}

#[tokio::test]
async fn popup_clipboard_failure_does_not_drop_results() {
    let h = popup_with(Arc::new(OkInjector), FakeClipboard::failing());
    h.popup.scan_page(1).await;
    h.popup.copy_to_clipboard(ExportFormat::Formatted).await;

    assert_eq!(
        h.popup.status().unwrap().text,
        "Failed to copy to clipboard"
    );
    assert!(h.popup.view().has_results);
}

#[tokio::test]
async fn popup_opens_report_view() {
    let h = popup_with(Arc::new(OkInjector), FakeClipboard::default());
    h.popup.open_details().await;
    assert_eq!(*h.launcher.opened.lock().unwrap(), 1);
}

#[tokio::test]
async fn popup_launcher_failure_is_status_text() {
    let coordinator = Arc::new(ScanCoordinator::new(
        Arc::new(OkInjector),
        Arc::new(CannedMessenger {
            reply: ExecuteScanResponse::err("unused"),
        }),
    ));
    let popup = PopupController::new(
        coordinator,
        Arc::new(MemoryStore::new()),
        Arc::new(FakeClipboard::default()),
        Arc::new(FakeLauncher {
            opened: Mutex::new(0),
            fail: true,
        }),
    );

    popup.open_details().await;
    assert_eq!(
        popup.status().unwrap().text,
        "Failed to open details page"
    );
}

#[tokio::test(start_paused = true)]
async fn scanning_status_outlives_the_dismiss_deadline() {
    let scanning = StatusMessage::new("Scanning page...", StatusKind::Scanning);
    let terminal = StatusMessage::new("Scan completed successfully!", StatusKind::Success);
    assert!(!scanning.is_expired());
    assert!(!terminal.is_expired());

    tokio::time::sleep(STATUS_DISMISS_AFTER * 2).await;
    assert!(!scanning.is_expired());
    assert!(terminal.is_expired());
}

#[tokio::test(start_paused = true)]
async fn popup_terminal_status_auto_dismisses() {
    let h = popup_with(Arc::new(OkInjector), FakeClipboard::default());
    h.popup.scan_page(1).await;
    assert_eq!(h.popup.status().unwrap().kind, StatusKind::Success);

    tokio::time::sleep(STATUS_DISMISS_AFTER + std::time::Duration::from_millis(100)).await;
    assert!(h.popup.status().is_none());
    // Only the status line goes away; the results stay.
    assert!(h.popup.view().has_results);
}

#[tokio::test]
async fn report_view_renders_empty_state_without_a_report() {
    let controller = ReportViewController::new(
        Arc::new(MemoryStore::new()),
        Arc::new(FakeClipboard::default()),
    );
    controller.load().await;

    match controller.view() {
        ReportView::Empty { message } => assert_eq!(message, EMPTY_STATE_MESSAGE),
        other => panic!("expected empty state, got {other:?}"),
    }
}

#[tokio::test]
async fn report_view_renders_empty_state_on_storage_failure() {
    let controller =
        ReportViewController::new(Arc::new(FailingStore), Arc::new(FakeClipboard::default()));
    controller.load().await;

    assert!(matches!(controller.view(), ReportView::Empty { .. }));
}

async fn loaded_controller() -> (ReportViewController, Arc<FakeClipboard>) {
    let store = Arc::new(MemoryStore::new());
    store.save_last_report(&sample_report()).await.unwrap();
    let clipboard = Arc::new(FakeClipboard::default());
    let controller = ReportViewController::new(store, clipboard.clone());
    controller.load().await;
    (controller, clipboard)
}

#[tokio::test]
async fn report_view_groups_issues_by_category_with_badges() {
    let (controller, _clipboard) = loaded_controller().await;

    let ReportView::Loaded {
        url,
        total_failed,
        total_review,
        sections,
        ..
    } = controller.view()
    else {
        panic!("expected loaded view");
    };

    assert_eq!(url, "https://example.com");
    assert_eq!(total_failed, 1);
    assert_eq!(total_review, 1);
    assert_eq!(sections.len(), 2);

    let automated = &sections[0];
    assert_eq!(automated.title, "Failed Automated Checks (1)");
    assert_eq!(automated.tone, SectionTone::Error);
    assert_eq!(automated.items[0].id, "automated-0");
    assert_eq!(automated.items[0].severity, Severity::Blocker);
    assert_eq!(automated.items[0].snippet_html, "&lt;img&gt;");

    let review = &sections[1];
    assert_eq!(review.title, "Items Needing Manual Review (1)");
    assert_eq!(review.tone, SectionTone::Warning);
    assert_eq!(review.items[0].id, "review-0");
    assert_eq!(review.items[0].severity, Severity::Medium);
}

#[tokio::test]
async fn report_view_rows_toggle() {
    let (controller, _clipboard) = loaded_controller().await;

    assert_eq!(controller.toggle("automated-0"), Some(true));
    let ReportView::Loaded { sections, .. } = controller.view() else {
        panic!("expected loaded view");
    };
    assert!(sections[0].items[0].expanded);

    assert_eq!(controller.toggle("automated-0"), Some(false));
    assert_eq!(controller.toggle("automated-7"), None);
}

#[tokio::test]
async fn report_view_exports_issue_from_source_record() {
    let (controller, clipboard) = loaded_controller().await;

    controller.copy_issue("automated-0").await.unwrap();
    let copied = clipboard.last_write().unwrap();

    assert!(copied.starts_with("[URL]\nhttps://example.com"));
    assert!(copied.contains("image-alt"));
    // Raw snippet, straight from the record rather than the escaped view.
    assert!(copied.contains("<img>"));
    assert!(copied.ends_with("---\nGenerated by Scanly Extension"));

    assert!(controller.copy_issue("automated-9").await.is_err());
}
