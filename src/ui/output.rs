//! Full-report view controller.
//!
//! Renders the persisted last report as collapsible issue sections with
//! severity badges, and exports individual issues to the clipboard. Export
//! text is always built from the retained [`IssueRecord`], never re-derived
//! from rendered markup.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::report::{IssueRecord, ScanReport, Severity, format_bracketed};
use crate::storage::ReportStore;

use super::{Clipboard, ClipboardError};

/// Shown when no scan has been persisted yet.
pub const EMPTY_STATE_MESSAGE: &str =
    "No scan results available. Run a scan from the extension popup to see detailed issues.";

/// Footer appended to per-issue clipboard exports.
const EXPORT_FOOTER: &str = "---\nGenerated by Scanly Extension";

/// Visual tone of an issue section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTone {
    /// Failed automated checks.
    Error,
    /// Items needing manual review.
    Warning,
}

/// One collapsible issue row.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueItemView {
    /// Stable id within the view, e.g. `automated-0`.
    pub id: String,
    /// Accordion title: the issue message.
    pub title: String,
    pub severity: Severity,
    pub rule_id: String,
    /// HTML-escaped snippet, safe to interpolate into markup.
    pub snippet_html: String,
    /// Full bracketed detail block for the expanded row.
    pub detail_text: String,
    pub expanded: bool,
}

/// A titled group of issues.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub title: String,
    pub tone: SectionTone,
    pub items: Vec<IssueItemView>,
}

/// What the full-report surface renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportView {
    /// No persisted report (or it failed to load).
    Empty { message: String },
    Loaded {
        url: String,
        scan_timestamp: String,
        total_failed: usize,
        total_review: usize,
        sections: Vec<SectionView>,
    },
}

/// Controller behind the full-report surface.
pub struct ReportViewController {
    store: Arc<dyn ReportStore>,
    clipboard: Arc<dyn Clipboard>,
    report: Mutex<Option<ScanReport>>,
    expanded: Mutex<HashSet<String>>,
}

impl ReportViewController {
    pub fn new(store: Arc<dyn ReportStore>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            store,
            clipboard,
            report: Mutex::new(None),
            expanded: Mutex::new(HashSet::new()),
        }
    }

    /// Load the persisted last report. A storage failure renders the empty
    /// state rather than an error surface.
    pub async fn load(&self) {
        match self.store.load_last_report().await {
            Ok(report) => {
                *self.report.lock().expect("report lock poisoned") = report;
            }
            Err(error) => {
                warn!(%error, "failed to load scan results");
                *self.report.lock().expect("report lock poisoned") = None;
            }
        }
    }

    /// Toggle a row's expanded state. Returns the new state, or `None` for
    /// an unknown id.
    pub fn toggle(&self, issue_id: &str) -> Option<bool> {
        self.issue_by_id(issue_id)?;
        let mut expanded = self.expanded.lock().expect("expanded lock poisoned");
        if expanded.remove(issue_id) {
            Some(false)
        } else {
            expanded.insert(issue_id.to_string());
            Some(true)
        }
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> ReportView {
        let report = self.report.lock().expect("report lock poisoned");
        let Some(report) = report.as_ref() else {
            return ReportView::Empty {
                message: EMPTY_STATE_MESSAGE.to_string(),
            };
        };

        let expanded = self.expanded.lock().expect("expanded lock poisoned");
        let mut sections = Vec::new();
        if !report.automated_checks.is_empty() {
            sections.push(SectionView {
                title: format!(
                    "Failed Automated Checks ({})",
                    report.automated_checks.len()
                ),
                tone: SectionTone::Error,
                items: item_views(&report.automated_checks, "automated", report, &expanded),
            });
        }
        if !report.needs_review.is_empty() {
            sections.push(SectionView {
                title: format!("Items Needing Manual Review ({})", report.needs_review.len()),
                tone: SectionTone::Warning,
                items: item_views(&report.needs_review, "review", report, &expanded),
            });
        }

        ReportView::Loaded {
            url: report.url.clone(),
            scan_timestamp: report.scan_timestamp.clone(),
            total_failed: report.summary.total_automated_failures,
            total_review: report.summary.total_needs_review,
            sections,
        }
    }

    /// Copy one issue's bracketed detail block to the clipboard, built from
    /// the retained record.
    pub async fn copy_issue(&self, issue_id: &str) -> Result<(), ClipboardError> {
        let text = {
            let report = self.report.lock().expect("report lock poisoned");
            let report = report
                .as_ref()
                .ok_or_else(|| ClipboardError("no scan results loaded".to_string()))?;
            let issue = find_issue(report, issue_id)
                .ok_or_else(|| ClipboardError(format!("unknown issue id: {issue_id}")))?;
            format!("{}\n\n{EXPORT_FOOTER}", format_bracketed(issue, &report.url))
        };

        self.clipboard.write(&text).await
    }

    fn issue_by_id(&self, issue_id: &str) -> Option<IssueRecord> {
        let report = self.report.lock().expect("report lock poisoned");
        report
            .as_ref()
            .and_then(|r| find_issue(r, issue_id).cloned())
    }
}

fn item_views(
    issues: &[IssueRecord],
    prefix: &str,
    report: &ScanReport,
    expanded: &HashSet<String>,
) -> Vec<IssueItemView> {
    issues
        .iter()
        .enumerate()
        .map(|(index, issue)| {
            let id = format!("{prefix}-{index}");
            IssueItemView {
                expanded: expanded.contains(&id),
                title: issue.message.clone(),
                severity: issue.severity(),
                rule_id: issue.rule_id.clone(),
                snippet_html: escape_html(&issue.snippet),
                detail_text: format_bracketed(issue, &report.url),
                id,
            }
        })
        .collect()
}

/// Resolve a view id like `automated-2` back to its record.
fn find_issue<'a>(report: &'a ScanReport, issue_id: &str) -> Option<&'a IssueRecord> {
    let (prefix, index) = issue_id.rsplit_once('-')?;
    let index: usize = index.parse().ok()?;
    match prefix {
        "automated" => report.automated_checks.get(index),
        "review" => report.needs_review.get(index),
        _ => None,
    }
}

/// Minimal HTML escaping for snippet display.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
