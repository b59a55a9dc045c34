//! Normalized scan report model
//!
//! This module owns the data the rest of the crate works with: one
//! [`IssueRecord`] per (finding, affected node) pair, grouped into a
//! [`ScanReport`] with derived summary totals. Reports are read-only once
//! constructed; there is no partial-update path.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub mod classify;
pub mod format;
pub mod normalize;


pub use classify::{Severity, severity_of, wcag_reference};
pub use format::{format_bracketed, format_report, to_pretty_json};
pub use normalize::normalize;

/// Category-specific fields of an issue record.
///
/// The category is an explicit tag on the wire (`"category"` with values
/// `AUTOMATED` / `NEEDS_REVIEW`), never inferred from which optional fields
/// happen to be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum IssueDetail {
    /// A failed automated check.
    #[serde(rename = "AUTOMATED")]
    Automated {
        /// Raw engine impact level, `"unknown"` when the engine omitted it.
        impact: String,

        /// Zero or one suggestions derived from the engine's help text.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fix_suggestions: Vec<String>,
    },

    /// A finding the engine could not decide; needs a human.
    #[serde(rename = "NEEDS_REVIEW")]
    NeedsReview {
        /// Engine help text, or a fixed fallback when absent.
        review_guidance: String,
    },
}

/// One normalized issue: a single (finding, affected node) pair.
///
/// A finding with N affected nodes produces N records sharing the rule id,
/// message, and impact but carrying distinct selector/snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Engine rule identifier.
    pub rule_id: String,

    /// Human-readable description of the issue.
    pub message: String,

    /// Node target path segments joined by `", "`.
    pub selector: String,

    /// Raw HTML snippet, unescaped. Rendering code must escape it.
    pub snippet: String,

    #[serde(flatten)]
    pub detail: IssueDetail,
}

impl IssueRecord {
    /// Whether this record is a failed automated check.
    pub fn is_automated(&self) -> bool {
        matches!(self.detail, IssueDetail::Automated { .. })
    }

    /// Severity badge for this issue. Manual-review items carry no engine
    /// impact and classify as the default severity.
    pub fn severity(&self) -> Severity {
        match &self.detail {
            IssueDetail::Automated { impact, .. } => severity_of(impact),
            IssueDetail::NeedsReview { .. } => Severity::Medium,
        }
    }
}

/// Derived counts attached to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_automated_failures: usize,
    pub total_needs_review: usize,
    pub scan_coverage: String,
}

/// A completed scan: the persisted and rendered unit.
///
/// Constructed exactly once per completed scan. The summary totals always
/// equal the lengths of the two issue lists; [`ScanReport::new`] is the only
/// construction path and derives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// ISO-8601 (RFC 3339) timestamp of when the report was built.
    pub scan_timestamp: String,

    /// URL of the scanned page.
    pub url: String,

    /// Failed automated checks, in engine order.
    pub automated_checks: Vec<IssueRecord>,

    /// Manual-review findings, in engine order.
    pub needs_review: Vec<IssueRecord>,

    pub summary: ScanSummary,
}

impl ScanReport {
    /// Build a report from normalized issue lists, stamping the current
    /// time and deriving the summary totals.
    pub fn new(
        url: impl Into<String>,
        automated_checks: Vec<IssueRecord>,
        needs_review: Vec<IssueRecord>,
    ) -> Self {
        let scan_timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"));

        Self {
            scan_timestamp,
            url: url.into(),
            summary: ScanSummary {
                total_automated_failures: automated_checks.len(),
                total_needs_review: needs_review.len(),
                scan_coverage: "complete".to_string(),
            },
            automated_checks,
            needs_review,
        }
    }
}
