//! Converts raw engine output into a normalized scan report.

use crate::engine::RawScanResults;

use super::{IssueDetail, IssueRecord, ScanReport};

/// Guidance used when an incomplete finding carries no help text.
const MANUAL_REVIEW_FALLBACK: &str = "Manual review required";

/// Normalize one raw engine result into a [`ScanReport`].
///
/// Emits one record per (finding, affected node) pair, preserving the
/// engine's finding order and, within a finding, its node order. No sorting
/// and no deduplication. Pure transformation; assumes well-formed input from
/// the messaging decode step.
pub fn normalize(raw: &RawScanResults, url: &str) -> ScanReport {
    let mut automated_checks = Vec::new();
    if let Some(group) = &raw.automated {
        for violation in &group.violations {
            for node in &violation.nodes {
                automated_checks.push(IssueRecord {
                    rule_id: violation.id.clone(),
                    message: violation.description.clone(),
                    selector: node.target.join(", "),
                    snippet: node.html.clone(),
                    detail: IssueDetail::Automated {
                        impact: violation
                            .impact
                            .clone()
                            .unwrap_or_else(|| "unknown".to_string()),
                        fix_suggestions: violation.help.clone().into_iter().collect(),
                    },
                });
            }
        }
    }

    let mut needs_review = Vec::new();
    if let Some(group) = &raw.needs_review {
        for incomplete in &group.incomplete {
            for node in &incomplete.nodes {
                needs_review.push(IssueRecord {
                    rule_id: incomplete.id.clone(),
                    message: incomplete.description.clone(),
                    selector: node.target.join(", "),
                    snippet: node.html.clone(),
                    detail: IssueDetail::NeedsReview {
                        review_guidance: incomplete
                            .help
                            .clone()
                            .unwrap_or_else(|| MANUAL_REVIEW_FALLBACK.to_string()),
                    },
                });
            }
        }
    }

    ScanReport::new(url, automated_checks, needs_review)
}
