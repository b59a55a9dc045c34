//! Report rendering: bracketed issue blocks, Markdown documents, JSON.

use super::classify::{severity_of, wcag_reference};
use super::{IssueDetail, IssueRecord, ScanReport};

/// Horizontal rule separating issues in the Markdown report.
const SEPARATOR: &str = "\n\n---\n\n";

/// Render one issue as a fixed-section bracketed plain-text block.
///
/// Section order is fixed: URL, Steps To Reproduce, What is the issue,
/// Code snippet, Why is it important, How to fix, Compliant code example,
/// How to test, WCAG. The snippet is emitted raw; escaping is a rendering
/// concern.
pub fn format_bracketed(issue: &IssueRecord, url: &str) -> String {
    let (step_two, why, how_to_fix, manual_test) = match &issue.detail {
        IssueDetail::Automated {
            impact,
            fix_suggestions,
        } => (
            "Run automated accessibility scan",
            format!(
                "{} This {} impact issue affects users with disabilities who rely on assistive technologies.",
                issue.message,
                severity_of(impact)
            ),
            fix_suggestions.first().cloned().unwrap_or_else(|| {
                format!("Review accessibility guidelines for {}", issue.rule_id)
            }),
            "Verify fix resolves the automated check failure",
        ),
        IssueDetail::NeedsReview { review_guidance } => (
            "Review the identified element",
            format!(
                "{} This element requires manual verification to ensure it meets accessibility standards.",
                issue.message
            ),
            review_guidance.clone(),
            "Manually verify accessibility compliance",
        ),
    };

    format!(
        "[URL]\n{url}\n\n\
         [Steps To Reproduce]\n\
         1. Navigate to the page\n\
         2. {step_two}\n\
         3. Locate element: {selector}\n\n\
         [What is the issue]\n{message}\n\n\
         [Code snippet]\n{snippet}\n\n\
         [Why is it important]\n{why}\n\n\
         [How to fix]\n{how_to_fix}\n\n\
         [Compliant code example]\n\
         <!-- Compliant version of the code snippet -->\n\
         <!-- Specific guidance would depend on the {rule_id} rule -->\n\
         {snippet}\n\n\
         [How to test]\n\
         Automated: Use axe-core or similar tools to verify the {rule_id} rule\n\
         Manual: {manual_test}\n\n\
         [WCAG]\n{wcag}",
        url = url,
        step_two = step_two,
        selector = issue.selector,
        message = issue.message,
        snippet = issue.snippet,
        why = why,
        how_to_fix = how_to_fix,
        rule_id = issue.rule_id,
        manual_test = manual_test,
        wcag = wcag_reference(&issue.rule_id),
    )
}

/// Render a full report as a Markdown-flavored document.
///
/// Title and summary block, then all automated issues, then all
/// manual-review issues, each rendered via [`format_bracketed`] and joined
/// with horizontal rules. A single rule separates the two groups, emitted
/// only when both are non-empty. Formatting is deterministic: the same
/// report always yields byte-identical output.
pub fn format_report(report: &ScanReport) -> String {
    let mut out = format!(
        "# Accessibility Scan Report\n\n\
         **URL:** {}\n\
         **Scan Time:** {}\n\n\
         ## Summary\n\
         - **Failed Checks:** {}\n\
         - **Need Review:** {}\n\
         - **Coverage:** {}\n\n",
        report.url,
        report.scan_timestamp,
        report.summary.total_automated_failures,
        report.summary.total_needs_review,
        report.summary.scan_coverage,
    );

    if !report.automated_checks.is_empty() {
        out.push_str("## Failed Automated Checks\n\n");
        out.push_str(&join_issues(&report.automated_checks, &report.url));
    }

    if !report.needs_review.is_empty() {
        if !report.automated_checks.is_empty() {
            out.push_str(SEPARATOR);
        }
        out.push_str("## Items Needing Manual Review\n\n");
        out.push_str(&join_issues(&report.needs_review, &report.url));
    }

    out
}

/// Serialize a report as pretty-printed JSON with stable key order.
pub fn to_pretty_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn join_issues(issues: &[IssueRecord], url: &str) -> String {
    issues
        .iter()
        .map(|issue| format_bracketed(issue, url))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
