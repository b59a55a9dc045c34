//! Severity and standards-reference classification.
//!
//! Single source of truth for both fixed lookup tables. The report
//! formatter and the report view both resolve severities and WCAG citations
//! here, so the two surfaces cannot drift apart.

use serde::{Deserialize, Serialize};

/// Severity scale issues are graded on, from engine impact levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Blocker,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Blocker => write!(f, "blocker"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// Map an engine impact level to a severity.
///
/// Total over all inputs: anything outside the four known levels (including
/// empty and `"unknown"`) grades as the default, medium.
pub fn severity_of(impact: &str) -> Severity {
    match impact {
        "critical" => Severity::Blocker,
        "serious" => Severity::High,
        "moderate" => Severity::Medium,
        "minor" => Severity::Low,
        _ => Severity::Medium,
    }
}

/// Fixed rule-id → WCAG criterion citation table.
const WCAG_REFERENCES: &[(&str, &str)] = &[
    ("color-contrast", "1.4.3 Contrast (Minimum) (AA)"),
    ("aria-label", "4.1.2 Name, Role, Value (AA)"),
    ("heading-order", "1.3.1 Info and Relationships (AA)"),
    ("landmark-unique", "1.3.6 Identify Purpose (AAA)"),
    ("button-name", "4.1.2 Name, Role, Value (AA)"),
    ("image-alt", "1.1.1 Non-text Content (AA)"),
    ("document-title", "2.4.2 Page Titled (AA)"),
    ("html-has-lang", "3.1.1 Language of Page (AA)"),
    ("label", "3.3.2 Labels or Instructions (AA)"),
    ("link-name", "2.4.4 Link Purpose (In Context) (AA)"),
];

/// Resolve the WCAG citation for a rule id.
///
/// Unmapped ids fall back to a pointer at the general guidelines; an empty
/// id falls back to "this rule".
pub fn wcag_reference(rule_id: &str) -> String {
    if rule_id.is_empty() {
        return "See WCAG guidelines for this rule".to_string();
    }

    WCAG_REFERENCES
        .iter()
        .find(|(id, _)| *id == rule_id)
        .map(|(_, citation)| (*citation).to_string())
        .unwrap_or_else(|| format!("See WCAG guidelines for {rule_id}"))
}
