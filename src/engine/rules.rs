//! Built-in rule sets forwarded to the audit engine.
//!
//! Scanly does not detect anything itself; these are the engine rule ids it
//! knows how to ask for. A default run leaves the selection empty and lets
//! the engine apply its own defaults.

use serde::Serialize;

/// Rules whose failures are reported as automated check failures.
pub const AUTOMATED_RULES: &[&str] = &[
    "aria-allowed-role",
    "aria-hidden-focus",
    "aria-input-field-name",
    "aria-label",
    "aria-labelledby",
    "aria-required-attr",
    "aria-required-children",
    "aria-required-parent",
    "aria-roles",
    "aria-valid-attr",
    "aria-valid-attr-value",
    "button-name",
    "color-contrast",
    "document-title",
    "duplicate-id-active",
    "form-field-multiple-labels",
    "frame-title",
    "heading-order",
    "html-has-lang",
    "html-lang-valid",
    "image-alt",
    "input-button-name",
    "input-image-alt",
    "label",
    "landmark-banner-is-top-level",
    "landmark-complementary-is-top-level",
    "landmark-contentinfo-is-top-level",
    "landmark-main-is-top-level",
    "landmark-no-duplicate-banner",
    "landmark-no-duplicate-contentinfo",
    "landmark-one-main",
    "link-name",
    "list",
    "listitem",
    "meta-refresh",
    "meta-viewport",
    "page-has-heading-one",
    "region",
    "skip-link",
    "tabindex",
    "valid-lang",
];

/// Rules whose findings require a human decision.
pub const NEEDS_REVIEW_RULES: &[&str] = &[
    "aria-input-field-name",
    "color-contrast",
    "duplicate-id-aria",
    "th-has-data-cells",
    "label-content-name-mismatch",
    "p-as-heading",
];

/// Scan configuration handed to [`super::AuditEngine::run`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunConfig {
    /// Rule ids to restrict the run to. Empty means engine defaults.
    pub rules: Vec<String>,
}

impl RunConfig {
    /// Restrict the run to the automated check rule set.
    pub fn automated() -> Self {
        Self {
            rules: AUTOMATED_RULES.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Restrict the run to the manual-review rule set.
    pub fn needs_review() -> Self {
        Self {
            rules: NEEDS_REVIEW_RULES.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_engine_defaults() {
        assert!(RunConfig::default().rules.is_empty());
    }

    #[test]
    fn rule_sets_select_expected_rules() {
        let automated = RunConfig::automated();
        assert!(automated.rules.iter().any(|r| r == "image-alt"));
        assert!(automated.rules.iter().any(|r| r == "color-contrast"));

        let review = RunConfig::needs_review();
        assert!(review.rules.iter().any(|r| r == "p-as-heading"));
        assert_eq!(review.rules.len(), NEEDS_REVIEW_RULES.len());
    }
}
