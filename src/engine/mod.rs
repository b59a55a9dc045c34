//! Audit engine interface
//!
//! The accessibility audit engine is an external black box running in the
//! page context. This module defines the seam Scanly talks to it through:
//! the [`AuditEngine`] trait and the raw result model it returns. Rule
//! detection lives entirely on the engine side; Scanly only consumes the
//! violation and incomplete-finding lists.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod rules;

pub use rules::RunConfig;

/// Raw results returned by the audit engine for one page scan.
///
/// Either group may be absent; an absent group contributes no findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawScanResults {
    /// Automated check failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automated: Option<RawViolations>,

    /// Findings the engine could not decide automatically.
    #[serde(rename = "needsReview", default, skip_serializing_if = "Option::is_none")]
    pub needs_review: Option<RawIncomplete>,
}

/// Violation list wrapper, matching the engine's result shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawViolations {
    #[serde(default)]
    pub violations: Vec<RawFinding>,
}

/// Incomplete-finding list wrapper, matching the engine's result shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawIncomplete {
    #[serde(default)]
    pub incomplete: Vec<RawFinding>,
}

/// A single rule finding as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFinding {
    /// Engine rule identifier, e.g. `image-alt`.
    pub id: String,

    /// Human-readable description of what the rule checks.
    pub description: String,

    /// Short remediation help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Link to the engine's documentation for the rule.
    #[serde(rename = "helpUrl", default, skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,

    /// Impact level: `critical`, `serious`, `moderate`, or `minor`.
    /// The engine omits this for findings it cannot grade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,

    /// Standards tags attached by the engine (e.g. `wcag2aa`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// DOM nodes the finding applies to.
    #[serde(default)]
    pub nodes: Vec<RawNode>,
}

/// A DOM node affected by a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    /// Ordered selector path identifying the node.
    pub target: Vec<String>,

    /// Raw HTML snippet of the node.
    pub html: String,
}

/// Failure reported by the audit engine itself.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EngineError(pub String);

/// Black-box accessibility audit engine attached to a page.
///
/// Implementations wrap whatever engine the host loads into the page
/// context. A run is expected to complete on its own; the caller bounds it
/// with a timeout (see [`crate::scan::trigger::ENGINE_TIMEOUT`]).
#[async_trait]
pub trait AuditEngine: Send + Sync {
    /// Run a full audit of the current page.
    async fn run(&self, config: &RunConfig) -> Result<RawScanResults, EngineError>;
}
