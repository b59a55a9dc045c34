//! Wire shapes for cross-context request/response messaging.
//!
//! Contexts (UI surfaces, the coordinator, the page) share no memory; they
//! exchange these JSON shapes. Field names are part of the protocol and
//! must not change. Decoding here is the fail-fast boundary for malformed
//! input: anything that deserializes is well-formed for the pipeline.

use serde::{Deserialize, Serialize};

use crate::engine::RawScanResults;
use crate::report::ScanReport;

/// Identifier of the page (tab) a scan targets.
pub type TargetId = u32;

/// Requests exchanged between contexts, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// UI surface asking the coordinator to scan a page.
    #[serde(rename = "SCAN_PAGE")]
    ScanPage {
        #[serde(rename = "tabId", default, skip_serializing_if = "Option::is_none")]
        tab_id: Option<TargetId>,
    },

    /// Coordinator asking the in-page trigger to run the engine.
    #[serde(rename = "EXECUTE_SCAN")]
    ExecuteScan,

    /// In-page trigger announcing it can accept `EXECUTE_SCAN`.
    #[serde(rename = "SCANNER_READY")]
    ScannerReady,
}

/// Coordinator's reply to `SCAN_PAGE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanPageResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<ScanReport>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanPageResponse {
    pub fn ok(results: ScanReport) -> Self {
        Self {
            success: true,
            results: Some(results),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            results: None,
            error: Some(message.into()),
        }
    }
}

/// In-page trigger's reply to `EXECUTE_SCAN`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteScanResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<RawScanResults>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecuteScanResponse {
    pub fn ok(results: RawScanResults, url: impl Into<String>) -> Self {
        Self {
            success: true,
            results: Some(results),
            url: Some(url.into()),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}
