//! Scan orchestration
//!
//! [`ScanCoordinator`] sequences a page scan: inject the engine and trigger
//! scripts, wait for the trigger's readiness signal, exchange the scan
//! request/response with the page context, and normalize the raw results
//! into a [`ScanReport`]. Host-platform capabilities are behind the
//! [`ScriptInjector`] and [`PageMessenger`] traits.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::messaging::{ExecuteScanResponse, Request, ScanPageResponse, TargetId};
use crate::report::{ScanReport, normalize};

pub mod trigger;


/// Script files injected into the target page. Order matters: the engine
/// must load before the trigger that drives it.
pub const SCAN_SCRIPTS: &[&str] = &["scanner/axe-core.min.js", "content/scanner.js"];

/// Upper bound on waiting for the injected trigger's readiness signal.
/// On timeout the coordinator proceeds to the scan request anyway; a trigger
/// that is genuinely absent then surfaces as [`ScanError::NoResponse`].
pub const READY_TIMEOUT: Duration = Duration::from_millis(500);

/// Failures on the scan path. All are returned to the caller as values;
/// nothing on this path panics or escapes uncaught.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The target page was inaccessible or script injection was denied.
    #[error("failed to inject scan scripts: {0}")]
    Injection(String),

    /// The in-page trigger never replied to the scan request.
    #[error("no response from page scanner")]
    NoResponse,

    /// The audit engine was missing from the page at scan time.
    #[error("audit engine not loaded in page")]
    EngineNotLoaded,

    /// The audit engine did not finish within the allowed bound.
    #[error("audit engine timed out after {0:?}")]
    EngineTimeout(Duration),

    /// The audit engine itself reported a failure.
    #[error("audit engine run failed: {0}")]
    EngineRun(String),

    /// The in-page trigger replied with a failure. Carries the trigger's
    /// reported error text (engine missing, engine timeout, or run failure
    /// as stringified across the message boundary).
    #[error("page scan failed: {0}")]
    Trigger(String),
}

/// Scan lifecycle states. One request moves left to right; there are no
/// retries and no abort path once injection begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Injecting,
    AwaitingReady,
    Requesting,
    Collecting,
    Succeeded,
    Failed,
}

/// Loads script files into a target page context, preserving file order.
#[async_trait]
pub trait ScriptInjector: Send + Sync {
    async fn inject(&self, target: TargetId, files: &[&str]) -> anyhow::Result<()>;
}

/// Request/response channel to the in-page trigger.
#[async_trait]
pub trait PageMessenger: Send + Sync {
    /// Resolves once the injected trigger has announced readiness
    /// (a `SCANNER_READY` message). May pend forever if the trigger never
    /// signals; the coordinator bounds the wait.
    async fn wait_ready(&self, target: TargetId);

    /// Send `EXECUTE_SCAN` to the page and await the reply. `None` means no
    /// reply arrived (page context gone, listener never registered).
    async fn request_scan(&self, target: TargetId) -> Option<ExecuteScanResponse>;
}

/// Sequences inject → ready → request → collect for one page scan at a time.
///
/// Holds no scan results itself; callers own the returned report. The state
/// field tracks the most recent request's progress for observability and is
/// overwritten by the next `scan` call.
pub struct ScanCoordinator {
    injector: Arc<dyn ScriptInjector>,
    messenger: Arc<dyn PageMessenger>,
    state: Mutex<ScanState>,
}

impl ScanCoordinator {
    pub fn new(injector: Arc<dyn ScriptInjector>, messenger: Arc<dyn PageMessenger>) -> Self {
        Self {
            injector,
            messenger,
            state: Mutex::new(ScanState::Idle),
        }
    }

    /// Current state of the most recent scan request.
    pub fn state(&self) -> ScanState {
        *self.state.lock().expect("scan state lock poisoned")
    }

    fn set_state(&self, next: ScanState) {
        let mut state = self.state.lock().expect("scan state lock poisoned");
        debug!(from = ?*state, to = ?next, "scan state transition");
        *state = next;
    }

    /// Run a full scan of the target page.
    ///
    /// No automatic retries; a caller may re-invoke after a failure. An
    /// injection failure fails the scan before any message reaches the page.
    pub async fn scan(&self, target: TargetId) -> Result<ScanReport, ScanError> {
        let result = self.run_scan(target).await;
        match &result {
            Ok(report) => {
                debug!(
                    automated = report.summary.total_automated_failures,
                    needs_review = report.summary.total_needs_review,
                    "scan succeeded"
                );
                self.set_state(ScanState::Succeeded);
            }
            Err(error) => {
                warn!(%error, "scan failed");
                self.set_state(ScanState::Failed);
            }
        }
        result
    }

    async fn run_scan(&self, target: TargetId) -> Result<ScanReport, ScanError> {
        self.set_state(ScanState::Injecting);
        self.injector
            .inject(target, SCAN_SCRIPTS)
            .await
            .map_err(|e| ScanError::Injection(e.to_string()))?;

        self.set_state(ScanState::AwaitingReady);
        if tokio::time::timeout(READY_TIMEOUT, self.messenger.wait_ready(target))
            .await
            .is_err()
        {
            // Trigger never announced itself within the bound. Proceed and
            // let the scan request decide whether anyone is listening.
            warn!(tab = target, "no readiness signal within {READY_TIMEOUT:?}, proceeding");
        }

        self.set_state(ScanState::Requesting);
        let response = self.messenger.request_scan(target).await;

        self.set_state(ScanState::Collecting);
        match response {
            None => Err(ScanError::NoResponse),
            Some(reply) if !reply.success => Err(ScanError::Trigger(
                reply
                    .error
                    .unwrap_or_else(|| "page scanner reported failure".to_string()),
            )),
            Some(reply) => {
                let results = reply
                    .results
                    .ok_or_else(|| ScanError::Trigger("scan response missing results".to_string()))?;
                let url = reply
                    .url
                    .ok_or_else(|| ScanError::Trigger("scan response missing page url".to_string()))?;
                Ok(normalize(&results, &url))
            }
        }
    }

    /// Handle a `SCAN_PAGE` request from a UI surface, replying in the wire
    /// shape. Scan-path errors become a failed response, never a panic.
    /// Request types addressed to other listeners get no reply at all.
    pub async fn handle_request(&self, request: Request) -> Option<ScanPageResponse> {
        match request {
            Request::ScanPage { tab_id: Some(tab) } => match self.scan(tab).await {
                Ok(report) => Some(ScanPageResponse::ok(report)),
                Err(error) => Some(ScanPageResponse::err(error.to_string())),
            },
            Request::ScanPage { tab_id: None } => {
                Some(ScanPageResponse::err("No tab ID provided"))
            }
            other => {
                debug!(?other, "ignoring request for another listener");
                None
            }
        }
    }
}
