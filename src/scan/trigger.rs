//! In-page scan trigger.
//!
//! [`PageScanner`] is the page-context counterpart of the coordinator: it
//! owns the engine handle for the page it was injected into and answers
//! `EXECUTE_SCAN` requests. Every failure becomes a failed response on the
//! wire; the trigger never crashes the page context.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::engine::{AuditEngine, RunConfig};
use crate::messaging::{ExecuteScanResponse, Request};
use crate::scan::ScanError;

/// Upper bound on a single engine run. Exceeding it is a timeout failure
/// surfaced through the scan response, not a hang.
pub const ENGINE_TIMEOUT: Duration = Duration::from_secs(10);

/// Answers scan requests inside the page context.
pub struct PageScanner {
    url: String,
    engine: Option<Arc<dyn AuditEngine>>,
    config: RunConfig,
}

impl PageScanner {
    /// Attach to a page. `engine` is `None` when the engine script failed
    /// to load; scans then fail with a not-loaded error instead of at
    /// injection time.
    pub fn new(url: impl Into<String>, engine: Option<Arc<dyn AuditEngine>>) -> Self {
        Self {
            url: url.into(),
            engine,
            config: RunConfig::default(),
        }
    }

    /// Restrict engine runs to a specific rule selection.
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Message the trigger sends once constructed, announcing it can accept
    /// `EXECUTE_SCAN` requests.
    pub fn ready_signal(&self) -> Request {
        Request::ScannerReady
    }

    /// Handle a message delivered to the page context. Non-scan messages
    /// get no reply, matching a listener that only answers `EXECUTE_SCAN`.
    pub async fn handle_request(&self, request: Request) -> Option<ExecuteScanResponse> {
        match request {
            Request::ExecuteScan => Some(self.execute_scan().await),
            _ => None,
        }
    }

    /// Run the engine, bounded by [`ENGINE_TIMEOUT`], and wrap the outcome
    /// in the wire response shape.
    pub async fn execute_scan(&self) -> ExecuteScanResponse {
        let Some(engine) = &self.engine else {
            error!(url = %self.url, "scan requested but engine is not loaded");
            return ExecuteScanResponse::err(ScanError::EngineNotLoaded.to_string());
        };

        debug!(url = %self.url, "executing page scan");
        match tokio::time::timeout(ENGINE_TIMEOUT, engine.run(&self.config)).await {
            Err(_) => {
                error!(url = %self.url, "engine run exceeded {ENGINE_TIMEOUT:?}");
                ExecuteScanResponse::err(ScanError::EngineTimeout(ENGINE_TIMEOUT).to_string())
            }
            Ok(Err(engine_error)) => {
                error!(url = %self.url, %engine_error, "engine run failed");
                ExecuteScanResponse::err(ScanError::EngineRun(engine_error.to_string()).to_string())
            }
            Ok(Ok(results)) => ExecuteScanResponse::ok(results, self.url.clone()),
        }
    }
}
