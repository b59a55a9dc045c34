//! # Scanly - Accessibility Scan Coordination and Reporting
//!
//! Scanly models the core of a browser-extension accessibility auditor as a
//! reusable library: a third-party audit engine runs inside the page, and
//! Scanly turns its raw findings into normalized issue records and
//! human-readable reports, coordinating the whole flow across asynchronous
//! message passing.
//!
//! ## Architecture
//!
//! - **Report pipeline**: raw engine output → [`report::normalize`] →
//!   severity/WCAG classification → bracketed text, Markdown, or JSON
//! - **Scan coordination**: [`scan::ScanCoordinator`] sequences script
//!   injection, a readiness handshake with the in-page trigger, the scan
//!   request/response exchange, and result collection
//! - **Presentation**: [`ui::PopupController`] and
//!   [`ui::ReportViewController`] persist, render, and export reports
//!
//! Host-platform collaborators (script injection, messaging, storage,
//! clipboard) are traits; in-memory implementations ship for tests and
//! embedding.

pub mod engine;
pub mod messaging;
pub mod report;
pub mod scan;
pub mod storage;
pub mod ui;

pub use report::{IssueDetail, IssueRecord, ScanReport, Severity};
pub use scan::{ScanCoordinator, ScanError};

/// Result type alias for Scanly operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
