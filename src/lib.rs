//! # Footprint Scanner
//!
//! An engine that takes a partially-specified subject identity (an email, a
//! domain, an IPv4 address, any subset) and produces a single deterministic
//! risk report by querying independent external lookup sources in parallel.
//! Any subset of the sources may fail or time out; their sections degrade to
//! "unavailable" while the rest of the report still populates, and the merged
//! findings are turned into a reproducible score, a categorical risk level,
//! and a prioritized recommendation list.
//!
//! ## Example
//!
//! ```rust,ignore
//! use footprint_rs_scanner::core::models::ScanRequest;
//! use footprint_rs_scanner::core::orchestrator::{ProviderSet, ScanOrchestrator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let orchestrator = ScanOrchestrator::new(ProviderSet::with_defaults());
//!     let request = ScanRequest {
//!         email: Some("demo@example.com".to_string()),
//!         ..Default::default()
//!     };
//!     let report = orchestrator.scan(&request).await.unwrap();
//!     println!("{} ({})", report.risk_score, report.risk_level);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`core::models`] - request, provider, and report data types
//! - [`core::validator`] - identifier grammars and normalization
//! - [`core::provider`] - the `LookupProvider` contract and the concrete sources
//! - [`core::orchestrator`] - concurrent fan-out, timeout-bounded fan-in, fixed-order merge
//! - [`core::scoring`] / [`core::recommend`] - pure passes over the merged report
//! - [`core::error`] - the scan error taxonomy
//!
//! No scan state is ever persisted; requests, provider results, and reports
//! live for one call.

pub mod core;
pub mod logging;

// Re-export the types most callers need.
pub use crate::core::error::{Result, ScanError};
pub use crate::core::models::{
    ProviderKind, ProviderResult, ProviderStatus, Recommendation, RiskLevel, ScanEnvelope,
    ScanReport, ScanRequest,
};
pub use crate::core::orchestrator::{ProviderSet, ScanConfig, ScanOrchestrator};
pub use crate::core::provider::{LookupProvider, SharedProvider};
