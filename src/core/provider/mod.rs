// src/core/provider/mod.rs

// Public interface for the lookup providers. Each submodule wraps exactly one
// external source behind the shared `LookupProvider` contract.
pub mod avatar;
pub mod breach;
pub mod demo;
pub mod geoip;
pub mod self_ip;

use crate::core::models::{ProviderKind, ProviderResult};
use async_trait::async_trait;
use std::sync::Arc;

/// User agent sent with every outbound lookup.
pub const USER_AGENT: &str = "FootprintRS/0.1";

/// Uniform contract for one external lookup source.
///
/// A provider performs a single outbound call per `lookup` and always comes
/// back with a terminal `ProviderResult`; it never retries and never shares
/// state with other providers. The orchestrator owns the deadline and wraps
/// each lookup in its own timeout, so implementations just do the one call.
///
/// # Example
///
/// ```ignore
/// use footprint_rs_scanner::core::provider::{LookupProvider, breach::BreachProvider};
///
/// async fn check(provider: &dyn LookupProvider) {
///     let result = provider.lookup("demo@example.com").await;
///     println!("{}: {}", result.kind, result.status);
/// }
/// ```
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// The capability this provider implements.
    fn kind(&self) -> ProviderKind;

    /// Look up the subject key against the external source.
    async fn lookup(&self, subject: &str) -> ProviderResult;
}

/// A shared provider handle for dynamic dispatch.
pub type SharedProvider = Arc<dyn LookupProvider>;

/// Builds the HTTP client used by the network-backed providers.
pub(crate) fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}
