// src/core/provider/breach.rs

use crate::core::models::{Breach, ProviderKind, ProviderPayload, ProviderResult};
use crate::core::provider::{LookupProvider, http_client};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{error, info, warn};

const DEFAULT_BASE_URL: &str = "https://haveibeenpwned.com/api/v3";

/// Checks the subject email against a breach database.
///
/// The source answers 404 for an account with no records; that is a verified
/// clean result (`NotFound`), not an error. Transport trouble and unexpected
/// statuses come back as `Failure` so the report can mark the section
/// unavailable instead of silently pretending the subject is clean.
pub struct BreachProvider {
    base_url: String,
}

impl BreachProvider {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different endpoint, for tests or a proxy.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for BreachProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LookupProvider for BreachProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Breach
    }

    async fn lookup(&self, subject: &str) -> ProviderResult {
        info!(subject, "Starting breach lookup.");

        let client = match http_client() {
            Ok(c) => c,
            Err(e) => {
                error!(error = %e, "Failed to build HTTP client for breach lookup.");
                return ProviderResult::failure(self.kind());
            }
        };

        let url = format!(
            "{}/breachedaccount/{}?truncateResponse=false",
            self.base_url, subject
        );

        match client.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                info!(subject, "No breach records for subject.");
                ProviderResult::not_found(self.kind())
            }
            Ok(response) if response.status().is_success() => {
                match response.json::<Vec<Breach>>().await {
                    Ok(breaches) => {
                        info!(count = breaches.len(), "Breach lookup finished.");
                        ProviderResult::success(self.kind(), ProviderPayload::Breaches(breaches))
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to parse breach response.");
                        ProviderResult::failure(self.kind())
                    }
                }
            }
            Ok(response) => {
                warn!(status = %response.status(), "Breach source returned unexpected status.");
                ProviderResult::failure(self.kind())
            }
            Err(e) => {
                error!(error = %e, "Breach lookup request failed.");
                ProviderResult::failure(self.kind())
            }
        }
    }
}
