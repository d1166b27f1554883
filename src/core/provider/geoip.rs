// src/core/provider/geoip.rs

use crate::core::models::{IpInfo, ProviderKind, ProviderPayload, ProviderResult};
use crate::core::provider::{LookupProvider, http_client};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{error, info, warn};

const DEFAULT_BASE_URL: &str = "https://ipinfo.io";

/// Resolves city/region/country/org for a concrete IP address.
///
/// The provider never derives an IP on its own; the resolver decides which
/// address (explicit or self-discovered) it is handed.
pub struct GeoLocationProvider {
    base_url: String,
}

impl GeoLocationProvider {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for GeoLocationProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LookupProvider for GeoLocationProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GeoLocation
    }

    async fn lookup(&self, subject: &str) -> ProviderResult {
        info!(ip = subject, "Starting geolocation lookup.");

        let client = match http_client() {
            Ok(c) => c,
            Err(e) => {
                error!(error = %e, "Failed to build HTTP client for geolocation lookup.");
                return ProviderResult::failure(self.kind());
            }
        };

        let url = format!("{}/{}/json", self.base_url, subject);

        match client.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                info!(ip = subject, "No geolocation data for address.");
                ProviderResult::not_found(self.kind())
            }
            Ok(response) if response.status().is_success() => {
                match response.json::<IpInfo>().await {
                    Ok(info) => {
                        info!(
                            city = info.city.as_deref().unwrap_or(""),
                            region = info.region.as_deref().unwrap_or(""),
                            "Geolocation lookup finished."
                        );
                        ProviderResult::success(self.kind(), ProviderPayload::IpInfo(info))
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to parse geolocation response.");
                        ProviderResult::failure(self.kind())
                    }
                }
            }
            Ok(response) => {
                warn!(status = %response.status(), "Geolocation source returned unexpected status.");
                ProviderResult::failure(self.kind())
            }
            Err(e) => {
                error!(error = %e, "Geolocation lookup request failed.");
                ProviderResult::failure(self.kind())
            }
        }
    }
}
