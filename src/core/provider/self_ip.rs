// src/core/provider/self_ip.rs

use crate::core::models::{ProviderKind, ProviderPayload, ProviderResult};
use crate::core::provider::{LookupProvider, http_client};
use async_trait::async_trait;
use serde::Deserialize;
use std::net::Ipv4Addr;
use tracing::{error, info};

const DEFAULT_BASE_URL: &str = "https://api.ipify.org";

#[derive(Debug, Deserialize)]
struct PublicIpResponse {
    ip: String,
}

/// Discovers the caller's own public IP when the request supplied none.
///
/// Consumed only by the IP resolver; the orchestrator never merges a
/// `SelfIp` result into the report directly.
pub struct SelfIpProvider {
    base_url: String,
}

impl SelfIpProvider {
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

impl Default for SelfIpProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LookupProvider for SelfIpProvider {
    // The subject key is ignored; discovery has no input.
    fn kind(&self) -> ProviderKind {
        ProviderKind::SelfIp
    }

    async fn lookup(&self, _subject: &str) -> ProviderResult {
        info!("Starting public IP discovery.");

        let client = match http_client() {
            Ok(c) => c,
            Err(e) => {
                error!(error = %e, "Failed to build HTTP client for IP discovery.");
                return ProviderResult::failure(self.kind());
            }
        };

        let url = format!("{}/?format=json", self.base_url);

        match client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<PublicIpResponse>().await {
                    Ok(body) => match body.ip.parse::<Ipv4Addr>() {
                        Ok(ip) => {
                            info!(ip = %ip, "Public IP discovered.");
                            ProviderResult::success(self.kind(), ProviderPayload::PublicIp(ip))
                        }
                        Err(e) => {
                            error!(error = %e, raw = %body.ip, "Discovery returned an unparseable address.");
                            ProviderResult::failure(self.kind())
                        }
                    },
                    Err(e) => {
                        error!(error = %e, "Failed to parse IP discovery response.");
                        ProviderResult::failure(self.kind())
                    }
                }
            }
            Ok(response) => {
                error!(status = %response.status(), "IP discovery returned unexpected status.");
                ProviderResult::failure(self.kind())
            }
            Err(e) => {
                error!(error = %e, "IP discovery request failed.");
                ProviderResult::failure(self.kind())
            }
        }
    }
}
