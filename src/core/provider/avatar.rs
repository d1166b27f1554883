// src/core/provider/avatar.rs

use crate::core::models::{AvatarData, ProviderKind, ProviderPayload, ProviderResult};
use crate::core::provider::{LookupProvider, http_client};
use async_trait::async_trait;
use reqwest::StatusCode;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info};

const DEFAULT_BASE_URL: &str = "https://www.gravatar.com";

/// Probes a hash-addressed public avatar service for the subject email.
///
/// The image is addressed by the content hash of the normalized email, so a
/// 404 from the probe URL (which disables the default fallback image) is a
/// verified "no public avatar" answer, not a failure.
pub struct ProfileImageProvider {
    base_url: String,
}

impl ProfileImageProvider {
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

impl Default for ProfileImageProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase hex content hash of the normalized (trimmed, lowercased) email.
/// The hash addresses both the avatar image and the public profile page.
pub fn email_hash(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl LookupProvider for ProfileImageProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::ProfileImage
    }

    async fn lookup(&self, subject: &str) -> ProviderResult {
        let hash = email_hash(subject);
        debug!(hash = %hash, "Computed avatar hash for subject.");

        let client = match http_client() {
            Ok(c) => c,
            Err(e) => {
                error!(error = %e, "Failed to build HTTP client for avatar lookup.");
                return ProviderResult::failure(self.kind());
            }
        };

        // d=404 turns off the generated fallback image, so existence maps
        // directly onto the status code.
        let probe_url = format!("{}/avatar/{}?s=200&d=404", self.base_url, hash);

        match client.get(&probe_url).send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                info!("No public avatar for subject.");
                ProviderResult::not_found(self.kind())
            }
            Ok(response) if response.status().is_success() => {
                info!("Public avatar found for subject.");
                let payload = AvatarData {
                    image_url: format!("{}/avatar/{}?s=200&d=identicon", self.base_url, hash),
                    profile_url: format!("{}/{}", self.base_url, hash),
                    hash,
                };
                ProviderResult::success(self.kind(), ProviderPayload::Avatar(payload))
            }
            Ok(response) => {
                error!(status = %response.status(), "Avatar source returned unexpected status.");
                ProviderResult::failure(self.kind())
            }
            Err(e) => {
                error!(error = %e, "Avatar lookup request failed.");
                ProviderResult::failure(self.kind())
            }
        }
    }
}
