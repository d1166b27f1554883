// src/core/resolver.rs

use crate::core::provider::SharedProvider;
use crate::core::models::{ProviderPayload, ProviderStatus};
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of deciding which IP address geolocation should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedIp {
    /// Address to geolocate, when one could be determined.
    pub ip: Option<Ipv4Addr>,
    /// True when self-discovery was attempted and did not produce an address.
    pub discovery_failed: bool,
}

/// Decides the geolocation address for a scan.
///
/// An explicit IP from the request always wins and skips discovery entirely.
/// Otherwise the self-IP provider gets one bounded attempt; if that fails or
/// times out, geolocation is simply omitted from the report rather than
/// failing the scan.
pub async fn resolve_ip(
    explicit: Option<Ipv4Addr>,
    self_ip: &SharedProvider,
    timeout: Duration,
) -> ResolvedIp {
    if let Some(ip) = explicit {
        debug!(ip = %ip, "Using explicit IP for geolocation.");
        return ResolvedIp {
            ip: Some(ip),
            discovery_failed: false,
        };
    }

    match tokio::time::timeout(timeout, self_ip.lookup("")).await {
        Ok(result) => match (result.status, result.payload) {
            (ProviderStatus::Success, Some(ProviderPayload::PublicIp(ip))) => {
                debug!(ip = %ip, "Using discovered public IP for geolocation.");
                ResolvedIp {
                    ip: Some(ip),
                    discovery_failed: false,
                }
            }
            (status, _) => {
                warn!(status = %status, "Public IP discovery did not produce an address.");
                ResolvedIp {
                    ip: None,
                    discovery_failed: true,
                }
            }
        },
        Err(_) => {
            warn!("Public IP discovery timed out.");
            ResolvedIp {
                ip: None,
                discovery_failed: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ProviderKind, ProviderResult};
    use crate::core::provider::demo::{FixedProvider, StalledProvider};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_explicit_ip_skips_discovery() {
        let self_ip = Arc::new(FixedProvider::new(ProviderResult::failure(
            ProviderKind::SelfIp,
        )));
        let shared: SharedProvider = self_ip.clone();
        let resolved = resolve_ip(
            Some(Ipv4Addr::new(1, 2, 3, 4)),
            &shared,
            Duration::from_secs(1),
        )
        .await;
        assert_eq!(resolved.ip, Some(Ipv4Addr::new(1, 2, 3, 4)));
        assert!(!resolved.discovery_failed);
        assert_eq!(self_ip.calls(), 0);
    }

    #[tokio::test]
    async fn test_discovery_success() {
        let shared: SharedProvider = Arc::new(FixedProvider::new(ProviderResult::success(
            ProviderKind::SelfIp,
            ProviderPayload::PublicIp(Ipv4Addr::new(9, 9, 9, 9)),
        )));
        let resolved = resolve_ip(None, &shared, Duration::from_secs(1)).await;
        assert_eq!(resolved.ip, Some(Ipv4Addr::new(9, 9, 9, 9)));
        assert!(!resolved.discovery_failed);
    }

    #[tokio::test]
    async fn test_discovery_failure_omits_geolocation() {
        let shared: SharedProvider = Arc::new(FixedProvider::new(ProviderResult::failure(
            ProviderKind::SelfIp,
        )));
        let resolved = resolve_ip(None, &shared, Duration::from_secs(1)).await;
        assert_eq!(resolved.ip, None);
        assert!(resolved.discovery_failed);
    }

    #[tokio::test]
    async fn test_discovery_timeout_omits_geolocation() {
        let shared: SharedProvider = Arc::new(StalledProvider::new(ProviderKind::SelfIp));
        let resolved = resolve_ip(None, &shared, Duration::from_millis(20)).await;
        assert_eq!(resolved.ip, None);
        assert!(resolved.discovery_failed);
    }
}
