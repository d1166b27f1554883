// End-to-end orchestration tests over injected fake providers. No network
// access: every lookup source is a canned double, so outcomes are exact.

use footprint_rs_scanner::core::admission::AdmissionGate;
use footprint_rs_scanner::core::error::ScanError;
use footprint_rs_scanner::core::models::{
    AvatarData, Breach, DomainEmails, IpInfo, Mentions, Priority, ProviderKind, ProviderPayload,
    ProviderResult, RiskLevel, ScanRequest,
};
use footprint_rs_scanner::core::orchestrator::{ProviderSet, ScanConfig, ScanOrchestrator};
use footprint_rs_scanner::core::provider::demo::{FixedProvider, StalledProvider};
use std::sync::Arc;
use std::time::Duration;

/// One fake per capability slot, with call counters kept accessible.
struct Fixture {
    breach: Arc<FixedProvider>,
    avatar: Arc<FixedProvider>,
    geo: Arc<FixedProvider>,
    self_ip: Arc<FixedProvider>,
    domain_email: Arc<FixedProvider>,
    mention: Arc<FixedProvider>,
}

fn austin_ip_info() -> IpInfo {
    IpInfo {
        ip: "1.2.3.4".to_string(),
        city: Some("Austin".to_string()),
        region: Some("TX".to_string()),
        country: Some("US".to_string()),
        ..Default::default()
    }
}

fn avatar_data() -> AvatarData {
    AvatarData {
        image_url: "https://avatars.example/avatar/abc?s=200&d=identicon".to_string(),
        profile_url: "https://avatars.example/abc".to_string(),
        hash: "abc".to_string(),
    }
}

fn breach_record(name: &str) -> Breach {
    Breach {
        name: name.to_string(),
        title: name.to_string(),
        domain: "example.com".to_string(),
        breach_date: "2021-06-01".to_string(),
        pwn_count: 1000,
        data_classes: vec!["Email addresses".to_string()],
    }
}

impl Fixture {
    /// Verified-clean sources everywhere, no discoverable public IP, and
    /// enrichment sources that answer with empty data.
    fn clean() -> Self {
        Self {
            breach: Arc::new(FixedProvider::new(ProviderResult::not_found(
                ProviderKind::Breach,
            ))),
            avatar: Arc::new(FixedProvider::new(ProviderResult::not_found(
                ProviderKind::ProfileImage,
            ))),
            geo: Arc::new(FixedProvider::new(ProviderResult::success(
                ProviderKind::GeoLocation,
                ProviderPayload::IpInfo(austin_ip_info()),
            ))),
            self_ip: Arc::new(FixedProvider::new(ProviderResult::failure(
                ProviderKind::SelfIp,
            ))),
            domain_email: Arc::new(FixedProvider::new(ProviderResult::success(
                ProviderKind::DomainEmail,
                ProviderPayload::DomainEmails(DomainEmails {
                    domain: "example.com".to_string(),
                    emails_found: 0,
                    sample_emails: Vec::new(),
                }),
            ))),
            mention: Arc::new(FixedProvider::new(ProviderResult::success(
                ProviderKind::Mention,
                ProviderPayload::Mentions(Mentions {
                    query: "demo@example.com".to_string(),
                    count: 0,
                    platforms: Vec::new(),
                }),
            ))),
        }
    }

    fn provider_set(&self) -> ProviderSet {
        ProviderSet {
            breach: self.breach.clone(),
            profile_image: self.avatar.clone(),
            geolocation: self.geo.clone(),
            self_ip: self.self_ip.clone(),
            domain_email: self.domain_email.clone(),
            mention: self.mention.clone(),
        }
    }

    fn orchestrator(&self) -> ScanOrchestrator {
        ScanOrchestrator::new(self.provider_set())
    }
}

fn email_request() -> ScanRequest {
    ScanRequest {
        email: Some("demo@example.com".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn email_only_dispatches_subject_and_derivable_providers() {
    let fixture = Fixture::clean();
    let report = fixture.orchestrator().scan(&email_request()).await.unwrap();

    // Email keys the breach and avatar lookups; the derived domain and the
    // email-as-query make the enrichment lookups applicable too.
    assert_eq!(fixture.breach.calls(), 1);
    assert_eq!(fixture.avatar.calls(), 1);
    assert_eq!(fixture.domain_email.calls(), 1);
    assert_eq!(fixture.mention.calls(), 1);

    // No explicit IP and discovery failed, so geolocation never runs.
    assert_eq!(fixture.self_ip.calls(), 1);
    assert_eq!(fixture.geo.calls(), 0);
    assert!(report.ip_info.is_none());
    assert!(report.unavailable.contains(&ProviderKind::SelfIp));
}

#[tokio::test]
async fn ip_only_dispatches_geolocation_alone() {
    let fixture = Fixture::clean();
    let request = ScanRequest {
        ip: Some("1.2.3.4".to_string()),
        ..Default::default()
    };
    let report = fixture.orchestrator().scan(&request).await.unwrap();

    assert_eq!(fixture.geo.calls(), 1);
    assert_eq!(fixture.breach.calls(), 0);
    assert_eq!(fixture.avatar.calls(), 0);
    assert_eq!(fixture.domain_email.calls(), 0);
    assert_eq!(fixture.mention.calls(), 0);
    // An explicit IP means discovery is skipped entirely.
    assert_eq!(fixture.self_ip.calls(), 0);
    assert!(!report.unavailable.contains(&ProviderKind::SelfIp));
    assert_eq!(report.findings, vec!["Location exposed: Austin, TX"]);
}

#[tokio::test]
async fn domain_only_dispatches_domain_enrichment() {
    let fixture = Fixture::clean();
    let request = ScanRequest {
        domain: Some("example.com".to_string()),
        ..Default::default()
    };
    fixture.orchestrator().scan(&request).await.unwrap();

    assert_eq!(fixture.domain_email.calls(), 1);
    assert_eq!(fixture.breach.calls(), 0);
    assert_eq!(fixture.avatar.calls(), 0);
    assert_eq!(fixture.mention.calls(), 0);
}

#[tokio::test]
async fn discovered_ip_feeds_geolocation() {
    let mut fixture = Fixture::clean();
    fixture.self_ip = Arc::new(FixedProvider::new(ProviderResult::success(
        ProviderKind::SelfIp,
        ProviderPayload::PublicIp("9.9.9.9".parse().unwrap()),
    )));
    let report = fixture.orchestrator().scan(&email_request()).await.unwrap();

    assert_eq!(fixture.self_ip.calls(), 1);
    assert_eq!(fixture.geo.calls(), 1);
    assert!(report.ip_info.is_some());
    assert!(!report.unavailable.contains(&ProviderKind::SelfIp));
}

#[tokio::test]
async fn validation_failure_short_circuits_dispatch() {
    let fixture = Fixture::clean();
    let request = ScanRequest {
        email: Some("not-an-email".to_string()),
        ..Default::default()
    };
    let err = fixture.orchestrator().scan(&request).await.unwrap_err();

    assert!(matches!(err, ScanError::InvalidEmail(_)));
    assert_eq!(fixture.breach.calls(), 0);
    assert_eq!(fixture.avatar.calls(), 0);
    assert_eq!(fixture.self_ip.calls(), 0);

    let empty = fixture
        .orchestrator()
        .scan(&ScanRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(empty, ScanError::EmptyRequest));
}

#[tokio::test]
async fn stalled_geolocation_degrades_without_blocking_the_scan() {
    let mut fixture = Fixture::clean();
    fixture.breach = Arc::new(FixedProvider::new(ProviderResult::success(
        ProviderKind::Breach,
        ProviderPayload::Breaches(vec![breach_record("Adobe")]),
    )));
    let orchestrator = ScanOrchestrator::new(ProviderSet {
        geolocation: Arc::new(StalledProvider::new(ProviderKind::GeoLocation)),
        ..fixture.provider_set()
    })
    .with_config(
        ScanConfig::default().with_timeout(ProviderKind::GeoLocation, Duration::from_millis(50)),
    );

    let request = ScanRequest {
        email: Some("demo@example.com".to_string()),
        ip: Some("1.2.3.4".to_string()),
        ..Default::default()
    };

    // The scan must complete within the geolocation deadline plus slack,
    // not hang on the stalled provider.
    let report = tokio::time::timeout(Duration::from_secs(2), orchestrator.scan(&request))
        .await
        .expect("scan blocked on a stalled provider")
        .unwrap();

    assert!(report.ip_info.is_none());
    assert!(report.unavailable.contains(&ProviderKind::GeoLocation));
    // The other sections still populate normally.
    assert_eq!(report.breaches.len(), 1);
    assert!(report.findings.contains(&"Found in 1 data breach(es)".to_string()));
    assert_eq!(report.risk_score, 20);
}

#[tokio::test]
async fn verified_clean_breach_is_distinct_from_failure() {
    // Verified clean: positive finding, zero score, nothing unavailable.
    let clean = Fixture::clean();
    let clean_report = clean.orchestrator().scan(&email_request()).await.unwrap();
    assert!(clean_report.findings.contains(&"No data breaches found".to_string()));
    assert_eq!(clean_report.risk_score, 0);
    assert!(!clean_report.unavailable.contains(&ProviderKind::Breach));

    // Network failure: no breach finding either way, zero score, but the
    // section is explicitly recorded as unavailable.
    let mut failed = Fixture::clean();
    failed.breach = Arc::new(FixedProvider::new(ProviderResult::failure(
        ProviderKind::Breach,
    )));
    let failed_report = failed.orchestrator().scan(&email_request()).await.unwrap();
    assert!(!failed_report.findings.iter().any(|f| f.contains("breach")));
    assert_eq!(failed_report.risk_score, 0);
    assert!(failed_report.unavailable.contains(&ProviderKind::Breach));
}

#[tokio::test]
async fn findings_order_is_deterministic() {
    let mut fixture = Fixture::clean();
    fixture.breach = Arc::new(FixedProvider::new(ProviderResult::success(
        ProviderKind::Breach,
        ProviderPayload::Breaches(vec![breach_record("Adobe")]),
    )));
    fixture.avatar = Arc::new(FixedProvider::new(ProviderResult::success(
        ProviderKind::ProfileImage,
        ProviderPayload::Avatar(avatar_data()),
    )));
    fixture.mention = Arc::new(FixedProvider::new(ProviderResult::success(
        ProviderKind::Mention,
        ProviderPayload::Mentions(Mentions {
            query: "demo@example.com".to_string(),
            count: 2,
            platforms: Vec::new(),
        }),
    )));

    let request = ScanRequest {
        email: Some("demo@example.com".to_string()),
        ip: Some("1.2.3.4".to_string()),
        ..Default::default()
    };

    let orchestrator = fixture.orchestrator();
    let first = orchestrator.scan(&request).await.unwrap();
    let second = orchestrator.scan(&request).await.unwrap();

    // Merge order is fixed, so repeated scans with identical provider
    // outcomes produce identical findings, byte for byte.
    assert_eq!(first.findings, second.findings);
    assert_eq!(
        first.findings,
        vec![
            "Found in 1 data breach(es)",
            "Public profile image found",
            "Location exposed: Austin, TX",
            "Found 2 online mention(s)",
        ]
    );
    assert_eq!(first.recommendations, second.recommendations);
}

#[tokio::test]
async fn full_scan_example_scores_sixty_five_medium() {
    let mut fixture = Fixture::clean();
    fixture.breach = Arc::new(FixedProvider::new(ProviderResult::success(
        ProviderKind::Breach,
        ProviderPayload::Breaches(vec![breach_record("Adobe"), breach_record("LinkedIn")]),
    )));
    fixture.avatar = Arc::new(FixedProvider::new(ProviderResult::success(
        ProviderKind::ProfileImage,
        ProviderPayload::Avatar(avatar_data()),
    )));

    let request = ScanRequest {
        email: Some("demo@example.com".to_string()),
        ip: Some("1.2.3.4".to_string()),
        ..Default::default()
    };
    let report = fixture.orchestrator().scan(&request).await.unwrap();

    assert_eq!(report.risk_score, 2 * 20 + 10 + 15);
    assert_eq!(report.risk_level, RiskLevel::Medium);
    assert_eq!(
        report.findings,
        vec![
            "Found in 2 data breach(es)",
            "Public profile image found",
            "Location exposed: Austin, TX",
        ]
    );

    let actions: Vec<(&Priority, &str)> = report
        .recommendations
        .iter()
        .map(|r| (&r.priority, r.action.as_str()))
        .collect();
    assert_eq!(
        actions,
        vec![
            (&Priority::High, "Change passwords for affected services"),
            (&Priority::High, "Enable two-factor authentication"),
            (&Priority::Medium, "Make your profile image private"),
            (&Priority::Medium, "Use a VPN to mask your location"),
        ]
    );
}

#[tokio::test]
async fn admission_gate_rejects_before_dispatch() {
    let fixture = Fixture::clean();
    let orchestrator = fixture
        .orchestrator()
        .with_admission(AdmissionGate::per_minute(1));

    assert!(orchestrator.scan(&email_request()).await.is_ok());

    let err = orchestrator.scan(&email_request()).await.unwrap_err();
    assert!(matches!(err, ScanError::RateLimited));
    // The second request must have been rejected before any lookup ran.
    assert_eq!(fixture.breach.calls(), 1);

    let envelope = orchestrator.scan_envelope(&email_request()).await;
    assert!(!envelope.is_success());
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["error"], "Footprint scan failed");
}

#[tokio::test]
async fn degraded_scan_still_wraps_as_success() {
    let mut fixture = Fixture::clean();
    fixture.breach = Arc::new(FixedProvider::new(ProviderResult::timeout(
        ProviderKind::Breach,
    )));
    let envelope = fixture
        .orchestrator()
        .scan_envelope(&email_request())
        .await;

    assert!(envelope.is_success());
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["success"], true);
    assert!(
        value["data"]["unavailable"]
            .as_array()
            .unwrap()
            .iter()
            .any(|kind| kind == "breach")
    );
    assert!(value["timestamp"].is_string());
}
