// src/core/orchestrator.rs

use crate::core::admission::AdmissionGate;
use crate::core::error::{Result, ScanError};
use crate::core::models::{
    ProviderKind, ProviderPayload, ProviderResult, ScanEnvelope, ScanReport, ScanRequest,
};
use crate::core::provider::SharedProvider;
use crate::core::provider::avatar::ProfileImageProvider;
use crate::core::provider::breach::BreachProvider;
use crate::core::provider::demo::{DemoDomainEmailProvider, DemoMentionProvider};
use crate::core::provider::geoip::GeoLocationProvider;
use crate::core::provider::self_ip::SelfIpProvider;
use crate::core::{recommend, resolver, scoring, validator};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Per-provider lookup deadlines. These are operational data, not business
/// logic; every one can be overridden.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub breach_timeout: Duration,
    pub avatar_timeout: Duration,
    pub geo_timeout: Duration,
    pub self_ip_timeout: Duration,
    pub domain_email_timeout: Duration,
    pub mention_timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            breach_timeout: Duration::from_secs(10),
            avatar_timeout: Duration::from_secs(5),
            geo_timeout: Duration::from_secs(8),
            self_ip_timeout: Duration::from_secs(5),
            domain_email_timeout: Duration::from_secs(5),
            mention_timeout: Duration::from_secs(5),
        }
    }
}

impl ScanConfig {
    /// Set every provider deadline to the same value.
    pub fn with_uniform_timeout(mut self, timeout: Duration) -> Self {
        self.breach_timeout = timeout;
        self.avatar_timeout = timeout;
        self.geo_timeout = timeout;
        self.self_ip_timeout = timeout;
        self.domain_email_timeout = timeout;
        self.mention_timeout = timeout;
        self
    }

    /// Set the deadline for one provider kind.
    pub fn with_timeout(mut self, kind: ProviderKind, timeout: Duration) -> Self {
        match kind {
            ProviderKind::Breach => self.breach_timeout = timeout,
            ProviderKind::ProfileImage => self.avatar_timeout = timeout,
            ProviderKind::GeoLocation => self.geo_timeout = timeout,
            ProviderKind::SelfIp => self.self_ip_timeout = timeout,
            ProviderKind::DomainEmail => self.domain_email_timeout = timeout,
            ProviderKind::Mention => self.mention_timeout = timeout,
        }
        self
    }

    fn timeout_for(&self, kind: ProviderKind) -> Duration {
        match kind {
            ProviderKind::Breach => self.breach_timeout,
            ProviderKind::ProfileImage => self.avatar_timeout,
            ProviderKind::GeoLocation => self.geo_timeout,
            ProviderKind::SelfIp => self.self_ip_timeout,
            ProviderKind::DomainEmail => self.domain_email_timeout,
            ProviderKind::Mention => self.mention_timeout,
        }
    }
}

/// The injected lookup sources, one per capability slot.
pub struct ProviderSet {
    pub breach: SharedProvider,
    pub profile_image: SharedProvider,
    pub geolocation: SharedProvider,
    pub self_ip: SharedProvider,
    pub domain_email: SharedProvider,
    pub mention: SharedProvider,
}

impl ProviderSet {
    /// The stock set: live breach, avatar, geolocation, and self-IP sources
    /// plus the demo enrichment placeholders.
    pub fn with_defaults() -> Self {
        Self {
            breach: Arc::new(BreachProvider::new()),
            profile_image: Arc::new(ProfileImageProvider::new()),
            geolocation: Arc::new(GeoLocationProvider::new()),
            self_ip: Arc::new(SelfIpProvider::new()),
            domain_email: Arc::new(DemoDomainEmailProvider),
            mention: Arc::new(DemoMentionProvider),
        }
    }
}

/// Coordinates one scan: validate, admit, resolve the geolocation IP, fan
/// the applicable providers out concurrently, join under per-provider
/// timeouts, merge in fixed priority order, then score and recommend.
///
/// A provider that fails or times out never aborts the scan; its section is
/// recorded as unavailable and the merge carries on with whatever answered.
/// Total latency tracks the slowest dispatched provider, not the sum.
pub struct ScanOrchestrator {
    providers: ProviderSet,
    config: ScanConfig,
    admission: Option<AdmissionGate>,
}

impl ScanOrchestrator {
    pub fn new(providers: ProviderSet) -> Self {
        Self {
            providers,
            config: ScanConfig::default(),
            admission: None,
        }
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_admission(mut self, gate: AdmissionGate) -> Self {
        self.admission = Some(gate);
        self
    }

    /// Runs one scan and returns the merged report.
    ///
    /// Dropping the returned future drops every in-flight lookup with it;
    /// a cancelled scan never leaves half-merged state behind.
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanReport> {
        let validated = validator::validate(request)?;

        if let Some(gate) = &self.admission {
            if !gate.admit() {
                warn!("Scan rejected by the admission gate.");
                return Err(ScanError::RateLimited);
            }
        }

        let resolved = resolver::resolve_ip(
            validated.ip,
            &self.providers.self_ip,
            self.config.self_ip_timeout,
        )
        .await;

        // Fan-out: every applicable provider is dispatched at once, each
        // under its own deadline.
        let mut lookups: Vec<BoxFuture<'static, ProviderResult>> = Vec::new();
        if let Some(email) = validated.email.as_deref() {
            lookups.push(self.dispatch(&self.providers.breach, email.to_string()));
            lookups.push(self.dispatch(&self.providers.profile_image, email.to_string()));
        }
        if let Some(ip) = resolved.ip {
            lookups.push(self.dispatch(&self.providers.geolocation, ip.to_string()));
        }
        if let Some(domain) = validated.enrichment_domain() {
            lookups.push(self.dispatch(&self.providers.domain_email, domain.to_string()));
        }
        if let Some(query) = validated.mention_query() {
            lookups.push(self.dispatch(&self.providers.mention, query.to_string()));
        }

        info!(dispatched = lookups.len(), "Provider fan-out started.");
        let mut results = futures::future::join_all(lookups).await;

        // Fan-in: merge in fixed priority order so the findings list does not
        // depend on which lookup happened to finish first.
        let mut report = ScanReport::default();
        if resolved.discovery_failed {
            report.unavailable.push(ProviderKind::SelfIp);
        }
        for kind in ProviderKind::MERGE_ORDER {
            if let Some(pos) = results.iter().position(|r| r.kind == kind) {
                merge_result(&mut report, results.remove(pos));
            }
        }

        report.risk_score = scoring::risk_score(&report);
        report.risk_level = scoring::risk_level(report.risk_score);
        report.recommendations = recommend::generate_recommendations(&report);

        info!(
            score = report.risk_score,
            level = %report.risk_level,
            findings = report.findings.len(),
            unavailable = report.unavailable.len(),
            "Scan finished."
        );
        Ok(report)
    }

    /// Runs one scan and wraps the outcome in the caller-facing envelope.
    pub async fn scan_envelope(&self, request: &ScanRequest) -> ScanEnvelope {
        match self.scan(request).await {
            Ok(report) => ScanEnvelope::success(report),
            Err(error) => {
                warn!(error = %error, "Scan failed.");
                ScanEnvelope::failure(&error)
            }
        }
    }

    fn dispatch(
        &self,
        provider: &SharedProvider,
        subject: String,
    ) -> BoxFuture<'static, ProviderResult> {
        let provider = Arc::clone(provider);
        let deadline = self.config.timeout_for(provider.kind());
        async move {
            let kind = provider.kind();
            debug!(provider = %kind, "Dispatching provider lookup.");
            match tokio::time::timeout(deadline, provider.lookup(&subject)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(provider = %kind, deadline_ms = deadline.as_millis() as u64, "Provider lookup timed out.");
                    ProviderResult::timeout(kind)
                }
            }
        }
        .boxed()
    }
}

// Folds one provider outcome into the report. Unavailable providers are
// recorded and logged, never fatal; a Success carrying the wrong payload is
// a contract violation and degrades the same way.
fn merge_result(report: &mut ScanReport, result: ProviderResult) {
    if result.status.is_unavailable() {
        warn!(provider = %result.kind, status = %result.status, "Provider unavailable, section degraded.");
        report.unavailable.push(result.kind);
        return;
    }

    match (result.kind, result.payload) {
        (ProviderKind::Breach, Some(ProviderPayload::Breaches(breaches))) => {
            if !breaches.is_empty() {
                report
                    .findings
                    .push(format!("Found in {} data breach(es)", breaches.len()));
            }
            report.breaches = breaches;
        }
        (ProviderKind::Breach, None) => {
            // Verified clean: a positive signal worth a finding of its own.
            report.findings.push("No data breaches found".to_string());
        }
        (ProviderKind::ProfileImage, Some(ProviderPayload::Avatar(avatar))) => {
            report.findings.push("Public profile image found".to_string());
            report.avatar = Some(avatar);
        }
        (ProviderKind::ProfileImage, None) => {}
        (ProviderKind::GeoLocation, Some(ProviderPayload::IpInfo(info))) => {
            if let (Some(city), Some(region)) = (&info.city, &info.region) {
                report
                    .findings
                    .push(format!("Location exposed: {city}, {region}"));
            }
            report.ip_info = Some(info);
        }
        (ProviderKind::GeoLocation, None) => {}
        (ProviderKind::DomainEmail, Some(ProviderPayload::DomainEmails(emails))) => {
            if emails.emails_found > 0 {
                report.findings.push(format!(
                    "{} email address(es) visible for domain {}",
                    emails.emails_found, emails.domain
                ));
            }
            report.domain_emails = Some(emails);
        }
        (ProviderKind::DomainEmail, None) => {}
        (ProviderKind::Mention, Some(ProviderPayload::Mentions(mentions))) => {
            if mentions.count > 0 {
                report
                    .findings
                    .push(format!("Found {} online mention(s)", mentions.count));
            }
            report.mentions = Some(mentions);
        }
        (ProviderKind::Mention, None) => {}
        (kind, payload) => {
            warn!(provider = %kind, payload = ?payload, "Provider returned a mismatched payload, section degraded.");
            report.unavailable.push(kind);
        }
    }
}
