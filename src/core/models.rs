// src/core/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

use crate::core::error::ScanError;

// --- Request Types ---

// The raw, untrusted request as received from the caller. Any subset of the
// three identifiers may be present; the validator enforces that at least one is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanRequest {
    pub email: Option<String>,
    pub domain: Option<String>,
    pub ip: Option<String>,
}

// A request that passed validation. The email is trimmed and lowercased,
// the IP is a parsed dotted-quad, and `derived_domain` carries the email's
// host part when no explicit domain was supplied.
#[derive(Debug, Clone, Default)]
pub struct ValidatedRequest {
    pub email: Option<String>,
    pub domain: Option<String>,
    pub derived_domain: Option<String>,
    pub ip: Option<Ipv4Addr>,
}

impl ValidatedRequest {
    // Domain used for enrichment lookups. An explicit domain wins over one
    // derived from the email address.
    pub fn enrichment_domain(&self) -> Option<&str> {
        self.domain.as_deref().or(self.derived_domain.as_deref())
    }

    // Subject of the mention search. The request shape carries no separate
    // name field, so the normalized email is the query.
    pub fn mention_query(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

// --- Provider Contract Types ---

/// The six lookup capabilities understood by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Breach,
    ProfileImage,
    GeoLocation,
    SelfIp,
    DomainEmail,
    Mention,
}

impl ProviderKind {
    /// Fixed merge priority. Results are folded into the report in this order
    /// regardless of which provider finished first, so identical outcomes
    /// always produce identical findings. `SelfIp` feeds the IP resolver and
    /// never contributes a report section of its own.
    pub const MERGE_ORDER: [ProviderKind; 5] = [
        ProviderKind::Breach,
        ProviderKind::ProfileImage,
        ProviderKind::GeoLocation,
        ProviderKind::DomainEmail,
        ProviderKind::Mention,
    ];
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Breach => write!(f, "breach"),
            Self::ProfileImage => write!(f, "profile_image"),
            Self::GeoLocation => write!(f, "geo_location"),
            Self::SelfIp => write!(f, "self_ip"),
            Self::DomainEmail => write!(f, "domain_email"),
            Self::Mention => write!(f, "mention"),
        }
    }
}

/// Terminal state of one provider lookup.
///
/// `NotFound` is a verified-clean answer from the source ("no records for
/// this subject") and is never conflated with `Failure` or `Timeout`, which
/// both mean the answer is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    Success,
    NotFound,
    Failure,
    Timeout,
}

impl ProviderStatus {
    /// True for outcomes where the source actually answered.
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Success | Self::NotFound)
    }

    /// True for outcomes that degrade the provider's report section.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Failure | Self::Timeout)
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::NotFound => write!(f, "not_found"),
            Self::Failure => write!(f, "failure"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}

// Source-specific payload carried by a successful (or verified-clean) lookup.
#[derive(Debug, Clone)]
pub enum ProviderPayload {
    Breaches(Vec<Breach>),
    Avatar(AvatarData),
    IpInfo(IpInfo),
    PublicIp(Ipv4Addr),
    DomainEmails(DomainEmails),
    Mentions(Mentions),
}

// The transient outcome of one lookup. Owned by the orchestrator during the
// join and discarded once merged into the report.
#[derive(Debug, Clone)]
pub struct ProviderResult {
    pub kind: ProviderKind,
    pub status: ProviderStatus,
    pub payload: Option<ProviderPayload>,
}

impl ProviderResult {
    pub fn success(kind: ProviderKind, payload: ProviderPayload) -> Self {
        Self {
            kind,
            status: ProviderStatus::Success,
            payload: Some(payload),
        }
    }

    pub fn not_found(kind: ProviderKind) -> Self {
        Self {
            kind,
            status: ProviderStatus::NotFound,
            payload: None,
        }
    }

    pub fn failure(kind: ProviderKind) -> Self {
        Self {
            kind,
            status: ProviderStatus::Failure,
            payload: None,
        }
    }

    pub fn timeout(kind: ProviderKind) -> Self {
        Self {
            kind,
            status: ProviderStatus::Timeout,
            payload: None,
        }
    }
}

// --- Provider Payload Models ---

// A single record from the breach database. Field names follow the source's
// PascalCase wire format; unknown fields are ignored and missing ones default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Breach {
    pub name: String,
    pub title: String,
    pub domain: String,
    pub breach_date: String,
    pub pwn_count: u64,
    pub data_classes: Vec<String>,
}

// A public avatar discovered for the subject. `hash` is the lowercase hex
// content hash of the normalized email that addresses the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarData {
    pub image_url: String,
    pub profile_url: String,
    pub hash: String,
}

// Geolocation data for an IP address, in the lookup source's JSON shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IpInfo {
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
}

impl IpInfo {
    // Location counts as exposed only when both city and region resolved.
    pub fn has_location(&self) -> bool {
        self.city.is_some() && self.region.is_some()
    }
}

// Addresses publicly visible for a domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainEmails {
    pub domain: String,
    pub emails_found: u32,
    pub sample_emails: Vec<String>,
}

// Public mentions of the subject across the open web.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mentions {
    pub query: String,
    pub count: u32,
    pub platforms: Vec<String>,
}

// --- Risk Model ---

/// Categorical risk bucket, derived from the numeric score via fixed
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Minimal
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => write!(f, "MINIMAL"),
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Recommendation priority. Declaration order is the output order, so the
/// derived `Ord` sorts High before Medium before Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

// A single prioritized action for the subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
    pub reason: String,
}

// --- Report ---

// The single merged output for one scan: provider sections, human-readable
// findings, the score and level, and prioritized recommendations. Built once
// per request and never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub breaches: Vec<Breach>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<AvatarData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_info: Option<IpInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_emails: Option<DomainEmails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Mentions>,
    pub unavailable: Vec<ProviderKind>,
    pub findings: Vec<String>,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<Recommendation>,
}

// --- Caller-Facing Envelope ---

/// Transport-agnostic response wrapper. A degraded scan (some providers
/// unavailable) is still a success; only validation and internal faults
/// surface as failures.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScanEnvelope {
    Success {
        success: bool,
        data: ScanReport,
        timestamp: DateTime<Utc>,
    },
    Failure {
        success: bool,
        error: String,
        details: String,
    },
}

impl ScanEnvelope {
    pub fn success(report: ScanReport) -> Self {
        Self::Success {
            success: true,
            data: report,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(error: &ScanError) -> Self {
        let summary = if error.is_validation() {
            "Invalid scan request"
        } else {
            "Footprint scan failed"
        };
        Self::Failure {
            success: false,
            error: summary.to_string(),
            details: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
