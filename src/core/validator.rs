// src/core/validator.rs

use crate::core::error::{Result, ScanError};
use crate::core::models::{ScanRequest, ValidatedRequest};
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::Ipv4Addr;
use tracing::debug;

// Statically compiled grammars. The email pattern is applied after
// normalization, the domain pattern after lowercasing.
static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static RE_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]{1,61}[a-z0-9]\.[a-z]{2,}$").unwrap());

/// Validates and normalizes a raw scan request.
///
/// Every present field must match its grammar; an empty request (all three
/// identifiers absent) is rejected outright. When no explicit domain was
/// supplied but an email was, the email's host part is carried along as the
/// derived domain for downstream enrichment. Validation failure means no
/// provider is ever dispatched.
pub fn validate(request: &ScanRequest) -> Result<ValidatedRequest> {
    let email = match request.email.as_deref() {
        Some(raw) => {
            let normalized = normalize(raw);
            if !RE_EMAIL.is_match(&normalized) {
                return Err(ScanError::InvalidEmail(raw.to_string()));
            }
            Some(normalized)
        }
        None => None,
    };

    let domain = match request.domain.as_deref() {
        Some(raw) => {
            let normalized = normalize(raw);
            if !RE_DOMAIN.is_match(&normalized) {
                return Err(ScanError::InvalidDomain(raw.to_string()));
            }
            Some(normalized)
        }
        None => None,
    };

    let ip = match request.ip.as_deref() {
        // Parsing to Ipv4Addr enforces the dotted-quad grammar with octet
        // range checks, which a digit-count pattern would let through.
        Some(raw) => match raw.trim().parse::<Ipv4Addr>() {
            Ok(parsed) => Some(parsed),
            Err(_) => return Err(ScanError::InvalidIp(raw.to_string())),
        },
        None => None,
    };

    if email.is_none() && domain.is_none() && ip.is_none() {
        return Err(ScanError::EmptyRequest);
    }

    // The derived domain only widens enrichment; it is never a reason to fail
    // the request, so it skips the domain grammar.
    let derived_domain = if domain.is_none() {
        email
            .as_deref()
            .and_then(|e| e.split('@').nth(1))
            .map(String::from)
    } else {
        None
    };

    debug!(
        has_email = email.is_some(),
        has_domain = domain.is_some(),
        has_ip = ip.is_some(),
        derived_domain = derived_domain.as_deref().unwrap_or(""),
        "Scan request validated."
    );

    Ok(ValidatedRequest {
        email,
        domain,
        derived_domain,
        ip,
    })
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}
