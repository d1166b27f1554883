// src/core/error.rs

use thiserror::Error;

/// Faults that abort a scan before or after the provider fan-out.
///
/// Provider-level trouble is deliberately not represented here. A lookup that
/// fails or times out degrades its own report section to "unavailable" and the
/// scan carries on; only a malformed request, a closed admission gate, or an
/// unexpected internal fault reach the caller as an error.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan request must include at least one of email, domain, or ip")]
    EmptyRequest,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("invalid IP address: {0}")]
    InvalidIp(String),

    #[error("invalid domain name: {0}")]
    InvalidDomain(String),

    #[error("scan request rejected by the admission gate")]
    RateLimited,

    #[error("internal scan failure: {0}")]
    Internal(String),
}

impl ScanError {
    /// True for errors produced by request validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyRequest
                | Self::InvalidEmail(_)
                | Self::InvalidIp(_)
                | Self::InvalidDomain(_)
        )
    }
}

/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_partition() {
        assert!(ScanError::EmptyRequest.is_validation());
        assert!(ScanError::InvalidEmail("x".into()).is_validation());
        assert!(ScanError::InvalidIp("x".into()).is_validation());
        assert!(ScanError::InvalidDomain("x".into()).is_validation());
        assert!(!ScanError::RateLimited.is_validation());
        assert!(!ScanError::Internal("x".into()).is_validation());
    }

    #[test]
    fn test_messages_name_the_field() {
        assert!(
            ScanError::InvalidEmail("not-an-email".into())
                .to_string()
                .contains("not-an-email")
        );
        assert!(
            ScanError::InvalidIp("999.0.0.1".into())
                .to_string()
                .contains("999.0.0.1")
        );
    }
}
