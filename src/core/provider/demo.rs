// src/core/provider/demo.rs

//! Placeholder and test providers.
//!
//! The domain-email and mention capabilities are contract-only: a production
//! deployment swaps in real integrations behind `LookupProvider` without
//! touching the orchestrator. The demo variants here generate bounded local
//! data so the rest of the pipeline can be exercised end to end, and the
//! randomness stays on this side of the contract, never inside scoring or
//! recommendation logic. `FixedProvider` and `StalledProvider` are the
//! doubles used by tests and canned demo configurations.

use crate::core::models::{
    DomainEmails, Mentions, ProviderKind, ProviderPayload, ProviderResult,
};
use crate::core::provider::LookupProvider;
use async_trait::async_trait;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Platforms reported by the demo mention search.
const MENTION_PLATFORMS: &[&str] = &["LinkedIn", "Twitter", "Facebook", "GitHub"];

/// Mailbox prefixes sampled by the demo domain-email lookup.
const SAMPLE_MAILBOXES: &[&str] = &["info", "contact", "support"];

/// Demo stand-in for a domain-email intelligence source.
pub struct DemoDomainEmailProvider;

#[async_trait]
impl LookupProvider for DemoDomainEmailProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DomainEmail
    }

    async fn lookup(&self, subject: &str) -> ProviderResult {
        let emails_found = rand::thread_rng().gen_range(2..=9);
        let sample_emails = SAMPLE_MAILBOXES
            .iter()
            .map(|prefix| format!("{prefix}@{subject}"))
            .collect();
        info!(domain = subject, emails_found, "Demo domain-email lookup finished.");
        ProviderResult::success(
            self.kind(),
            ProviderPayload::DomainEmails(DomainEmails {
                domain: subject.to_string(),
                emails_found,
                sample_emails,
            }),
        )
    }
}

/// Demo stand-in for a public mention search.
pub struct DemoMentionProvider;

#[async_trait]
impl LookupProvider for DemoMentionProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Mention
    }

    async fn lookup(&self, subject: &str) -> ProviderResult {
        let count = rand::thread_rng().gen_range(0..10);
        info!(query = subject, count, "Demo mention search finished.");
        ProviderResult::success(
            self.kind(),
            ProviderPayload::Mentions(Mentions {
                query: subject.to_string(),
                count,
                platforms: MENTION_PLATFORMS.iter().map(|p| p.to_string()).collect(),
            }),
        )
    }
}

/// Returns a canned result on every lookup and counts how often it was asked.
///
/// This is the injection point for canned demo reports and for test
/// assertions about which providers the orchestrator actually dispatched.
pub struct FixedProvider {
    kind: ProviderKind,
    result: ProviderResult,
    calls: AtomicUsize,
}

impl FixedProvider {
    pub fn new(result: ProviderResult) -> Self {
        Self {
            kind: result.kind,
            result,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LookupProvider for FixedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn lookup(&self, _subject: &str) -> ProviderResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Never resolves. Exercises the orchestrator's per-provider timeout path.
pub struct StalledProvider {
    kind: ProviderKind,
}

impl StalledProvider {
    pub fn new(kind: ProviderKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl LookupProvider for StalledProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn lookup(&self, _subject: &str) -> ProviderResult {
        std::future::pending::<()>().await;
        unreachable!("a stalled lookup never completes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_domain_emails_are_bounded() {
        let provider = DemoDomainEmailProvider;
        let result = provider.lookup("example.com").await;
        assert_eq!(result.kind, ProviderKind::DomainEmail);
        match result.payload {
            Some(ProviderPayload::DomainEmails(data)) => {
                assert_eq!(data.domain, "example.com");
                assert!((2..=9).contains(&data.emails_found));
                assert_eq!(data.sample_emails.len(), SAMPLE_MAILBOXES.len());
                assert!(data.sample_emails.iter().all(|e| e.ends_with("@example.com")));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_demo_mentions_are_bounded() {
        let provider = DemoMentionProvider;
        let result = provider.lookup("demo@example.com").await;
        match result.payload {
            Some(ProviderPayload::Mentions(data)) => {
                assert!(data.count < 10);
                assert_eq!(data.platforms.len(), MENTION_PLATFORMS.len());
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fixed_provider_counts_calls() {
        let provider = FixedProvider::new(ProviderResult::not_found(ProviderKind::Breach));
        assert_eq!(provider.calls(), 0);
        let _ = provider.lookup("a@b.co").await;
        let _ = provider.lookup("a@b.co").await;
        assert_eq!(provider.calls(), 2);
    }
}
