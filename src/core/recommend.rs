// src/core/recommend.rs

use crate::core::knowledge_base::{self, ReasonTemplate, RecommendationRule, RuleTrigger};
use crate::core::models::{Recommendation, ScanReport};

/// Derives the prioritized action list from a merged report.
///
/// A single pass over the knowledge-base table: each rule fires
/// independently, and because the table is declared HIGH to LOW the output
/// is already ordered by priority with ties resolved by table position.
/// Pure and synchronous, like the scorer.
pub fn generate_recommendations(report: &ScanReport) -> Vec<Recommendation> {
    knowledge_base::RULES
        .iter()
        .filter(|rule| triggered(rule, report))
        .map(|rule| Recommendation {
            priority: rule.priority,
            action: rule.action.to_string(),
            reason: reason_for(rule, report),
        })
        .collect()
}

fn triggered(rule: &RecommendationRule, report: &ScanReport) -> bool {
    match rule.trigger {
        RuleTrigger::BreachesFound => !report.breaches.is_empty(),
        RuleTrigger::AvatarPublic => report.avatar.is_some(),
        RuleTrigger::LocationResolved => report
            .ip_info
            .as_ref()
            .is_some_and(|info| info.has_location()),
        RuleTrigger::ManyMentions => report
            .mentions
            .as_ref()
            .is_some_and(|mentions| mentions.count > 3),
    }
}

fn reason_for(rule: &RecommendationRule, report: &ScanReport) -> String {
    match rule.reason {
        ReasonTemplate::Fixed(text) => text.to_string(),
        ReasonTemplate::BreachCount => {
            format!("Found in {} data breach(es)", report.breaches.len())
        }
    }
}
