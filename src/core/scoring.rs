// src/core/scoring.rs

use crate::core::models::{RiskLevel, ScanReport};

// Canonical weight table. Scoring reads only the merged report, never
// provider or timing state, so two identical reports always score the same.
pub const BREACH_WEIGHT: u32 = 20;
pub const AVATAR_WEIGHT: u32 = 10;
pub const LOCATION_WEIGHT: u32 = 15;
pub const MENTION_WEIGHT: u32 = 5;

const HIGH_THRESHOLD: u32 = 80;
const MEDIUM_THRESHOLD: u32 = 40;
const LOW_THRESHOLD: u32 = 15;

/// Numeric risk score for a merged report.
///
/// Each breach record weighs 20, a public avatar 10, a resolved location
/// (city and region) 15, and each public mention 5. Unavailable provider
/// sections contribute nothing; only verified findings move the score.
pub fn risk_score(report: &ScanReport) -> u32 {
    let mut score = report.breaches.len() as u32 * BREACH_WEIGHT;

    if report.avatar.is_some() {
        score += AVATAR_WEIGHT;
    }

    if report.ip_info.as_ref().is_some_and(|info| info.has_location()) {
        score += LOCATION_WEIGHT;
    }

    if let Some(mentions) = &report.mentions {
        score += mentions.count * MENTION_WEIGHT;
    }

    score
}

/// Maps a score onto its categorical level, thresholds evaluated
/// highest-first.
pub fn risk_level(score: u32) -> RiskLevel {
    if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else if score >= LOW_THRESHOLD {
        RiskLevel::Low
    } else {
        RiskLevel::Minimal
    }
}
