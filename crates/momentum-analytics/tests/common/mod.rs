#![allow(dead_code)]

use jiff::Timestamp;
use uuid::Uuid;

use momentum_core::models::assessment::{
    AssessmentRecord, Concentration, Constraints, Motivation, PastSuccesses, SocialPreference,
};

pub const TOLERANCE: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// Parse an RFC 3339 instant, e.g. `2026-10-14T09:30:00Z`.
pub fn ts(s: &str) -> Timestamp {
    s.parse().expect("valid timestamp")
}

/// Noon UTC on a `YYYY-MM-DD` date.
pub fn noon(date: &str) -> Timestamp {
    ts(&format!("{date}T12:00:00Z"))
}

/// A complete record on which every dimension scores exactly `level` (1–5).
pub fn uniform_record(patient_id: Uuid, assessed_at: Timestamp, level: u8) -> AssessmentRecord {
    assert!((1..=5).contains(&level));
    let narrative = |present: bool| present.then(|| "noted".to_string());

    AssessmentRecord {
        concentration: Concentration {
            duration_minutes: Some(u32::from(level) * 60),
        },
        motivation: Motivation {
            goal_clarity: Some(level),
            effort_willingness: Some(level),
            confidence: Some(level),
            external_support: Some(level),
        },
        past_successes: PastSuccesses {
            achievement_areas: if level == 5 {
                vec!["academic".to_string(), "work".to_string()]
            } else {
                Vec::new()
            },
            most_significant_achievement: narrative(level >= 2),
            learning_from_success: narrative(level >= 3),
            transferable_strategies: narrative(level >= 4),
        },
        constraints: Constraints {
            severity_rating: Some(6 - level),
        },
        social_preference: SocialPreference {
            comfort_with_strangers: Some(level),
            collaboration_willingness: Some(level),
        },
        ..AssessmentRecord::new(patient_id, assessed_at)
    }
}

/// Capped concentration, motivation 5, success 4, constraints 4, social 4:
/// overall 4.4.
pub fn worked_example_record(patient_id: Uuid, assessed_at: Timestamp) -> AssessmentRecord {
    AssessmentRecord {
        concentration: Concentration {
            duration_minutes: Some(300),
        },
        motivation: Motivation {
            goal_clarity: Some(5),
            effort_willingness: Some(5),
            confidence: Some(5),
            external_support: Some(5),
        },
        past_successes: PastSuccesses {
            achievement_areas: vec!["academic".to_string(), "work".to_string()],
            most_significant_achievement: Some("Finished a vocational course".to_string()),
            learning_from_success: Some("Small daily steps work".to_string()),
            transferable_strategies: None,
        },
        constraints: Constraints {
            severity_rating: Some(2),
        },
        social_preference: SocialPreference {
            comfort_with_strangers: Some(4),
            collaboration_willingness: Some(4),
        },
        ..AssessmentRecord::new(patient_id, assessed_at)
    }
}
