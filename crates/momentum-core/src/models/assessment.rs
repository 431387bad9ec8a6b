use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Lowest value on every 1–5 rating scale in an assessment.
pub const RATING_MIN: u8 = 1;
/// Highest value on every 1–5 rating scale in an assessment.
pub const RATING_MAX: u8 = 5;

/// One completed evaluation of a patient at a point in time.
///
/// Sub-records default when absent so that partially filled assessments
/// still flow through the engine. Use [`AssessmentRecord::validate`] to
/// find out what was missing or out of range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub assessed_at: jiff::Timestamp,
    #[serde(default)]
    pub concentration: Concentration,
    #[serde(default)]
    pub motivation: Motivation,
    #[serde(default)]
    pub past_successes: PastSuccesses,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub social_preference: SocialPreference,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Concentration {
    /// How long the patient can stay focused on a single task.
    pub duration_minutes: Option<u32>,
}

/// Four 1–5 ratings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Motivation {
    pub goal_clarity: Option<u8>,
    pub effort_willingness: Option<u8>,
    pub confidence: Option<u8>,
    pub external_support: Option<u8>,
}

impl Motivation {
    pub fn ratings(&self) -> [(&'static str, Option<u8>); 4] {
        [
            ("motivation.goal_clarity", self.goal_clarity),
            ("motivation.effort_willingness", self.effort_willingness),
            ("motivation.confidence", self.confidence),
            ("motivation.external_support", self.external_support),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PastSuccesses {
    /// Tags such as `academic`, `work` or `social`.
    #[serde(default)]
    pub achievement_areas: Vec<String>,
    pub most_significant_achievement: Option<String>,
    pub learning_from_success: Option<String>,
    pub transferable_strategies: Option<String>,
}

impl PastSuccesses {
    pub fn has_significant_achievement(&self) -> bool {
        has_text(&self.most_significant_achievement)
    }

    pub fn has_learning(&self) -> bool {
        has_text(&self.learning_from_success)
    }

    pub fn has_transferable_strategies(&self) -> bool {
        has_text(&self.transferable_strategies)
    }
}

fn has_text(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Constraints {
    /// 1 = barely constrained, 5 = severely constrained.
    pub severity_rating: Option<u8>,
}

/// Two 1–5 ratings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SocialPreference {
    pub comfort_with_strangers: Option<u8>,
    pub collaboration_willingness: Option<u8>,
}

impl SocialPreference {
    pub fn ratings(&self) -> [(&'static str, Option<u8>); 2] {
        [
            ("social_preference.comfort_with_strangers", self.comfort_with_strangers),
            (
                "social_preference.collaboration_willingness",
                self.collaboration_willingness,
            ),
        ]
    }
}

/// A problem found in an assessment record. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecordIssue {
    pub field: String,
    pub value: Option<u8>,
    pub message: String,
}

impl AssessmentRecord {
    /// A record with a fresh id and empty sub-records.
    pub fn new(patient_id: Uuid, assessed_at: jiff::Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            assessed_at,
            concentration: Concentration::default(),
            motivation: Motivation::default(),
            past_successes: PastSuccesses::default(),
            constraints: Constraints::default(),
            social_preference: SocialPreference::default(),
        }
    }

    /// Check every rating against the 1–5 scale.
    ///
    /// Missing motivation and social ratings are reported because the
    /// normalizer counts them as 0, which pulls the dimension below 1.
    /// A missing severity is reported too; it defaults to 3.
    pub fn validate(&self) -> Vec<RecordIssue> {
        let mut issues = Vec::new();

        let rated = self
            .motivation
            .ratings()
            .into_iter()
            .chain(self.social_preference.ratings())
            .chain([("constraints.severity_rating", self.constraints.severity_rating)]);

        for (field, value) in rated {
            match value {
                None if field == "constraints.severity_rating" => issues.push(RecordIssue {
                    field: field.to_string(),
                    value: None,
                    message: format!("{field} is missing and defaults to 3"),
                }),
                None => issues.push(RecordIssue {
                    field: field.to_string(),
                    value: None,
                    message: format!("{field} is missing and counts as 0"),
                }),
                Some(v) if !(RATING_MIN..=RATING_MAX).contains(&v) => issues.push(RecordIssue {
                    field: field.to_string(),
                    value: Some(v),
                    message: format!(
                        "{field} rating {v} is outside range [{RATING_MIN}, {RATING_MAX}]"
                    ),
                }),
                Some(_) => {}
            }
        }

        issues
    }
}
