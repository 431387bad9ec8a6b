//! Score Normalizer: one assessment record → five 1–5 dimension scores.

use momentum_core::models::assessment::{AssessmentRecord, RATING_MAX, RATING_MIN};
use momentum_core::models::score::{DimensionScore, DimensionValues};

const MINUTES_PER_POINT: f64 = 60.0;
const DEFAULT_SEVERITY: u8 = 3;

/// Normalize a single record.
///
/// Missing motivation and social ratings count as 0 and stay in the
/// average, so an incomplete record can score below 1 on those dimensions.
/// Ratings outside 1–5 are clamped into that range before scoring.
pub fn normalize(record: &AssessmentRecord) -> DimensionScore {
    DimensionScore::from_components(
        concentration_score(record),
        motivation_score(record),
        success_score(record),
        constraints_score(record),
        social_score(record),
    )
}

pub fn normalize_all(records: &[AssessmentRecord]) -> Vec<DimensionScore> {
    records.iter().map(normalize).collect()
}

/// Per-dimension mean of a set of scores. Zeros when `scores` is empty.
pub fn average_scores(scores: &[DimensionScore]) -> DimensionValues<f64> {
    if scores.is_empty() {
        return DimensionValues::default();
    }
    scores
        .iter()
        .fold(DimensionValues::default(), |acc, score| acc.sum_with(score))
        .divided_by(scores.len() as f64)
}

/// Normalize and average in one pass over the records.
pub fn average_records(records: &[AssessmentRecord]) -> DimensionValues<f64> {
    average_scores(&normalize_all(records))
}

fn concentration_score(record: &AssessmentRecord) -> f64 {
    let minutes = record.concentration.duration_minutes.unwrap_or(0);
    (f64::from(minutes) / MINUTES_PER_POINT).clamp(1.0, 5.0)
}

fn motivation_score(record: &AssessmentRecord) -> f64 {
    mean_of_ratings(record.motivation.ratings().map(|(_, rating)| rating))
}

fn success_score(record: &AssessmentRecord) -> f64 {
    let successes = &record.past_successes;
    let raw = 0.5 * successes.achievement_areas.len() as f64
        + 2.0 * flag(successes.has_significant_achievement())
        + flag(successes.has_learning())
        + flag(successes.has_transferable_strategies());
    raw.clamp(1.0, 5.0)
}

/// Inverted so that a higher score means fewer constraints.
fn constraints_score(record: &AssessmentRecord) -> f64 {
    let severity = record
        .constraints
        .severity_rating
        .unwrap_or(DEFAULT_SEVERITY)
        .clamp(RATING_MIN, RATING_MAX);
    6.0 - f64::from(severity)
}

fn social_score(record: &AssessmentRecord) -> f64 {
    mean_of_ratings(record.social_preference.ratings().map(|(_, rating)| rating))
}

fn mean_of_ratings<const N: usize>(ratings: [Option<u8>; N]) -> f64 {
    let total: f64 = ratings
        .iter()
        .map(|rating| rating.map_or(0.0, |v| f64::from(v.clamp(RATING_MIN, RATING_MAX))))
        .sum();
    total / N as f64
}

fn flag(present: bool) -> f64 {
    if present { 1.0 } else { 0.0 }
}
