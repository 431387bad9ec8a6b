//! Progress Analyzer: per-dimension least-squares trend lines over one
//! patient's assessment series.

use tracing::debug;
use uuid::Uuid;

use momentum_core::models::assessment::AssessmentRecord;
use momentum_core::models::comparison::{ProgressAnalysis, Trend, TrendLine};
use momentum_core::models::score::{DimensionScore, DimensionValues};
use momentum_core::settings::Thresholds;

use crate::error::AnalyticsError;
use crate::grouping::RecordGroup;
use crate::normalize::normalize;

/// A slope needs at least two points.
pub const MIN_PROGRESS_RECORDS: usize = 2;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fit a trend line per dimension over `records`, oldest first.
///
/// x is the record index (0, 1, 2, …) after sorting by assessment time,
/// not elapsed time, so uneven spacing does not affect the slope.
pub fn analyze_progress(
    patient_id: Uuid,
    records: &[AssessmentRecord],
    thresholds: &Thresholds,
) -> Result<ProgressAnalysis, AnalyticsError> {
    let mut series: Vec<&AssessmentRecord> = records.iter().collect();
    series.sort_by_key(|r| r.assessed_at);

    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() >= MIN_PROGRESS_RECORDS => (*first, *last),
        _ => {
            return Err(AnalyticsError::InsufficientData {
                patient_id,
                count: records.len(),
            });
        }
    };

    let scores: Vec<DimensionScore> = series.iter().map(|r| normalize(r)).collect();

    let trends = DimensionValues::from_fn(|dimension| {
        let values: Vec<f64> = scores.iter().map(|s| *s.get(dimension)).collect();
        let (slope, intercept) = fit_line(&values);
        TrendLine {
            slope,
            intercept,
            trend: classify_trend(slope, thresholds.trend_slope),
        }
    });

    let day_interval =
        (last.assessed_at.as_second() - first.assessed_at.as_second()) as f64 / SECONDS_PER_DAY;
    let reliability = reliability(series.len(), day_interval, thresholds);

    debug!(
        %patient_id,
        assessments = series.len(),
        day_interval,
        overall_slope = trends.overall.slope,
        "analyzed progress"
    );

    Ok(ProgressAnalysis {
        patient_id,
        assessment_count: series.len(),
        first_assessed_at: first.assessed_at,
        last_assessed_at: last.assessed_at,
        day_interval,
        first_overall: scores.first().map_or(0.0, |s| s.overall),
        latest_overall: scores.last().map_or(0.0, |s| s.overall),
        trends,
        reliability,
    })
}

/// Analyze every group, keyed by patient. Fails on the first patient with
/// too few records.
pub fn analyze_progress_groups(
    groups: &[RecordGroup<Uuid>],
    thresholds: &Thresholds,
) -> Result<Vec<ProgressAnalysis>, AnalyticsError> {
    groups
        .iter()
        .map(|g| analyze_progress(g.key, &g.records, thresholds))
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
struct Sums {
    n: f64,
    x: f64,
    y: f64,
    xy: f64,
    xx: f64,
}

/// Ordinary least squares over `(index, value)` pairs.
/// Returns `(slope, intercept)`; a degenerate fit is flat through the mean.
pub fn fit_line(values: &[f64]) -> (f64, f64) {
    let sums = values
        .iter()
        .enumerate()
        .fold(Sums::default(), |acc, (i, &y)| {
            let x = i as f64;
            Sums {
                n: acc.n + 1.0,
                x: acc.x + x,
                y: acc.y + y,
                xy: acc.xy + x * y,
                xx: acc.xx + x * x,
            }
        });

    if sums.n == 0.0 {
        return (0.0, 0.0);
    }

    let denominator = sums.n * sums.xx - sums.x * sums.x;
    if denominator == 0.0 {
        return (0.0, sums.y / sums.n);
    }

    let slope = (sums.n * sums.xy - sums.x * sums.y) / denominator;
    let intercept = (sums.y - slope * sums.x) / sums.n;
    (slope, intercept)
}

pub fn classify_trend(slope: f64, threshold: f64) -> Trend {
    if slope > threshold {
        Trend::Improving
    } else if slope < -threshold {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// `min(1, (count / sample_size) * (days / span_days))`.
pub fn reliability(count: usize, day_interval: f64, thresholds: &Thresholds) -> f64 {
    let sample = count as f64 / thresholds.reliability_sample_size;
    let span = day_interval.max(0.0) / thresholds.reliability_span_days;
    (sample * span).min(1.0)
}
