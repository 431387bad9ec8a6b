use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::score::DimensionValues;
use super::time_range::TimeRange;

/// Which comparison the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ComparisonMode {
    /// Current window against the preceding one.
    Time,
    /// Patients ranked against each other.
    Patients,
    /// Per-patient trend lines over the whole series.
    Progress,
}

impl std::fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ComparisonMode::Time => "time",
            ComparisonMode::Patients => "patients",
            ComparisonMode::Progress => "progress",
        };
        f.write_str(s)
    }
}

/// Output of one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "results", rename_all = "snake_case")]
#[ts(export)]
pub enum ComparisonResult {
    Time(TimeComparison),
    Patients(Vec<PatientComparison>),
    Progress(Vec<ProgressAnalysis>),
}

impl ComparisonResult {
    pub fn mode(&self) -> ComparisonMode {
        match self {
            ComparisonResult::Time(_) => ComparisonMode::Time,
            ComparisonResult::Patients(_) => ComparisonMode::Patients,
            ComparisonResult::Progress(_) => ComparisonMode::Progress,
        }
    }

    /// Number of result entries: one for a time comparison, one per
    /// patient otherwise.
    pub fn data_points(&self) -> usize {
        match self {
            ComparisonResult::Time(_) => 1,
            ComparisonResult::Patients(rows) => rows.len(),
            ComparisonResult::Progress(rows) => rows.len(),
        }
    }
}

/// Period-over-period comparison of averaged dimension scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimeComparison {
    pub current_range: Option<TimeRange>,
    pub previous_range: Option<TimeRange>,
    pub current_count: usize,
    pub previous_count: usize,
    /// Averages of the current window; zeros when it holds no records.
    pub current: DimensionValues<f64>,
    /// Averages of the previous window; zeros when it holds no records.
    pub previous: DimensionValues<f64>,
    /// `current - previous`.
    pub difference: DimensionValues<f64>,
    /// Percentage change; always finite.
    pub change_rate: DimensionValues<f64>,
    pub significant: DimensionValues<bool>,
}

/// One patient's standing within a compared group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientComparison {
    pub patient_id: Uuid,
    pub label: String,
    pub record_count: usize,
    pub average: DimensionValues<f64>,
    /// 1-based, descending by overall average.
    pub rank: usize,
    pub percentile: u32,
    /// Patient average minus the group average.
    pub deviation: DimensionValues<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// Least-squares line over record index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub trend: Trend,
}

/// Longitudinal analysis of a single patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProgressAnalysis {
    pub patient_id: Uuid,
    pub assessment_count: usize,
    pub first_assessed_at: jiff::Timestamp,
    pub last_assessed_at: jiff::Timestamp,
    /// Days between the first and last assessment.
    pub day_interval: f64,
    pub first_overall: f64,
    pub latest_overall: f64,
    pub trends: DimensionValues<TrendLine>,
    /// 0–1; grows with both sample size and observation span.
    pub reliability: f64,
}
