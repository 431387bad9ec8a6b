use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Granularity of a period-over-period comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Period {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
    /// Caller-supplied windows; nothing is computed.
    Custom,
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
            Period::Custom => "custom",
        };
        f.write_str(s)
    }
}

/// A half-open window `[start, end)` with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimeRange {
    pub start: jiff::Timestamp,
    pub end: jiff::Timestamp,
    pub label: String,
}

impl TimeRange {
    pub fn new(start: jiff::Timestamp, end: jiff::Timestamp, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    pub fn contains(&self, at: jiff::Timestamp) -> bool {
        self.start <= at && at < self.end
    }

    /// Length of the window in (fractional) days.
    pub fn span_days(&self) -> f64 {
        (self.end.as_second() - self.start.as_second()) as f64 / 86_400.0
    }
}

/// The two windows of a period-over-period comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimeRanges {
    pub current: TimeRange,
    pub previous: TimeRange,
}
