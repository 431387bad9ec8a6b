use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The five scored dimensions plus their overall mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Dimension {
    Concentration,
    Motivation,
    Success,
    Constraints,
    Social,
    Overall,
}

impl Dimension {
    /// The five dimensions that are scored directly from a record.
    pub const SCORED: [Dimension; 5] = [
        Dimension::Concentration,
        Dimension::Motivation,
        Dimension::Success,
        Dimension::Constraints,
        Dimension::Social,
    ];

    /// Every dimension, overall last.
    pub const ALL: [Dimension; 6] = [
        Dimension::Concentration,
        Dimension::Motivation,
        Dimension::Success,
        Dimension::Constraints,
        Dimension::Social,
        Dimension::Overall,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Concentration => "Concentration",
            Dimension::Motivation => "Motivation",
            Dimension::Success => "Past successes",
            Dimension::Constraints => "Constraints",
            Dimension::Social => "Social preference",
            Dimension::Overall => "Overall",
        }
    }
}

/// One value per dimension. Used for scores, averages, deltas,
/// significance flags and trend lines alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DimensionValues<T> {
    pub concentration: T,
    pub motivation: T,
    pub success: T,
    pub constraints: T,
    pub social: T,
    pub overall: T,
}

/// Normalized 1–5 scores of a single assessment record.
pub type DimensionScore = DimensionValues<f64>;

impl<T> DimensionValues<T> {
    pub fn get(&self, dimension: Dimension) -> &T {
        match dimension {
            Dimension::Concentration => &self.concentration,
            Dimension::Motivation => &self.motivation,
            Dimension::Success => &self.success,
            Dimension::Constraints => &self.constraints,
            Dimension::Social => &self.social,
            Dimension::Overall => &self.overall,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Dimension, &T) -> U) -> DimensionValues<U> {
        DimensionValues {
            concentration: f(Dimension::Concentration, &self.concentration),
            motivation: f(Dimension::Motivation, &self.motivation),
            success: f(Dimension::Success, &self.success),
            constraints: f(Dimension::Constraints, &self.constraints),
            social: f(Dimension::Social, &self.social),
            overall: f(Dimension::Overall, &self.overall),
        }
    }

    pub fn zip_with<U, V>(
        &self,
        other: &DimensionValues<U>,
        mut f: impl FnMut(Dimension, &T, &U) -> V,
    ) -> DimensionValues<V> {
        self.map(|dimension, value| f(dimension, value, other.get(dimension)))
    }

    /// Build from a function of the dimension, overall included.
    pub fn from_fn(mut f: impl FnMut(Dimension) -> T) -> Self {
        DimensionValues {
            concentration: f(Dimension::Concentration),
            motivation: f(Dimension::Motivation),
            success: f(Dimension::Success),
            constraints: f(Dimension::Constraints),
            social: f(Dimension::Social),
            overall: f(Dimension::Overall),
        }
    }
}

impl DimensionValues<f64> {
    /// Scores from the five components; overall is their unweighted mean.
    pub fn from_components(
        concentration: f64,
        motivation: f64,
        success: f64,
        constraints: f64,
        social: f64,
    ) -> Self {
        let overall = (concentration + motivation + success + constraints + social) / 5.0;
        DimensionValues {
            concentration,
            motivation,
            success,
            constraints,
            social,
            overall,
        }
    }

    pub fn components(&self) -> [f64; 5] {
        [
            self.concentration,
            self.motivation,
            self.success,
            self.constraints,
            self.social,
        ]
    }

    /// Element-wise sum.
    pub fn sum_with(&self, other: &Self) -> Self {
        self.zip_with(other, |_, a, b| a + b)
    }

    /// Element-wise division by a scalar.
    pub fn divided_by(&self, divisor: f64) -> Self {
        self.map(|_, v| v / divisor)
    }
}

/// Overall-score band used to bucket records for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreBand {
    /// 4.0 and above.
    Excellent,
    /// 3.0 up to 4.0.
    Good,
    /// 2.0 up to 3.0.
    Fair,
    /// Below 2.0.
    Poor,
}

impl ScoreBand {
    pub fn from_overall(overall: f64) -> Self {
        if overall >= 4.0 {
            ScoreBand::Excellent
        } else if overall >= 3.0 {
            ScoreBand::Good
        } else if overall >= 2.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Poor => "poor",
        }
    }
}
