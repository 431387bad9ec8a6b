use momentum_core::models::time_range::Period;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("patient {patient_id} has {count} assessment(s), at least 2 are required")]
    InsufficientData { patient_id: Uuid, count: usize },

    #[error("invalid period '{0}': explicit current and previous ranges are required")]
    InvalidPeriod(Period),

    #[error("time range '{label}' starts after it ends")]
    InvertedRange { label: String },

    #[error("calendar arithmetic failed: {0}")]
    Calendar(#[from] jiff::Error),
}
