//! Engine parameters.
//!
//! Everything a comparison run depends on is carried in one explicit
//! [`ComparisonSettings`] value. Settings arrive from the dashboard as JSON
//! and are migrated forward before deserializing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::comparison::ComparisonMode;
use crate::models::export::ExportScope;
use crate::models::time_range::{Period, TimeRanges};

/// Current settings version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComparisonSettings {
    /// Schema version. Missing or 0 = pre-versioned settings.
    #[serde(default)]
    pub settings_version: u32,
    pub mode: ComparisonMode,
    #[serde(default)]
    pub period: Period,
    /// The instant whose calendar period is "current".
    pub reference: jiff::Timestamp,
    /// Required when `period` is [`Period::Custom`], ignored otherwise.
    #[serde(default)]
    pub custom_ranges: Option<TimeRanges>,
    /// Empty means every patient.
    #[serde(default)]
    pub selected_patients: Vec<Uuid>,
    #[serde(default)]
    pub min_assessments_per_patient: usize,
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl ComparisonSettings {
    pub fn new(mode: ComparisonMode, reference: jiff::Timestamp) -> Self {
        Self {
            settings_version: CURRENT_VERSION,
            mode,
            period: Period::default(),
            reference,
            custom_ranges: None,
            selected_patients: Vec::new(),
            min_assessments_per_patient: 0,
            thresholds: Thresholds::default(),
        }
    }

    pub fn scope(&self) -> ExportScope {
        if self.selected_patients.is_empty() {
            ExportScope::All
        } else {
            ExportScope::Selected
        }
    }
}

/// Tunable cutoffs. The defaults are product choices, not statistical
/// constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Thresholds {
    /// Absolute difference above which a single dimension change is flagged.
    pub dimension_significance: f64,
    /// Absolute difference above which an overall change is flagged.
    pub overall_significance: f64,
    /// Slope magnitude separating improving/declining from stable.
    pub trend_slope: f64,
    /// Assessment count at which sample size stops limiting reliability.
    pub reliability_sample_size: f64,
    /// Span in days at which duration stops limiting reliability.
    pub reliability_span_days: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            dimension_significance: 0.5,
            overall_significance: 0.3,
            trend_slope: 0.05,
            reliability_sample_size: 5.0,
            reliability_span_days: 30.0,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("dimension_significance", self.dimension_significance),
            ("overall_significance", self.overall_significance),
            ("trend_slope", self.trend_slope),
            ("reliability_sample_size", self.reliability_sample_size),
            ("reliability_span_days", self.reliability_span_days),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidSettings(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        if self.reliability_sample_size == 0.0 || self.reliability_span_days == 0.0 {
            return Err(CoreError::InvalidSettings(
                "reliability_sample_size and reliability_span_days must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse settings JSON, migrating older shapes to [`CURRENT_VERSION`].
pub fn load_settings(contents: &str) -> Result<ComparisonSettings, CoreError> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = match json.get("settings_version").and_then(|v| v.as_u64()) {
        None => 0,
        Some(v) => u32::try_from(v).map_err(|_| {
            CoreError::InvalidSettings(format!("settings_version {v} is out of range"))
        })?,
    };

    let migrated = migrate(json, on_disk_version)?;
    let settings: ComparisonSettings = serde_json::from_value(migrated)?;
    settings.thresholds.validate()?;
    Ok(settings)
}

/// Serialize settings, always stamped with the current version.
pub fn save_settings(settings: &ComparisonSettings) -> Result<String, CoreError> {
    let mut stamped = settings.clone();
    stamped.settings_version = CURRENT_VERSION;
    Ok(serde_json::to_string_pretty(&stamped)?)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, CoreError> {
    if from_version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedSettingsVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: flat threshold keys move into a nested `thresholds` object
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or_else(|| {
            CoreError::InvalidSettings("settings is not a JSON object".to_string())
        })?;

        let renames = [
            ("significance_threshold", "dimension_significance"),
            ("overall_significance_threshold", "overall_significance"),
            ("trend_threshold", "trend_slope"),
        ];
        let mut thresholds = match obj.remove("thresholds") {
            Some(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        for (old, new) in renames {
            if let Some(value) = obj.remove(old) {
                thresholds.entry(new).or_insert(value);
            }
        }
        obj.insert(
            "thresholds".to_string(),
            serde_json::Value::Object(thresholds),
        );
        obj.insert(
            "settings_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated settings v0 → v1 (nested thresholds)");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}
