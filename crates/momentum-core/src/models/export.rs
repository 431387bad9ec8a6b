use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::comparison::{ComparisonMode, ComparisonResult};

/// Summary export envelope handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExportEnvelope {
    pub metadata: ExportMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ComparisonResult>,
    pub summary: ExportSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExportMetadata {
    pub export_date: jiff::Timestamp,
    pub comparison_mode: ComparisonMode,
    pub scope: ExportScope,
}

/// Whether the comparison covered every patient or a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ExportScope {
    All,
    Selected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExportSummary {
    pub comparison_type: ComparisonMode,
    pub data_points: usize,
    pub generated_at: jiff::Timestamp,
}
