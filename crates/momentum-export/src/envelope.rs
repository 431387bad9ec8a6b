use tracing::info;

use momentum_core::models::comparison::ComparisonResult;
use momentum_core::models::export::{ExportEnvelope, ExportMetadata, ExportSummary};
use momentum_core::settings::ComparisonSettings;

use crate::error::ExportError;

/// Wrap a comparison result in the summary export envelope.
///
/// `result` may be `None` when the caller exports metadata only; the
/// summary then reports the settings' mode and zero data points.
pub fn build_envelope(
    result: Option<ComparisonResult>,
    settings: &ComparisonSettings,
    exported_at: jiff::Timestamp,
) -> ExportEnvelope {
    let summary = ExportSummary {
        comparison_type: result.as_ref().map_or(settings.mode, ComparisonResult::mode),
        data_points: result.as_ref().map_or(0, ComparisonResult::data_points),
        generated_at: exported_at,
    };

    ExportEnvelope {
        metadata: ExportMetadata {
            export_date: exported_at,
            comparison_mode: settings.mode,
            scope: settings.scope(),
        },
        data: result,
        summary,
    }
}

pub fn to_json_pretty(envelope: &ExportEnvelope) -> Result<String, ExportError> {
    let json = serde_json::to_string_pretty(envelope)?;
    info!(
        comparison_type = %envelope.summary.comparison_type,
        data_points = envelope.summary.data_points,
        bytes = json.len(),
        "serialized export envelope"
    );
    Ok(json)
}

pub fn from_json(contents: &str) -> Result<ExportEnvelope, ExportError> {
    Ok(serde_json::from_str(contents)?)
}
