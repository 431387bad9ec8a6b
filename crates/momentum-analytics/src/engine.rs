//! Entry point that runs one comparison from a [`ComparisonSettings`].

use tracing::{info, warn};

use momentum_core::models::assessment::AssessmentRecord;
use momentum_core::models::comparison::{ComparisonMode, ComparisonResult};
use momentum_core::settings::ComparisonSettings;

use crate::compare::{compare_patients, compare_time_ranges};
use crate::error::AnalyticsError;
use crate::grouping::{
    filter_by_min_assessments, filter_by_patients, filter_windows_by_min_assessments,
    group_by_patient, split_by_ranges,
};
use crate::periods::build_time_ranges;
use crate::progress::{MIN_PROGRESS_RECORDS, analyze_progress_groups};

/// Run the comparison selected by `settings.mode` over `records`.
///
/// Records are narrowed to `settings.selected_patients` (when non-empty)
/// and to patients with at least `settings.min_assessments_per_patient`
/// records. In time mode only records inside the two windows count toward
/// that minimum. Progress mode additionally excludes patients with fewer than
/// two records; each exclusion is logged.
pub fn run_comparison(
    records: &[AssessmentRecord],
    settings: &ComparisonSettings,
) -> Result<ComparisonResult, AnalyticsError> {
    let scoped = if settings.selected_patients.is_empty() {
        records.to_vec()
    } else {
        filter_by_patients(records, &settings.selected_patients)
    };

    info!(
        mode = %settings.mode,
        records = records.len(),
        in_scope = scoped.len(),
        "running comparison"
    );

    match settings.mode {
        ComparisonMode::Time => {
            let ranges = build_time_ranges(
                settings.period,
                settings.reference,
                settings.custom_ranges.as_ref(),
            )?;
            let (current, previous) = split_by_ranges(&scoped, &ranges);
            let (current, previous) = filter_windows_by_min_assessments(
                &current,
                &previous,
                settings.min_assessments_per_patient,
            );

            let mut comparison = compare_time_ranges(&current, &previous, &settings.thresholds);
            comparison.current_range = Some(ranges.current);
            comparison.previous_range = Some(ranges.previous);
            Ok(ComparisonResult::Time(comparison))
        }
        ComparisonMode::Patients => {
            let eligible = filter_by_min_assessments(&scoped, settings.min_assessments_per_patient);
            let groups = group_by_patient(&eligible);
            Ok(ComparisonResult::Patients(compare_patients(&groups)))
        }
        ComparisonMode::Progress => {
            let min = settings.min_assessments_per_patient.max(MIN_PROGRESS_RECORDS);
            let (eligible, excluded): (Vec<_>, Vec<_>) = group_by_patient(&scoped)
                .into_iter()
                .partition(|g| g.records.len() >= min);

            for group in &excluded {
                warn!(
                    patient_id = %group.key,
                    count = group.records.len(),
                    required = min,
                    "excluding patient from progress analysis"
                );
            }

            let analyses = analyze_progress_groups(&eligible, &settings.thresholds)?;
            Ok(ComparisonResult::Progress(analyses))
        }
    }
}
