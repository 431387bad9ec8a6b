//! Comparator: period-over-period deltas and cross-patient rankings.
//!
//! Both entry points only read their inputs and allocate new results.

use tracing::debug;
use uuid::Uuid;

use momentum_core::models::assessment::AssessmentRecord;
use momentum_core::models::comparison::{PatientComparison, TimeComparison};
use momentum_core::models::score::{Dimension, DimensionValues};
use momentum_core::settings::Thresholds;

use crate::grouping::RecordGroup;
use crate::normalize::{average_records, average_scores};

// ── Time comparison ──────────────────────────────────────────────────────────

/// Compare the averaged scores of two record collections.
///
/// The returned ranges are left unset; callers that built the windows
/// attach them.
pub fn compare_time_ranges(
    current: &[AssessmentRecord],
    previous: &[AssessmentRecord],
    thresholds: &Thresholds,
) -> TimeComparison {
    let current_avg = average_records(current);
    let previous_avg = average_records(previous);

    let difference = current_avg.zip_with(&previous_avg, |_, cur, prev| cur - prev);
    let change_rate =
        current_avg.zip_with(&previous_avg, |_, cur, prev| change_rate(*cur, *prev));
    let significant =
        difference.map(|dimension, diff| is_significant(dimension, *diff, thresholds));

    debug!(
        current = current.len(),
        previous = previous.len(),
        overall_difference = difference.overall,
        "compared time windows"
    );

    TimeComparison {
        current_range: None,
        previous_range: None,
        current_count: current.len(),
        previous_count: previous.len(),
        current: current_avg,
        previous: previous_avg,
        difference,
        change_rate,
        significant,
    }
}

/// Percentage change from `previous` to `current`.
///
/// A zero previous value yields 100 when the current value is positive
/// and 0 otherwise, so the result is always finite.
pub fn change_rate(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    (current - previous) / previous * 100.0
}

pub fn is_significant(dimension: Dimension, difference: f64, thresholds: &Thresholds) -> bool {
    let threshold = match dimension {
        Dimension::Overall => thresholds.overall_significance,
        _ => thresholds.dimension_significance,
    };
    difference.abs() > threshold
}

// ── Patient comparison ───────────────────────────────────────────────────────

/// Rank patients against each other by their average overall score.
///
/// The group average is the unweighted mean of per-patient averages, so a
/// patient with many assessments counts as much as one with few. Patients
/// with equal overall scores keep their input order; no further
/// tie-break is applied.
pub fn compare_patients(groups: &[RecordGroup<Uuid>]) -> Vec<PatientComparison> {
    if groups.is_empty() {
        return Vec::new();
    }

    let averages: Vec<DimensionValues<f64>> =
        groups.iter().map(|g| average_records(&g.records)).collect();
    let group_average = average_scores(&averages);

    let mut order: Vec<usize> = (0..groups.len()).collect();
    // sort_by is stable, which is what keeps tied patients in input order
    order.sort_by(|&a, &b| averages[b].overall.total_cmp(&averages[a].overall));

    let n = groups.len();
    let ranked: Vec<PatientComparison> = order
        .into_iter()
        .enumerate()
        .map(|(position, index)| {
            let group = &groups[index];
            let average = averages[index];
            let rank = position + 1;
            PatientComparison {
                patient_id: group.key,
                label: group.label.clone(),
                record_count: group.records.len(),
                average,
                rank,
                percentile: percentile(rank, n),
                deviation: average.zip_with(&group_average, |_, own, all| own - all),
            }
        })
        .collect();

    debug!(
        patients = n,
        group_overall = group_average.overall,
        "ranked patients"
    );

    ranked
}

/// `round((n - rank + 1) / n * 100)`.
pub fn percentile(rank: usize, n: usize) -> u32 {
    if n == 0 {
        return 0;
    }
    ((n - rank + 1) as f64 / n as f64 * 100.0).round() as u32
}
