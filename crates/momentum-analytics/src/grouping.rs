//! Filtering and grouping of assessment records.
//!
//! Filters keep the relative order of the records they retain. Every
//! grouping is a partition: each input record lands in exactly one group.

use std::collections::{BTreeMap, HashMap, HashSet};

use jiff::civil::Date;
use uuid::Uuid;

use momentum_core::models::assessment::AssessmentRecord;
use momentum_core::models::score::ScoreBand;
use momentum_core::models::time_range::{TimeRange, TimeRanges};

use crate::normalize::normalize;
use crate::periods::{month_label, utc_date, week_label, week_start};

/// Group name for records whose patient has no entry in a group assignment.
pub const UNASSIGNED_GROUP: &str = "unassigned";

/// A labelled subset of records sharing a grouping key.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGroup<K> {
    pub key: K,
    pub label: String,
    pub records: Vec<AssessmentRecord>,
}

// ── Filtering ────────────────────────────────────────────────────────────────

/// Combined filter criteria. Unset criteria keep everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub date_range: Option<TimeRange>,
    pub patient_ids: Option<HashSet<Uuid>>,
    /// Applied last, counting only records that passed the other criteria.
    pub min_assessments_per_patient: usize,
}

pub fn filter_records(
    records: &[AssessmentRecord],
    filter: &RecordFilter,
) -> Vec<AssessmentRecord> {
    let matched: Vec<AssessmentRecord> = records
        .iter()
        .filter(|r| {
            filter
                .date_range
                .as_ref()
                .is_none_or(|range| range.contains(r.assessed_at))
        })
        .filter(|r| {
            filter
                .patient_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&r.patient_id))
        })
        .cloned()
        .collect();

    filter_by_min_assessments(&matched, filter.min_assessments_per_patient)
}

pub fn filter_by_date_range(
    records: &[AssessmentRecord],
    range: &TimeRange,
) -> Vec<AssessmentRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.assessed_at))
        .cloned()
        .collect()
}

pub fn filter_by_patients(
    records: &[AssessmentRecord],
    patient_ids: &[Uuid],
) -> Vec<AssessmentRecord> {
    let wanted: HashSet<&Uuid> = patient_ids.iter().collect();
    records
        .iter()
        .filter(|r| wanted.contains(&r.patient_id))
        .cloned()
        .collect()
}

fn patient_counts<'a>(
    records: impl IntoIterator<Item = &'a AssessmentRecord>,
) -> HashMap<Uuid, usize> {
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.patient_id).or_default() += 1;
    }
    counts
}

fn retain_counted(
    records: &[AssessmentRecord],
    counts: &HashMap<Uuid, usize>,
    min: usize,
) -> Vec<AssessmentRecord> {
    records
        .iter()
        .filter(|r| counts.get(&r.patient_id).copied().unwrap_or(0) >= min)
        .cloned()
        .collect()
}

/// Drop every record of a patient with fewer than `min` records.
pub fn filter_by_min_assessments(
    records: &[AssessmentRecord],
    min: usize,
) -> Vec<AssessmentRecord> {
    retain_counted(records, &patient_counts(records), min)
}

/// Per-patient minimum for a time comparison. A patient's records are
/// counted across both windows together, and each kept record stays in
/// its own window.
pub fn filter_windows_by_min_assessments(
    current: &[AssessmentRecord],
    previous: &[AssessmentRecord],
    min: usize,
) -> (Vec<AssessmentRecord>, Vec<AssessmentRecord>) {
    let counts = patient_counts(current.iter().chain(previous));
    (
        retain_counted(current, &counts, min),
        retain_counted(previous, &counts, min),
    )
}

/// Split records into the current and previous windows. Records outside
/// both windows are left out.
pub fn split_by_ranges(
    records: &[AssessmentRecord],
    ranges: &TimeRanges,
) -> (Vec<AssessmentRecord>, Vec<AssessmentRecord>) {
    (
        filter_by_date_range(records, &ranges.current),
        filter_by_date_range(records, &ranges.previous),
    )
}

// ── Grouping ─────────────────────────────────────────────────────────────────

/// Groups in order of each patient's first appearance.
pub fn group_by_patient(records: &[AssessmentRecord]) -> Vec<RecordGroup<Uuid>> {
    group_in_order(records, |r| (r.patient_id, r.patient_id.to_string()))
}

/// Groups keyed by the first day of the month (UTC), oldest first.
pub fn group_by_month(records: &[AssessmentRecord]) -> Vec<RecordGroup<Date>> {
    group_sorted(records, |r| {
        let month = utc_date(r.assessed_at).first_of_month();
        (month, month_label(month))
    })
}

/// Groups keyed by the Monday of the ISO week (UTC), oldest first.
pub fn group_by_week(records: &[AssessmentRecord]) -> Vec<RecordGroup<Date>> {
    group_sorted(records, |r| {
        let monday = week_start(utc_date(r.assessed_at));
        (monday, week_label(monday))
    })
}

/// Groups by the band of each record's overall score, best band first.
pub fn group_by_score_band(records: &[AssessmentRecord]) -> Vec<RecordGroup<ScoreBand>> {
    group_sorted(records, |r| {
        let band = ScoreBand::from_overall(normalize(r).overall);
        (band, band.label().to_string())
    })
}

/// Groups by a caller-supplied patient → group name map, in order of first
/// appearance. Patients missing from the map go to [`UNASSIGNED_GROUP`].
pub fn group_by_assignment(
    records: &[AssessmentRecord],
    assignment: &HashMap<Uuid, String>,
) -> Vec<RecordGroup<String>> {
    group_in_order(records, |r| {
        let name = assignment
            .get(&r.patient_id)
            .cloned()
            .unwrap_or_else(|| UNASSIGNED_GROUP.to_string());
        (name.clone(), name)
    })
}

fn group_in_order<K, F>(records: &[AssessmentRecord], key_of: F) -> Vec<RecordGroup<K>>
where
    K: Clone + Eq + std::hash::Hash,
    F: Fn(&AssessmentRecord) -> (K, String),
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<RecordGroup<K>> = Vec::new();

    for record in records {
        let (key, label) = key_of(record);
        let position = *positions.entry(key.clone()).or_insert_with(|| {
            groups.push(RecordGroup {
                key,
                label,
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[position].records.push(record.clone());
    }

    groups
}

fn group_sorted<K, F>(records: &[AssessmentRecord], key_of: F) -> Vec<RecordGroup<K>>
where
    K: Ord,
    F: Fn(&AssessmentRecord) -> (K, String),
{
    let mut buckets: BTreeMap<K, RecordGroup<()>> = BTreeMap::new();

    for record in records {
        let (key, label) = key_of(record);
        buckets
            .entry(key)
            .or_insert_with(|| RecordGroup {
                key: (),
                label,
                records: Vec::new(),
            })
            .records
            .push(record.clone());
    }

    buckets
        .into_iter()
        .map(|(key, group)| RecordGroup {
            key,
            label: group.label,
            records: group.records,
        })
        .collect()
}
