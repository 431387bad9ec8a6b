mod common;

use uuid::Uuid;

use momentum_analytics::compare::{change_rate, compare_patients, compare_time_ranges, percentile};
use momentum_analytics::grouping::{RecordGroup, group_by_patient};
use momentum_core::models::assessment::AssessmentRecord;
use momentum_core::models::score::Dimension;
use momentum_core::settings::Thresholds;

use common::{assert_close, noon, uniform_record};

fn patient_group(label: &str, records: Vec<AssessmentRecord>) -> RecordGroup<Uuid> {
    RecordGroup {
        key: records.first().map_or_else(Uuid::new_v4, |r| r.patient_id),
        label: label.to_string(),
        records,
    }
}

/// Uniform level-4 record with motivation raised to 5: overall 4.2.
fn record_at_4_2(patient: Uuid) -> AssessmentRecord {
    let mut record = uniform_record(patient, noon("2026-10-01"), 4);
    record.motivation.goal_clarity = Some(5);
    record.motivation.effort_willingness = Some(5);
    record.motivation.confidence = Some(5);
    record.motivation.external_support = Some(5);
    record
}

/// Uniform level-3 record with one social rating raised to 4: overall 3.1.
fn record_at_3_1(patient: Uuid) -> AssessmentRecord {
    let mut record = uniform_record(patient, noon("2026-10-01"), 3);
    record.social_preference.collaboration_willingness = Some(4);
    record
}

// ── Time comparison ──────────────────────────────────────────────────────────

#[test]
fn identical_windows_show_no_change() {
    let patient = Uuid::new_v4();
    let records = vec![
        uniform_record(patient, noon("2026-10-01"), 2),
        record_at_4_2(patient),
        record_at_3_1(patient),
    ];
    let copy = records.clone();

    let comparison = compare_time_ranges(&records, &copy, &Thresholds::default());
    for dimension in Dimension::ALL {
        assert_close(*comparison.difference.get(dimension), 0.0);
        assert_close(*comparison.change_rate.get(dimension), 0.0);
        assert!(!comparison.significant.get(dimension));
    }
}

#[test]
fn empty_previous_window_reports_full_growth() {
    let patient = Uuid::new_v4();
    let current = vec![uniform_record(patient, noon("2026-10-01"), 3)];

    let comparison = compare_time_ranges(&current, &[], &Thresholds::default());
    assert_close(comparison.previous.concentration, 0.0);
    assert_close(comparison.current.concentration, 3.0);
    assert_close(comparison.change_rate.concentration, 100.0);
    assert!(comparison.change_rate.concentration.is_finite());
    assert_eq!(comparison.previous_count, 0);
}

#[test]
fn change_rate_is_always_finite() {
    assert_close(change_rate(3.0, 0.0), 100.0);
    assert_close(change_rate(0.0, 0.0), 0.0);
    assert_close(change_rate(3.0, 2.0), 50.0);
    assert_close(change_rate(1.5, 3.0), -50.0);
    assert_close(change_rate(0.0, 4.0), -100.0);
}

#[test]
fn significance_uses_fixed_thresholds() {
    let patient = Uuid::new_v4();
    let previous = vec![uniform_record(patient, noon("2026-09-01"), 3)];

    // Social alone rises by 0.5 → overall by 0.1: nothing is flagged.
    let current = vec![record_at_3_1(patient)];
    let comparison = compare_time_ranges(&current, &previous, &Thresholds::default());
    assert_close(comparison.difference.social, 0.5);
    assert!(!comparison.significant.social);
    assert!(!comparison.significant.overall);

    // Social rises by 1.0 and motivation by 1.0 → overall by 0.4.
    let mut improved = uniform_record(patient, noon("2026-10-01"), 3);
    improved.social_preference.comfort_with_strangers = Some(4);
    improved.social_preference.collaboration_willingness = Some(4);
    improved.motivation.goal_clarity = Some(4);
    improved.motivation.effort_willingness = Some(4);
    improved.motivation.confidence = Some(4);
    improved.motivation.external_support = Some(4);
    let comparison = compare_time_ranges(&[improved], &previous, &Thresholds::default());
    assert!(comparison.significant.social);
    assert!(comparison.significant.motivation);
    assert!(!comparison.significant.concentration);
    assert_close(comparison.difference.overall, 0.4);
    assert!(comparison.significant.overall);
}

#[test]
fn time_comparison_leaves_inputs_untouched() {
    let patient = Uuid::new_v4();
    let current = vec![uniform_record(patient, noon("2026-10-01"), 5)];
    let previous = vec![uniform_record(patient, noon("2026-09-01"), 1)];
    let (current_before, previous_before) = (current.clone(), previous.clone());

    let comparison = compare_time_ranges(&current, &previous, &Thresholds::default());
    assert_close(comparison.difference.overall, 4.0);
    assert_close(comparison.change_rate.overall, 400.0);
    assert_eq!(current, current_before);
    assert_eq!(previous, previous_before);
}

// ── Patient comparison ───────────────────────────────────────────────────────

#[test]
fn two_patients_rank_and_percentile() {
    let (high, low) = (Uuid::new_v4(), Uuid::new_v4());
    let groups = vec![
        patient_group("high", vec![record_at_4_2(high)]),
        patient_group("low", vec![record_at_3_1(low)]),
    ];

    let ranked = compare_patients(&groups);
    assert_eq!(ranked.len(), 2);

    assert_eq!(ranked[0].patient_id, high);
    assert_close(ranked[0].average.overall, 4.2);
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[0].percentile, 100);

    assert_eq!(ranked[1].patient_id, low);
    assert_close(ranked[1].average.overall, 3.1);
    assert_eq!(ranked[1].rank, 2);
    assert_eq!(ranked[1].percentile, 50);
}

#[test]
fn ranking_does_not_depend_on_input_order() {
    let (high, low) = (Uuid::new_v4(), Uuid::new_v4());
    let high_group = patient_group("high", vec![record_at_4_2(high)]);
    let low_group = patient_group("low", vec![record_at_3_1(low)]);

    let forward = compare_patients(&[high_group.clone(), low_group.clone()]);
    let reversed = compare_patients(&[low_group, high_group]);

    assert_eq!(forward[0].patient_id, high);
    assert_eq!(reversed[0].patient_id, high);
    assert_eq!(forward, reversed);
}

#[test]
fn group_average_weights_patients_equally() {
    let (sparse, dense) = (Uuid::new_v4(), Uuid::new_v4());
    let groups = vec![
        patient_group("sparse", vec![uniform_record(sparse, noon("2026-10-01"), 5)]),
        patient_group(
            "dense",
            vec![
                uniform_record(dense, noon("2026-10-01"), 1),
                uniform_record(dense, noon("2026-10-02"), 1),
                uniform_record(dense, noon("2026-10-03"), 1),
            ],
        ),
    ];

    let ranked = compare_patients(&groups);
    // group average is (5 + 1) / 2 = 3, not (5 + 1 + 1 + 1) / 4 = 2
    assert_close(ranked[0].deviation.overall, 2.0);
    assert_close(ranked[1].deviation.overall, -2.0);
    assert_eq!(ranked[1].record_count, 3);
}

#[test]
fn percentiles_for_three_patients() {
    assert_eq!(percentile(1, 3), 100);
    assert_eq!(percentile(2, 3), 67);
    assert_eq!(percentile(3, 3), 33);
}

/// Equal overall scores are not tie-broken: patients keep the order they
/// were supplied in and receive consecutive ranks. Whether ties should
/// share a rank is an open product question.
#[test]
fn tied_patients_keep_input_order() {
    let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
    let groups = vec![
        patient_group("first", vec![uniform_record(first, noon("2026-10-01"), 3)]),
        patient_group("second", vec![uniform_record(second, noon("2026-10-01"), 3)]),
    ];

    let ranked = compare_patients(&groups);
    assert_eq!(ranked[0].patient_id, first);
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[1].patient_id, second);
    assert_eq!(ranked[1].rank, 2);
}

#[test]
fn no_patients_no_rows() {
    assert!(compare_patients(&[]).is_empty());
}

#[test]
fn grouped_records_feed_the_ranking() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let records = vec![
        uniform_record(a, noon("2026-10-01"), 2),
        uniform_record(b, noon("2026-10-01"), 5),
        uniform_record(c, noon("2026-10-01"), 3),
        uniform_record(a, noon("2026-10-08"), 4),
    ];

    let ranked = compare_patients(&group_by_patient(&records));
    let order: Vec<Uuid> = ranked.iter().map(|r| r.patient_id).collect();
    // a averages 3.0 and ties with c; a appeared first
    assert_eq!(order, vec![b, a, c]);
    assert_eq!(ranked[1].record_count, 2);
}
