mod common;

use uuid::Uuid;

use momentum_analytics::AnalyticsError;
use momentum_analytics::grouping::group_by_patient;
use momentum_analytics::progress::{
    analyze_progress, analyze_progress_groups, classify_trend, fit_line, reliability,
};
use momentum_core::models::assessment::AssessmentRecord;
use momentum_core::models::comparison::Trend;
use momentum_core::models::score::Dimension;
use momentum_core::settings::Thresholds;

use common::{assert_close, noon, uniform_record};

const WEEKLY: [&str; 5] = [
    "2026-09-01",
    "2026-09-08",
    "2026-09-15",
    "2026-09-22",
    "2026-09-29",
];

fn series(patient: Uuid, levels: [u8; 5]) -> Vec<AssessmentRecord> {
    WEEKLY
        .iter()
        .zip(levels)
        .map(|(date, level)| uniform_record(patient, noon(date), level))
        .collect()
}

#[test]
fn rising_scores_are_improving() {
    let patient = Uuid::new_v4();
    let records = series(patient, [1, 2, 3, 4, 5]);
    let analysis = analyze_progress(patient, &records, &Thresholds::default()).unwrap();

    for dimension in Dimension::ALL {
        let line = analysis.trends.get(dimension);
        assert!(line.slope > 0.0);
        assert_close(line.slope, 1.0);
        assert_close(line.intercept, 1.0);
        assert_eq!(line.trend, Trend::Improving, "{dimension:?}");
    }
    assert_close(analysis.first_overall, 1.0);
    assert_close(analysis.latest_overall, 5.0);
}

#[test]
fn falling_scores_are_declining() {
    let patient = Uuid::new_v4();
    let records = series(patient, [5, 4, 3, 2, 1]);
    let analysis = analyze_progress(patient, &records, &Thresholds::default()).unwrap();

    for dimension in Dimension::ALL {
        let line = analysis.trends.get(dimension);
        assert!(line.slope < 0.0);
        assert_eq!(line.trend, Trend::Declining, "{dimension:?}");
    }
}

#[test]
fn flat_scores_are_stable() {
    let patient = Uuid::new_v4();
    let records = series(patient, [3, 3, 3, 3, 3]);
    let analysis = analyze_progress(patient, &records, &Thresholds::default()).unwrap();

    assert_close(analysis.trends.overall.slope, 0.0);
    assert_eq!(analysis.trends.overall.trend, Trend::Stable);
}

#[test]
fn records_are_ordered_by_assessment_time() {
    let patient = Uuid::new_v4();
    let mut records = series(patient, [1, 2, 3, 4, 5]);
    records.reverse();

    let analysis = analyze_progress(patient, &records, &Thresholds::default()).unwrap();
    assert_eq!(analysis.trends.overall.trend, Trend::Improving);
    assert_eq!(analysis.first_assessed_at, noon("2026-09-01"));
    assert_eq!(analysis.last_assessed_at, noon("2026-09-29"));
    assert_close(analysis.day_interval, 28.0);
}

#[test]
fn fewer_than_two_records_is_an_error() {
    let patient = Uuid::new_v4();

    let err = analyze_progress(patient, &[], &Thresholds::default()).unwrap_err();
    assert!(matches!(err, AnalyticsError::InsufficientData { count: 0, .. }));

    let one = vec![uniform_record(patient, noon("2026-09-01"), 3)];
    let err = analyze_progress(patient, &one, &Thresholds::default()).unwrap_err();
    assert!(matches!(
        err,
        AnalyticsError::InsufficientData { patient_id, count: 1 } if patient_id == patient
    ));
}

#[test]
fn least_squares_fit() {
    let (slope, intercept) = fit_line(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_close(slope, 1.0);
    assert_close(intercept, 1.0);

    let (slope, intercept) = fit_line(&[2.0, 4.0]);
    assert_close(slope, 2.0);
    assert_close(intercept, 2.0);

    // noisy upward series
    let (slope, _) = fit_line(&[1.1, 1.4, 2.1, 2.4]);
    assert_close(slope, 0.46);

    assert_eq!(fit_line(&[]), (0.0, 0.0));
    let (slope, intercept) = fit_line(&[4.0]);
    assert_close(slope, 0.0);
    assert_close(intercept, 4.0);
}

#[test]
fn trend_threshold_is_exclusive() {
    assert_eq!(classify_trend(0.05, 0.05), Trend::Stable);
    assert_eq!(classify_trend(0.051, 0.05), Trend::Improving);
    assert_eq!(classify_trend(-0.05, 0.05), Trend::Stable);
    assert_eq!(classify_trend(-0.051, 0.05), Trend::Declining);
}

#[test]
fn reliability_rewards_count_and_span() {
    let thresholds = Thresholds::default();
    assert_close(reliability(5, 30.0, &thresholds), 1.0);
    assert_close(reliability(2, 15.0, &thresholds), 0.2);
    assert_close(reliability(10, 90.0, &thresholds), 1.0);
    assert_close(reliability(4, 0.0, &thresholds), 0.0);
}

#[test]
fn weekly_series_reliability() {
    let patient = Uuid::new_v4();
    let records = series(patient, [2, 2, 3, 3, 4]);
    let analysis = analyze_progress(patient, &records, &Thresholds::default()).unwrap();
    // (5 / 5) * (28 / 30)
    assert_close(analysis.reliability, 28.0 / 30.0);
    assert_eq!(analysis.assessment_count, 5);
}

#[test]
fn batch_analysis_stops_at_the_first_sparse_patient() {
    let (steady, newcomer) = (Uuid::new_v4(), Uuid::new_v4());
    let mut records = series(steady, [1, 2, 3, 4, 5]);
    records.push(uniform_record(newcomer, noon("2026-10-01"), 3));

    let groups = group_by_patient(&records);
    let err = analyze_progress_groups(&groups, &Thresholds::default()).unwrap_err();
    assert!(
        matches!(err, AnalyticsError::InsufficientData { patient_id, .. } if patient_id == newcomer)
    );

    let analyses = analyze_progress_groups(&groups[..1], &Thresholds::default()).unwrap();
    assert_eq!(analyses.len(), 1);
    assert_eq!(analyses[0].patient_id, steady);
}
