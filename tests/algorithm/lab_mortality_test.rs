use mimic_insights::algorithm::statistics::quantile;
use mimic_insights::algorithm::{AbnormalityPolicy, compute_lab_mortality, top_lab_items};
use mimic_insights::config::LabMortalityConfig;
use mimic_insights::models::{Admission, LabEvent, LabItem};

use crate::utils::{assert_close, lab_event, lab_item, outcome};

fn config(policy: AbnormalityPolicy) -> LabMortalityConfig {
    LabMortalityConfig { top_n: 10, policy }
}

/// Three labs where admission 1 (died) is flagged in A and B but not C
fn flagged_fixture() -> (Vec<LabEvent>, Vec<LabItem>, Vec<Admission>) {
    let events = vec![
        lab_event(Some(1), 1, Some(7.0), Some("abnormal")),
        lab_event(Some(1), 2, Some(3.0), Some("abnormal")),
        lab_event(Some(1), 3, Some(4.0), None),
        lab_event(Some(2), 1, Some(9.0), Some("abnormal")),
        lab_event(Some(3), 2, Some(1.0), Some("abnormal")),
        lab_event(Some(4), 3, Some(8.0), Some("abnormal")),
    ];
    let catalog = vec![lab_item(1, "A"), lab_item(2, "B"), lab_item(3, "C")];
    let admissions = vec![
        outcome(1, Some(1)),
        outcome(2, Some(0)),
        outcome(3, Some(0)),
        outcome(4, Some(0)),
    ];
    (events, catalog, admissions)
}

/// Two labs with a spread of values over twenty admissions, every third one fatal
fn spread_fixture() -> (Vec<LabEvent>, Vec<LabItem>, Vec<Admission>) {
    let mut events = Vec::new();
    let mut admissions = Vec::new();
    for hadm in 1..=20_i64 {
        events.push(lab_event(Some(hadm), 50, Some(hadm as f64), None));
        events.push(lab_event(Some(hadm), 51, Some((21 - hadm) as f64 * 2.0), None));
        if hadm % 2 == 0 {
            events.push(lab_event(Some(hadm), 52, Some((hadm * hadm) as f64), None));
        }
        admissions.push(outcome(hadm, Some(i64::from(hadm % 3 == 0))));
    }
    let catalog = vec![
        lab_item(50, "Glucose"),
        lab_item(51, "Sodium"),
        lab_item(52, "Lactate"),
    ];
    (events, catalog, admissions)
}

/// Mortality among abnormal measurements of one item, computed directly
fn single_lab_rate(events: &[LabEvent], admissions: &[Admission], item_id: i64, lo_q: f64, hi_q: f64) -> f64 {
    let values: Vec<f64> = events
        .iter()
        .filter(|e| e.item_id == item_id)
        .filter_map(|e| e.value)
        .collect();
    let lower = quantile(&values, lo_q).unwrap().max(0.0);
    let upper = quantile(&values, hi_q).unwrap();
    let abnormal: Vec<&LabEvent> = events
        .iter()
        .filter(|e| e.item_id == item_id)
        .filter(|e| e.value.is_some_and(|v| v < lower || v > upper))
        .collect();
    let died = abnormal
        .iter()
        .filter(|e| {
            admissions
                .iter()
                .any(|a| Some(a.hadm_id) == e.hadm_id && a.hospital_expire_flag == Some(1))
        })
        .count();
    100.0 * died as f64 / abnormal.len() as f64
}

#[test]
fn test_pair_cell_for_shared_abnormal_admission() {
    let (events, catalog, admissions) = flagged_fixture();
    let result = compute_lab_mortality(&events, &catalog, &admissions, &config(AbnormalityPolicy::Flag));
    let m = &result.matrix;

    assert_eq!(m.labels(), ["A", "B", "C"]);
    assert_close(m.get_by_label("A", "B").unwrap(), 100.0);
    assert_close(m.get_by_label("B", "A").unwrap(), 100.0);
    assert_close(m.get_by_label("A", "C").unwrap(), 0.0);
    assert_close(m.get_by_label("B", "C").unwrap(), 0.0);
    assert_close(m.get_by_label("A", "A").unwrap(), 50.0);
    assert_close(m.get_by_label("C", "C").unwrap(), 0.0);
}

#[test]
fn test_diagonal_matches_single_lab_rate() {
    let (events, catalog, admissions) = spread_fixture();
    let result = compute_lab_mortality(
        &events,
        &catalog,
        &admissions,
        &config(AbnormalityPolicy::default()),
    );

    for stats in &result.stats {
        let expected = single_lab_rate(&events, &admissions, stats.item_id, 0.05, 0.95);
        let idx = result.matrix.index_of(&stats.label).unwrap();
        assert_close(result.matrix.get(idx, idx).unwrap(), expected);
        assert_close(stats.mortality_rate, expected);
    }
}

#[test]
fn test_matrix_symmetric_and_bounded_under_both_policies() {
    let (events, catalog, admissions) = spread_fixture();
    let flagged: Vec<LabEvent> = events
        .iter()
        .cloned()
        .map(|mut e| {
            if e.value.is_some_and(|v| v > 15.0) {
                e.flag = Some("abnormal".to_string());
            }
            e
        })
        .collect();

    for policy in [AbnormalityPolicy::default(), AbnormalityPolicy::Flag] {
        let result = compute_lab_mortality(&flagged, &catalog, &admissions, &config(policy));
        let m = &result.matrix;
        assert!(!m.is_empty());
        assert!(m.is_symmetric(), "{} matrix not symmetric", policy.name());
        for row in m.rows() {
            for &cell in row {
                assert!((0.0..=100.0).contains(&cell));
            }
        }
    }
}

#[test]
fn test_zero_variance_lab_excluded_by_percentile_only() {
    let mut events = Vec::new();
    let mut admissions = Vec::new();
    for hadm in 1..=10_i64 {
        events.push(lab_event(Some(hadm), 1, Some(hadm as f64), None));
        events.push(lab_event(Some(hadm), 2, Some(5.0), None));
        admissions.push(outcome(hadm, Some(0)));
    }
    let catalog = vec![lab_item(1, "Spread"), lab_item(2, "Constant")];

    let percentile = compute_lab_mortality(
        &events,
        &catalog,
        &admissions,
        &config(AbnormalityPolicy::default()),
    );
    assert_eq!(percentile.matrix.labels(), ["Spread"]);

    let flag = compute_lab_mortality(&events, &catalog, &admissions, &config(AbnormalityPolicy::Flag));
    assert_eq!(flag.matrix.labels(), ["Spread", "Constant"]);
    assert!(flag.stats.iter().all(|s| s.n_abnormal == 0 && s.mortality_rate == 0.0));
}

#[test]
fn test_labs_without_values_are_skipped() {
    let events = vec![
        lab_event(Some(1), 1, None, Some("abnormal")),
        lab_event(Some(1), 1, None, Some("abnormal")),
        lab_event(Some(1), 2, Some(1.0), Some("abnormal")),
    ];
    let catalog = vec![lab_item(1, "Text only"), lab_item(2, "Numeric")];
    let admissions = vec![outcome(1, Some(1))];

    let result = compute_lab_mortality(&events, &catalog, &admissions, &config(AbnormalityPolicy::Flag));
    assert_eq!(result.top_labs.len(), 2);
    assert_eq!(result.matrix.labels(), ["Numeric"]);
    assert_close(result.matrix.get(0, 0).unwrap(), 100.0);
}

#[test]
fn test_unknown_admissions_count_as_survived() {
    let events = vec![
        lab_event(Some(1), 1, Some(1.0), Some("abnormal")),
        lab_event(Some(99), 1, Some(1.0), Some("abnormal")),
        lab_event(None, 1, Some(1.0), Some("abnormal")),
    ];
    let catalog = vec![lab_item(1, "A")];
    let admissions = vec![outcome(1, Some(1))];

    let result = compute_lab_mortality(&events, &catalog, &admissions, &config(AbnormalityPolicy::Flag));
    let stats = &result.stats[0];
    assert_eq!(stats.n_abnormal, 3);
    assert_close(stats.mortality_rate, 100.0 / 3.0);
}

#[test]
fn test_recompute_is_bit_identical() {
    let (events, catalog, admissions) = spread_fixture();
    let cfg = config(AbnormalityPolicy::default());
    let first = compute_lab_mortality(&events, &catalog, &admissions, &cfg);
    let second = compute_lab_mortality(&events, &catalog, &admissions, &cfg);

    assert_eq!(first.matrix.labels(), second.matrix.labels());
    for (a, b) in first.matrix.rows().iter().zip(second.matrix.rows()) {
        let a_bits: Vec<u64> = a.iter().map(|v| v.to_bits()).collect();
        let b_bits: Vec<u64> = b.iter().map(|v| v.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
    }
}

#[test]
fn test_top_labs_rank_and_disambiguate() {
    let events = vec![
        lab_event(Some(1), 7, Some(1.0), None),
        lab_event(Some(1), 7, Some(1.0), None),
        lab_event(Some(1), 3, Some(1.0), None),
        lab_event(Some(1), 5, Some(1.0), None),
        lab_event(Some(1), 9, Some(1.0), None),
    ];
    let catalog = vec![lab_item(7, "Glucose"), lab_item(3, "Glucose"), lab_item(5, "pH")];

    let top = top_lab_items(&events, &catalog, 4);
    let labels: Vec<&str> = top.iter().map(|t| t.label.as_str()).collect();
    // item 9 has no catalog entry
    assert_eq!(labels, ["Glucose (7)", "Glucose (3)", "pH"]);
    assert_eq!(top[0].event_count, 2);
}

#[test]
fn test_nan_values_are_treated_as_missing() {
    let mut events: Vec<LabEvent> = (1..=19_i64)
        .map(|hadm| lab_event(Some(hadm), 50, Some(hadm as f64), None))
        .collect();
    events.push(lab_event(Some(20), 50, Some(f64::NAN), None));
    let catalog = vec![lab_item(50, "Glucose")];
    let admissions: Vec<Admission> = (1..=20_i64)
        .map(|hadm| outcome(hadm, Some(i64::from(hadm >= 19))))
        .collect();

    let result = compute_lab_mortality(&events, &catalog, &admissions, &config(AbnormalityPolicy::default()));

    let stats = &result.stats[0];
    assert_eq!(stats.n_total, 19);
    assert_eq!(stats.n_abnormal, 2);
    assert_close(stats.lower_bound.unwrap(), 1.9);
    assert_close(stats.upper_bound.unwrap(), 18.1);
    assert_close(stats.mortality_rate, 50.0);
    assert_close(result.matrix.get_by_label("Glucose", "Glucose").unwrap(), 50.0);
}

/// Admission 1 (died) and 2 (survived) are flagged in A and B; admission 1
/// also has a C measurement without a value
fn weighted_fixture() -> (Vec<LabEvent>, Vec<LabItem>, Vec<Admission>) {
    let events = vec![
        lab_event(Some(1), 1, Some(7.0), Some("abnormal")),
        lab_event(Some(1), 2, Some(3.0), Some("abnormal")),
        lab_event(Some(1), 3, None, None),
        lab_event(Some(2), 1, Some(9.0), Some("abnormal")),
        lab_event(Some(2), 2, Some(1.0), Some("abnormal")),
        lab_event(Some(5), 3, Some(4.0), None),
    ];
    let catalog = vec![lab_item(1, "A"), lab_item(2, "B"), lab_item(3, "C")];
    let admissions = vec![outcome(1, Some(1)), outcome(2, Some(0)), outcome(5, Some(0))];
    (events, catalog, admissions)
}

#[test]
fn test_pair_cells_weight_admissions_by_event_count() {
    let (events, catalog, admissions) = weighted_fixture();
    let result = compute_lab_mortality(&events, &catalog, &admissions, &config(AbnormalityPolicy::Flag));
    let matrix = &result.matrix;

    assert_eq!(matrix.labels(), ["A", "B", "C"]);
    assert_close(matrix.get_by_label("A", "A").unwrap(), 50.0);
    assert_close(matrix.get_by_label("B", "B").unwrap(), 50.0);
    // admission 1 weighs 3 events (including the valueless C), admission 2 weighs 2
    assert_close(matrix.get_by_label("A", "B").unwrap(), 60.0);
    assert_close(matrix.get_by_label("B", "A").unwrap(), 60.0);
    assert_close(matrix.get_by_label("A", "C").unwrap(), 0.0);
}

#[test]
fn test_pair_cells_skip_admissions_without_outcome() {
    let (mut events, catalog, admissions) = weighted_fixture();
    // admission 6 has no admission row
    events.push(lab_event(Some(6), 1, Some(5.0), Some("abnormal")));
    events.push(lab_event(Some(6), 2, Some(5.0), Some("abnormal")));

    let result = compute_lab_mortality(&events, &catalog, &admissions, &config(AbnormalityPolicy::Flag));
    let matrix = &result.matrix;

    assert_close(matrix.get_by_label("A", "B").unwrap(), 60.0);
    // the single-lab rate still counts admission 6 as survived
    assert_close(matrix.get_by_label("A", "A").unwrap(), 100.0 / 3.0);
}
