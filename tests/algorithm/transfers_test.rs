use mimic_insights::algorithm::transfers::{HOURS, ICU_UNITS, icu_transfer_pattern};

use crate::utils::transfer;

#[test]
fn test_transfers_bucketed_by_hour() {
    let transfers = vec![
        transfer("MICU", Some("2150-01-01 08:15:00"), Some("2150-01-02 14:59:59")),
        transfer("MICU", Some("2150-01-03 08:45:00"), None),
        transfer("CCU", Some("2150-01-01 23:00:00"), Some("2150-01-02 00:30:00")),
        // not an ICU
        transfer("CARD", Some("2150-01-01 08:00:00"), Some("2150-01-01 09:00:00")),
    ];

    let pattern = icu_transfer_pattern(&transfers);
    assert_eq!(pattern.units.len(), ICU_UNITS.len());

    let micu = &pattern.units[0];
    assert_eq!(micu.unit.code, "MICU");
    assert_eq!(micu.in_counts[8], 2);
    assert_eq!(micu.out_counts[14], 1);
    assert_eq!(micu.total_in(), 2);
    assert_eq!(micu.total_out(), 1);

    let ccu = &pattern.units[1];
    assert_eq!(ccu.in_counts[23], 1);
    assert_eq!(ccu.out_counts[0], 1);

    let in_totals = pattern.in_totals();
    assert_eq!(in_totals.len(), HOURS);
    assert_eq!(in_totals.iter().sum::<u64>(), 3);
    assert_eq!(pattern.max_stack(), 2);
}

#[test]
fn test_units_keep_fixed_order_when_empty() {
    let pattern = icu_transfer_pattern(&[]);
    let codes: Vec<&str> = pattern.units.iter().map(|u| u.unit.code).collect();
    assert_eq!(codes, ["MICU", "CCU", "CSRU", "SICU", "TSICU", "NICU"]);
    assert_eq!(pattern.max_stack(), 0);
}
