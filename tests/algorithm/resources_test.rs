use mimic_insights::algorithm::resources::{
    ICU_CARE, MEDICAL_INPUTS, MEDICAL_SERVICES, PROCEDURES, UNCATEGORIZED,
};
use mimic_insights::algorithm::{ResourceInputs, resource_utilization};

use crate::utils::{assert_close, icu_stay, input, item, procedure, service};

#[test]
fn test_resource_rows_grouped_and_ordered() {
    let icu_stays = vec![
        icu_stay(Some("MICU"), "2150-01-01 00:00:00", 36),
        icu_stay(Some("MICU"), "2150-02-01 00:00:00", 12),
        icu_stay(Some("CCU"), "2150-03-01 00:00:00", 24),
        icu_stay(None, "2150-04-01 00:00:00", 5),
    ];
    let services = vec![service("MED"), service("CSURG"), service("MED")];
    let items = vec![
        item(1, Some("Ventilation")),
        item(2, None),
        item(3, Some("Fluids")),
    ];
    let procedures = vec![
        procedure(1, Some(30.0)),
        procedure(1, None),
        procedure(2, Some(5.0)),
        // not in the item catalog
        procedure(9, Some(100.0)),
    ];
    let inputs = vec![input(3, Some(250.0)), input(3, Some(f64::NAN)), input(3, Some(50.0))];

    let rows = resource_utilization(ResourceInputs {
        icu_stays: &icu_stays,
        services: &services,
        procedures: &procedures,
        inputs: &inputs,
        items: &items,
    });

    let keys: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.resource_type.as_str(), r.category.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (ICU_CARE, "CCU"),
            (ICU_CARE, "MICU"),
            (MEDICAL_SERVICES, "CSURG"),
            (MEDICAL_SERVICES, "MED"),
            (PROCEDURES, UNCATEGORIZED),
            (PROCEDURES, "Ventilation"),
            (MEDICAL_INPUTS, "Fluids"),
        ]
    );

    let micu = &rows[1];
    assert_eq!(micu.metric, "Patient Days");
    assert_eq!(micu.count, 2);
    assert_close(micu.value, 2.0);

    let med = &rows[3];
    assert_eq!(med.count, 2);
    assert_close(med.value, 2.0);

    let ventilation = &rows[5];
    assert_eq!(ventilation.count, 2);
    assert_close(ventilation.value, 30.0);

    let fluids = &rows[6];
    assert_eq!(fluids.metric, "Input Amount");
    assert_eq!(fluids.count, 3);
    assert_close(fluids.value, 300.0);
}

#[test]
fn test_empty_inputs_give_no_rows() {
    let rows = resource_utilization(ResourceInputs {
        icu_stays: &[],
        services: &[],
        procedures: &[],
        inputs: &[],
        items: &[],
    });
    assert!(rows.is_empty());
}
