use mimic_insights::algorithm::lab_mortality::{CoMortalityMatrix, LabMortalityResult};
use mimic_insights::algorithm::resources::ResourceRow;
use mimic_insights::algorithm::transfers::icu_transfer_pattern;
use mimic_insights::algorithm::{AbnormalityPolicy, insurance_length_of_stay, medication_length_of_stay};
use mimic_insights::render::{
    heatmap_title, render_insurance_boxplot, render_lab_heatmap, render_medication_boxplot,
    render_resource_sunburst, render_transfer_bars,
};

use crate::utils::{patient, prescription, stay, transfer};

fn assert_well_formed_svg(svg: &str) {
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<svg").count(), 1);
}

fn lab_result(labels: &[&str], values: &[(usize, usize, f64)]) -> LabMortalityResult {
    let mut matrix = CoMortalityMatrix::zeros(labels.iter().map(|l| (*l).to_string()).collect());
    for &(i, j, v) in values {
        matrix.set_pair(i, j, v);
    }
    LabMortalityResult {
        policy: AbnormalityPolicy::default(),
        top_labs: Vec::new(),
        stats: Vec::new(),
        matrix,
    }
}

#[test]
fn test_heatmap_annotates_cells_and_escapes_labels() {
    let result = lab_result(&["pO2", "Calcium <Total>"], &[(0, 0, 25.0), (0, 1, 12.34), (1, 1, 40.0)]);
    let svg = render_lab_heatmap(&result);

    assert_well_formed_svg(&svg);
    assert!(svg.contains(">12.3<"));
    assert!(svg.contains(">40.0<"));
    assert!(svg.contains("Calcium &lt;Total&gt;"));
    assert!(svg.contains("5th-95th Percentile"));
}

#[test]
fn test_heatmap_title_names_policy() {
    assert!(heatmap_title(&AbnormalityPolicy::Flag).contains("Flags"));
    let empty = render_lab_heatmap(&lab_result(&[], &[]));
    assert_well_formed_svg(&empty);
    assert!(empty.contains("No lab items"));
}

#[test]
fn test_boxplots_render_each_group() {
    let admissions = vec![
        stay(1, 10, "2150-01-01 00:00:00", 2, "Medicare"),
        stay(2, 20, "2150-01-01 00:00:00", 5, "Private"),
    ];
    let patients = vec![patient(1, "2080-01-01 00:00:00"), patient(2, "2130-01-01 00:00:00")];
    let prescriptions = vec![prescription(1, 10, "Insulin"), prescription(2, 20, "Heparin")];

    let medication = render_medication_boxplot(&medication_length_of_stay(&prescriptions, &admissions, 5));
    assert_well_formed_svg(&medication);
    assert!(medication.contains(">Insulin<"));
    assert!(medication.contains(">Heparin<"));

    let insurance = render_insurance_boxplot(&insurance_length_of_stay(&admissions, &patients, 1.0), 0.95);
    assert_well_formed_svg(&insurance);
    assert!(insurance.contains("(95th percentile of LOS shown)"));
    assert!(insurance.contains("#9b59b6"));
    assert!(insurance.contains(">70+<"));
}

#[test]
fn test_transfer_bars_use_dotted_out_bars() {
    let transfers = vec![transfer("SICU", Some("2150-01-01 03:00:00"), Some("2150-01-01 05:00:00"))];
    let svg = render_transfer_bars(&icu_transfer_pattern(&transfers));

    assert_well_formed_svg(&svg);
    assert_eq!(svg.matches("<pattern ").count(), 6);
    assert!(svg.contains("url(#out-3)"));
    assert!(svg.contains(">03:00<"));
    assert!(svg.contains("Surgical ICU"));
}

#[test]
fn test_sunburst_page_embeds_plotly() {
    let rows = vec![ResourceRow {
        resource_type: "ICU Care".to_string(),
        category: "MICU".to_string(),
        metric: "Patient Days".to_string(),
        value: 2.5,
        count: 3,
    }];
    let html = render_resource_sunburst(&rows).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("cdn.plot.ly"));
    assert!(html.contains("\"branchvalues\":\"total\""));
    assert!(html.contains("\"ICU Care/MICU/Patient Days\""));
}
