//! Box plots of length-of-stay distributions
//!
//! Boxes span the quartiles with a median line; whiskers reach 1.5 IQR
//! clipped to the data. Outliers are not drawn.

use crate::algorithm::length_of_stay::{AgeGroup, InsuranceLos, MedicationLos};
use crate::algorithm::statistics::DistributionSummary;
use crate::render::axis::LinearAxis;
use crate::render::svg::{Anchor, SvgDocument, TextStyle};

const LEFT: f64 = 90.0;
const TOP: f64 = 80.0;
const PLOT_HEIGHT: f64 = 420.0;
const BOTTOM: f64 = 170.0;
const MEDICATION_COLOR: &str = "#8fb9da";

/// Draw one box centered on `cx`
fn draw_box(
    doc: &mut SvgDocument,
    axis: &LinearAxis,
    cx: f64,
    width: f64,
    summary: &DistributionSummary,
    fill: &str,
) {
    let bottom = TOP + PLOT_HEIGHT;
    let y = |v: f64| axis.project(v, bottom, TOP);
    let (low, high) = summary.whiskers();

    doc.line(cx, y(low), cx, y(summary.q1), "#333333", 1.5, None);
    doc.line(cx, y(summary.q3), cx, y(high), "#333333", 1.5, None);
    let cap = width / 4.0;
    doc.line(cx - cap, y(low), cx + cap, y(low), "#333333", 1.5, None);
    doc.line(cx - cap, y(high), cx + cap, y(high), "#333333", 1.5, None);

    let box_top = y(summary.q3);
    doc.rect(
        cx - width / 2.0,
        box_top,
        width,
        y(summary.q1) - box_top,
        fill,
        Some("#333333"),
    );
    doc.line(
        cx - width / 2.0,
        y(summary.median),
        cx + width / 2.0,
        y(summary.median),
        "#333333",
        2.0,
        None,
    );
}

fn whisker_max<'a>(summaries: impl Iterator<Item = &'a DistributionSummary>) -> f64 {
    summaries.map(|s| s.whiskers().1).fold(0.0, f64::max)
}

/// Box plot of length of stay per top-prescribed drug
#[must_use]
pub fn render_medication_boxplot(result: &MedicationLos) -> String {
    let slot = 110.0;
    let plot_width = slot * result.drugs.len().max(1) as f64;
    let width = LEFT + plot_width + 40.0;
    let height = TOP + PLOT_HEIGHT + BOTTOM;
    let bottom = TOP + PLOT_HEIGHT;
    let mut doc = SvgDocument::new(width, height);

    doc.text(
        width / 2.0,
        40.0,
        "Distribution of Length of Stay by Medication",
        TextStyle::sized(15.0).bold(),
    );

    let axis = LinearAxis::zero_to(whisker_max(
        result.drugs.iter().filter_map(|d| d.summary.as_ref()),
    ));
    axis.draw(&mut doc, LEFT, LEFT + plot_width, bottom, TOP, "Length of Stay (days)");

    for (k, drug) in result.drugs.iter().enumerate() {
        let cx = LEFT + slot * k as f64 + slot / 2.0;
        if let Some(summary) = &drug.summary {
            draw_box(&mut doc, &axis, cx, slot * 0.5, summary, MEDICATION_COLOR);
        }
        doc.text(
            cx,
            bottom + 16.0,
            &drug.drug,
            TextStyle::sized(11.0).anchored(Anchor::End).rotated(-45.0),
        );
    }

    doc.text(
        LEFT + plot_width / 2.0,
        height - 16.0,
        "Medication",
        TextStyle::sized(12.0),
    );
    doc.finish()
}

/// Grouped box plot of length of stay per insurance type and age group
#[must_use]
pub fn render_insurance_boxplot(result: &InsuranceLos, los_quantile: f64) -> String {
    let insurance_types = result.insurance_types();
    let group_width = 160.0;
    let box_width = group_width / (AgeGroup::ALL.len() as f64 + 1.0);
    let plot_width = group_width * insurance_types.len().max(1) as f64;
    let legend_width = 130.0;
    let width = LEFT + plot_width + 30.0 + legend_width;
    let height = TOP + PLOT_HEIGHT + BOTTOM;
    let bottom = TOP + PLOT_HEIGHT;
    let mut doc = SvgDocument::new(width, height);

    doc.text(
        width / 2.0,
        32.0,
        "Length of Stay Distribution by Insurance Type and Age Group",
        TextStyle::sized(15.0).bold(),
    );
    doc.text(
        width / 2.0,
        52.0,
        &format!("({:.0}th percentile of LOS shown)", los_quantile * 100.0),
        TextStyle::sized(12.0),
    );

    let axis = LinearAxis::zero_to(whisker_max(result.groups.iter().map(|g| &g.summary)));
    axis.draw(&mut doc, LEFT, LEFT + plot_width, bottom, TOP, "Length of Stay (days)");

    for (k, insurance) in insurance_types.iter().enumerate() {
        let group_left = LEFT + group_width * k as f64;
        for group in result.groups.iter().filter(|g| g.insurance == *insurance) {
            let slot = AgeGroup::ALL
                .iter()
                .position(|a| *a == group.age_group)
                .unwrap_or(0);
            let cx = group_left + box_width * (slot as f64 + 1.0);
            draw_box(&mut doc, &axis, cx, box_width * 0.8, &group.summary, group.age_group.color());
        }
        doc.text(
            group_left + group_width / 2.0,
            bottom + 16.0,
            insurance,
            TextStyle::sized(11.0).anchored(Anchor::End).rotated(-45.0),
        );
    }

    doc.text(
        LEFT + plot_width / 2.0,
        height - 16.0,
        "Insurance Type",
        TextStyle::sized(12.0),
    );

    let legend_x = LEFT + plot_width + 30.0;
    doc.text(
        legend_x,
        TOP,
        "Age Group",
        TextStyle::sized(12.0).anchored(Anchor::Start).bold(),
    );
    for (k, age_group) in AgeGroup::ALL.iter().enumerate() {
        let y = TOP + 16.0 + 20.0 * k as f64;
        doc.rect(legend_x, y, 14.0, 14.0, age_group.color(), Some("#333333"));
        doc.text(
            legend_x + 20.0,
            y + 11.0,
            age_group.label(),
            TextStyle::sized(11.0).anchored(Anchor::Start),
        );
    }

    doc.finish()
}
