//! Annotated heatmap of the lab co-mortality matrix

use crate::algorithm::lab_mortality::{AbnormalityPolicy, LabMortalityResult};
use crate::render::palette::{dark_text_on, yl_or_rd};
use crate::render::svg::{Anchor, SvgDocument, TextStyle};

const CELL: f64 = 64.0;
const LEFT: f64 = 230.0;
const TOP: f64 = 90.0;
const BOTTOM: f64 = 190.0;
const COLORBAR_GAP: f64 = 30.0;
const COLORBAR_WIDTH: f64 = 18.0;
const RIGHT: f64 = 110.0;

/// Chart title for a policy
#[must_use]
pub fn heatmap_title(policy: &AbnormalityPolicy) -> String {
    match *policy {
        AbnormalityPolicy::Percentile { lower, upper } => format!(
            "Mortality Rates (%) for Abnormal Lab Value Combinations (Based on {}th-{}th Percentile Ranges)",
            (lower * 100.0).round(),
            (upper * 100.0).round()
        ),
        AbnormalityPolicy::Flag => {
            "Mortality Rates (%) for Abnormal Lab Value Combinations (Based on Source Flags)".to_string()
        }
    }
}

/// Render the co-mortality matrix as an SVG heatmap
///
/// Cells are annotated with one decimal; the color scale runs from 0 to the
/// largest cell.
#[must_use]
pub fn render_lab_heatmap(result: &LabMortalityResult) -> String {
    let matrix = &result.matrix;
    let n = matrix.len();
    let grid = CELL * n.max(1) as f64;
    let width = LEFT + grid + COLORBAR_GAP + COLORBAR_WIDTH + RIGHT;
    let height = TOP + grid + BOTTOM;
    let mut doc = SvgDocument::new(width, height);

    doc.text(
        width / 2.0,
        40.0,
        &heatmap_title(&result.policy),
        TextStyle::sized(15.0).bold(),
    );

    if matrix.is_empty() {
        doc.text(
            LEFT + grid / 2.0,
            TOP + grid / 2.0,
            "No lab items with abnormal values",
            TextStyle::sized(13.0),
        );
        return doc.finish();
    }

    let vmax = matrix.max_value();
    for (i, row) in matrix.rows().iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            let x = LEFT + CELL * j as f64;
            let y = TOP + CELL * i as f64;
            doc.rect(x, y, CELL, CELL, &yl_or_rd(value, 0.0, vmax), Some("#ffffff"));
            let fill = if dark_text_on(value, 0.0, vmax) { "#222222" } else { "#ffffff" };
            doc.text(
                x + CELL / 2.0,
                y + CELL / 2.0 + 4.0,
                &format!("{value:.1}"),
                TextStyle {
                    fill,
                    ..TextStyle::sized(12.0)
                },
            );
        }
    }

    for (k, label) in matrix.labels().iter().enumerate() {
        let center = CELL * k as f64 + CELL / 2.0;
        doc.text(
            LEFT - 8.0,
            TOP + center + 4.0,
            label,
            TextStyle::sized(11.0).anchored(Anchor::End),
        );
        doc.text(
            LEFT + center,
            TOP + grid + 14.0,
            label,
            TextStyle::sized(11.0).anchored(Anchor::End).rotated(-45.0),
        );
    }

    draw_colorbar(&mut doc, LEFT + grid + COLORBAR_GAP, TOP, grid, vmax);
    doc.finish()
}

fn draw_colorbar(doc: &mut SvgDocument, x: f64, top: f64, height: f64, vmax: f64) {
    const STEPS: usize = 50;
    let step = height / STEPS as f64;
    for s in 0..STEPS {
        let value = vmax * (STEPS - s) as f64 / STEPS as f64;
        doc.rect(x, top + step * s as f64, COLORBAR_WIDTH, step + 0.5, &yl_or_rd(value, 0.0, vmax), None);
    }
    doc.rect(x, top, COLORBAR_WIDTH, height, "none", Some("#444444"));

    for tick in 0..=4 {
        let value = vmax * f64::from(tick) / 4.0;
        let y = top + height - height * f64::from(tick) / 4.0;
        doc.line(x + COLORBAR_WIDTH, y, x + COLORBAR_WIDTH + 5.0, y, "#444444", 1.0, None);
        doc.text(
            x + COLORBAR_WIDTH + 8.0,
            y + 4.0,
            &format!("{value:.1}"),
            TextStyle::sized(10.0).anchored(Anchor::Start),
        );
    }
}
