//! Stacked bar chart of ICU transfers by hour of day

use crate::algorithm::transfers::{HOURS, TransferPattern};
use crate::render::axis::LinearAxis;
use crate::render::svg::{Anchor, SvgDocument, TextStyle};

const LEFT: f64 = 80.0;
const TOP: f64 = 70.0;
const PLOT_HEIGHT: f64 = 460.0;
const BOTTOM: f64 = 90.0;
const LEGEND_WIDTH: f64 = 220.0;

const BAR_WIDTH: f64 = 16.0;
const BAR_GAP: f64 = 12.0;
const GROUP_GAP: f64 = 24.0;
const HOUR_WIDTH: f64 = 2.0 * BAR_WIDTH + BAR_GAP + GROUP_GAP;

/// Render transfers in (solid) and out (dotted) per hour, stacked by unit
#[must_use]
pub fn render_transfer_bars(pattern: &TransferPattern) -> String {
    let plot_width = HOUR_WIDTH * HOURS as f64;
    let width = LEFT + plot_width + 30.0 + LEGEND_WIDTH;
    let height = TOP + PLOT_HEIGHT + BOTTOM;
    let bottom = TOP + PLOT_HEIGHT;
    let mut doc = SvgDocument::new(width, height);

    doc.text(
        (LEFT + plot_width) / 2.0,
        36.0,
        "ICU Transfer Patterns Throughout the Day",
        TextStyle::sized(16.0).bold(),
    );

    for (k, counts) in pattern.units.iter().enumerate() {
        doc.dotted_pattern(&format!("out-{k}"), counts.unit.color);
    }

    let axis = LinearAxis::zero_to(pattern.max_stack() as f64);
    axis.draw(&mut doc, LEFT, LEFT + plot_width, bottom, TOP, "Number of Transfers");

    let mut stack_in = [0u64; HOURS];
    let mut stack_out = [0u64; HOURS];
    for (k, counts) in pattern.units.iter().enumerate() {
        let pattern_id = format!("out-{k}");
        for hour in 0..HOURS {
            let x_in = LEFT + GROUP_GAP / 2.0 + HOUR_WIDTH * hour as f64;
            let x_out = x_in + BAR_WIDTH + BAR_GAP;

            let (base, count) = (stack_in[hour], counts.in_counts[hour]);
            if count > 0 {
                let y0 = axis.project(base as f64, bottom, TOP);
                let y1 = axis.project((base + count) as f64, bottom, TOP);
                doc.rect(x_in, y1, BAR_WIDTH, y0 - y1, counts.unit.color, None);
            }
            stack_in[hour] += count;

            let (base, count) = (stack_out[hour], counts.out_counts[hour]);
            if count > 0 {
                let y0 = axis.project(base as f64, bottom, TOP);
                let y1 = axis.project((base + count) as f64, bottom, TOP);
                doc.pattern_rect(x_out, y1, BAR_WIDTH, y0 - y1, &pattern_id);
            }
            stack_out[hour] += count;
        }
    }

    for hour in 0..HOURS {
        let x_in = LEFT + GROUP_GAP / 2.0 + HOUR_WIDTH * hour as f64;
        let x_out = x_in + BAR_WIDTH + BAR_GAP;
        let tag = TextStyle::sized(8.0).bold();
        doc.text(x_in + BAR_WIDTH / 2.0, bottom + 14.0, "IN", tag);
        doc.text(x_out + BAR_WIDTH / 2.0, bottom + 14.0, "OUT", tag);
        doc.text(
            (x_in + x_out + BAR_WIDTH) / 2.0,
            bottom + 32.0,
            &format!("{hour:02}:00"),
            TextStyle::sized(9.0),
        );
        if hour + 1 < HOURS {
            let sep = LEFT + HOUR_WIDTH * (hour + 1) as f64;
            doc.line(sep, TOP, sep, bottom, "#bbbbbb", 1.0, Some("1,3"));
        }
    }

    doc.text(
        LEFT + plot_width / 2.0,
        height - 20.0,
        "Hour of Day",
        TextStyle::sized(12.0),
    );

    let legend_x = LEFT + plot_width + 30.0;
    doc.text(
        legend_x,
        TOP,
        "ICU Units",
        TextStyle::sized(12.0).anchored(Anchor::Start).bold(),
    );
    for (k, counts) in pattern.units.iter().enumerate() {
        let y = TOP + 16.0 + 20.0 * k as f64;
        doc.rect(legend_x, y, 14.0, 14.0, counts.unit.color, Some("#333333"));
        doc.text(
            legend_x + 20.0,
            y + 11.0,
            counts.unit.description,
            TextStyle::sized(11.0).anchored(Anchor::Start),
        );
    }

    doc.finish()
}
