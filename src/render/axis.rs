//! Linear value axis shared by the bar and box charts

use crate::render::svg::{Anchor, SvgDocument, TextStyle};

/// Tick step of 1, 2 or 5 times a power of ten giving about `target` ticks
fn nice_step(max: f64, target: usize) -> f64 {
    let raw = max / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let scaled = raw / magnitude;
    let nice = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// A vertical axis from zero to a rounded-up maximum
#[derive(Debug, Clone, PartialEq)]
pub struct LinearAxis {
    pub max: f64,
    pub ticks: Vec<f64>,
}

impl LinearAxis {
    /// Axis covering `[0, max]` with roughly five ticks
    #[must_use]
    pub fn zero_to(max: f64) -> Self {
        if !max.is_finite() || max <= 0.0 {
            return Self {
                max: 1.0,
                ticks: vec![0.0, 1.0],
            };
        }
        let step = nice_step(max, 5);
        let top = (max / step).ceil() * step;
        let steps = (top / step).round() as usize;
        let ticks = (0..=steps).map(|k| step * k as f64).collect();
        Self { max: top, ticks }
    }

    /// Map a value into a plot area spanning `bottom` (value 0) to `top`
    #[must_use]
    pub fn project(&self, value: f64, bottom: f64, top: f64) -> f64 {
        bottom - (bottom - top) * (value / self.max).clamp(0.0, 1.0)
    }

    /// Draw gridlines, tick labels and the rotated axis title
    pub fn draw(&self, doc: &mut SvgDocument, left: f64, right: f64, bottom: f64, top: f64, title: &str) {
        for &tick in &self.ticks {
            let y = self.project(tick, bottom, top);
            doc.line(left, y, right, y, "#dddddd", 1.0, Some("3,3"));
            let label = if tick.fract() == 0.0 {
                format!("{tick:.0}")
            } else {
                format!("{tick}")
            };
            doc.text(left - 6.0, y + 4.0, &label, TextStyle::sized(10.0).anchored(Anchor::End));
        }
        doc.line(left, bottom, right, bottom, "#444444", 1.0, None);
        doc.line(left, bottom, left, top, "#444444", 1.0, None);
        doc.text(
            left - 48.0,
            (top + bottom) / 2.0,
            title,
            TextStyle::sized(12.0).rotated(-90.0),
        );
    }
}
