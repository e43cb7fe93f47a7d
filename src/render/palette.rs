//! Color scales for the charts

/// Yellow-orange-red sequential scale, light to dark
const YL_OR_RD: [(u8, u8, u8); 9] = [
    (0xff, 0xff, 0xcc),
    (0xff, 0xed, 0xa0),
    (0xfe, 0xd9, 0x76),
    (0xfe, 0xb2, 0x4c),
    (0xfd, 0x8d, 0x3c),
    (0xfc, 0x4e, 0x2a),
    (0xe3, 0x1a, 0x1c),
    (0xbd, 0x00, 0x26),
    (0x80, 0x00, 0x26),
];

fn hex(r: f64, g: f64, b: f64) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        r.round().clamp(0.0, 255.0) as u8,
        g.round().clamp(0.0, 255.0) as u8,
        b.round().clamp(0.0, 255.0) as u8
    )
}

/// Color for `value` on the yellow-orange-red scale spanning `[min, max]`
///
/// A degenerate range maps every value to the lightest color.
#[must_use]
pub fn yl_or_rd(value: f64, min: f64, max: f64) -> String {
    let t = if max > min && value.is_finite() {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let pos = t * (YL_OR_RD.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(YL_OR_RD.len() - 1);
    let frac = pos - lo as f64;
    let (a, b) = (YL_OR_RD[lo], YL_OR_RD[hi]);
    let mix = |x: u8, y: u8| f64::from(x) + (f64::from(y) - f64::from(x)) * frac;
    hex(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Whether dark text is readable on the scale color for `value`
#[must_use]
pub fn dark_text_on(value: f64, min: f64, max: f64) -> bool {
    max <= min || (value - min) / (max - min) < 0.6
}
