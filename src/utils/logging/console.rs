//! Console output utilities
//!
//! Short plain-text summaries printed while an analysis runs, such as the
//! most frequent drugs or lab items.

use std::fmt::Write as _;

/// Format a ranked list of counts as an aligned block of lines
#[must_use]
pub fn format_ranked_counts(title: &str, counts: &[(String, usize)]) -> String {
    let width = counts.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut out = format!("{title}\n");
    for (name, count) in counts {
        let _ = writeln!(out, "  {name:<width$}  {count:>10}");
    }
    out
}

/// Print a ranked list of counts
pub fn print_ranked_counts(title: &str, counts: &[(String, usize)]) {
    print!("{}", format_ranked_counts(title, counts));
}
