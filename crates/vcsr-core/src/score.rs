//! # Score Arithmetic
//!
//! All scores are integers in `0..=100`. Rounding is half-up on the
//! unrounded percentage, so `2/3` → 67 and `1/6` → 17.

/// `round(numerator / denominator * 100)`, clamped to 100.
///
/// A zero denominator yields 0; callers with a vacuous-pass convention
/// handle that case before calling.
pub fn percentage(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let pct = (numerator as f64 / denominator as f64) * 100.0;
    (pct.round() as u32).min(100)
}

/// `max(0, 100 - issues * issue_penalty - warnings * warning_penalty)`.
pub fn penalized(issues: usize, warnings: usize, issue_penalty: u32, warning_penalty: u32) -> u32 {
    let deduction = (issues as u64) * u64::from(issue_penalty)
        + (warnings as u64) * u64::from(warning_penalty);
    100u64.saturating_sub(deduction) as u32
}

/// Rounded arithmetic mean. An empty slice yields 0.
pub fn rounded_mean(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u64 = scores.iter().map(|s| u64::from(*s)).sum();
    (sum as f64 / scores.len() as f64).round() as u32
}
