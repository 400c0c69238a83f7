//! Accuracy statistics.

/// Percentage of correct answers, or `None` when nothing was counted.
pub fn accuracy_percentage(correct: u32, total: u32) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(f64::from(correct) / f64::from(total) * 100.0)
}

/// Round a percentage to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
