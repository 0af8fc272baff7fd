//! Time label formatting

/// Format seconds as `M:SS`
///
/// Minutes are not padded and not wrapped into hours; seconds are floored
/// and zero-padded. Negative or non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };

    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;

    format!("{}:{:02}", mins, secs)
}
