use chrono::Utc;

/// Current wall-clock time in whole seconds since the Unix epoch, rounded to
/// the nearest second.
pub fn timestamp() -> i64 {
    round_millis(Utc::now().timestamp_millis())
}

/// Milliseconds to seconds, rounding half up.
fn round_millis(ms: i64) -> i64 {
    (ms + 500).div_euclid(1000)
}
