use std::time::Duration;

/// Formats a match duration as `MM:SS:t` (minutes, seconds, tenths).
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    let tenths = elapsed.subsec_millis() / 100;
    format!("{minutes:02}:{seconds:02}:{tenths}")
}
