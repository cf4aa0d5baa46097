use std::time::Duration;

/// Format a `Duration` as `MM:SS`; minutes keep growing past an hour.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
