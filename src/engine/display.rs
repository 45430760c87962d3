//! `HH:MM:SS` rendering of remaining time

/// Format a number of seconds as zero-padded `HH:MM:SS`.
///
/// Hours are not wrapped: 100 hours renders as `100:00:00`.
pub fn format_display(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
