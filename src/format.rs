/// Split a millisecond duration into wall-clock style components.
///
/// Hours wrap at 24, so a session longer than a day shows its remainder.
fn components(ms: u64) -> (u64, u64, u64) {
    let hours = (ms / 3_600_000) % 24;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1000) % 60;
    (hours, minutes, seconds)
}

/// Long form used by the live timer and the session list: `HH:MM:SS`.
pub fn format_long(ms: u64) -> String {
    let (hours, minutes, seconds) = components(ms);
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Short form used for chart labels: `MMmSSs`.
pub fn format_short(ms: u64) -> String {
    let (_, minutes, seconds) = components(ms);
    format!("{:02}m{:02}s", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_long_zero() {
        assert_eq!(format_long(0), "00:00:00");
    }

    #[test]
    fn test_format_long_hours_minutes_seconds() {
        assert_eq!(format_long(3_661_000), "01:01:01");
        assert_eq!(format_long(90_000), "00:01:30");
    }

    #[test]
    fn test_format_long_wraps_at_one_day() {
        assert_eq!(format_long(25 * 3_600_000), "01:00:00");
    }

    #[test]
    fn test_format_long_drops_sub_second() {
        assert_eq!(format_long(1_999), "00:00:01");
    }

    #[test]
    fn test_format_short() {
        assert_eq!(format_short(65_000), "01m05s");
        assert_eq!(format_short(0), "00m00s");
    }

    #[test]
    fn test_format_short_wraps_minutes() {
        assert_eq!(format_short(3_661_000), "01m01s");
    }
}
