use crate::OutputFormat;
use crate::config::Config;
use crate::format::{format_long, format_short};
use crate::stats::{duration_histogram, hourly_histogram, totals};
use anyhow::Result;
use serde_json::json;

const BAR_WIDTH: usize = 40;

/// Horizontal bar scaled so that `max` fills `width` cells.
fn bar(count: u32, max: u32, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let cells = (count as usize * width).div_ceil(max as usize);
    "█".repeat(cells.max(1))
}

pub fn stats(config: &Config, format: OutputFormat) -> Result<()> {
    let store = super::open_store(config)?;
    let sessions = store.load_all();

    let totals = totals(&sessions);
    let hourly = hourly_histogram(&sessions);
    let durations = duration_histogram(&sessions);

    if let OutputFormat::Json = format {
        let output = json!({
            "totals": totals,
            "hourly": hourly,
            "durations": durations,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let Some(t) = totals else {
        println!("No sessions yet.");
        return Ok(());
    };

    println!("Statistics");
    println!("  Total feeding time:   {}", format_long(t.total_duration_ms));
    println!("  Average feeding time: {}", format_long(t.average_duration_ms));
    println!("  Number of feedings:   {}", t.count);

    println!();
    println!("Feedings by hour of day");
    let max = hourly.iter().copied().max().unwrap_or(0);
    for (hour, count) in hourly.iter().enumerate() {
        println!("  {:02} │{} {}", hour, bar(*count, max, BAR_WIDTH), count);
    }

    println!();
    println!("Duration distribution");
    let max = durations.iter().map(|b| b.count).max().unwrap_or(0);
    for bucket in &durations {
        println!(
            "  {}–{} │{} {}",
            format_short(bucket.lower_ms),
            format_short(bucket.upper_ms),
            bar(bucket.count, max, BAR_WIDTH),
            bucket.count
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_to_width() {
        assert_eq!(bar(10, 10, 40).chars().count(), 40);
        assert_eq!(bar(5, 10, 40).chars().count(), 20);
    }

    #[test]
    fn test_bar_small_count_is_visible() {
        assert_eq!(bar(1, 1000, 40).chars().count(), 1);
    }

    #[test]
    fn test_bar_zero() {
        assert_eq!(bar(0, 10, 40), "");
        assert_eq!(bar(0, 0, 40), "");
    }
}
