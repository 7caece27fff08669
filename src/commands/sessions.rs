use crate::OutputFormat;
use crate::config::Config;
use crate::format::format_long;
use crate::stats::totals;
use crate::store::{DisplayOrder, SessionRecord};
use crate::timer::{Clock, DATE_FORMAT, TIME_FORMAT};
use anyhow::{Context, Result};
use serde_json::json;

/// Longest session `feed log` accepts, one day.
pub const MAX_LOG_MINUTES: f64 = 24.0 * 60.0;

pub fn list(config: &Config, order: DisplayOrder, format: OutputFormat) -> Result<()> {
    let store = super::open_store(config)?;
    let sessions = store.display(order);

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!("No sessions yet.");
        return Ok(());
    }

    println!(
        "{:<5} {:<12} {:<12} {:<10} {:<5}",
        "#", "Date", "Time", "Duration", "Sides"
    );
    println!("{}", "-".repeat(48));
    for (index, session) in sessions.iter().enumerate() {
        println!(
            "{:<5} {:<12} {:<12} {:<10} {:<5}",
            index,
            session.date,
            session.time,
            format_long(session.duration),
            session.side_count
        );
    }

    if let Some(t) = totals(&sessions) {
        println!();
        println!("Total feeding time:   {}", format_long(t.total_duration_ms));
        println!("Average feeding time: {}", format_long(t.average_duration_ms));
        println!("Number of feedings:   {}", t.count);
    }
    Ok(())
}

/// Delete the session shown at `index` by `feed list` in the same order.
pub fn delete(
    config: &Config,
    index: usize,
    order: DisplayOrder,
    format: OutputFormat,
) -> Result<SessionRecord> {
    let store = super::open_store(config)?;
    let (removed, sessions) = store
        .delete_at(index, order)
        .with_context(|| format!("Failed to delete session {}", index))?;

    match format {
        OutputFormat::Json => println!("{}", json!({ "deleted": removed })),
        OutputFormat::Text => println!(
            "✓ Deleted session: {} {}, duration {}",
            removed.date,
            removed.time,
            format_long(removed.duration)
        ),
    }

    super::sync_sessions(config, &sessions);
    Ok(removed)
}

/// Record a session after the fact, stamped with the current date and time.
pub fn log(
    config: &Config,
    clock: &impl Clock,
    minutes: f64,
    sides: u32,
    format: OutputFormat,
) -> Result<SessionRecord> {
    if !(0.0..=MAX_LOG_MINUTES).contains(&minutes) {
        anyhow::bail!(
            "Minutes must be between 0 and {}, got {}",
            MAX_LOG_MINUTES,
            minutes
        );
    }

    let now = clock.now();
    let record = SessionRecord {
        date: now.format(DATE_FORMAT).to_string(),
        time: now.format(TIME_FORMAT).to_string(),
        duration: (minutes * 60_000.0).round() as u64,
        side_count: sides,
    };

    let store = super::open_store(config)?;
    let sessions = store
        .append(record.clone())
        .context("Failed to save session")?;

    match format {
        OutputFormat::Json => println!("{}", json!({ "logged": record })),
        OutputFormat::Text => println!(
            "✓ Session logged: {} {}, duration {}, sides {}",
            record.date,
            record.time,
            format_long(record.duration),
            record.side_count
        ),
    }

    super::sync_sessions(config, &sessions);
    Ok(record)
}
