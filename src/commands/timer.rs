use crate::OutputFormat;
use crate::config::Config;
use crate::error::TimerError;
use crate::format::format_long;
use crate::state::{State, with_state_lock};
use crate::store::{SessionRecord, SessionStore};
use crate::timer::{Clock, SystemClock};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStatus {
    pub running: bool,
    pub elapsed_ms: u64,
    pub side_count: u32,
}

pub fn start(config: &Config, clock: &impl Clock, format: OutputFormat) -> Result<()> {
    let storage = super::open_storage(config)?;

    let started = with_state_lock(&storage, |state| {
        match state.timer.start(clock) {
            Ok(()) => Ok(true),
            Err(TimerError::AlreadyRunning) => Ok(false),
            Err(e) => Err(e.into()),
        }
    })?;

    match format {
        OutputFormat::Json => println!("{}", json!({ "started": started })),
        OutputFormat::Text if started => println!("✓ Timer started"),
        OutputFormat::Text => println!("Timer is already running. Stop it with: feed stop"),
    }
    Ok(())
}

/// Stop the timer and log the session.
///
/// The record is appended while the state lock is held, so a failed write
/// leaves the timer running instead of losing the session.
pub fn stop(
    config: &Config,
    clock: &impl Clock,
    sides: Option<u32>,
    format: OutputFormat,
) -> Result<Option<SessionRecord>> {
    let storage = super::open_storage(config)?;
    let store = SessionStore::new(storage.clone());

    let logged = with_state_lock(&storage, |state| {
        if let Some(sides) = sides.filter(|_| state.timer.running) {
            state.timer.side_count = sides;
        }
        let record = match state.timer.stop(clock) {
            Ok(record) => record,
            Err(TimerError::NotRunning) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let sessions = store
            .append(record.clone())
            .context("Failed to save session")?;
        Ok(Some((record, sessions)))
    })?;

    let Some((record, sessions)) = logged else {
        match format {
            OutputFormat::Json => println!("{}", json!({ "logged": null })),
            OutputFormat::Text => println!("No timer running. Start one with: feed start"),
        }
        return Ok(None);
    };

    match format {
        OutputFormat::Json => {
            println!("{}", json!({ "logged": record }));
        }
        OutputFormat::Text => {
            println!(
                "✓ Session logged: {} {}, duration {}, sides {}",
                record.date,
                record.time,
                format_long(record.duration),
                record.side_count
            );
        }
    }

    super::sync_sessions(config, &sessions);
    Ok(Some(record))
}

/// Count one more side for the session in progress.
pub fn side(config: &Config) -> Result<u32> {
    let storage = super::open_storage(config)?;
    let count = with_state_lock(&storage, |state| Ok(state.timer.add_side()))?;
    println!("Sides: {}", count);
    Ok(count)
}

pub fn status(config: &Config, clock: &impl Clock, format: OutputFormat) -> Result<TimerStatus> {
    let state = State::load(&super::open_storage(config)?)?;

    let status = TimerStatus {
        running: state.timer.running,
        elapsed_ms: if state.timer.running {
            state.timer.sample(clock)
        } else {
            0
        },
        side_count: state.timer.side_count,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Text if status.running => {
            println!(
                "Running: {} (sides: {})",
                format_long(status.elapsed_ms),
                status.side_count
            );
            if let Some(started) = state.timer.started_at() {
                println!("Started: {}", started.format("%Y-%m-%d %H:%M:%S"));
            }
        }
        OutputFormat::Text => println!("Idle (sides: {})", status.side_count),
    }
    Ok(status)
}

/// Redraw the running timer every tick until it is stopped elsewhere.
///
/// Each tick only reads the state file.
pub fn watch(config: &Config) -> Result<()> {
    let storage = super::open_storage(config)?;
    let tick = Duration::from_millis(config.timer.tick_ms);

    tokio::runtime::Runtime::new()?.block_on(async {
        let mut interval = tokio::time::interval(tick);
        let mut stdout = io::stdout();
        let mut seen_running = false;

        loop {
            interval.tick().await;
            let state = State::load(&storage)?;
            if !state.timer.running {
                if seen_running {
                    println!("\nTimer stopped.");
                } else {
                    println!("No timer running. Start one with: feed start");
                }
                return Ok::<(), anyhow::Error>(());
            }
            seen_running = true;

            let elapsed = state.timer.sample(&SystemClock);
            write!(
                stdout,
                "\r{}  sides: {}",
                format_long(elapsed),
                state.timer.side_count
            )?;
            stdout.flush()?;
        }
    })
}
