//! Start/stop timer that turns a stretch of wall-clock time into a session.
//!
//! `Idle --start--> Running --stop--> Idle`. Any other transition is rejected
//! with a [`TimerError`] and leaves the state untouched.

use crate::error::TimerError;
use crate::store::SessionRecord;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub running: bool,
    pub start_epoch_ms: i64,
    pub last_sampled_elapsed_ms: u64,
    /// Sides used so far; attached to the next logged session.
    #[serde(default)]
    pub side_count: u32,
}

impl TimerState {
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), TimerError> {
        if self.running {
            return Err(TimerError::AlreadyRunning);
        }

        self.running = true;
        self.start_epoch_ms = clock.now().timestamp_millis();
        self.last_sampled_elapsed_ms = 0;
        debug!(start_epoch_ms = self.start_epoch_ms, "Timer started");
        Ok(())
    }

    /// Live elapsed time for display. Does not modify the state.
    pub fn sample(&self, clock: &impl Clock) -> u64 {
        if !self.running {
            return self.last_sampled_elapsed_ms;
        }
        elapsed_since(self.start_epoch_ms, clock.now())
    }

    /// Freeze elapsed time and produce the session to log.
    ///
    /// The side count is reset so the next session starts from zero.
    pub fn stop(&mut self, clock: &impl Clock) -> Result<SessionRecord, TimerError> {
        if !self.running {
            return Err(TimerError::NotRunning);
        }

        let now = clock.now();
        self.last_sampled_elapsed_ms = elapsed_since(self.start_epoch_ms, now);
        self.running = false;

        let record = SessionRecord {
            date: now.format(DATE_FORMAT).to_string(),
            time: now.format(TIME_FORMAT).to_string(),
            duration: self.last_sampled_elapsed_ms,
            side_count: self.side_count,
        };
        self.side_count = 0;
        debug!(duration = record.duration, "Timer stopped");
        Ok(record)
    }

    pub fn add_side(&mut self) -> u32 {
        self.side_count = self.side_count.saturating_add(1);
        self.side_count
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        if !self.running {
            return None;
        }
        DateTime::from_timestamp_millis(self.start_epoch_ms).map(|t| t.with_timezone(&Local))
    }
}

fn elapsed_since(start_epoch_ms: i64, now: DateTime<Local>) -> u64 {
    u64::try_from(now.timestamp_millis() - start_epoch_ms).unwrap_or(0)
}
