//! Aggregate views over logged sessions: totals plus the two chart projections.

use crate::store::SessionRecord;
use serde::Serialize;

pub const HOURS_PER_DAY: usize = 24;
pub const DURATION_BUCKETS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total_duration_ms: u64,
    pub average_duration_ms: u64,
    pub count: usize,
}

/// Totals across `sessions`, `None` when there is nothing to average.
pub fn totals(sessions: &[SessionRecord]) -> Option<Totals> {
    if sessions.is_empty() {
        return None;
    }

    // u128 cannot overflow for any realistic number of u64 durations
    let total: u128 = sessions.iter().map(|s| u128::from(s.duration)).sum();
    let count = sessions.len();
    Some(Totals {
        total_duration_ms: u64::try_from(total).unwrap_or(u64::MAX),
        average_duration_ms: u64::try_from(total / count as u128).unwrap_or(u64::MAX),
        count,
    })
}

/// Parse the hour of day out of a stored time string.
///
/// Accepts `HH:MM[:SS]` and the 12-hour `h:MM:SS AM` form browsers produce.
pub fn hour_of_day(time: &str) -> Option<usize> {
    let time = time.trim();
    let (head, _) = time.split_once(':')?;
    let hour: usize = head.trim().parse().ok()?;

    let upper = time.to_ascii_uppercase();
    let hour = if upper.ends_with("PM") {
        if hour == 12 { 12 } else { hour + 12 }
    } else if upper.ends_with("AM") {
        if hour == 12 { 0 } else { hour }
    } else {
        hour
    };

    (hour < HOURS_PER_DAY).then_some(hour)
}

/// Number of sessions logged in each hour of the day, index 0 through 23.
///
/// Sessions whose time cannot be parsed are left out.
pub fn hourly_histogram(sessions: &[SessionRecord]) -> [u32; HOURS_PER_DAY] {
    let mut buckets = [0u32; HOURS_PER_DAY];
    for session in sessions {
        if let Some(hour) = hour_of_day(&session.time) {
            buckets[hour] += 1;
        }
    }
    buckets
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationBucket {
    pub lower_ms: u64,
    /// Exclusive, except for the last bucket which also holds the maximum.
    pub upper_ms: u64,
    pub count: u32,
}

/// Spread session durations over five equal-width buckets between the shortest
/// and longest session.
///
/// Width is `ceil((max - min) / 5)`. When every session lasted the same time
/// the width is zero and all sessions land in the first bucket. Returns an
/// empty vector when there are no sessions.
pub fn duration_histogram(sessions: &[SessionRecord]) -> Vec<DurationBucket> {
    let Some(min) = sessions.iter().map(|s| s.duration).min() else {
        return Vec::new();
    };
    let max = sessions.iter().map(|s| s.duration).max().unwrap_or(min);
    let width = (max - min).div_ceil(DURATION_BUCKETS as u64);

    let mut buckets: Vec<DurationBucket> = (0..DURATION_BUCKETS as u64)
        .map(|i| DurationBucket {
            lower_ms: min.saturating_add(i.saturating_mul(width)),
            upper_ms: min.saturating_add((i + 1).saturating_mul(width)),
            count: 0,
        })
        .collect();

    for session in sessions {
        let index = if width == 0 {
            0
        } else {
            (((session.duration - min) / width) as usize).min(DURATION_BUCKETS - 1)
        };
        buckets[index].count += 1;
    }

    buckets
}
