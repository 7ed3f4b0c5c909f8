//! Lookback window resolution
//!
//! Turns a relative lookback (days/hours/minutes/seconds) into an absolute
//! `[start, end]` UTC window ending now. DescribeSpotPriceHistory only serves
//! the last 90 days, so longer requests are clamped to exactly 90 days.

use chrono::{DateTime, Duration, Utc};

/// Longest lookback the EC2 spot price history API will answer
pub const MAX_LOOKBACK_DAYS: u64 = 90;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
const MAX_LOOKBACK_SECS: u64 = MAX_LOOKBACK_DAYS * SECS_PER_DAY;

/// Requested lookback, each component defaulting to zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookbackDuration {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl LookbackDuration {
    pub fn new(days: u64, hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Total requested seconds, saturating instead of overflowing
    pub fn total_seconds(&self) -> u64 {
        self.days
            .saturating_mul(SECS_PER_DAY)
            .saturating_add(self.hours.saturating_mul(SECS_PER_HOUR))
            .saturating_add(self.minutes.saturating_mul(SECS_PER_MINUTE))
            .saturating_add(self.seconds)
    }

    /// Span actually queried: the requested duration, or exactly 90 days once
    /// the request reaches that limit.
    pub fn clamped_span(&self) -> Duration {
        let secs = if self.days >= MAX_LOOKBACK_DAYS {
            MAX_LOOKBACK_SECS
        } else {
            self.total_seconds().min(MAX_LOOKBACK_SECS)
        };
        // MAX_LOOKBACK_SECS fits comfortably in i64
        Duration::seconds(secs as i64)
    }
}

/// Absolute query window in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn span(&self) -> Duration {
        self.end - self.start
    }
}

/// Resolve a lookback into a window ending at `now`
pub fn resolve_window_at(duration: &LookbackDuration, now: DateTime<Utc>) -> TimeWindow {
    TimeWindow {
        start: now - duration.clamped_span(),
        end: now,
    }
}

/// Resolve a lookback into a window ending at the current instant
pub fn resolve_window(duration: &LookbackDuration) -> TimeWindow {
    resolve_window_at(duration, Utc::now())
}
