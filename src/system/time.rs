//! Wall clock for the PineTime
//!
//! The watch has no battery-backed clock, so time is a reference point plus
//! the uptime elapsed since it was taken.

use chrono::{DateTime, Duration, NaiveDateTime};
use embassy_time::Instant;

pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Create new time reference from seconds since the Unix epoch, taken now
    pub fn from_epoch(secs: i64) -> Option<Self> {
        let time = DateTime::from_timestamp(secs, 0)?.naive_utc();
        Some(Self {
            time,
            instant: Instant::now(),
        })
    }
}

pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    /// Start keeping time from `reference`
    pub fn init(reference: TimeReference) -> Self {
        Self { reference }
    }

    /// Get current time
    pub fn get_time(&self) -> NaiveDateTime {
        let elapsed = Instant::now().duration_since(self.reference.instant);
        self.reference.time + Duration::microseconds(elapsed.as_micros() as i64)
    }
}
