//! Wall clock time as seen by the watchface

use bitflags::bitflags;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Hour, minute and second read from the host clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    /// 0–23
    pub hour: u8,
    /// 0–59
    pub minute: u8,
    /// 0–59
    pub second: u8,
}

impl ClockTime {
    /// Create a clock time, `None` if a component is out of range.
    pub fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        (hour < 24 && minute < 60 && second < 60).then_some(Self {
            hour,
            minute,
            second,
        })
    }

    /// Take the time of day from any chrono time value.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            // Leap seconds are reported as 59
            second: time.second().min(59) as u8,
        }
    }
}

bitflags! {
    /// Time units that changed between two clock readings.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TimeUnits: u8 {
        const SECOND = 1 << 0;
        const MINUTE = 1 << 1;
        const HOUR = 1 << 2;
        const DAY = 1 << 3;
        const MONTH = 1 << 4;
        const YEAR = 1 << 5;
    }
}

impl TimeUnits {
    /// Whether a subscriber to `granularity` should hear about these changes,
    /// i.e. whether a unit at least as coarse as `granularity` changed.
    pub fn reaches(self, granularity: TimeUnits) -> bool {
        match granularity.iter().next() {
            Some(finest) => self.bits() & !(finest.bits() - 1) != 0,
            None => false,
        }
    }

    /// Compare two readings.
    pub fn between(previous: &NaiveDateTime, now: &NaiveDateTime) -> Self {
        let mut units = TimeUnits::empty();
        units.set(TimeUnits::SECOND, previous.second() != now.second());
        units.set(TimeUnits::MINUTE, previous.minute() != now.minute());
        units.set(TimeUnits::HOUR, previous.hour() != now.hour());
        units.set(TimeUnits::DAY, previous.date() != now.date());
        units.set(TimeUnits::MONTH, previous.month() != now.month());
        units.set(TimeUnits::YEAR, previous.year() != now.year());
        units
    }
}

/// Turns a stream of clock readings into tick events.
#[derive(Debug, Default)]
pub struct TickTimer {
    last: Option<NaiveDateTime>,
}

impl TickTimer {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Feed the current time. Return the changed units, or `None` if nothing
    /// changed. The first reading only sets the reference.
    pub fn poll(&mut self, now: NaiveDateTime) -> Option<TimeUnits> {
        let previous = self.last.replace(now)?;
        let units = TimeUnits::between(&previous, &now);
        (!units.is_empty()).then_some(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn clock_time_from_chrono() {
        let time = ClockTime::from_time(&at(23, 59, 58));
        assert_eq!(time, ClockTime::new(23, 59, 58).unwrap());
        assert_eq!(ClockTime::new(24, 0, 0), None);
        assert_eq!(ClockTime::new(0, 60, 0), None);
        assert_eq!(ClockTime::new(0, 0, 60), None);
    }

    #[test]
    fn first_poll_sets_reference() {
        let mut timer = TickTimer::new();
        assert_eq!(timer.poll(at(10, 0, 0)), None);
        assert_eq!(timer.poll(at(10, 0, 0)), None);
        assert_eq!(timer.poll(at(10, 0, 1)), Some(TimeUnits::SECOND));
    }

    #[test]
    fn rollover_reports_every_changed_unit() {
        let mut timer = TickTimer::new();
        timer.poll(at(10, 59, 59));
        assert_eq!(
            timer.poll(at(11, 0, 0)),
            Some(TimeUnits::SECOND | TimeUnits::MINUTE | TimeUnits::HOUR)
        );

        let new_year = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        timer.poll(at(23, 59, 59).with_month(12).unwrap().with_day(31).unwrap());
        assert_eq!(timer.poll(new_year), Some(TimeUnits::all()));
    }

    #[test]
    fn subscription_granularity() {
        assert!(TimeUnits::SECOND.reaches(TimeUnits::SECOND));
        assert!(!TimeUnits::SECOND.reaches(TimeUnits::MINUTE));
        assert!((TimeUnits::SECOND | TimeUnits::MINUTE).reaches(TimeUnits::MINUTE));
        // A jump of exactly one minute leaves the second unchanged
        assert!(TimeUnits::MINUTE.reaches(TimeUnits::SECOND));
        assert!(!TimeUnits::HOUR.reaches(TimeUnits::empty()));
    }
}
