//! Local wall-clock source for the occupancy and weather models.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use parking_lot::Mutex;

/// Source of the local time used by the schedule-driven loops
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

/// Weekdays, 08:00 up to (not including) 18:00
pub fn is_business_hours(now: &NaiveDateTime) -> bool {
    now.weekday().num_days_from_monday() < 5 && (8..18).contains(&now.hour())
}
