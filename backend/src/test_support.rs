//! Test utilities shared by unit tests (in `src/`) and the integration suites
//! (in `tests/`).

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

/// A clock that only moves when told to.
///
/// # Examples
/// ```
/// use askboard::test_support::MutableClock;
/// use mockable::Clock;
///
/// let clock = MutableClock::at(2024, 1, 1);
/// let before = clock.utc();
/// clock.advance_seconds(30);
/// assert_eq!((clock.utc() - before).num_seconds(), 30);
/// ```
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Midnight UTC on the given date.
    ///
    /// # Panics
    ///
    /// Panics when the date does not exist.
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        let Some(now) = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single() else {
            panic!("invalid test date {year}-{month}-{day}");
        };
        Self::new(now)
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
