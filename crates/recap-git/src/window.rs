// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Time windows for activity scanning
//!
//! A [`TimeWindow`] is a half-open interval `[start, end)` of instants. The
//! usual window is "today" in a configured timezone, computed from an
//! explicitly supplied "now" so callers can pin arbitrary instants.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::WindowError;

/// Half-open time interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window from explicit bounds
    ///
    /// # Errors
    ///
    /// Returns `WindowError::Empty` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, WindowError> {
        if start >= end {
            return Err(WindowError::Empty {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// The 24-hour window beginning at local midnight of the day containing `now`
    #[must_use]
    pub fn day_of(now: DateTime<Utc>, tz: Tz) -> Self {
        let date = now.with_timezone(&tz).date_naive();
        Self::for_date(date, tz)
    }

    /// The 24-hour window beginning at local midnight of `date`
    #[must_use]
    pub fn for_date(date: NaiveDate, tz: Tz) -> Self {
        let start = resolve_local(tz, date.and_time(NaiveTime::MIN));
        Self {
            start,
            end: start + Duration::hours(24),
        }
    }

    /// Inclusive start of the window
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end of the window
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the window
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `instant` falls inside the window
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Calendar date of the window start in `tz`
    #[must_use]
    pub fn local_date(&self, tz: Tz) -> NaiveDate {
        self.start.with_timezone(&tz).date_naive()
    }
}

/// Map a local wall-clock time in `tz` to an instant
///
/// Ambiguous times (clocks turned back) resolve to the earlier instant.
/// Times inside a gap (clocks turned forward) move forward to the first
/// wall-clock time that exists.
#[must_use]
pub fn resolve_local(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    let mut candidate = local;
    // Real-world gaps never exceed a few hours; step in 30 minute increments.
    for _ in 0..48 {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(t) => return t.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
            LocalResult::None => candidate += Duration::minutes(30),
        }
    }
    Utc.from_utc_datetime(&local)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn zone_strategy() -> impl Strategy<Value = Tz> {
        prop_oneof![
            Just(chrono_tz::UTC),
            Just(chrono_tz::Asia::Shanghai),
            Just(chrono_tz::America::New_York),
            Just(chrono_tz::Europe::London),
            Just(chrono_tz::Australia::Lord_Howe),
        ]
    }

    proptest! {
        /// Property: the day window always contains the instant it was built from
        #[test]
        fn prop_day_of_contains_now(secs in 0i64..4_000_000_000i64, tz in zone_strategy()) {
            let now = DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now);
            let window = TimeWindow::day_of(now, tz);
            prop_assert!(now >= window.start());
            // A 25-hour local day can run one hour past the fixed window
            prop_assert!(now < window.end() + Duration::hours(1));
            prop_assert_eq!(window.duration(), Duration::hours(24));
        }
    }
}
