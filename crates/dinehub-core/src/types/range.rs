//! Half-open timestamp ranges used by store range queries.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A `[from, until)` range over UTC timestamps. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive lower bound.
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound.
    pub until: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Unbounded range.
    pub fn all() -> Self {
        Self::default()
    }

    /// Everything strictly before `instant`.
    pub fn before(instant: DateTime<Utc>) -> Self {
        Self {
            from: None,
            until: Some(instant),
        }
    }

    /// Everything at or after `instant`.
    pub fn since(instant: DateTime<Utc>) -> Self {
        Self {
            from: Some(instant),
            until: None,
        }
    }

    /// `[from, until)`.
    pub fn between(from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            until: Some(until),
        }
    }

    /// One UTC calendar day.
    pub fn day(date: NaiveDate) -> Self {
        let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
        Self::between(start, start + Duration::days(1))
    }

    /// Whether `instant` falls inside the range.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| instant >= from) && self.until.is_none_or(|until| instant < until)
    }
}
