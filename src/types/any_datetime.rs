//! Conversion of the various date/time inputs accepted by the public API into UTC
//! instants.
//!
//! Wall-clock values without an offset (`NaiveDateTime`, `NaiveDate`, and strings
//! such as `"2024-01-15 08:00:00"`) are interpreted in the local time zone, the same
//! way station exports record them.

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc,
};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct StartEndDateTime {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Anything that resolves to an instant, or to a span of instants (a whole day).
pub trait AnyDateTime {
    fn get_datetime_range(self) -> Option<StartEndDateTime>;
}

impl AnyDateTime for DateTime<Utc> {
    fn get_datetime_range(self) -> Option<StartEndDateTime> {
        Some(StartEndDateTime {
            start: self,
            end: self,
        })
    }
}

impl AnyDateTime for DateTime<Local> {
    fn get_datetime_range(self) -> Option<StartEndDateTime> {
        self.with_timezone(&Utc).get_datetime_range()
    }
}

impl AnyDateTime for DateTime<FixedOffset> {
    fn get_datetime_range(self) -> Option<StartEndDateTime> {
        self.with_timezone(&Utc).get_datetime_range()
    }
}

impl AnyDateTime for NaiveDateTime {
    fn get_datetime_range(self) -> Option<StartEndDateTime> {
        local_to_utc(&Local, &self)?.get_datetime_range()
    }
}

impl AnyDateTime for NaiveDate {
    fn get_datetime_range(self) -> Option<StartEndDateTime> {
        let start = start_of_day(&Local, self)?;
        let next = start_of_day(&Local, self.succ_opt()?)?;
        Some(StartEndDateTime {
            start,
            end: next - TimeDelta::milliseconds(1),
        })
    }
}

impl AnyDateTime for &str {
    fn get_datetime_range(self) -> Option<StartEndDateTime> {
        let trimmed = self.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return date.get_datetime_range();
        }
        parse_instant(trimmed)?.get_datetime_range()
    }
}

impl AnyDateTime for String {
    fn get_datetime_range(self) -> Option<StartEndDateTime> {
        self.as_str().get_datetime_range()
    }
}

/// Parses a timestamp cell into an instant.
///
/// Accepts RFC 3339 strings, `YYYY-MM-DD HH:MM[:SS[.fff]]` (space or `T` separated)
/// read as local time, and bare `YYYY-MM-DD` dates read as local midnight. Returns
/// `None` for anything else.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return local_to_utc(&Local, &naive);
        }
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| start_of_day(&Local, date))
}

/// Converts a wall-clock time in `tz` to UTC, taking the earlier instant when the
/// wall-clock time is ambiguous. Returns `None` inside a DST gap.
pub(crate) fn local_to_utc<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The instant at which `date` begins in `tz`.
pub(crate) fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    local_to_utc(tz, &date.and_time(NaiveTime::MIN))
}
