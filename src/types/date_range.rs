use crate::error::Pm10Error;
use crate::types::any_datetime::AnyDateTime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An optionally bounded, inclusive time window.
///
/// A missing bound means the window is open on that side. The default value is open
/// on both sides and matches everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// A window from the start of `start` to the end of `end`.
    ///
    /// Whole days are covered completely, so `between("2024-01-01", "2024-01-31")`
    /// includes every measurement of January 31st.
    ///
    /// # Errors
    ///
    /// Returns [`Pm10Error::DateParsing`] if either bound cannot be resolved.
    pub fn between(start: impl AnyDateTime, end: impl AnyDateTime) -> Result<Self, Pm10Error> {
        let from = start
            .get_datetime_range()
            .ok_or(Pm10Error::DateParsing)?
            .start;
        let to = end.get_datetime_range().ok_or(Pm10Error::DateParsing)?.end;
        Ok(Self::new(Some(from), Some(to)))
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| *instant >= from) && self.to.map_or(true, |to| *instant <= to)
    }
}
