use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Canonical date key. Renders as zero-padded `YYYY-MM-DD`, so the
/// string form sorts chronologically and `Ord` agrees with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

/// Shape of a raw date string before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `DD-MM-YYYY`, the activity feed's wire format.
    DayMonthYear,
    /// `DD-MM` with the year supplied by the caller.
    DayMonth { year: i32 },
    /// Already-canonical `YYYY-MM-DD`.
    Canonical,
}

impl DateKey {
    /// Parse a raw date string into a canonical key. Returns `None` when
    /// the string does not split into the expected numeric parts or names
    /// a day that does not exist on the calendar.
    pub fn normalize(raw: &str, format: SourceFormat) -> Option<DateKey> {
        let parts = raw
            .split('-')
            .map(|part| part.trim().parse::<i32>().ok())
            .collect::<Option<Vec<i32>>>()?;

        let (year, month, day) = match (format, parts.as_slice()) {
            (SourceFormat::DayMonthYear, [day, month, year]) => (*year, *month, *day),
            (SourceFormat::DayMonth { year }, [day, month]) => (year, *month, *day),
            (SourceFormat::Canonical, [year, month, day]) => (*year, *month, *day),
            _ => return None,
        };

        let month = u32::try_from(month).ok()?;
        let day = u32::try_from(day).ok()?;
        NaiveDate::from_ymd_opt(year, month, day).map(DateKey)
    }

    pub fn from_date(date: NaiveDate) -> DateKey {
        DateKey(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Days since the common era, used as the interpolation time axis.
    pub fn day_number(&self) -> i64 {
        i64::from(self.0.num_days_from_ce())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
