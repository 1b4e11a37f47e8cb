//! Local calendar-day keys.
//!
//! The aggregator and the day filter both decide membership through
//! [`DayKey::of`] and nothing else, which is what keeps the calendar dots and
//! the filtered event list from ever disagreeing on where an event belongs.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar day in the device's local time zone.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Day the instant falls on in the device-local zone.
    pub fn of(instant: DateTime<Utc>) -> Self {
        Self::of_in(instant, &Local)
    }

    /// Zone-explicit variant of [`DayKey::of`].
    pub fn of_in<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> Self {
        DayKey(instant.with_timezone(tz).date_naive())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        DayKey(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::from_str(s).map(DayKey)
    }
}
