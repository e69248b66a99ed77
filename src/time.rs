//! Timestamp derivation for SEG-D general headers.
//!
//! The general header stores a two-digit year, a day-of-year and an
//! hour/minute/second triple, all packed BCD. Revision 3 adds a 64-bit GPS
//! fine timestamp in block 3.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::{Result, SegdError};

/// Two-digit years below this value belong to the 2000s.
const YEAR_PIVOT: u8 = 70;

/// Expand a two-digit header year to a full year.
pub fn expand_year(yy: u8) -> i32 {
    if yy < YEAR_PIVOT {
        2000 + yy as i32
    } else {
        1900 + yy as i32
    }
}

/// Build the record timestamp: January 1st of `year`, plus
/// `julian_day - 1` days, at `hour:minute:second`.
///
/// A day past the end of the year rolls into the following year.
pub fn record_timestamp(
    year: i32,
    julian_day: u16,
    hour: u8,
    minute: u8,
    second: u8,
) -> Result<NaiveDateTime> {
    let invalid = || SegdError::InvalidTimestamp {
        year,
        day: julian_day,
        hour,
        minute,
        second,
    };

    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(hour as u32, minute as u32, second as u32)
        .ok_or_else(invalid)?;
    let date = jan1
        .checked_add_signed(TimeDelta::days(julian_day as i64 - 1))
        .ok_or_else(invalid)?;
    Ok(date.and_time(time))
}

/// Convert a GPS fine timestamp (microseconds since 1980-01-06 00:00:00)
/// to a calendar time on the GPS time scale. Leap seconds are not applied.
pub fn gps_time(micros: i64) -> Option<NaiveDateTime> {
    let epoch = NaiveDate::from_ymd_opt(1980, 1, 6)?.and_hms_opt(0, 0, 0)?;
    epoch.checked_add_signed(TimeDelta::microseconds(micros))
}
