use chrono::{Datelike, LocalResult, NaiveDate, NaiveTime, TimeZone};

use crate::common::error::{AgendaError, Result};

/// Calendar date without time zone, as carried by the feed
pub type CalendarDate = NaiveDate;

/// Parse a feed date (`DD-MM-YYYY`).
///
/// Parts are positional: day, month, year. Surrounding whitespace around a
/// part is tolerated, anything past the third part must still be numeric.
pub fn parse_source_date(field: &str, value: &str) -> Result<CalendarDate> {
    let malformed = |reason: String| AgendaError::MalformedDate {
        field: field.to_string(),
        value: value.to_string(),
        reason,
    };

    let parts = value
        .split('-')
        .map(|part| part.trim().parse::<i64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| malformed(format!("non-numeric part: {e}")))?;

    if parts.len() < 3 {
        return Err(malformed(format!("expected 3 parts, found {}", parts.len())));
    }
    let (day, month, year) = (parts[0], parts[1], parts[2]);

    if !(1..=9999).contains(&year) {
        return Err(malformed(format!("year {year} out of range")));
    }
    let (Ok(month), Ok(day)) = (u32::try_from(month), u32::try_from(day)) else {
        return Err(malformed("day or month out of range".to_string()));
    };

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| malformed("not a calendar date".to_string()))
}

pub fn to_iso_string(date: CalendarDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Epoch seconds of local midnight for `date`, in the process time zone.
pub fn to_epoch_seconds(date: CalendarDate) -> i64 {
    to_epoch_seconds_in(date, &chrono::Local)
}

/// Epoch seconds of midnight for `date` in `tz`.
///
/// An ambiguous midnight resolves to the earlier instant. A midnight that
/// falls into a DST gap resolves to the first minute of the day that exists.
pub fn to_epoch_seconds_in<Tz: TimeZone>(date: CalendarDate, tz: &Tz) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    for minute in 0..24 * 60 {
        let candidate = midnight + chrono::Duration::minutes(minute);
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => return t.timestamp(),
            LocalResult::None => continue,
        }
    }
    midnight.and_utc().timestamp()
}

/// `end - start` in whole days. Negative when the feed has the dates reversed.
pub fn day_delta(start: CalendarDate, end: CalendarDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// Inclusive span of an event, in days.
pub fn duration_days(start: CalendarDate, end: CalendarDate) -> i64 {
    day_delta(start, end) + 1
}

/// Month index 0..12 of a date, for month-name lookup.
pub fn month_index(date: CalendarDate) -> usize {
    date.month0() as usize
}
