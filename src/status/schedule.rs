//! Parsing of free-form event date and time fields

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ScheduleError;

/// Separator between the start and end of a time range
pub const RANGE_SEPARATOR: &str = " - ";

/// Concrete start and end instants of an event
///
/// `end == start` for events with a single time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Parse an ISO calendar day (`YYYY-MM-DD`)
pub fn parse_date(date: &str) -> Result<NaiveDate, ScheduleError> {
    let trimmed = date.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(trimmed.to_string()))
}

/// Parse a time of day: `HH:MM` (24h) or `H:MM AM`/`H:MM PM`
pub fn parse_time_of_day(time: &str) -> Result<NaiveTime, ScheduleError> {
    let trimmed = time.trim();
    let invalid = || ScheduleError::InvalidTime(trimmed.to_string());

    let upper = trimmed.to_ascii_uppercase();
    let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let (hour, minute) = clock.split_once(':').ok_or_else(invalid)?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return Err(invalid());
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let mut hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;

    if let Some(pm) = meridiem {
        if !(1..=12).contains(&hour) {
            return Err(invalid());
        }
        hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Split a time field into its start text and optional end text
///
/// Only the text before the first `" - "` is ever used as the start.
pub fn split_range(time: &str) -> (&str, Option<&str>) {
    match time.split_once(RANGE_SEPARATOR) {
        Some((start, end)) => (start.trim(), Some(end.trim())),
        None => (time.trim(), None),
    }
}

/// Resolve an event's date and time fields into start and end instants
///
/// A range whose end is earlier than its start runs past midnight, so the
/// end rolls over to the following day.
pub fn parse_schedule(date: &str, time: &str) -> Result<Schedule, ScheduleError> {
    let day = parse_date(date)?;
    if time.trim().is_empty() {
        return Err(ScheduleError::MissingTime);
    }

    let (start_text, end_text) = split_range(time);
    let start = day.and_time(parse_time_of_day(start_text)?);

    let end = match end_text {
        Some(end_text) => {
            let end = day.and_time(parse_time_of_day(end_text)?);
            if end < start {
                end + Duration::days(1)
            } else {
                end
            }
        }
        None => start,
    };

    Ok(Schedule { start, end })
}
