//! Parsing of scheduled dates and the gate's local calendar day.

use std::ops::RangeInclusive;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};

use citadel_core::error::AppError;
use citadel_core::result::AppResult;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Years a visit may be scheduled in.
const SCHEDULABLE_YEARS: RangeInclusive<i32> = 1..=9999;

/// Parse a scheduled date supplied by a client.
///
/// RFC 3339 values carry their own offset. Naive date-times and bare dates
/// are read as local to `offset`; a bare date means local midnight.
/// Years outside `1..=9999` are rejected.
pub fn parse_scheduled_date(input: &str, offset: FixedOffset) -> AppResult<DateTime<Utc>> {
    let parsed = parse_any(input, offset)?;
    if !SCHEDULABLE_YEARS.contains(&parsed.year()) {
        return Err(AppError::validation(format!(
            "Visit date '{}' is out of range",
            input.trim()
        )));
    }
    Ok(parsed)
}

fn parse_any(input: &str, offset: FixedOffset) -> AppResult<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::validation("Visit date is required"));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| {
            AppError::validation(format!(
                "Invalid date '{input}'. Expected RFC 3339, YYYY-MM-DDTHH:MM[:SS] or YYYY-MM-DD"
            ))
        })?;

    localize(naive, offset)
}

/// `[start, end)` of the local calendar day containing `now`.
pub fn local_day_bounds(
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let midnight = now
        .with_timezone(&offset)
        .date_naive()
        .and_time(NaiveTime::MIN);
    let start = localize(midnight, offset)?;
    Ok((start, start + Duration::days(1)))
}

fn localize(naive: NaiveDateTime, offset: FixedOffset) -> AppResult<DateTime<Utc>> {
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::validation(format!("Date '{naive}' is out of range")))
}
