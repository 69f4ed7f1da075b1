// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date and timestamp text handling.
//!
//! Dates are stored as `YYYY-MM-DD` and timestamps as
//! `YYYY-MM-DDTHH:MM:SS` in UTC. Form inputs carry minute precision
//! (`YYYY-MM-DDTHH:MM`).

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::DomainError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const FRACTIONAL_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
const INPUT_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// Parses a date, accepting either a bare date or the date prefix of a
/// longer timestamp.
///
/// # Errors
///
/// Returns an error if the text does not start with a valid `YYYY-MM-DD`.
pub fn parse_date(text: &str) -> Result<Date, DomainError> {
    let trimmed: &str = text.trim();
    let prefix: &str = trimmed.get(..10).unwrap_or(trimmed);
    Date::parse(prefix, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: text.to_string(),
        error: e.to_string(),
    })
}

/// Parses a timestamp.
///
/// Accepted shapes, in order: RFC 3339 with an offset (normalized to UTC),
/// `YYYY-MM-DDTHH:MM:SS[.fff]`, and `YYYY-MM-DDTHH:MM`. A space may stand in
/// for the `T` separator.
///
/// # Errors
///
/// Returns an error if none of the accepted shapes match.
pub fn parse_timestamp(text: &str) -> Result<PrimitiveDateTime, DomainError> {
    let trimmed: &str = text.trim();

    if let Ok(with_offset) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(to_utc_primitive(with_offset));
    }

    let normalized: String = trimmed.replacen(' ', "T", 1);
    [
        TIMESTAMP_FORMAT,
        FRACTIONAL_TIMESTAMP_FORMAT,
        INPUT_TIMESTAMP_FORMAT,
    ]
    .iter()
    .find_map(|format| PrimitiveDateTime::parse(&normalized, format).ok())
    .ok_or_else(|| DomainError::DateParseError {
        date_string: text.to_string(),
        error: String::from("expected YYYY-MM-DDTHH:MM[:SS]"),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// Formats a timestamp for storage, to the second.
#[must_use]
pub fn format_timestamp(timestamp: PrimitiveDateTime) -> String {
    timestamp
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Formats a timestamp for a form input, to the minute.
#[must_use]
pub fn format_input_timestamp(timestamp: PrimitiveDateTime) -> String {
    timestamp
        .format(INPUT_TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Returns the current UTC time without its offset.
#[must_use]
pub fn utc_now() -> PrimitiveDateTime {
    to_utc_primitive(OffsetDateTime::now_utc())
}

/// Drops an offset after normalizing to UTC.
#[must_use]
pub fn to_utc_primitive(moment: OffsetDateTime) -> PrimitiveDateTime {
    let utc: OffsetDateTime = moment.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(utc.date(), utc.time())
}
