// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries, one module per table.
//!
//! Row structs and their conversions into domain records live next to the
//! queries that load them. Text columns holding choices, dates, or
//! timestamps are parsed on the way out; a value that no longer parses is
//! reported as [`PersistenceError::CorruptRow`].

pub mod clients;
pub mod operators;
pub mod sites;
pub mod team;
pub mod tickets;

use std::str::FromStr;

use saferay_ops_domain::{DomainError, parse_date, parse_timestamp};
use time::{Date, PrimitiveDateTime};

use crate::error::PersistenceError;

pub(crate) fn choice_column<T>(table: &'static str, value: &str) -> Result<T, PersistenceError>
where
    T: FromStr<Err = DomainError>,
{
    value
        .parse::<T>()
        .map_err(|e| PersistenceError::corrupt(table, &e))
}

pub(crate) fn optional_choice_column<T>(
    table: &'static str,
    value: Option<String>,
) -> Result<Option<T>, PersistenceError>
where
    T: FromStr<Err = DomainError>,
{
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| choice_column(table, &v))
        .transpose()
}

pub(crate) fn optional_date_column(
    table: &'static str,
    value: Option<String>,
) -> Result<Option<Date>, PersistenceError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_date(&v).map_err(|e| PersistenceError::corrupt(table, &e)))
        .transpose()
}

pub(crate) fn timestamp_column(
    table: &'static str,
    value: &str,
) -> Result<PrimitiveDateTime, PersistenceError> {
    parse_timestamp(value).map_err(|e| PersistenceError::corrupt(table, &e))
}

pub(crate) fn optional_timestamp_column(
    table: &'static str,
    value: Option<String>,
) -> Result<Option<PrimitiveDateTime>, PersistenceError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| timestamp_column(table, &v))
        .transpose()
}
