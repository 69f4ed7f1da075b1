// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations, one module per table.
//!
//! Inserts return the new row id read back through
//! `last_insert_rowid()`. Updates and deletes that touch no row report
//! [`PersistenceError::NotFound`].

pub mod clients;
pub mod operators;
pub mod sites;
pub mod team;
pub mod tickets;

use saferay_ops_domain::{format_date, format_timestamp};
use time::{Date, PrimitiveDateTime};

use crate::error::PersistenceError;

pub(crate) fn date_text(value: Option<Date>) -> Option<String> {
    value.map(format_date)
}

pub(crate) fn timestamp_text(value: Option<PrimitiveDateTime>) -> Option<String> {
    value.map(format_timestamp)
}

/// Turns a zero affected-row count into `NotFound`.
pub(crate) fn expect_row(
    rows_affected: usize,
    table: &str,
    id: i64,
) -> Result<(), PersistenceError> {
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "No row with id {id} in '{table}'"
        )));
    }
    Ok(())
}
