// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::atomic::{AtomicU16, Ordering};

use time::{Date, PrimitiveDateTime};

use crate::datetime::parse_timestamp;

/// Formats a ticket number as `T-YYYYMMDD-NNNN`.
///
/// Only the last four digits of `suffix` are used.
#[must_use]
pub fn format_ticket_number(date: Date, suffix: u16) -> String {
    format!(
        "T-{:04}{:02}{:02}-{:04}",
        date.year(),
        u8::from(date.month()),
        date.day(),
        suffix % 10_000
    )
}

/// Suffix of the most recently generated ticket number.
static LAST_SUFFIX: AtomicU16 = AtomicU16::new(u16::MAX);

/// Generates a new ticket number for a ticket created at `now`.
///
/// The suffix is random and never repeats the previous one drawn in this
/// process. Numbers from different processes may still collide; the number
/// is a human reference, not a key.
#[must_use]
pub fn generate_ticket_number(now: PrimitiveDateTime) -> String {
    let mut suffix: u16 = rand::random::<u16>() % 10_000;
    if LAST_SUFFIX.swap(suffix, Ordering::Relaxed) == suffix {
        suffix = (suffix + 1) % 10_000;
        LAST_SUFFIX.store(suffix, Ordering::Relaxed);
    }
    format_ticket_number(now.date(), suffix)
}

/// Whole minutes between two instants, rounded toward negative infinity.
///
/// An end before the start yields a negative count.
#[must_use]
pub fn downtime_minutes(start: PrimitiveDateTime, end: PrimitiveDateTime) -> i64 {
    (end - start).whole_seconds().div_euclid(60)
}

/// Renders the downtime between two instants as `"<N> min"`.
#[must_use]
pub fn downtime_text(start: PrimitiveDateTime, end: PrimitiveDateTime) -> String {
    format!("{} min", downtime_minutes(start, end))
}

/// Derives the downtime duration text from the two form values.
///
/// Returns `None` when either side is blank or unparseable.
#[must_use]
pub fn downtime_duration(start: &str, end: &str) -> Option<String> {
    let start: PrimitiveDateTime = parse_timestamp(start).ok()?;
    let end: PrimitiveDateTime = parse_timestamp(end).ok()?;
    Some(downtime_text(start, end))
}
