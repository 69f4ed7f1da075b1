// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Coercion of string-shaped form values into column values.
//!
//! Blank input always becomes `None`. Numeric input that does not parse also
//! becomes `None`; it is never an error.

use time::{Date, PrimitiveDateTime};

use crate::datetime::{parse_date, parse_timestamp};

/// Text written for a checked flag.
pub const FLAG_TRUE: &str = "true";

#[must_use]
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[must_use]
pub fn optional_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[must_use]
pub fn optional_i32(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok()
}

#[must_use]
pub fn optional_i64(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

#[must_use]
pub fn optional_date(value: &str) -> Option<Date> {
    if value.trim().is_empty() {
        return None;
    }
    parse_date(value).ok()
}

#[must_use]
pub fn optional_timestamp(value: &str) -> Option<PrimitiveDateTime> {
    if value.trim().is_empty() {
        return None;
    }
    parse_timestamp(value).ok()
}

/// Reads a checkbox value. `"true"`, `"on"`, and `"1"` are checked.
#[must_use]
pub fn flag(value: &str) -> bool {
    matches!(value.trim(), FLAG_TRUE | "on" | "1")
}

/// Writes a checkbox value.
#[must_use]
pub const fn flag_text(checked: bool) -> &'static str {
    if checked { FLAG_TRUE } else { "" }
}
