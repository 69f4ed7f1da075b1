// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{DomainError, FieldErrors};

/// A field that must be non-blank before a record may be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredField {
    /// The form field name.
    pub field: &'static str,
    /// The message shown next to the field when it is blank.
    pub message: &'static str,
}

impl RequiredField {
    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub const TEAM_MEMBER_REQUIRED: &[RequiredField] = &[
    RequiredField::new("name", "Name is required"),
    RequiredField::new("email", "Email is required"),
];

pub const CLIENT_REQUIRED: &[RequiredField] = &[
    RequiredField::new("company_name", "Company name is required"),
    RequiredField::new("company_address", "Company address is required"),
    RequiredField::new("contact_data", "Contact data is required"),
];

pub const SITE_REQUIRED: &[RequiredField] = &[
    RequiredField::new("site_name", "Site name is required"),
    RequiredField::new(
        "grid_connection_voltage",
        "Grid connection voltage is required",
    ),
    RequiredField::new("operator", "Operator is required"),
];

/// The category field holds the joined selection, so a blank value means
/// no category is checked.
pub const TICKET_REQUIRED: &[RequiredField] = &[
    RequiredField::new("ticket_name", "Ticket name is required"),
    RequiredField::new("category", "At least one category is required"),
    RequiredField::new("site_id", "Site is required"),
];

/// Validates that every required field has a non-blank value.
///
/// All failing fields are collected so the form can show them together.
/// Whitespace-only values count as blank. A field the lookup does not know
/// about counts as blank.
///
/// # Arguments
///
/// * `rules` - The required fields for the entity
/// * `value_of` - Looks up the current value of a form field
///
/// # Errors
///
/// Returns `DomainError::FieldsInvalid` with one message per blank field.
pub fn validate_required<'a, F>(rules: &[RequiredField], value_of: F) -> Result<(), DomainError>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let errors: FieldErrors = rules
        .iter()
        .filter(|rule| value_of(rule.field).is_none_or(|value| value.trim().is_empty()))
        .map(|rule| (rule.field.to_string(), rule.message.to_string()))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::FieldsInvalid(errors))
    }
}
