// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

/// Per-field validation messages, keyed by form field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Contract type is not one of the known values.
    InvalidContractType(String),
    /// Site type entry is not PV or BESS.
    InvalidSiteKind(String),
    /// Region is not one of the eight regions.
    InvalidRegion(String),
    /// Grid connection voltage is not HV or EHV.
    InvalidGridVoltage(String),
    /// Site operator is not SRO or SRS.
    InvalidSiteOperator(String),
    /// Ticket category is not one of the fixed categories.
    InvalidTicketCategory(String),
    /// Ticket status is not one of the known values.
    InvalidTicketStatus(String),
    /// Invoice status is not one of the known values.
    InvalidInvoiceStatus(String),
    /// Theme preference is not light or dark.
    InvalidTheme(String),
    /// One or more fields failed validation.
    ///
    /// Every failing field is reported together.
    FieldsInvalid(FieldErrors),
    /// Failed to parse a date or timestamp from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidContractType(value) => write!(f, "Invalid contract type: {value}"),
            Self::InvalidSiteKind(value) => write!(f, "Invalid site type: {value}"),
            Self::InvalidRegion(value) => write!(f, "Invalid region: {value}"),
            Self::InvalidGridVoltage(value) => {
                write!(f, "Invalid grid connection voltage: {value}")
            }
            Self::InvalidSiteOperator(value) => write!(f, "Invalid site operator: {value}"),
            Self::InvalidTicketCategory(value) => write!(f, "Invalid ticket category: {value}"),
            Self::InvalidTicketStatus(value) => write!(f, "Invalid ticket status: {value}"),
            Self::InvalidInvoiceStatus(value) => write!(f, "Invalid invoice status: {value}"),
            Self::InvalidTheme(value) => write!(f, "Invalid theme: {value}"),
            Self::FieldsInvalid(errors) => {
                let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
                write!(f, "Invalid fields: {}", fields.join(", "))
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

impl DomainError {
    /// Returns the form field this error belongs to, if it maps to exactly one.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidContractType(_) => Some("contract_type"),
            Self::InvalidSiteKind(_) => Some("type"),
            Self::InvalidRegion(_) => Some("region"),
            Self::InvalidGridVoltage(_) => Some("grid_connection_voltage"),
            Self::InvalidSiteOperator(_) => Some("operator"),
            Self::InvalidTicketCategory(_) => Some("category"),
            Self::InvalidTicketStatus(_) => Some("status"),
            Self::InvalidInvoiceStatus(_) => Some("invoice_status"),
            Self::InvalidTheme(_) => Some("theme"),
            Self::FieldsInvalid(_) | Self::DateParseError { .. } => None,
        }
    }
}
