// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod aggregate;
mod coerce;
mod datetime;
mod entities;
mod error;
mod selection;
mod ticket_rules;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use aggregate::{UNKNOWN_STATUS, count_by_site, count_by_status, site_label, site_name_map};
pub use coerce::{
    FLAG_TRUE, flag, flag_text, optional_date, optional_f64, optional_i32, optional_i64,
    optional_text, optional_timestamp,
};
pub use datetime::{
    format_date, format_input_timestamp, format_timestamp, parse_date, parse_timestamp,
    to_utc_primitive, utc_now,
};
pub use entities::{
    Client, Entity, Listed, Site, TeamMember, Ticket, TicketListing, matches_search,
};
pub use error::{DomainError, FieldErrors};
pub use selection::{SELECTION_DELIMITER, Selection};
pub use ticket_rules::{
    downtime_duration, downtime_minutes, downtime_text, format_ticket_number,
    generate_ticket_number,
};
pub use types::{
    ContractType, GridVoltage, InvoiceStatus, Region, SiteKind, SiteOperator, Theme,
    TicketCategory, TicketStatus,
};
pub use validation::{
    CLIENT_REQUIRED, RequiredField, SITE_REQUIRED, TEAM_MEMBER_REQUIRED, TICKET_REQUIRED,
    validate_required,
};
