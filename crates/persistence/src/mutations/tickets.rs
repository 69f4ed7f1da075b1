// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use saferay_ops_domain::{InvoiceStatus, Ticket, TicketStatus, format_timestamp};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::tickets;
use crate::error::PersistenceError;
use crate::mutations::{date_text, expect_row, timestamp_text};

/// Every ticket column except `id` and `ticket_number`.
///
/// The number is written once on insert and never rewritten.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = tickets)]
#[diesel(treat_none_as_null = true)]
struct TicketChangeset<'a> {
    ticket_name: &'a str,
    category: String,
    component_type: Option<&'a str>,
    component_no: Option<&'a str>,
    error_message: Option<&'a str>,
    availability_loss: i32,
    downtime_start: Option<String>,
    downtime_end: Option<String>,
    downtime_duration: Option<&'a str>,
    spare_parts_used: Option<&'a str>,
    ticket_description: Option<&'a str>,
    photo_url: Option<&'a str>,
    photo_description: Option<&'a str>,
    document_url: Option<&'a str>,
    allocated_to: Option<i64>,
    status: Option<&'static str>,
    srs_ond_sales: i32,
    sales_amount: Option<f64>,
    client_id: Option<i64>,
    invoice_date: Option<String>,
    invoice_status: Option<&'static str>,
    site_id: Option<i64>,
    creation_date: String,
    closure_date: Option<String>,
}

impl<'a> From<&'a Ticket> for TicketChangeset<'a> {
    fn from(ticket: &'a Ticket) -> Self {
        Self {
            ticket_name: &ticket.ticket_name,
            category: ticket.category.to_string(),
            component_type: ticket.component_type.as_deref(),
            component_no: ticket.component_no.as_deref(),
            error_message: ticket.error_message.as_deref(),
            availability_loss: i32::from(ticket.availability_loss),
            downtime_start: timestamp_text(ticket.downtime_start),
            downtime_end: timestamp_text(ticket.downtime_end),
            downtime_duration: ticket.downtime_duration.as_deref(),
            spare_parts_used: ticket.spare_parts_used.as_deref(),
            ticket_description: ticket.ticket_description.as_deref(),
            photo_url: ticket.photo_url.as_deref(),
            photo_description: ticket.photo_description.as_deref(),
            document_url: ticket.document_url.as_deref(),
            allocated_to: ticket.allocated_to,
            status: ticket.status.map(TicketStatus::as_str),
            srs_ond_sales: i32::from(ticket.srs_ond_sales),
            sales_amount: ticket.sales_amount,
            client_id: ticket.client_id,
            invoice_date: date_text(ticket.invoice_date),
            invoice_status: ticket.invoice_status.map(InvoiceStatus::as_str),
            site_id: ticket.site_id,
            creation_date: format_timestamp(ticket.creation_date),
            closure_date: timestamp_text(ticket.closure_date),
        }
    }
}

/// Inserts a ticket, including its number, and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails, including a reference to a site,
/// client, or team member that does not exist.
pub fn insert_ticket(conn: &mut SqliteConnection, ticket: &Ticket) -> Result<i64, PersistenceError> {
    diesel::insert_into(tickets::table)
        .values((
            &TicketChangeset::from(ticket),
            tickets::ticket_number.eq(&ticket.ticket_number),
        ))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    info!(id, ticket_number = %ticket.ticket_number, "Inserted ticket");
    Ok(id)
}

/// Overwrites every column of an existing ticket except its number.
///
/// # Errors
///
/// Returns an error if the update fails or no ticket has this id.
pub fn update_ticket(
    conn: &mut SqliteConnection,
    id: i64,
    ticket: &Ticket,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(tickets::table.filter(tickets::id.eq(id)))
        .set(&TicketChangeset::from(ticket))
        .execute(conn)?;
    expect_row(rows_affected, "tickets", id)?;

    info!(id, "Updated ticket");
    Ok(())
}

/// Deletes a ticket row. Attached files are removed by the caller.
///
/// # Errors
///
/// Returns an error if the delete fails or no ticket has this id.
pub fn delete_ticket(conn: &mut SqliteConnection, id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        diesel::delete(tickets::table.filter(tickets::id.eq(id))).execute(conn)?;
    expect_row(rows_affected, "tickets", id)?;

    info!(id, "Deleted ticket");
    Ok(())
}
