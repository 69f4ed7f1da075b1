// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use saferay_ops_domain::{
    InvoiceStatus, Selection, TicketCategory, Ticket, TicketListing, TicketStatus,
};
use tracing::debug;

use crate::data_models::TicketStat;
use crate::diesel_schema::{clients, sites, team, tickets};
use crate::error::PersistenceError;
use crate::queries::{
    optional_choice_column, optional_date_column, optional_timestamp_column, timestamp_column,
};

const TABLE: &str = "tickets";

#[derive(Queryable, Selectable)]
#[diesel(table_name = tickets)]
pub(crate) struct TicketRow {
    id: i64,
    ticket_number: String,
    ticket_name: String,
    category: String,
    component_type: Option<String>,
    component_no: Option<String>,
    error_message: Option<String>,
    availability_loss: i32,
    downtime_start: Option<String>,
    downtime_end: Option<String>,
    downtime_duration: Option<String>,
    spare_parts_used: Option<String>,
    ticket_description: Option<String>,
    photo_url: Option<String>,
    photo_description: Option<String>,
    document_url: Option<String>,
    allocated_to: Option<i64>,
    status: Option<String>,
    srs_ond_sales: i32,
    sales_amount: Option<f64>,
    client_id: Option<i64>,
    invoice_date: Option<String>,
    invoice_status: Option<String>,
    site_id: Option<i64>,
    creation_date: String,
    closure_date: Option<String>,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = PersistenceError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        let category: Selection<TicketCategory> =
            Selection::parse(&row.category).map_err(|e| PersistenceError::corrupt(TABLE, &e))?;

        Ok(Self {
            id: Some(row.id),
            ticket_number: row.ticket_number,
            ticket_name: row.ticket_name,
            category,
            component_type: row.component_type,
            component_no: row.component_no,
            error_message: row.error_message,
            availability_loss: row.availability_loss != 0,
            downtime_start: optional_timestamp_column(TABLE, row.downtime_start)?,
            downtime_end: optional_timestamp_column(TABLE, row.downtime_end)?,
            downtime_duration: row.downtime_duration,
            spare_parts_used: row.spare_parts_used,
            ticket_description: row.ticket_description,
            photo_url: row.photo_url,
            photo_description: row.photo_description,
            document_url: row.document_url,
            allocated_to: row.allocated_to,
            status: optional_choice_column::<TicketStatus>(TABLE, row.status)?,
            srs_ond_sales: row.srs_ond_sales != 0,
            sales_amount: row.sales_amount,
            client_id: row.client_id,
            invoice_date: optional_date_column(TABLE, row.invoice_date)?,
            invoice_status: optional_choice_column::<InvoiceStatus>(TABLE, row.invoice_status)?,
            site_id: row.site_id,
            creation_date: timestamp_column(TABLE, &row.creation_date)?,
            closure_date: optional_timestamp_column(TABLE, row.closure_date)?,
        })
    }
}

type ListingRow = (TicketRow, Option<String>, Option<String>, Option<String>);

/// Lists every ticket, newest first, with the names of its site, client,
/// and assignee.
///
/// A dangling or null reference yields `None` for that name.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be read back.
pub fn list_ticket_listings(
    conn: &mut SqliteConnection,
) -> Result<Vec<TicketListing>, PersistenceError> {
    debug!("Listing tickets");

    let rows: Vec<ListingRow> = tickets::table
        .left_join(sites::table)
        .left_join(clients::table)
        .left_join(team::table)
        .order((tickets::creation_date.desc(), tickets::id.desc()))
        .select((
            TicketRow::as_select(),
            sites::site_name.nullable(),
            clients::company_name.nullable(),
            team::name.nullable(),
        ))
        .load(conn)?;

    rows.into_iter().map(into_listing).collect()
}

/// Retrieves one ticket with the names of its site, client, and assignee.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be read back.
/// Returns `Ok(None)` if no such ticket exists.
pub fn get_ticket_listing(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<TicketListing>, PersistenceError> {
    debug!(id, "Looking up ticket listing");

    tickets::table
        .left_join(sites::table)
        .left_join(clients::table)
        .left_join(team::table)
        .filter(tickets::id.eq(id))
        .select((
            TicketRow::as_select(),
            sites::site_name.nullable(),
            clients::company_name.nullable(),
            team::name.nullable(),
        ))
        .first::<ListingRow>(conn)
        .optional()?
        .map(into_listing)
        .transpose()
}

fn into_listing(
    (row, site_name, client_name, allocated_name): ListingRow,
) -> Result<TicketListing, PersistenceError> {
    Ok(TicketListing {
        ticket: Ticket::try_from(row)?,
        site_name,
        client_name,
        allocated_name,
    })
}

/// Retrieves a ticket by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be read back.
/// Returns `Ok(None)` if no such ticket exists.
pub fn get_ticket(conn: &mut SqliteConnection, id: i64) -> Result<Option<Ticket>, PersistenceError> {
    debug!(id, "Looking up ticket");

    tickets::table
        .filter(tickets::id.eq(id))
        .select(TicketRow::as_select())
        .first::<TicketRow>(conn)
        .optional()?
        .map(Ticket::try_from)
        .transpose()
}

/// Loads the status and site of every ticket, in id order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_ticket_stats(conn: &mut SqliteConnection) -> Result<Vec<TicketStat>, PersistenceError> {
    let rows: Vec<(Option<String>, Option<i64>)> = tickets::table
        .order(tickets::id.asc())
        .select((tickets::status, tickets::site_id))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(status, site_id)| TicketStat { status, site_id })
        .collect())
}
