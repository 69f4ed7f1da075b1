// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use saferay_ops_domain::Client;
use tracing::debug;

use crate::data_models::SelectOption;
use crate::diesel_schema::clients;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = clients)]
pub(crate) struct ClientRow {
    id: i64,
    company_name: String,
    owner: Option<String>,
    tax_number: Option<String>,
    company_address: String,
    contact_data: String,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: Some(row.id),
            company_name: row.company_name,
            owner: row.owner,
            tax_number: row.tax_number,
            company_address: row.company_address,
            contact_data: row.contact_data,
        }
    }
}

/// Lists every client, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_clients(conn: &mut SqliteConnection) -> Result<Vec<Client>, PersistenceError> {
    debug!("Listing clients");

    let rows: Vec<ClientRow> = clients::table
        .order(clients::id.asc())
        .select(ClientRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(Client::from).collect())
}

/// Retrieves a client by id.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if no such client exists.
pub fn get_client(conn: &mut SqliteConnection, id: i64) -> Result<Option<Client>, PersistenceError> {
    debug!(id, "Looking up client");

    let row: Option<ClientRow> = clients::table
        .filter(clients::id.eq(id))
        .select(ClientRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Client::from))
}

/// Counts stored clients.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_clients(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(clients::table.count().get_result(conn)?)
}

/// Lists `(id, company name)` pairs for the ticket form's client select.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_client_options(
    conn: &mut SqliteConnection,
) -> Result<Vec<SelectOption>, PersistenceError> {
    let rows: Vec<(i64, String)> = clients::table
        .order((clients::company_name.asc(), clients::id.asc()))
        .select((clients::id, clients::company_name))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, label)| SelectOption { id, label })
        .collect())
}
