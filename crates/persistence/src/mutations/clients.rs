// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use saferay_ops_domain::Client;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::clients;
use crate::error::PersistenceError;
use crate::mutations::expect_row;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = clients)]
#[diesel(treat_none_as_null = true)]
struct ClientChangeset<'a> {
    company_name: &'a str,
    owner: Option<&'a str>,
    tax_number: Option<&'a str>,
    company_address: &'a str,
    contact_data: &'a str,
}

impl<'a> From<&'a Client> for ClientChangeset<'a> {
    fn from(client: &'a Client) -> Self {
        Self {
            company_name: &client.company_name,
            owner: client.owner.as_deref(),
            tax_number: client.tax_number.as_deref(),
            company_address: &client.company_address,
            contact_data: &client.contact_data,
        }
    }
}

/// Inserts a client and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_client(conn: &mut SqliteConnection, client: &Client) -> Result<i64, PersistenceError> {
    diesel::insert_into(clients::table)
        .values(&ClientChangeset::from(client))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    info!(id, company_name = %client.company_name, "Inserted client");
    Ok(id)
}

/// Overwrites every column of an existing client.
///
/// # Errors
///
/// Returns an error if the update fails or no client has this id.
pub fn update_client(
    conn: &mut SqliteConnection,
    id: i64,
    client: &Client,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(clients::table.filter(clients::id.eq(id)))
        .set(&ClientChangeset::from(client))
        .execute(conn)?;
    expect_row(rows_affected, "clients", id)?;

    info!(id, "Updated client");
    Ok(())
}

/// Deletes a client. Tickets billed to it keep a null client.
///
/// # Errors
///
/// Returns an error if the delete fails or no client has this id.
pub fn delete_client(conn: &mut SqliteConnection, id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize =
        diesel::delete(clients::table.filter(clients::id.eq(id))).execute(conn)?;
    expect_row(rows_affected, "clients", id)?;

    info!(id, "Deleted client");
    Ok(())
}
