// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use saferay_ops_domain::{ContractType, TeamMember};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::team;
use crate::error::PersistenceError;
use crate::mutations::expect_row;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = team)]
#[diesel(treat_none_as_null = true)]
struct TeamChangeset<'a> {
    name: &'a str,
    position: Option<&'a str>,
    main_location: Option<&'a str>,
    contract_type: Option<&'static str>,
    email: &'a str,
    phone: Option<&'a str>,
}

impl<'a> From<&'a TeamMember> for TeamChangeset<'a> {
    fn from(member: &'a TeamMember) -> Self {
        Self {
            name: &member.name,
            position: member.position.as_deref(),
            main_location: member.main_location.as_deref(),
            contract_type: member.contract_type.map(ContractType::as_str),
            email: &member.email,
            phone: member.phone.as_deref(),
        }
    }
}

/// Inserts a team member and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_team_member(
    conn: &mut SqliteConnection,
    member: &TeamMember,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(team::table)
        .values(&TeamChangeset::from(member))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    info!(id, name = %member.name, "Inserted team member");
    Ok(id)
}

/// Overwrites every column of an existing team member.
///
/// # Errors
///
/// Returns an error if the update fails or no member has this id.
pub fn update_team_member(
    conn: &mut SqliteConnection,
    id: i64,
    member: &TeamMember,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(team::table.filter(team::id.eq(id)))
        .set(&TeamChangeset::from(member))
        .execute(conn)?;
    expect_row(rows_affected, "team", id)?;

    info!(id, "Updated team member");
    Ok(())
}

/// Deletes a team member. Tickets allocated to them keep a null assignee.
///
/// # Errors
///
/// Returns an error if the delete fails or no member has this id.
pub fn delete_team_member(conn: &mut SqliteConnection, id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(team::table.filter(team::id.eq(id))).execute(conn)?;
    expect_row(rows_affected, "team", id)?;

    info!(id, "Deleted team member");
    Ok(())
}
