// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use saferay_ops_domain::{ContractType, TeamMember};
use tracing::debug;

use crate::data_models::SelectOption;
use crate::diesel_schema::team;
use crate::error::PersistenceError;
use crate::queries::optional_choice_column;

#[derive(Queryable, Selectable)]
#[diesel(table_name = team)]
pub(crate) struct TeamRow {
    id: i64,
    name: String,
    position: Option<String>,
    main_location: Option<String>,
    contract_type: Option<String>,
    email: String,
    phone: Option<String>,
}

impl TryFrom<TeamRow> for TeamMember {
    type Error = PersistenceError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.id),
            name: row.name,
            position: row.position,
            main_location: row.main_location,
            contract_type: optional_choice_column::<ContractType>("team", row.contract_type)?,
            email: row.email,
            phone: row.phone,
        })
    }
}

/// Lists every team member, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be read back.
pub fn list_team_members(conn: &mut SqliteConnection) -> Result<Vec<TeamMember>, PersistenceError> {
    debug!("Listing team members");

    team::table
        .order(team::id.asc())
        .select(TeamRow::as_select())
        .load::<TeamRow>(conn)?
        .into_iter()
        .map(TeamMember::try_from)
        .collect()
}

/// Retrieves a team member by id.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if no such member exists.
pub fn get_team_member(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<TeamMember>, PersistenceError> {
    debug!(id, "Looking up team member");

    team::table
        .filter(team::id.eq(id))
        .select(TeamRow::as_select())
        .first::<TeamRow>(conn)
        .optional()?
        .map(TeamMember::try_from)
        .transpose()
}

/// Lists `(id, name)` pairs for the ticket form's assignee select.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_team_options(
    conn: &mut SqliteConnection,
) -> Result<Vec<SelectOption>, PersistenceError> {
    let rows: Vec<(i64, String)> = team::table
        .order((team::name.asc(), team::id.asc()))
        .select((team::id, team::name))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, label)| SelectOption { id, label })
        .collect())
}
