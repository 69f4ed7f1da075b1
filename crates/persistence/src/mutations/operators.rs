// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator and session mutations.
//!
//! Timestamps are written as `YYYY-MM-DDTHH:MM:SS` in UTC so that they
//! compare correctly as text against `expires_at`.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{operators, sessions};
use crate::error::PersistenceError;
use crate::queries::operators::get_operator_by_email;

const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%S', 'now')";

fn hash_password(password: &str) -> Result<String, PersistenceError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))
}

/// Creates a new operator.
///
/// The email is trimmed and lowercased for case-insensitive uniqueness.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The login email (will be normalized)
/// * `password` - The plain-text password (will be hashed)
///
/// # Errors
///
/// Returns `DuplicateOperator` if the email is taken, or an error if the
/// password cannot be hashed or the insert fails.
pub fn create_operator(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
) -> Result<i64, PersistenceError> {
    let normalized: String = email.trim().to_lowercase();

    if get_operator_by_email(conn, &normalized)?.is_some() {
        return Err(PersistenceError::DuplicateOperator(normalized));
    }

    info!("Creating operator with email: {}", normalized);

    let password_hash: String = hash_password(password)?;

    diesel::insert_into(operators::table)
        .values((
            operators::email.eq(&normalized),
            operators::password_hash.eq(&password_hash),
        ))
        .execute(conn)?;

    let operator_id: i64 = get_last_insert_rowid(conn)?;
    info!(operator_id, "Operator created");
    Ok(operator_id)
}

/// Updates the last login timestamp for an operator.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(conn: &mut SqliteConnection, operator_id: i64) -> Result<(), PersistenceError> {
    debug!("Updating last_login_at for operator ID: {}", operator_id);

    diesel::update(operators::table)
        .filter(operators::operator_id.eq(operator_id))
        .set(operators::last_login_at.eq(sql::<Nullable<Text>>(NOW_SQL)))
        .execute(conn)?;

    Ok(())
}

/// Updates an operator's password.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `operator_id` - The operator ID
/// * `new_password` - The new password (will be hashed)
///
/// # Errors
///
/// Returns an error if the password cannot be hashed, the update fails, or
/// the operator does not exist.
pub fn update_password(
    conn: &mut SqliteConnection,
    operator_id: i64,
    new_password: &str,
) -> Result<(), PersistenceError> {
    info!("Updating password for operator ID: {}", operator_id);

    let password_hash: String = hash_password(new_password)?;

    let rows_affected: usize = diesel::update(operators::table)
        .filter(operators::operator_id.eq(operator_id))
        .set(operators::password_hash.eq(&password_hash))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::OperatorNotFound(format!(
            "Operator with ID {operator_id} not found"
        )));
    }
    Ok(())
}

/// Stores an operator's theme preference.
///
/// # Errors
///
/// Returns an error if the update fails or the operator does not exist.
pub fn set_theme(
    conn: &mut SqliteConnection,
    operator_id: i64,
    theme: &str,
) -> Result<(), PersistenceError> {
    debug!(operator_id, theme, "Storing theme preference");

    let rows_affected: usize = diesel::update(operators::table)
        .filter(operators::operator_id.eq(operator_id))
        .set(operators::theme.eq(theme))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::OperatorNotFound(format!(
            "Operator with ID {operator_id} not found"
        )));
    }
    Ok(())
}

/// Creates a new session for an operator.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `operator_id` - The operator ID
/// * `expires_at` - The expiration timestamp (`YYYY-MM-DDTHH:MM:SS`, UTC)
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    operator_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(
        "Creating session for operator ID: {} with expiration: {}",
        operator_id, expires_at
    );

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::operator_id.eq(operator_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;
    debug!(session_id, operator_id, "Session created");
    Ok(session_id)
}

/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    debug!("Updating last_activity_at for session ID: {}", session_id);

    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(sql::<Text>(NOW_SQL)))
        .execute(conn)?;

    Ok(())
}

/// Deletes a session by token. Deleting an unknown token is not an error.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut SqliteConnection, session_token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}

/// Deletes all sessions for an operator.
///
/// Used after a password change so that other logins have to sign in again.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_sessions_for_operator(
    conn: &mut SqliteConnection,
    operator_id: i64,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::operator_id.eq(operator_id))
        .execute(conn)?;

    info!(operator_id, rows_affected, "Deleted operator sessions");
    Ok(rows_affected)
}

/// Deletes all expired sessions.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    debug!("Deleting expired sessions");

    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(sql::<Text>(NOW_SQL)))
        .execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}
