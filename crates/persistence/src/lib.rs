// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Saferay operations dashboard.
//!
//! Team members, clients, sites, and tickets live in `SQLite` behind Diesel,
//! alongside dashboard operators and their sessions. Site and ticket
//! attachments live in a [`BlobStore`].
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller its own shared-cache
//! in-memory database with all migrations applied, so tests never see each
//! other's rows.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use saferay_ops_domain::TicketListing;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
pub mod blob;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
pub mod store;

#[cfg(test)]
mod tests;

pub use blob::{BlobStore, InMemoryBlobStore, LocalBlobStore, StorageError};
pub use data_models::{OperatorData, SelectOption, SessionData, TicketStat};
pub use error::PersistenceError;
pub use store::{DashboardSource, EntityStore, TicketOptionSource};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Type alias kept for callers that name the backend explicitly.
pub type SqlitePersistence = Persistence;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Operators
    // ========================================================================

    /// Creates a new operator with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateOperator` if the email is taken, or an error if
    /// the insert fails.
    pub fn create_operator(&mut self, email: &str, password: &str) -> Result<i64, PersistenceError> {
        mutations::operators::create_operator(&mut self.conn, email, password)
    }

    /// Looks up an operator by email, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_operator_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_email(&mut self.conn, email)
    }

    /// Looks up an operator by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_operator_by_id(
        &mut self,
        operator_id: i64,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_id(&mut self.conn, operator_id)
    }

    /// Counts registered operators.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_operators(&mut self) -> Result<i64, PersistenceError> {
        queries::operators::count_operators(&mut self.conn)
    }

    /// Records a successful sign-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::update_last_login(&mut self.conn, operator_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if password verification fails.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::operators::verify_password(password, password_hash)
    }

    /// Updates an operator's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_password(
        &mut self,
        operator_id: i64,
        new_password: &str,
    ) -> Result<(), PersistenceError> {
        mutations::operators::update_password(&mut self.conn, operator_id, new_password)
    }

    /// Stores an operator's theme preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_theme(&mut self, operator_id: i64, theme: &str) -> Result<(), PersistenceError> {
        mutations::operators::set_theme(&mut self.conn, operator_id, theme)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a session and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        operator_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_session(&mut self.conn, session_token, operator_id, expires_at)
    }

    /// Looks up a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::operators::get_session_by_token(&mut self.conn, session_token)
    }

    /// Refreshes a session's last activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::operators::delete_session(&mut self.conn, session_token)
    }

    /// Deletes every session of an operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_sessions_for_operator(
        &mut self,
        operator_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::operators::delete_sessions_for_operator(&mut self.conn, operator_id)
    }

    /// Deletes sessions whose expiry has passed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::operators::delete_expired_sessions(&mut self.conn)
    }

    /// Loads one ticket with its joined reference names.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_ticket_listing(
        &mut self,
        id: i64,
    ) -> Result<Option<TicketListing>, PersistenceError> {
        queries::tickets::get_ticket_listing(&mut self.conn, id)
    }
}
