// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The list screen shared by team, clients, sites, and tickets.
//!
//! A list always shows the full table as last fetched. Every mutation is
//! followed by exactly one re-fetch, whether or not the mutation succeeded.

use saferay_ops_domain::{Entity, Listed, matches_search};
use saferay_ops_persistence::{EntityStore, PersistenceError};
use tracing::{error, info};

use crate::notice::Notice;

/// State of one entity list screen.
pub struct ListScreen<E: Entity> {
    rows: Vec<E::Listing>,
    loading: bool,
    search_text: String,
    selected: Option<i64>,
    form_open: bool,
    confirm_delete_open: bool,
    detail_open: bool,
    notice: Option<Notice>,
}

impl<E: Entity> Default for ListScreen<E> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            loading: false,
            search_text: String::new(),
            selected: None,
            form_open: false,
            confirm_delete_open: false,
            detail_open: false,
            notice: None,
        }
    }
}

impl<E: Entity> ListScreen<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the full table, replacing the current rows.
    ///
    /// A failed fetch leaves the list empty and sets a network notice.
    pub fn load<S: EntityStore<E>>(&mut self, store: &mut S) {
        self.loading = true;
        match store.list() {
            Ok(rows) => {
                info!(table = E::TABLE, count = rows.len(), "Loaded list");
                self.rows = rows;
            }
            Err(e) => {
                error!(table = E::TABLE, error = %e, "Failed to load list");
                self.rows = Vec::new();
                self.notice = Some(Notice::network(format!(
                    "Could not load {}: {e}",
                    E::TABLE
                )));
            }
        }
        self.loading = false;
    }

    pub fn set_search(&mut self, text: &str) {
        self.search_text = text.to_string();
    }

    /// Rows whose display field contains the search text, ignoring case.
    #[must_use]
    pub fn filtered(&self) -> Vec<&E::Listing> {
        self.rows
            .iter()
            .filter(|row| matches_search(row.search_text(), &self.search_text))
            .collect()
    }

    pub const fn open_create(&mut self) {
        self.selected = None;
        self.form_open = true;
    }

    pub const fn open_edit(&mut self, id: i64) {
        self.selected = Some(id);
        self.detail_open = false;
        self.form_open = true;
    }

    pub const fn open_detail(&mut self, id: i64) {
        self.selected = Some(id);
        self.detail_open = true;
    }

    pub const fn close_popups(&mut self) {
        self.form_open = false;
        self.detail_open = false;
    }

    pub const fn request_delete(&mut self, id: i64) {
        self.selected = Some(id);
        self.confirm_delete_open = true;
    }

    pub const fn cancel_delete(&mut self) {
        self.confirm_delete_open = false;
    }

    /// Deletes the selected row, then closes the dialog and re-fetches.
    ///
    /// Exactly one delete is issued for the selected id and exactly one
    /// re-fetch follows it, whatever the delete returned. Does nothing when
    /// no row is selected.
    ///
    /// # Errors
    ///
    /// Returns the delete failure after the dialog is closed and the list
    /// re-fetched.
    pub fn confirm_delete<S: EntityStore<E>>(
        &mut self,
        store: &mut S,
    ) -> Result<(), PersistenceError> {
        let Some(id) = self.selected else {
            self.confirm_delete_open = false;
            return Ok(());
        };

        let result: Result<(), PersistenceError> = store.delete(id);
        match &result {
            Ok(()) => {
                info!(table = E::TABLE, id, "Deleted row");
                self.notice = Some(Notice::success("Deleted"));
            }
            Err(e) => {
                error!(table = E::TABLE, id, error = %e, "Failed to delete row");
                self.notice = Some(Notice::server(format!("Could not delete: {e}")));
            }
        }

        self.confirm_delete_open = false;
        self.detail_open = false;
        self.selected = None;
        self.load(store);
        result
    }

    /// Closes the form after a successful save and re-fetches.
    pub fn after_save<S: EntityStore<E>>(&mut self, store: &mut S) {
        self.form_open = false;
        self.selected = None;
        self.notice = Some(Notice::success("Saved"));
        self.load(store);
    }

    #[must_use]
    pub fn rows(&self) -> &[E::Listing] {
        &self.rows
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub const fn selected(&self) -> Option<i64> {
        self.selected
    }

    #[must_use]
    pub const fn is_form_open(&self) -> bool {
        self.form_open
    }

    #[must_use]
    pub const fn is_confirm_delete_open(&self) -> bool {
        self.confirm_delete_open
    }

    #[must_use]
    pub const fn is_detail_open(&self) -> bool {
        self.detail_open
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub const fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}
