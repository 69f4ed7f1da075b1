// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Table-generic access used by the list, form, detail, and dashboard
//! controllers.
//!
//! Every call is a single round trip with no retry.

use saferay_ops_domain::{Client, Entity, Site, TeamMember, Ticket, TicketListing};

use crate::Persistence;
use crate::data_models::{SelectOption, TicketStat};
use crate::error::PersistenceError;
use crate::{mutations, queries};

/// Create, read, update, and delete for one entity table.
pub trait EntityStore<E: Entity> {
    /// Loads every row in the table's list order.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    fn list(&mut self) -> Result<Vec<E::Listing>, PersistenceError>;

    /// Loads one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    fn get(&mut self, id: i64) -> Result<Option<E>, PersistenceError>;

    /// Inserts a record and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert(&mut self, record: &E) -> Result<i64, PersistenceError>;

    /// Replaces the record with this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails or the id is unknown.
    fn update(&mut self, id: i64, record: &E) -> Result<(), PersistenceError>;

    /// Deletes the record with this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails or the id is unknown.
    fn delete(&mut self, id: i64) -> Result<(), PersistenceError>;
}

/// The reads behind the dashboard summary.
pub trait DashboardSource {
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    fn ticket_stats(&mut self) -> Result<Vec<TicketStat>, PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if the count fails.
    fn count_clients(&mut self) -> Result<i64, PersistenceError>;

    /// `(id, site_name)` for every site.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    fn site_names(&mut self) -> Result<Vec<(i64, String)>, PersistenceError>;
}

/// Choices for the ticket form's reference selects.
pub trait TicketOptionSource {
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    fn team_options(&mut self) -> Result<Vec<SelectOption>, PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    fn site_options(&mut self) -> Result<Vec<SelectOption>, PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    fn client_options(&mut self) -> Result<Vec<SelectOption>, PersistenceError>;
}

impl EntityStore<TeamMember> for Persistence {
    fn list(&mut self) -> Result<Vec<TeamMember>, PersistenceError> {
        queries::team::list_team_members(&mut self.conn)
    }

    fn get(&mut self, id: i64) -> Result<Option<TeamMember>, PersistenceError> {
        queries::team::get_team_member(&mut self.conn, id)
    }

    fn insert(&mut self, record: &TeamMember) -> Result<i64, PersistenceError> {
        mutations::team::insert_team_member(&mut self.conn, record)
    }

    fn update(&mut self, id: i64, record: &TeamMember) -> Result<(), PersistenceError> {
        mutations::team::update_team_member(&mut self.conn, id, record)
    }

    fn delete(&mut self, id: i64) -> Result<(), PersistenceError> {
        mutations::team::delete_team_member(&mut self.conn, id)
    }
}

impl EntityStore<Client> for Persistence {
    fn list(&mut self) -> Result<Vec<Client>, PersistenceError> {
        queries::clients::list_clients(&mut self.conn)
    }

    fn get(&mut self, id: i64) -> Result<Option<Client>, PersistenceError> {
        queries::clients::get_client(&mut self.conn, id)
    }

    fn insert(&mut self, record: &Client) -> Result<i64, PersistenceError> {
        mutations::clients::insert_client(&mut self.conn, record)
    }

    fn update(&mut self, id: i64, record: &Client) -> Result<(), PersistenceError> {
        mutations::clients::update_client(&mut self.conn, id, record)
    }

    fn delete(&mut self, id: i64) -> Result<(), PersistenceError> {
        mutations::clients::delete_client(&mut self.conn, id)
    }
}

impl EntityStore<Site> for Persistence {
    fn list(&mut self) -> Result<Vec<Site>, PersistenceError> {
        queries::sites::list_sites(&mut self.conn)
    }

    fn get(&mut self, id: i64) -> Result<Option<Site>, PersistenceError> {
        queries::sites::get_site(&mut self.conn, id)
    }

    fn insert(&mut self, record: &Site) -> Result<i64, PersistenceError> {
        mutations::sites::insert_site(&mut self.conn, record)
    }

    fn update(&mut self, id: i64, record: &Site) -> Result<(), PersistenceError> {
        mutations::sites::update_site(&mut self.conn, id, record)
    }

    fn delete(&mut self, id: i64) -> Result<(), PersistenceError> {
        mutations::sites::delete_site(&mut self.conn, id)
    }
}

impl EntityStore<Ticket> for Persistence {
    fn list(&mut self) -> Result<Vec<TicketListing>, PersistenceError> {
        queries::tickets::list_ticket_listings(&mut self.conn)
    }

    fn get(&mut self, id: i64) -> Result<Option<Ticket>, PersistenceError> {
        queries::tickets::get_ticket(&mut self.conn, id)
    }

    fn insert(&mut self, record: &Ticket) -> Result<i64, PersistenceError> {
        mutations::tickets::insert_ticket(&mut self.conn, record)
    }

    fn update(&mut self, id: i64, record: &Ticket) -> Result<(), PersistenceError> {
        mutations::tickets::update_ticket(&mut self.conn, id, record)
    }

    fn delete(&mut self, id: i64) -> Result<(), PersistenceError> {
        mutations::tickets::delete_ticket(&mut self.conn, id)
    }
}

impl DashboardSource for Persistence {
    fn ticket_stats(&mut self) -> Result<Vec<TicketStat>, PersistenceError> {
        queries::tickets::list_ticket_stats(&mut self.conn)
    }

    fn count_clients(&mut self) -> Result<i64, PersistenceError> {
        queries::clients::count_clients(&mut self.conn)
    }

    fn site_names(&mut self) -> Result<Vec<(i64, String)>, PersistenceError> {
        queries::sites::list_site_names(&mut self.conn)
    }
}

impl TicketOptionSource for Persistence {
    fn team_options(&mut self) -> Result<Vec<SelectOption>, PersistenceError> {
        queries::team::list_team_options(&mut self.conn)
    }

    fn site_options(&mut self) -> Result<Vec<SelectOption>, PersistenceError> {
        queries::sites::list_site_options(&mut self.conn)
    }

    fn client_options(&mut self) -> Result<Vec<SelectOption>, PersistenceError> {
        queries::clients::list_client_options(&mut self.conn)
    }
}
