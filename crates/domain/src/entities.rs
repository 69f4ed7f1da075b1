// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed records for the four managed tables.
//!
//! A record is the shape written to and read from the store. Form input is
//! validated and coerced into a record before it reaches the store, so a
//! record never carries raw form strings for numeric, date, or choice
//! columns.

use serde::{Serialize, Serializer};
use time::{Date, PrimitiveDateTime};

use crate::datetime::{format_date, format_timestamp};
use crate::selection::Selection;
use crate::types::{
    ContractType, GridVoltage, InvoiceStatus, Region, SiteKind, SiteOperator, TicketCategory,
    TicketStatus,
};

/// A record managed through a list screen and form.
pub trait Entity: Clone {
    /// The row shape shown in the entity's list.
    type Listing: Listed + Clone;

    /// Name of the backing table.
    const TABLE: &'static str;

    /// Store-assigned identifier, `None` until inserted.
    fn id(&self) -> Option<i64>;
}

/// A row in a list screen.
pub trait Listed {
    fn listing_id(&self) -> Option<i64>;

    /// The text the list search box filters on.
    fn search_text(&self) -> &str;
}

/// Case-insensitive substring match used by list search boxes.
///
/// An empty query matches everything. Whitespace in the query is matched
/// literally.
#[must_use]
pub fn matches_search(text: &str, query: &str) -> bool {
    let needle: String = query.to_lowercase();
    needle.is_empty() || text.to_lowercase().contains(&needle)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMember {
    pub id: Option<i64>,
    pub name: String,
    pub position: Option<String>,
    pub main_location: Option<String>,
    pub contract_type: Option<ContractType>,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    pub id: Option<i64>,
    pub company_name: String,
    pub owner: Option<String>,
    pub tax_number: Option<String>,
    pub company_address: String,
    pub contact_data: String,
}

/// A PV and/or BESS installation.
///
/// The PV group is meaningful only when the site type contains PV and the
/// BESS group only when it contains BESS. The store keeps both groups
/// regardless of type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    pub id: Option<i64>,
    pub site_name: String,
    pub official_name: Option<String>,
    #[serde(rename = "type")]
    pub site_type: Selection<SiteKind>,
    pub region: Option<Region>,
    pub address: Option<String>,
    pub coordinates: Option<String>,
    pub grid_connection_voltage: GridVoltage,
    pub cee: Option<String>,
    pub operator: SiteOperator,

    pub dc_capacity_kw: Option<f64>,
    pub ac_capacity_kw: Option<f64>,
    pub pcs: Option<String>,
    pub pcs_quantity: Option<i32>,
    pub module: Option<String>,
    pub module_quantity: Option<i32>,
    pub tilt: Option<String>,

    pub rated_power: Option<String>,
    pub nominal_energy_capacity: Option<String>,
    pub operating_capacity: Option<String>,
    pub battery: Option<String>,
    pub battery_containers_qty: Option<i32>,
    pub battery_modules_per_rack: Option<i32>,
    pub c_rate: Option<String>,

    pub electricity_selling_rate: Option<String>,
    #[serde(serialize_with = "serialize_optional_date")]
    pub cod: Option<Date>,
    /// Generated file names inside the aerial, layout, and docs buckets.
    pub representative_aerial_url: Option<String>,
    pub representative_layout_url: Option<String>,
    pub site_documentation_url: Option<String>,
    /// Set by the store on insert.
    #[serde(serialize_with = "serialize_optional_timestamp")]
    pub created_at: Option<PrimitiveDateTime>,
}

/// A maintenance ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    pub id: Option<i64>,
    /// `T-YYYYMMDD-NNNN`, assigned once on creation.
    pub ticket_number: String,
    pub ticket_name: String,
    pub category: Selection<TicketCategory>,

    pub component_type: Option<String>,
    pub component_no: Option<String>,
    pub error_message: Option<String>,

    pub availability_loss: bool,
    #[serde(serialize_with = "serialize_optional_timestamp")]
    pub downtime_start: Option<PrimitiveDateTime>,
    #[serde(serialize_with = "serialize_optional_timestamp")]
    pub downtime_end: Option<PrimitiveDateTime>,
    /// Derived from the downtime window, rendered as `"<N> min"`.
    pub downtime_duration: Option<String>,

    pub spare_parts_used: Option<String>,
    pub ticket_description: Option<String>,
    pub photo_url: Option<String>,
    pub photo_description: Option<String>,
    pub document_url: Option<String>,
    pub allocated_to: Option<i64>,
    pub status: Option<TicketStatus>,

    pub srs_ond_sales: bool,
    pub sales_amount: Option<f64>,
    pub client_id: Option<i64>,
    #[serde(serialize_with = "serialize_optional_date")]
    pub invoice_date: Option<Date>,
    pub invoice_status: Option<InvoiceStatus>,

    pub site_id: Option<i64>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub creation_date: PrimitiveDateTime,
    #[serde(serialize_with = "serialize_optional_timestamp")]
    pub closure_date: Option<PrimitiveDateTime>,
}

/// A ticket joined with the display names of the rows it references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketListing {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub site_name: Option<String>,
    pub client_name: Option<String>,
    pub allocated_name: Option<String>,
}

impl Entity for TeamMember {
    type Listing = Self;
    const TABLE: &'static str = "team";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Listed for TeamMember {
    fn listing_id(&self) -> Option<i64> {
        self.id
    }

    fn search_text(&self) -> &str {
        &self.name
    }
}

impl Entity for Client {
    type Listing = Self;
    const TABLE: &'static str = "clients";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Listed for Client {
    fn listing_id(&self) -> Option<i64> {
        self.id
    }

    fn search_text(&self) -> &str {
        &self.company_name
    }
}

impl Entity for Site {
    type Listing = Self;
    const TABLE: &'static str = "sites";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Listed for Site {
    fn listing_id(&self) -> Option<i64> {
        self.id
    }

    fn search_text(&self) -> &str {
        &self.site_name
    }
}

impl Entity for Ticket {
    type Listing = TicketListing;
    const TABLE: &'static str = "tickets";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Listed for TicketListing {
    fn listing_id(&self) -> Option<i64> {
        self.ticket.id
    }

    fn search_text(&self) -> &str {
        &self.ticket.ticket_name
    }
}

#[allow(clippy::ref_option)]
fn serialize_optional_date<S: Serializer>(
    value: &Option<Date>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(date) => serializer.serialize_some(&format_date(*date)),
        None => serializer.serialize_none(),
    }
}

fn serialize_timestamp<S: Serializer>(
    value: &PrimitiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(*value))
}

#[allow(clippy::ref_option)]
fn serialize_optional_timestamp<S: Serializer>(
    value: &Option<PrimitiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(timestamp) => serializer.serialize_some(&format_timestamp(*timestamp)),
        None => serializer.serialize_none(),
    }
}
