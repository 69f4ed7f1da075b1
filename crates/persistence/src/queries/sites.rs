// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use saferay_ops_domain::{
    GridVoltage, Region, Selection, Site, SiteKind, SiteOperator,
};
use tracing::debug;

use crate::data_models::SelectOption;
use crate::diesel_schema::sites;
use crate::error::PersistenceError;
use crate::queries::{
    choice_column, optional_choice_column, optional_date_column, timestamp_column,
};

const TABLE: &str = "sites";

#[derive(Queryable, Selectable)]
#[diesel(table_name = sites)]
pub(crate) struct SiteRow {
    id: i64,
    site_name: String,
    official_name: Option<String>,
    site_type: String,
    region: Option<String>,
    address: Option<String>,
    coordinates: Option<String>,
    grid_connection_voltage: String,
    cee: Option<String>,
    operator: String,
    dc_capacity_kw: Option<f64>,
    ac_capacity_kw: Option<f64>,
    pcs: Option<String>,
    pcs_quantity: Option<i32>,
    module: Option<String>,
    module_quantity: Option<i32>,
    tilt: Option<String>,
    rated_power: Option<String>,
    nominal_energy_capacity: Option<String>,
    operating_capacity: Option<String>,
    battery: Option<String>,
    battery_containers_qty: Option<i32>,
    battery_modules_per_rack: Option<i32>,
    c_rate: Option<String>,
    electricity_selling_rate: Option<String>,
    cod: Option<String>,
    representative_aerial_url: Option<String>,
    representative_layout_url: Option<String>,
    site_documentation_url: Option<String>,
    created_at: String,
}

impl TryFrom<SiteRow> for Site {
    type Error = PersistenceError;

    fn try_from(row: SiteRow) -> Result<Self, Self::Error> {
        let site_type: Selection<SiteKind> =
            Selection::parse(&row.site_type).map_err(|e| PersistenceError::corrupt(TABLE, &e))?;

        Ok(Self {
            id: Some(row.id),
            site_name: row.site_name,
            official_name: row.official_name,
            site_type,
            region: optional_choice_column::<Region>(TABLE, row.region)?,
            address: row.address,
            coordinates: row.coordinates,
            grid_connection_voltage: choice_column::<GridVoltage>(
                TABLE,
                &row.grid_connection_voltage,
            )?,
            cee: row.cee,
            operator: choice_column::<SiteOperator>(TABLE, &row.operator)?,
            dc_capacity_kw: row.dc_capacity_kw,
            ac_capacity_kw: row.ac_capacity_kw,
            pcs: row.pcs,
            pcs_quantity: row.pcs_quantity,
            module: row.module,
            module_quantity: row.module_quantity,
            tilt: row.tilt,
            rated_power: row.rated_power,
            nominal_energy_capacity: row.nominal_energy_capacity,
            operating_capacity: row.operating_capacity,
            battery: row.battery,
            battery_containers_qty: row.battery_containers_qty,
            battery_modules_per_rack: row.battery_modules_per_rack,
            c_rate: row.c_rate,
            electricity_selling_rate: row.electricity_selling_rate,
            cod: optional_date_column(TABLE, row.cod)?,
            representative_aerial_url: row.representative_aerial_url,
            representative_layout_url: row.representative_layout_url,
            site_documentation_url: row.site_documentation_url,
            created_at: Some(timestamp_column(TABLE, &row.created_at)?),
        })
    }
}

/// Lists every site, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be read back.
pub fn list_sites(conn: &mut SqliteConnection) -> Result<Vec<Site>, PersistenceError> {
    debug!("Listing sites");

    sites::table
        .order((sites::created_at.desc(), sites::id.desc()))
        .select(SiteRow::as_select())
        .load::<SiteRow>(conn)?
        .into_iter()
        .map(Site::try_from)
        .collect()
}

/// Retrieves a site by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be read back.
/// Returns `Ok(None)` if no such site exists.
pub fn get_site(conn: &mut SqliteConnection, id: i64) -> Result<Option<Site>, PersistenceError> {
    debug!(id, "Looking up site");

    sites::table
        .filter(sites::id.eq(id))
        .select(SiteRow::as_select())
        .first::<SiteRow>(conn)
        .optional()?
        .map(Site::try_from)
        .transpose()
}

/// Lists `(id, site name)` pairs for every site, in id order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_site_names(conn: &mut SqliteConnection) -> Result<Vec<(i64, String)>, PersistenceError> {
    Ok(sites::table
        .order(sites::id.asc())
        .select((sites::id, sites::site_name))
        .load(conn)?)
}

/// Lists `(id, site name)` pairs for the ticket form's site select.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_site_options(
    conn: &mut SqliteConnection,
) -> Result<Vec<SelectOption>, PersistenceError> {
    let rows: Vec<(i64, String)> = sites::table
        .order((sites::site_name.asc(), sites::id.asc()))
        .select((sites::id, sites::site_name))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, label)| SelectOption { id, label })
        .collect())
}
