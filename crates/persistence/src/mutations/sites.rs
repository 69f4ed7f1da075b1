// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use saferay_ops_domain::{Region, Site};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::sites;
use crate::error::PersistenceError;
use crate::mutations::{date_text, expect_row};

/// Every site column except `id` and `created_at`, which the database owns.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = sites)]
#[diesel(treat_none_as_null = true)]
struct SiteChangeset<'a> {
    site_name: &'a str,
    official_name: Option<&'a str>,
    site_type: String,
    region: Option<&'static str>,
    address: Option<&'a str>,
    coordinates: Option<&'a str>,
    grid_connection_voltage: &'static str,
    cee: Option<&'a str>,
    operator: &'static str,
    dc_capacity_kw: Option<f64>,
    ac_capacity_kw: Option<f64>,
    pcs: Option<&'a str>,
    pcs_quantity: Option<i32>,
    module: Option<&'a str>,
    module_quantity: Option<i32>,
    tilt: Option<&'a str>,
    rated_power: Option<&'a str>,
    nominal_energy_capacity: Option<&'a str>,
    operating_capacity: Option<&'a str>,
    battery: Option<&'a str>,
    battery_containers_qty: Option<i32>,
    battery_modules_per_rack: Option<i32>,
    c_rate: Option<&'a str>,
    electricity_selling_rate: Option<&'a str>,
    cod: Option<String>,
    representative_aerial_url: Option<&'a str>,
    representative_layout_url: Option<&'a str>,
    site_documentation_url: Option<&'a str>,
}

impl<'a> From<&'a Site> for SiteChangeset<'a> {
    fn from(site: &'a Site) -> Self {
        Self {
            site_name: &site.site_name,
            official_name: site.official_name.as_deref(),
            site_type: site.site_type.to_string(),
            region: site.region.map(Region::as_str),
            address: site.address.as_deref(),
            coordinates: site.coordinates.as_deref(),
            grid_connection_voltage: site.grid_connection_voltage.as_str(),
            cee: site.cee.as_deref(),
            operator: site.operator.as_str(),
            dc_capacity_kw: site.dc_capacity_kw,
            ac_capacity_kw: site.ac_capacity_kw,
            pcs: site.pcs.as_deref(),
            pcs_quantity: site.pcs_quantity,
            module: site.module.as_deref(),
            module_quantity: site.module_quantity,
            tilt: site.tilt.as_deref(),
            rated_power: site.rated_power.as_deref(),
            nominal_energy_capacity: site.nominal_energy_capacity.as_deref(),
            operating_capacity: site.operating_capacity.as_deref(),
            battery: site.battery.as_deref(),
            battery_containers_qty: site.battery_containers_qty,
            battery_modules_per_rack: site.battery_modules_per_rack,
            c_rate: site.c_rate.as_deref(),
            electricity_selling_rate: site.electricity_selling_rate.as_deref(),
            cod: date_text(site.cod),
            representative_aerial_url: site.representative_aerial_url.as_deref(),
            representative_layout_url: site.representative_layout_url.as_deref(),
            site_documentation_url: site.site_documentation_url.as_deref(),
        }
    }
}

/// Inserts a site and returns its id. `created_at` is stamped by the database.
///
/// # Errors
///
/// Returns an error if the insert fails, including CHECK violations on
/// voltage or operator.
pub fn insert_site(conn: &mut SqliteConnection, site: &Site) -> Result<i64, PersistenceError> {
    diesel::insert_into(sites::table)
        .values(&SiteChangeset::from(site))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    info!(id, site_name = %site.site_name, site_type = %site.site_type, "Inserted site");
    Ok(id)
}

/// Overwrites every column of an existing site except `created_at`.
///
/// # Errors
///
/// Returns an error if the update fails or no site has this id.
pub fn update_site(conn: &mut SqliteConnection, id: i64, site: &Site) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(sites::table.filter(sites::id.eq(id)))
        .set(&SiteChangeset::from(site))
        .execute(conn)?;
    expect_row(rows_affected, "sites", id)?;

    info!(id, "Updated site");
    Ok(())
}

/// Deletes a site row. Stored files are removed by the caller.
///
/// # Errors
///
/// Returns an error if the delete fails or no site has this id.
pub fn delete_site(conn: &mut SqliteConnection, id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(sites::table.filter(sites::id.eq(id))).execute(conn)?;
    expect_row(rows_affected, "sites", id)?;

    info!(id, "Deleted site");
    Ok(())
}
