// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only detail views for sites and tickets, with delete and the
//! ticket report export.

use saferay_ops_domain::{Site, Ticket, TicketListing, format_timestamp};
use saferay_ops_persistence::{BlobStore, EntityStore, PersistenceError};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::forms::{FormSchema, FormValues, SiteFileSlot, SiteSchema, TicketSchema};
use crate::media::{
    MediaUrls, TICKET_BUCKET, TICKET_DOC_PREFIX, TICKET_PHOTO_PREFIX, ticket_path,
};
use crate::notice::Notice;
use crate::report::{ReportField, TicketReport};

/// Shown for any attribute with no value.
pub const MISSING_VALUE: &str = "—";

const SITE_GENERAL_FIELDS: &[&str] = &[
    "site_name",
    "official_name",
    "type",
    "region",
    "address",
    "coordinates",
    "grid_connection_voltage",
    "cee",
    "operator",
];

const SITE_PV_FIELDS: &[&str] = &[
    "dc_capacity_kw",
    "ac_capacity_kw",
    "pcs",
    "pcs_quantity",
    "module",
    "module_quantity",
    "tilt",
    "electricity_selling_rate",
    "cod",
    "site_documentation_url",
];

const SITE_BESS_FIELDS: &[&str] = &[
    "rated_power",
    "nominal_energy_capacity",
    "operating_capacity",
    "battery",
    "battery_containers_qty",
    "battery_modules_per_rack",
    "c_rate",
    "electricity_selling_rate",
    "cod",
    "site_documentation_url",
];

const TICKET_FIELDS: &[&str] = &[
    "ticket_number",
    "ticket_name",
    "creation_date",
    "closure_date",
    "category",
    "component_type",
    "component_no",
    "error_message",
    "availability_loss",
    "downtime_start",
    "downtime_end",
    "downtime_duration",
    "spare_parts_used",
    "ticket_description",
    "photo_description",
    "status",
    "srs_ond_sales",
    "sales_amount",
    "invoice_date",
    "invoice_status",
];

/// One labelled attribute of a detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

/// What a detail delete did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteReport {
    /// The row is gone and the list should re-fetch.
    pub deleted: bool,
    pub notices: Vec<Notice>,
}

/// Turns `dc_capacity_kw` into `Dc Capacity Kw`.
#[must_use]
pub fn humanize(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn rows(values: &FormValues, keys: &[&str]) -> Vec<DetailRow> {
    keys.iter()
        .map(|key| DetailRow {
            label: humanize(key),
            value: display_value(values.get(*key).map(String::as_str)),
        })
        .collect()
}

fn display_value(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING_VALUE)
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteMedia {
    pub aerial: Option<String>,
    pub layout: Option<String>,
    pub documentation: Option<String>,
}

/// The site detail popup.
///
/// The PV and BESS groups each have their own toggle, offered whatever the
/// site's type.
pub struct SiteDetail {
    site: Site,
    show_pv: bool,
    show_bess: bool,
}

impl SiteDetail {
    #[must_use]
    pub const fn new(site: Site) -> Self {
        Self {
            site,
            show_pv: false,
            show_bess: false,
        }
    }

    pub const fn set_show_pv(&mut self, show: bool) {
        self.show_pv = show;
    }

    pub const fn set_show_bess(&mut self, show: bool) {
        self.show_bess = show;
    }

    pub const fn toggle_pv(&mut self) {
        self.show_pv = !self.show_pv;
    }

    pub const fn toggle_bess(&mut self) {
        self.show_bess = !self.show_bess;
    }

    #[must_use]
    pub const fn site(&self) -> &Site {
        &self.site
    }

    #[must_use]
    pub fn general(&self) -> Vec<DetailRow> {
        rows(&SiteSchema::seed(&self.site), SITE_GENERAL_FIELDS)
    }

    /// PV attributes, when the PV toggle is on.
    #[must_use]
    pub fn pv(&self) -> Option<Vec<DetailRow>> {
        self.show_pv
            .then(|| rows(&SiteSchema::seed(&self.site), SITE_PV_FIELDS))
    }

    /// BESS attributes, when the BESS toggle is on.
    #[must_use]
    pub fn bess(&self) -> Option<Vec<DetailRow>> {
        self.show_bess
            .then(|| rows(&SiteSchema::seed(&self.site), SITE_BESS_FIELDS))
    }

    #[must_use]
    pub fn media(&self, urls: &MediaUrls) -> SiteMedia {
        let url = |slot: SiteFileSlot, name: Option<&String>| {
            urls.optional_url(slot.bucket(), name.map(String::as_str))
        };
        SiteMedia {
            aerial: url(
                SiteFileSlot::Aerial,
                self.site.representative_aerial_url.as_ref(),
            ),
            layout: url(
                SiteFileSlot::Layout,
                self.site.representative_layout_url.as_ref(),
            ),
            documentation: url(
                SiteFileSlot::Documentation,
                self.site.site_documentation_url.as_ref(),
            ),
        }
    }

    /// Removes the site's files, then the site.
    ///
    /// File removal is best-effort: a failure adds a storage notice and the
    /// row delete still runs.
    pub fn delete<S: EntityStore<Site>>(&self, store: &mut S, blobs: &dyn BlobStore) -> DeleteReport {
        let mut notices: Vec<Notice> = Vec::new();

        let stored: [(SiteFileSlot, Option<&String>); 3] = [
            (
                SiteFileSlot::Aerial,
                self.site.representative_aerial_url.as_ref(),
            ),
            (
                SiteFileSlot::Layout,
                self.site.representative_layout_url.as_ref(),
            ),
            (
                SiteFileSlot::Documentation,
                self.site.site_documentation_url.as_ref(),
            ),
        ];
        for (slot, name) in stored {
            let Some(name) = name.filter(|n| !n.is_empty()) else {
                continue;
            };
            if let Err(e) = blobs.remove(slot.bucket(), std::slice::from_ref(name)) {
                warn!(bucket = slot.bucket(), error = %e, "Failed to remove site file");
                notices.push(Notice::storage(format!("Could not delete site files: {e}")));
            }
        }

        delete_row::<Site, S>(store, self.site.id, "Site", notices)
    }
}

/// The ticket detail popup.
pub struct TicketDetail {
    listing: TicketListing,
}

impl TicketDetail {
    #[must_use]
    pub const fn new(listing: TicketListing) -> Self {
        Self { listing }
    }

    #[must_use]
    pub const fn ticket(&self) -> &Ticket {
        &self.listing.ticket
    }

    /// The fixed attribute list followed by the site and client names.
    #[must_use]
    pub fn attributes(&self) -> Vec<DetailRow> {
        let ticket: &Ticket = &self.listing.ticket;
        let mut values: FormValues = TicketSchema::seed(ticket);
        values.insert(
            String::from("ticket_number"),
            ticket.ticket_number.clone(),
        );
        values.insert(
            String::from("availability_loss"),
            ticket.availability_loss.to_string(),
        );
        values.insert(
            String::from("srs_ond_sales"),
            ticket.srs_ond_sales.to_string(),
        );

        let mut attributes: Vec<DetailRow> = rows(&values, TICKET_FIELDS);
        attributes.push(DetailRow {
            label: humanize("site"),
            value: display_value(self.listing.site_name.as_deref()),
        });
        attributes.push(DetailRow {
            label: humanize("client"),
            value: display_value(self.listing.client_name.as_deref()),
        });
        attributes
    }

    #[must_use]
    pub fn photo_url(&self, urls: &MediaUrls) -> Option<String> {
        self.photo_path()
            .map(|path| urls.url(TICKET_BUCKET, &path))
    }

    #[must_use]
    pub fn document_url(&self, urls: &MediaUrls) -> Option<String> {
        self.document_path()
            .map(|path| urls.url(TICKET_BUCKET, &path))
    }

    fn photo_path(&self) -> Option<String> {
        self.listing
            .ticket
            .photo_url
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| ticket_path(TICKET_PHOTO_PREFIX, p))
    }

    fn document_path(&self) -> Option<String> {
        self.listing
            .ticket
            .document_url
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| ticket_path(TICKET_DOC_PREFIX, d))
    }

    /// Removes the ticket's photo and document, then the ticket.
    pub fn delete<S: EntityStore<Ticket>>(
        &self,
        store: &mut S,
        blobs: &dyn BlobStore,
    ) -> DeleteReport {
        let mut notices: Vec<Notice> = Vec::new();

        let files: Vec<String> = self
            .photo_path()
            .into_iter()
            .chain(self.document_path())
            .collect();
        if !files.is_empty() {
            if let Err(e) = blobs.remove(TICKET_BUCKET, &files) {
                warn!(bucket = TICKET_BUCKET, error = %e, "Failed to remove ticket files");
                notices.push(Notice::storage(format!("Could not delete ticket files: {e}")));
            }
        }

        delete_row::<Ticket, S>(store, self.listing.ticket.id, "Ticket", notices)
    }

    /// Builds the ticket report.
    ///
    /// When the ticket has a photo its bytes are fetched and placed on a
    /// page of their own. A photo that cannot be fetched is left out.
    #[must_use]
    pub fn report(&self, blobs: &dyn BlobStore) -> TicketReport {
        let ticket: &Ticket = &self.listing.ticket;
        let text = |value: Option<String>| value.filter(|v| !v.is_empty());

        let fields: Vec<ReportField> = vec![
            ReportField::new("Ticket Number", Some(ticket.ticket_number.clone())),
            ReportField::new("Ticket Name", Some(ticket.ticket_name.clone())),
            ReportField::new(
                "Creation Date",
                Some(format_timestamp(ticket.creation_date)),
            ),
            ReportField::new("Closure Date", ticket.closure_date.map(format_timestamp)),
            ReportField::new("Category", Some(ticket.category.to_string())),
            ReportField::new("Component Type", ticket.component_type.clone()),
            ReportField::new("Component No", ticket.component_no.clone()),
            ReportField::new("Error Message", ticket.error_message.clone()),
            ReportField::new(
                "Availability Loss",
                Some(ticket.availability_loss.to_string()),
            ),
            ReportField::new("Downtime Duration", ticket.downtime_duration.clone()),
            ReportField::new("Spare Parts Used", ticket.spare_parts_used.clone()),
            ReportField::new("Description", ticket.ticket_description.clone()),
            ReportField::new("Status", ticket.status.map(|s| s.to_string())),
            ReportField::new("Sales Amount", ticket.sales_amount.map(|a| a.to_string())),
            ReportField::new(
                "Invoice Status",
                ticket.invoice_status.map(|s| s.to_string()),
            ),
            ReportField::new("Site", text(self.listing.site_name.clone())),
            ReportField::new("Client", text(self.listing.client_name.clone())),
        ];

        let photo: Option<Vec<u8>> = self.photo_path().and_then(|path| {
            blobs
                .download(TICKET_BUCKET, &path)
                .map_err(|e| {
                    warn!(path = %path, error = %e, "Photo unavailable for ticket report");
                })
                .ok()
        });

        TicketReport::new(&ticket.ticket_name, fields, photo)
    }
}

fn delete_row<E, S>(
    store: &mut S,
    id: Option<i64>,
    kind: &str,
    mut notices: Vec<Notice>,
) -> DeleteReport
where
    E: saferay_ops_domain::Entity,
    S: EntityStore<E>,
{
    let Some(id) = id else {
        notices.push(Notice::server(format!("{kind} has no id")));
        return DeleteReport {
            deleted: false,
            notices,
        };
    };

    let result: Result<(), PersistenceError> = store.delete(id);
    match result {
        Ok(()) => {
            info!(id, "{kind} deleted");
            notices.push(Notice::success(format!("{kind} deleted successfully.")));
            DeleteReport {
                deleted: true,
                notices,
            }
        }
        Err(e) => {
            error!(id, error = %e, "Failed to delete {kind}");
            notices.push(Notice::server(format!("Error deleting {}.", kind.to_lowercase())));
            DeleteReport {
                deleted: false,
                notices,
            }
        }
    }
}
