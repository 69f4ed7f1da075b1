// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use saferay_ops_domain::{
    FieldErrors, GridVoltage, Region, RequiredField, SITE_REQUIRED, Selection, Site, SiteKind,
    SiteOperator, format_date, optional_date, optional_f64, optional_i32, optional_text,
};
use saferay_ops_persistence::{BlobStore, EntityStore};
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use tracing::{info, warn};

use super::{
    EntityForm, FormSchema, FormValues, Section, SubmitOutcome, delimited_entries,
    optional_choice, put, put_optional, required_choice, text,
};
use crate::error::ApiError;
use crate::media::{SITE_AERIAL_BUCKET, SITE_DOCS_BUCKET, SITE_LAYOUT_BUCKET, upload_file_name};
use crate::notice::Notice;

/// Site form layout.
pub struct SiteSchema;

impl FormSchema for SiteSchema {
    type Record = Site;

    const FIELDS: &'static [&'static str] = &[
        "site_name",
        "official_name",
        "type",
        "region",
        "address",
        "coordinates",
        "grid_connection_voltage",
        "cee",
        "operator",
        "dc_capacity_kw",
        "ac_capacity_kw",
        "pcs",
        "pcs_quantity",
        "module",
        "module_quantity",
        "tilt",
        "rated_power",
        "nominal_energy_capacity",
        "operating_capacity",
        "battery",
        "battery_containers_qty",
        "battery_modules_per_rack",
        "c_rate",
        "electricity_selling_rate",
        "cod",
        "representative_aerial_url",
        "representative_layout_url",
        "site_documentation_url",
    ];

    const RULES: &'static [RequiredField] = SITE_REQUIRED;

    const DERIVED: &'static [&'static str] = &[
        "representative_aerial_url",
        "representative_layout_url",
        "site_documentation_url",
    ];

    fn seed(site: &Site) -> FormValues {
        let mut values: FormValues = FormValues::new();
        put(&mut values, "site_name", site.site_name.as_str());
        put_optional(&mut values, "official_name", site.official_name.as_ref());
        put(&mut values, "type", site.site_type.to_string());
        put_optional(&mut values, "region", site.region);
        put_optional(&mut values, "address", site.address.as_ref());
        put_optional(&mut values, "coordinates", site.coordinates.as_ref());
        put(
            &mut values,
            "grid_connection_voltage",
            site.grid_connection_voltage.as_str(),
        );
        put_optional(&mut values, "cee", site.cee.as_ref());
        put(&mut values, "operator", site.operator.as_str());

        put_optional(&mut values, "dc_capacity_kw", site.dc_capacity_kw);
        put_optional(&mut values, "ac_capacity_kw", site.ac_capacity_kw);
        put_optional(&mut values, "pcs", site.pcs.as_ref());
        put_optional(&mut values, "pcs_quantity", site.pcs_quantity);
        put_optional(&mut values, "module", site.module.as_ref());
        put_optional(&mut values, "module_quantity", site.module_quantity);
        put_optional(&mut values, "tilt", site.tilt.as_ref());

        put_optional(&mut values, "rated_power", site.rated_power.as_ref());
        put_optional(
            &mut values,
            "nominal_energy_capacity",
            site.nominal_energy_capacity.as_ref(),
        );
        put_optional(
            &mut values,
            "operating_capacity",
            site.operating_capacity.as_ref(),
        );
        put_optional(&mut values, "battery", site.battery.as_ref());
        put_optional(
            &mut values,
            "battery_containers_qty",
            site.battery_containers_qty,
        );
        put_optional(
            &mut values,
            "battery_modules_per_rack",
            site.battery_modules_per_rack,
        );
        put_optional(&mut values, "c_rate", site.c_rate.as_ref());

        put_optional(
            &mut values,
            "electricity_selling_rate",
            site.electricity_selling_rate.as_ref(),
        );
        put_optional(&mut values, "cod", site.cod.map(format_date));
        put_optional(
            &mut values,
            "representative_aerial_url",
            site.representative_aerial_url.as_ref(),
        );
        put_optional(
            &mut values,
            "representative_layout_url",
            site.representative_layout_url.as_ref(),
        );
        put_optional(
            &mut values,
            "site_documentation_url",
            site.site_documentation_url.as_ref(),
        );
        values
    }

    fn build(
        values: &FormValues,
        existing: Option<&Site>,
        _now: PrimitiveDateTime,
    ) -> Result<Site, FieldErrors> {
        let mut errors: FieldErrors = FieldErrors::new();

        let site_type: Selection<SiteKind> =
            Selection::parse(text(values, "type")).unwrap_or_else(|e| {
                errors.insert(String::from("type"), e.to_string());
                Selection::new()
            });
        let region: Option<Region> = optional_choice(values, "region", &mut errors);
        let grid_connection_voltage: Option<GridVoltage> = required_choice(
            values,
            "grid_connection_voltage",
            "Grid connection voltage is required",
            &mut errors,
        );
        let operator: Option<SiteOperator> =
            required_choice(values, "operator", "Operator is required", &mut errors);

        let (Some(grid_connection_voltage), Some(operator)) = (grid_connection_voltage, operator)
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let field = |name: &str| optional_text(text(values, name));

        Ok(Site {
            id: existing.and_then(|site| site.id),
            site_name: text(values, "site_name").trim().to_string(),
            official_name: field("official_name"),
            site_type,
            region,
            address: field("address"),
            coordinates: field("coordinates"),
            grid_connection_voltage,
            cee: field("cee"),
            operator,
            dc_capacity_kw: optional_f64(text(values, "dc_capacity_kw")),
            ac_capacity_kw: optional_f64(text(values, "ac_capacity_kw")),
            pcs: field("pcs"),
            pcs_quantity: optional_i32(text(values, "pcs_quantity")),
            module: field("module"),
            module_quantity: optional_i32(text(values, "module_quantity")),
            tilt: field("tilt"),
            rated_power: field("rated_power"),
            nominal_energy_capacity: field("nominal_energy_capacity"),
            operating_capacity: field("operating_capacity"),
            battery: field("battery"),
            battery_containers_qty: optional_i32(text(values, "battery_containers_qty")),
            battery_modules_per_rack: optional_i32(text(values, "battery_modules_per_rack")),
            c_rate: field("c_rate"),
            electricity_selling_rate: field("electricity_selling_rate"),
            cod: optional_date(text(values, "cod")),
            representative_aerial_url: field("representative_aerial_url"),
            representative_layout_url: field("representative_layout_url"),
            site_documentation_url: field("site_documentation_url"),
            created_at: existing.and_then(|site| site.created_at),
        })
    }

    fn visible_sections(values: &FormValues) -> Vec<Section> {
        let kinds: Vec<&str> = delimited_entries(text(values, "type")).collect();
        let mut sections: Vec<Section> = Vec::new();
        if kinds.contains(&SiteKind::Pv.as_str()) {
            sections.push(Section::Pv);
        }
        if kinds.contains(&SiteKind::Bess.as_str()) {
            sections.push(Section::Bess);
        }
        sections
    }
}

/// A file input on the site form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteFileSlot {
    Aerial,
    Layout,
    Documentation,
}

impl SiteFileSlot {
    pub const ALL: [Self; 3] = [Self::Aerial, Self::Layout, Self::Documentation];

    /// The form field holding the stored file name.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Aerial => "representative_aerial_url",
            Self::Layout => "representative_layout_url",
            Self::Documentation => "site_documentation_url",
        }
    }

    /// The file name `site` has stored in this slot.
    #[must_use]
    pub fn stored_name(self, site: &Site) -> Option<&str> {
        let name: Option<&String> = match self {
            Self::Aerial => site.representative_aerial_url.as_ref(),
            Self::Layout => site.representative_layout_url.as_ref(),
            Self::Documentation => site.site_documentation_url.as_ref(),
        };
        name.map(String::as_str)
    }

    #[must_use]
    pub const fn bucket(self) -> &'static str {
        match self {
            Self::Aerial => SITE_AERIAL_BUCKET,
            Self::Layout => SITE_LAYOUT_BUCKET,
            Self::Documentation => SITE_DOCS_BUCKET,
        }
    }
}

struct PendingFile {
    original_name: String,
    bytes: Vec<u8>,
}

/// The site form, with file inputs uploaded on submit.
pub struct SiteForm {
    form: EntityForm<SiteSchema>,
    pending: BTreeMap<SiteFileSlot, PendingFile>,
}

impl SiteForm {
    #[must_use]
    pub fn open(existing: Option<Site>) -> Self {
        Self {
            form: EntityForm::open(existing),
            pending: BTreeMap::new(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the form has no such field.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), ApiError> {
        self.form.set_field(field, value)
    }

    /// Checks or unchecks a site type.
    ///
    /// Values of the section being hidden are kept and still submitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the form has no type field.
    pub fn toggle_type(&mut self, kind: SiteKind, checked: bool) -> Result<(), ApiError> {
        self.form.toggle_choice("type", kind.as_str(), checked)
    }

    /// Chooses a file for a slot, replacing any earlier choice.
    pub fn attach(&mut self, slot: SiteFileSlot, original_name: &str, bytes: Vec<u8>) {
        self.pending.insert(
            slot,
            PendingFile {
                original_name: original_name.to_string(),
                bytes,
            },
        );
    }

    /// Uploads chosen files and saves the site.
    ///
    /// Nothing is uploaded if required fields are blank. A failed upload
    /// leaves its slot at the previous value and produces a storage notice;
    /// the save still goes ahead. Files the edited site held in a slot that
    /// a successful save replaced are removed best-effort.
    pub fn submit<T: EntityStore<Site>>(
        &mut self,
        store: &mut T,
        blobs: &dyn BlobStore,
        now: PrimitiveDateTime,
    ) -> SubmitOutcome {
        if !self.form.validate() {
            return SubmitOutcome::Invalid;
        }

        let millis: i128 = now.assume_utc().unix_timestamp_nanos() / 1_000_000;
        // (slot, new name, name stored on the edited site)
        let mut uploaded: Vec<(SiteFileSlot, String, String)> = Vec::new();
        let mut upload_failure: Option<Notice> = None;

        for (slot, file) in std::mem::take(&mut self.pending) {
            let name: String =
                upload_file_name(&file.original_name, millis, rand::random::<u64>());
            match blobs.upload(slot.bucket(), &name, &file.bytes) {
                Ok(stored) => {
                    info!(bucket = slot.bucket(), file = %stored, "Uploaded site file");
                    let previous: String = self
                        .form
                        .existing()
                        .and_then(|site| slot.stored_name(site))
                        .unwrap_or_default()
                        .to_string();
                    if self.form.assign(slot.field(), &stored).is_ok() {
                        uploaded.push((slot, stored, previous));
                    }
                }
                Err(e) => {
                    warn!(bucket = slot.bucket(), error = %e, "Site file upload failed");
                    upload_failure = Some(Notice::storage(format!(
                        "Could not upload {}: {e}",
                        file.original_name
                    )));
                }
            }
        }

        let outcome: SubmitOutcome = self.form.submit(store, now);
        let saved: bool = matches!(outcome, SubmitOutcome::Saved { .. });

        for (slot, stored, previous) in uploaded {
            let stale: String = if saved {
                previous
            } else {
                // The row still points at the previous file.
                let _ = self.form.assign(slot.field(), &previous);
                stored
            };
            if stale.trim().is_empty() {
                continue;
            }
            if let Err(e) = blobs.remove(slot.bucket(), &[stale]) {
                warn!(bucket = slot.bucket(), error = %e, "Failed to remove site file");
            }
        }

        if let Some(notice) = upload_failure {
            self.form.set_notice(notice);
        }
        outcome
    }

    #[must_use]
    pub const fn form(&self) -> &EntityForm<SiteSchema> {
        &self.form
    }

    #[must_use]
    pub fn visible_sections(&self) -> Vec<Section> {
        self.form.visible_sections()
    }
}
