// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Create and edit forms.
//!
//! A form holds string-shaped values keyed by field name, exactly as an
//! input would. Values are checked against the entity's required fields and
//! coerced into a typed record only on submit. A failed check never reaches
//! the store.

mod client;
mod site;
mod team;
mod ticket;

pub use client::ClientSchema;
pub use site::{SiteFileSlot, SiteForm, SiteSchema};
pub use team::TeamSchema;
pub use ticket::{TicketFormOptions, TicketSchema};

use std::collections::BTreeMap;
use std::str::FromStr;

use saferay_ops_domain::{
    DomainError, Entity, FieldErrors, RequiredField, SELECTION_DELIMITER, validate_required,
};
use saferay_ops_persistence::{EntityStore, PersistenceError};
use serde::Serialize;
use time::PrimitiveDateTime;
use tracing::{error, info};

use crate::error::ApiError;
use crate::notice::Notice;

/// Form values keyed by field name.
pub type FormValues = BTreeMap<String, String>;

/// A group of fields shown only when its gate is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Site PV attributes, gated by PV in the site type.
    Pv,
    /// Site BESS attributes, gated by BESS in the site type.
    Bess,
    /// Ticket component fields, gated by the Electrical category.
    Electrical,
    /// Ticket downtime window, gated by availability loss.
    Downtime,
    /// Ticket billing fields, gated by the sales flag.
    Sales,
}

/// How a form maps between values and a typed record.
pub trait FormSchema {
    type Record: Entity;

    /// Every field the form accepts.
    const FIELDS: &'static [&'static str];

    /// Fields that must be non-blank.
    const RULES: &'static [RequiredField];

    /// Fields shown on the form but written only by the form itself.
    const DERIVED: &'static [&'static str] = &[];

    /// Values for editing an existing record.
    fn seed(record: &Self::Record) -> FormValues;

    /// Coerces values into a record.
    ///
    /// `existing` is the record being edited, if any. `now` stands in for
    /// any timestamp the form leaves blank.
    ///
    /// # Errors
    ///
    /// Returns per-field messages for values that cannot be coerced.
    fn build(
        values: &FormValues,
        existing: Option<&Self::Record>,
        now: PrimitiveDateTime,
    ) -> Result<Self::Record, FieldErrors>;

    /// Conditional sections currently shown.
    fn visible_sections(_values: &FormValues) -> Vec<Section> {
        Vec::new()
    }

    /// Derives dependent values after `field` changed.
    fn after_change(_values: &mut FormValues, _field: &str) {}
}

/// Result of submitting a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum SubmitOutcome {
    /// The record was written; the list should re-fetch.
    Saved { id: i64 },
    /// Validation failed; nothing was sent to the store.
    Invalid,
    /// The store rejected the write; the form stays open.
    Failed,
}

/// A create or edit form for one entity.
pub struct EntityForm<S: FormSchema> {
    values: FormValues,
    field_errors: FieldErrors,
    saving: bool,
    existing: Option<S::Record>,
    notice: Option<Notice>,
}

impl<S: FormSchema> EntityForm<S> {
    /// Opens the form, seeded from `existing` when editing.
    ///
    /// Every known field starts blank.
    #[must_use]
    pub fn open(existing: Option<S::Record>) -> Self {
        let mut values: FormValues = S::FIELDS
            .iter()
            .map(|field| ((*field).to_string(), String::new()))
            .collect();
        if let Some(record) = &existing {
            values.extend(S::seed(record));
        }
        Self {
            values,
            field_errors: FieldErrors::new(),
            saving: false,
            existing,
            notice: None,
        }
    }

    /// Sets a field and clears its error.
    ///
    /// # Errors
    ///
    /// Returns an error if the form has no such field or the field is
    /// derived.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), ApiError> {
        if S::DERIVED.contains(&field) {
            return Err(ApiError::InvalidInput {
                field: field.to_string(),
                message: format!("Field '{field}' cannot be set directly"),
            });
        }
        self.assign(field, value)
    }

    /// Sets any known field, derived ones included.
    pub(crate) fn assign(&mut self, field: &str, value: &str) -> Result<(), ApiError> {
        let slot: &mut String = self
            .values
            .get_mut(field)
            .ok_or_else(|| unknown_field(field))?;
        *slot = value.to_string();
        self.field_errors.remove(field);
        S::after_change(&mut self.values, field);
        Ok(())
    }

    /// Checks or unchecks one choice of a multi-select field.
    ///
    /// # Errors
    ///
    /// Returns an error if the form has no such field.
    pub fn toggle_choice(&mut self, field: &str, item: &str, checked: bool) -> Result<(), ApiError> {
        let current: &str = self
            .values
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| unknown_field(field))?;
        let toggled: String = toggle_delimited(current, item, checked);
        self.set_field(field, &toggled)
    }

    /// Runs the required-field checks, recording every failure.
    ///
    /// Returns `true` when the form may be submitted.
    pub fn validate(&mut self) -> bool {
        let values: &FormValues = &self.values;
        match validate_required(S::RULES, |field| values.get(field).map(String::as_str)) {
            Ok(()) => true,
            Err(DomainError::FieldsInvalid(errors)) => {
                self.reject(errors);
                false
            }
            Err(other) => {
                let mut errors: FieldErrors = FieldErrors::new();
                errors.insert(
                    other.field().unwrap_or("value").to_string(),
                    other.to_string(),
                );
                self.reject(errors);
                false
            }
        }
    }

    /// Validates, builds the record, and writes it.
    ///
    /// Inserts when the form was opened without a record, otherwise updates
    /// the record's id. At most one store call is made.
    pub fn submit<T: EntityStore<S::Record>>(
        &mut self,
        store: &mut T,
        now: PrimitiveDateTime,
    ) -> SubmitOutcome {
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        let record: S::Record = match S::build(&self.values, self.existing.as_ref(), now) {
            Ok(record) => record,
            Err(errors) => {
                self.reject(errors);
                return SubmitOutcome::Invalid;
            }
        };

        self.saving = true;
        let table: &str = <S::Record as Entity>::TABLE;
        let result: Result<i64, PersistenceError> = match self.existing.as_ref().and_then(Entity::id) {
            Some(id) => store.update(id, &record).map(|()| id),
            None => store.insert(&record),
        };
        self.saving = false;

        match result {
            Ok(id) => {
                info!(table, id, "Saved record");
                self.notice = Some(Notice::success("Saved"));
                SubmitOutcome::Saved { id }
            }
            Err(e) => {
                error!(table, error = %e, "Failed to save record");
                self.notice = Some(Notice::server(format!("Could not save: {e}")));
                SubmitOutcome::Failed
            }
        }
    }

    fn reject(&mut self, errors: FieldErrors) {
        self.notice = Some(Notice::validation(errors.clone()));
        self.field_errors = errors;
    }

    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    #[must_use]
    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    #[must_use]
    pub const fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub const fn is_edit(&self) -> bool {
        self.existing.is_some()
    }

    #[must_use]
    pub const fn existing(&self) -> Option<&S::Record> {
        self.existing.as_ref()
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    #[must_use]
    pub fn visible_sections(&self) -> Vec<Section> {
        S::visible_sections(&self.values)
    }
}

pub type TeamForm = EntityForm<TeamSchema>;
pub type ClientForm = EntityForm<ClientSchema>;
pub type TicketForm = EntityForm<TicketSchema>;

fn unknown_field(field: &str) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Unknown field '{field}'"),
    }
}

/// Adds or removes `item` in a `", "`-joined list.
///
/// Checking appends the item when absent; unchecking removes it. Other
/// entries keep their order.
fn toggle_delimited(current: &str, item: &str, checked: bool) -> String {
    let item: &str = item.trim();
    let mut entries: Vec<&str> = delimited_entries(current).collect();
    if checked {
        if !item.is_empty() && !entries.contains(&item) {
            entries.push(item);
        }
    } else {
        entries.retain(|entry| *entry != item);
    }
    entries.join(SELECTION_DELIMITER)
}

/// Splits a `", "`-joined list into its trimmed, non-blank entries.
pub(crate) fn delimited_entries(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|e| !e.is_empty())
}

pub(crate) fn text<'a>(values: &'a FormValues, field: &str) -> &'a str {
    values.get(field).map_or("", String::as_str)
}

pub(crate) fn put(values: &mut FormValues, field: &str, value: impl Into<String>) {
    values.insert(field.to_string(), value.into());
}

pub(crate) fn put_optional<T: ToString>(values: &mut FormValues, field: &str, value: Option<T>) {
    put(values, field, value.map(|v| v.to_string()).unwrap_or_default());
}

/// Parses an optional choice field. Blank is `None`; unknown text is a
/// field error.
pub(crate) fn optional_choice<T>(
    values: &FormValues,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<T>
where
    T: FromStr<Err = DomainError>,
{
    let raw: &str = text(values, field).trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<T>() {
        Ok(choice) => Some(choice),
        Err(e) => {
            errors.insert(field.to_string(), e.to_string());
            None
        }
    }
}

/// Parses a required choice field, reporting `message` when it is blank.
pub(crate) fn required_choice<T>(
    values: &FormValues,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<T>
where
    T: FromStr<Err = DomainError>,
{
    let choice: Option<T> = optional_choice(values, field, errors);
    if choice.is_none() && !errors.contains_key(field) {
        errors.insert(field.to_string(), message.to_string());
    }
    choice
}
