// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use saferay_ops_domain::{
    FieldErrors, InvoiceStatus, RequiredField, Selection, TICKET_REQUIRED, Ticket, TicketCategory,
    TicketStatus, downtime_duration, downtime_text, flag, flag_text, format_date,
    format_input_timestamp, generate_ticket_number, optional_date, optional_f64, optional_i64,
    optional_text, optional_timestamp,
};
use saferay_ops_persistence::{PersistenceError, SelectOption, TicketOptionSource};
use serde::Serialize;
use time::PrimitiveDateTime;

use super::{
    FormSchema, FormValues, Section, delimited_entries, optional_choice, put, put_optional, text,
};

/// Ticket form layout.
///
/// The ticket number is not a form field: it is generated when the ticket
/// is created and carried over unchanged on every edit.
pub struct TicketSchema;

impl FormSchema for TicketSchema {
    type Record = Ticket;

    const FIELDS: &'static [&'static str] = &[
        "ticket_name",
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
        "photo_url",
        "photo_description",
        "document_url",
        "allocated_to",
        "status",
        "srs_ond_sales",
        "sales_amount",
        "client_id",
        "invoice_date",
        "invoice_status",
        "site_id",
        "creation_date",
        "closure_date",
    ];

    const RULES: &'static [RequiredField] = TICKET_REQUIRED;

    const DERIVED: &'static [&'static str] = &["downtime_duration"];

    fn seed(ticket: &Ticket) -> FormValues {
        let mut values: FormValues = FormValues::new();
        put(&mut values, "ticket_name", ticket.ticket_name.as_str());
        put(&mut values, "category", ticket.category.to_string());
        put_optional(&mut values, "component_type", ticket.component_type.as_ref());
        put_optional(&mut values, "component_no", ticket.component_no.as_ref());
        put_optional(&mut values, "error_message", ticket.error_message.as_ref());
        put(
            &mut values,
            "availability_loss",
            flag_text(ticket.availability_loss),
        );
        put_optional(
            &mut values,
            "downtime_start",
            ticket.downtime_start.map(format_input_timestamp),
        );
        put_optional(
            &mut values,
            "downtime_end",
            ticket.downtime_end.map(format_input_timestamp),
        );
        put_optional(
            &mut values,
            "downtime_duration",
            ticket.downtime_duration.as_ref(),
        );
        put_optional(
            &mut values,
            "spare_parts_used",
            ticket.spare_parts_used.as_ref(),
        );
        put_optional(
            &mut values,
            "ticket_description",
            ticket.ticket_description.as_ref(),
        );
        put_optional(&mut values, "photo_url", ticket.photo_url.as_ref());
        put_optional(
            &mut values,
            "photo_description",
            ticket.photo_description.as_ref(),
        );
        put_optional(&mut values, "document_url", ticket.document_url.as_ref());
        put_optional(&mut values, "allocated_to", ticket.allocated_to);
        put_optional(&mut values, "status", ticket.status);
        put(&mut values, "srs_ond_sales", flag_text(ticket.srs_ond_sales));
        put_optional(&mut values, "sales_amount", ticket.sales_amount);
        put_optional(&mut values, "client_id", ticket.client_id);
        put_optional(&mut values, "invoice_date", ticket.invoice_date.map(format_date));
        put_optional(&mut values, "invoice_status", ticket.invoice_status);
        put_optional(&mut values, "site_id", ticket.site_id);
        put(
            &mut values,
            "creation_date",
            format_input_timestamp(ticket.creation_date),
        );
        put_optional(
            &mut values,
            "closure_date",
            ticket.closure_date.map(format_input_timestamp),
        );
        values
    }

    fn build(
        values: &FormValues,
        existing: Option<&Ticket>,
        now: PrimitiveDateTime,
    ) -> Result<Ticket, FieldErrors> {
        let mut errors: FieldErrors = FieldErrors::new();

        let category: Selection<TicketCategory> = Selection::parse(text(values, "category"))
            .unwrap_or_else(|e| {
                errors.insert(String::from("category"), e.to_string());
                Selection::new()
            });
        if category.is_empty() && !errors.contains_key("category") {
            errors.insert(
                String::from("category"),
                String::from("At least one category is required"),
            );
        }

        let site_id: Option<i64> = optional_i64(text(values, "site_id"));
        if site_id.is_none() {
            errors.insert(String::from("site_id"), String::from("Site is required"));
        }

        let status: Option<TicketStatus> = optional_choice(values, "status", &mut errors);
        let invoice_status: Option<InvoiceStatus> =
            optional_choice(values, "invoice_status", &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        let ticket_number: String = existing.map_or_else(
            || generate_ticket_number(now),
            |ticket| ticket.ticket_number.clone(),
        );
        let creation_date: PrimitiveDateTime = optional_timestamp(text(values, "creation_date"))
            .or_else(|| existing.map(|ticket| ticket.creation_date))
            .unwrap_or(now);

        let field = |name: &str| optional_text(text(values, name));
        let downtime_start: Option<PrimitiveDateTime> =
            optional_timestamp(text(values, "downtime_start"));
        let downtime_end: Option<PrimitiveDateTime> =
            optional_timestamp(text(values, "downtime_end"));

        Ok(Ticket {
            id: existing.and_then(|ticket| ticket.id),
            ticket_number,
            ticket_name: text(values, "ticket_name").trim().to_string(),
            category,
            component_type: field("component_type"),
            component_no: field("component_no"),
            error_message: field("error_message"),
            availability_loss: flag(text(values, "availability_loss")),
            downtime_start,
            downtime_end,
            downtime_duration: downtime_start
                .zip(downtime_end)
                .map(|(start, end)| downtime_text(start, end)),
            spare_parts_used: field("spare_parts_used"),
            ticket_description: field("ticket_description"),
            photo_url: field("photo_url"),
            photo_description: field("photo_description"),
            document_url: field("document_url"),
            allocated_to: optional_i64(text(values, "allocated_to")),
            status,
            srs_ond_sales: flag(text(values, "srs_ond_sales")),
            sales_amount: optional_f64(text(values, "sales_amount")),
            client_id: optional_i64(text(values, "client_id")),
            invoice_date: optional_date(text(values, "invoice_date")),
            invoice_status,
            site_id,
            creation_date,
            closure_date: optional_timestamp(text(values, "closure_date")),
        })
    }

    fn visible_sections(values: &FormValues) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        if delimited_entries(text(values, "category"))
            .any(|entry| entry == TicketCategory::Electrical.as_str())
        {
            sections.push(Section::Electrical);
        }
        if flag(text(values, "availability_loss")) {
            sections.push(Section::Downtime);
        }
        if flag(text(values, "srs_ond_sales")) {
            sections.push(Section::Sales);
        }
        sections
    }

    /// Recomputes the downtime duration whenever either end changes.
    ///
    /// A blank or unparseable side leaves the duration blank.
    fn after_change(values: &mut FormValues, field: &str) {
        if field != "downtime_end" && field != "downtime_start" {
            return;
        }
        let duration: String =
            downtime_duration(text(values, "downtime_start"), text(values, "downtime_end"))
                .unwrap_or_default();
        put(values, "downtime_duration", duration);
    }
}

/// Choices for the ticket form's team, site, and client selects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketFormOptions {
    pub team: Vec<SelectOption>,
    pub sites: Vec<SelectOption>,
    pub clients: Vec<SelectOption>,
}

impl TicketFormOptions {
    /// # Errors
    ///
    /// Returns an error if any of the three fetches fails.
    pub fn load<S: TicketOptionSource>(source: &mut S) -> Result<Self, PersistenceError> {
        Ok(Self {
            team: source.team_options()?,
            sites: source.site_options()?,
            clients: source.client_options()?,
        })
    }
}
