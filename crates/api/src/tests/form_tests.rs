// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use saferay_ops_domain::{
    Client, ContractType, Selection, Site, SiteKind, TeamMember, Ticket, TicketCategory,
};
use saferay_ops_persistence::{BlobStore, InMemoryBlobStore, SelectOption};
use time::macros::datetime;

use crate::error::ApiError;
use crate::forms::{
    ClientForm, Section, SiteFileSlot, SiteForm, SubmitOutcome, TeamForm, TicketForm,
    TicketFormOptions,
};
use crate::media::SITE_AERIAL_BUCKET;
use crate::notice::NoticeKind;
use crate::tests::helpers::{
    RecordingStore, StoreCall, UnavailableBlobStore, create_test_client, create_test_site,
    create_test_team_member, create_test_ticket, test_now,
};

fn is_ticket_number(text: &str) -> bool {
    let bytes: &[u8] = text.as_bytes();
    bytes.len() == 15
        && text.starts_with("T-")
        && bytes[2..10].iter().all(u8::is_ascii_digit)
        && bytes[10] == b'-'
        && bytes[11..].iter().all(u8::is_ascii_digit)
}

mod team_form_tests {
    use super::*;

    #[test]
    fn test_blank_required_fields_block_submit() {
        let mut store: RecordingStore<TeamMember> = RecordingStore::new();
        let mut form: TeamForm = TeamForm::open(None);
        form.set_field("position", "Engineer").unwrap();

        let outcome: SubmitOutcome = form.submit(&mut store, test_now());

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(store.calls.is_empty());
        assert_eq!(
            form.field_errors().get("name").map(String::as_str),
            Some("Name is required")
        );
        assert_eq!(
            form.field_errors().get("email").map(String::as_str),
            Some("Email is required")
        );
        assert_eq!(form.notice().unwrap().kind, NoticeKind::Validation);
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let mut store: RecordingStore<TeamMember> = RecordingStore::new();
        let mut form: TeamForm = TeamForm::open(None);
        form.set_field("name", "   ").unwrap();
        form.set_field("email", "kaito@saferay.test").unwrap();

        assert_eq!(form.submit(&mut store, test_now()), SubmitOutcome::Invalid);
        assert_eq!(form.field_errors().len(), 1);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_set_field_clears_that_fields_error() {
        let mut store: RecordingStore<TeamMember> = RecordingStore::new();
        let mut form: TeamForm = TeamForm::open(None);
        let _ = form.submit(&mut store, test_now());
        assert_eq!(form.field_errors().len(), 2);

        form.set_field("name", "Kaito Ito").unwrap();

        assert!(!form.field_errors().contains_key("name"));
        assert!(form.field_errors().contains_key("email"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut form: TeamForm = TeamForm::open(None);

        let result = form.set_field("salary", "1000");

        assert!(matches!(result, Err(ApiError::InvalidInput { field, .. }) if field == "salary"));
    }

    #[test]
    fn test_create_inserts_once() {
        let mut store: RecordingStore<TeamMember> = RecordingStore::new();
        let mut form: TeamForm = TeamForm::open(None);
        form.set_field("name", " Kaito Ito ").unwrap();
        form.set_field("email", "kaito@saferay.test").unwrap();
        form.set_field("contract_type", "Employee").unwrap();

        let outcome: SubmitOutcome = form.submit(&mut store, test_now());

        assert_eq!(outcome, SubmitOutcome::Saved { id: 101 });
        assert_eq!(store.calls, vec![StoreCall::Insert]);
        let member: &TeamMember = &store.inserted[0];
        assert_eq!(member.id, None);
        assert_eq!(member.name, "Kaito Ito");
        assert_eq!(member.contract_type, Some(ContractType::Employee));
        assert_eq!(member.phone, None);
    }

    #[test]
    fn test_edit_updates_once_by_id() {
        let mut store: RecordingStore<TeamMember> = RecordingStore::new();
        let mut form: TeamForm =
            TeamForm::open(Some(create_test_team_member(Some(12), "Yui Kato")));
        assert_eq!(form.value("name"), Some("Yui Kato"));
        assert_eq!(form.value("contract_type"), Some("Contractor"));

        form.set_field("phone", "090-1234-5678").unwrap();
        let outcome: SubmitOutcome = form.submit(&mut store, test_now());

        assert_eq!(outcome, SubmitOutcome::Saved { id: 12 });
        assert_eq!(store.calls, vec![StoreCall::Update(12)]);
        assert!(store.inserted.is_empty());
        assert_eq!(store.updated[0].1.phone.as_deref(), Some("090-1234-5678"));
    }

    #[test]
    fn test_unknown_contract_type_is_a_field_error() {
        let mut store: RecordingStore<TeamMember> = RecordingStore::new();
        let mut form: TeamForm = TeamForm::open(None);
        form.set_field("name", "Kaito Ito").unwrap();
        form.set_field("email", "kaito@saferay.test").unwrap();
        form.set_field("contract_type", "Intern").unwrap();

        assert_eq!(form.submit(&mut store, test_now()), SubmitOutcome::Invalid);
        assert!(form.field_errors().contains_key("contract_type"));
        assert!(store.calls.is_empty());
    }

    #[test]
    fn test_store_failure_keeps_form_open_with_server_notice() {
        let mut store: RecordingStore<TeamMember> = RecordingStore::new();
        store.fail_writes = true;
        let mut form: TeamForm = TeamForm::open(None);
        form.set_field("name", "Kaito Ito").unwrap();
        form.set_field("email", "kaito@saferay.test").unwrap();

        assert_eq!(form.submit(&mut store, test_now()), SubmitOutcome::Failed);
        assert!(!form.is_saving());
        assert_eq!(form.notice().unwrap().kind, NoticeKind::Server);
        assert_eq!(form.value("name"), Some("Kaito Ito"));
    }
}

mod client_form_tests {
    use super::*;

    #[test]
    fn test_all_missing_client_fields_reported_together() {
        let mut store: RecordingStore<Client> = RecordingStore::new();
        let mut form: ClientForm = ClientForm::open(None);

        assert_eq!(form.submit(&mut store, test_now()), SubmitOutcome::Invalid);

        let fields: Vec<&str> = form.field_errors().keys().map(String::as_str).collect();
        assert_eq!(
            fields,
            vec!["company_address", "company_name", "contact_data"]
        );
        assert_eq!(
            form.field_errors().get("contact_data").map(String::as_str),
            Some("Contact data is required")
        );
    }

    #[test]
    fn test_clearing_optional_field_writes_null() {
        let mut store: RecordingStore<Client> = RecordingStore::new();
        let mut form: ClientForm =
            ClientForm::open(Some(create_test_client(Some(5), "Nagasaki Renewables")));
        form.set_field("owner", "").unwrap();

        assert_eq!(
            form.submit(&mut store, test_now()),
            SubmitOutcome::Saved { id: 5 }
        );
        assert_eq!(store.updated[0].1.owner, None);
    }
}

mod site_form_tests {
    use super::*;

    fn filled_site_form() -> SiteForm {
        let mut form: SiteForm = SiteForm::open(None);
        form.set_field("site_name", "Aso Ridge").unwrap();
        form.set_field("grid_connection_voltage", "HV").unwrap();
        form.set_field("operator", "SRO").unwrap();
        form
    }

    #[test]
    fn test_required_site_fields() {
        let mut store: RecordingStore<Site> = RecordingStore::new();
        let blobs: InMemoryBlobStore = InMemoryBlobStore::new();
        let mut form: SiteForm = SiteForm::open(None);
        form.attach(SiteFileSlot::Aerial, "aerial.jpg", vec![1, 2, 3]);

        assert_eq!(
            form.submit(&mut store, &blobs, test_now()),
            SubmitOutcome::Invalid
        );
        assert_eq!(form.form().field_errors().len(), 3);
        assert!(store.calls.is_empty());
        assert!(blobs.is_empty());
    }

    #[test]
    fn test_unchecking_pv_keeps_values_and_bess() {
        let mut store: RecordingStore<Site> = RecordingStore::new();
        let blobs: InMemoryBlobStore = InMemoryBlobStore::new();
        let mut form: SiteForm = filled_site_form();

        form.toggle_type(SiteKind::Pv, true).unwrap();
        form.toggle_type(SiteKind::Bess, true).unwrap();
        form.set_field("dc_capacity_kw", "1500.5").unwrap();
        form.set_field("rated_power", "2 MW").unwrap();
        assert_eq!(form.form().value("type"), Some("PV, BESS"));
        assert_eq!(form.visible_sections(), vec![Section::Pv, Section::Bess]);

        form.toggle_type(SiteKind::Pv, false).unwrap();
        assert_eq!(form.form().value("type"), Some("BESS"));
        assert_eq!(form.visible_sections(), vec![Section::Bess]);

        let outcome: SubmitOutcome = form.submit(&mut store, &blobs, test_now());

        assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
        let site: &Site = &store.inserted[0];
        assert_eq!(site.site_type, Selection::from_items(&[SiteKind::Bess]));
        assert_eq!(site.dc_capacity_kw, Some(1500.5));
        assert_eq!(site.rated_power.as_deref(), Some("2 MW"));
    }

    #[test]
    fn test_unparseable_numbers_become_null() {
        let mut store: RecordingStore<Site> = RecordingStore::new();
        let blobs: InMemoryBlobStore = InMemoryBlobStore::new();
        let mut form: SiteForm = filled_site_form();
        form.set_field("pcs_quantity", "eight").unwrap();
        form.set_field("ac_capacity_kw", "").unwrap();
        form.set_field("module_quantity", "2180").unwrap();
        form.set_field("cod", "2023-11-30").unwrap();

        let _ = form.submit(&mut store, &blobs, test_now());

        let site: &Site = &store.inserted[0];
        assert_eq!(site.pcs_quantity, None);
        assert_eq!(site.ac_capacity_kw, None);
        assert_eq!(site.module_quantity, Some(2180));
        assert_eq!(site.cod, Some(time::macros::date!(2023 - 11 - 30)));
    }

    #[test]
    fn test_edit_seeds_and_keeps_created_at() {
        let mut store: RecordingStore<Site> = RecordingStore::new();
        let blobs: InMemoryBlobStore = InMemoryBlobStore::new();
        let existing: Site = create_test_site(Some(9), "Kumamoto East");
        let mut form: SiteForm = SiteForm::open(Some(existing.clone()));
        assert_eq!(form.form().value("type"), Some("PV"));
        assert_eq!(form.form().value("dc_capacity_kw"), Some("2400"));

        form.set_field("site_name", "Kumamoto East II").unwrap();
        let outcome: SubmitOutcome = form.submit(&mut store, &blobs, test_now());

        assert_eq!(outcome, SubmitOutcome::Saved { id: 9 });
        assert_eq!(store.calls, vec![StoreCall::Update(9)]);
        assert_eq!(store.updated[0].1.created_at, existing.created_at);
    }

    #[test]
    fn test_upload_stores_generated_name() {
        let mut store: RecordingStore<Site> = RecordingStore::new();
        let blobs: InMemoryBlobStore = InMemoryBlobStore::new();
        let mut form: SiteForm = filled_site_form();
        form.attach(SiteFileSlot::Aerial, "drone shot.JPG", vec![0xFF, 0xD8]);

        let _ = form.submit(&mut store, &blobs, test_now());

        let name: String = store.inserted[0].representative_aerial_url.clone().unwrap();
        assert!(name.starts_with("1710490800000-"));
        assert!(name.ends_with(".JPG"));
        assert!(blobs.contains(SITE_AERIAL_BUCKET, &name));
    }

    #[test]
    fn test_replacing_a_file_removes_the_previous_one() {
        let mut store: RecordingStore<Site> = RecordingStore::new();
        let blobs: InMemoryBlobStore = InMemoryBlobStore::new();
        blobs
            .upload(SITE_AERIAL_BUCKET, "old.jpg", &[1])
            .unwrap();
        let mut existing: Site = create_test_site(Some(9), "Kumamoto East");
        existing.representative_aerial_url = Some(String::from("old.jpg"));
        let mut form: SiteForm = SiteForm::open(Some(existing));
        form.attach(SiteFileSlot::Aerial, "new.png", vec![2]);

        let _ = form.submit(&mut store, &blobs, test_now());

        let stored: String = store.updated[0].1.representative_aerial_url.clone().unwrap();
        assert_ne!(stored, "old.jpg");
        assert!(blobs.contains(SITE_AERIAL_BUCKET, &stored));
        assert!(!blobs.contains(SITE_AERIAL_BUCKET, "old.jpg"));
    }

    #[test]
    fn test_file_slots_are_not_settable() {
        let mut form: SiteForm = filled_site_form();

        for slot in SiteFileSlot::ALL {
            let err: ApiError = form.set_field(slot.field(), "other-site.jpg").unwrap_err();
            assert!(matches!(err, ApiError::InvalidInput { .. }));
            assert_eq!(form.form().value(slot.field()), Some(""));
        }
    }

    #[test]
    fn test_replacing_a_file_never_touches_another_sites_file() {
        let mut store: RecordingStore<Site> = RecordingStore::new();
        let blobs: InMemoryBlobStore = InMemoryBlobStore::new();
        blobs
            .upload(SITE_AERIAL_BUCKET, "other-site.jpg", &[1])
            .unwrap();
        blobs.upload(SITE_AERIAL_BUCKET, "own.jpg", &[2]).unwrap();
        let mut existing: Site = create_test_site(Some(9), "Kumamoto East");
        existing.representative_aerial_url = Some(String::from("own.jpg"));
        let mut form: SiteForm = SiteForm::open(Some(existing));
        assert!(
            form.set_field("representative_aerial_url", "other-site.jpg")
                .is_err()
        );
        form.attach(SiteFileSlot::Aerial, "new.png", vec![3]);

        let outcome: SubmitOutcome = form.submit(&mut store, &blobs, test_now());

        assert_eq!(outcome, SubmitOutcome::Saved { id: 9 });
        assert!(blobs.contains(SITE_AERIAL_BUCKET, "other-site.jpg"));
        assert!(!blobs.contains(SITE_AERIAL_BUCKET, "own.jpg"));
    }

    #[test]
    fn test_upload_failure_keeps_previous_value_and_saves() {
        let mut store: RecordingStore<Site> = RecordingStore::new();
        let mut existing: Site = create_test_site(Some(9), "Kumamoto East");
        existing.site_documentation_url = Some(String::from("manual.pdf"));
        let mut form: SiteForm = SiteForm::open(Some(existing));
        form.attach(SiteFileSlot::Documentation, "manual-v2.pdf", vec![1]);

        let outcome: SubmitOutcome = form.submit(&mut store, &UnavailableBlobStore, test_now());

        assert_eq!(outcome, SubmitOutcome::Saved { id: 9 });
        assert_eq!(
            store.updated[0].1.site_documentation_url.as_deref(),
            Some("manual.pdf")
        );
        assert_eq!(form.form().notice().unwrap().kind, NoticeKind::Storage);
    }

    #[test]
    fn test_failed_save_discards_new_upload() {
        let mut store: RecordingStore<Site> = RecordingStore::new();
        store.fail_writes = true;
        let blobs: InMemoryBlobStore = InMemoryBlobStore::new();
        let mut form: SiteForm = filled_site_form();
        form.attach(SiteFileSlot::Layout, "layout.pdf", vec![1]);

        assert_eq!(
            form.submit(&mut store, &blobs, test_now()),
            SubmitOutcome::Failed
        );
        assert!(blobs.is_empty());
        assert_eq!(form.form().value("representative_layout_url"), Some(""));
    }
}

mod ticket_form_tests {
    use super::*;

    fn filled_ticket_form() -> TicketForm {
        let mut form: TicketForm = TicketForm::open(None);
        form.set_field("ticket_name", "Inverter 3 trip").unwrap();
        form.toggle_choice("category", "Electrical", true).unwrap();
        form.set_field("site_id", "7").unwrap();
        form
    }

    #[test]
    fn test_required_ticket_fields() {
        let mut store: RecordingStore<Ticket> = RecordingStore::new();
        let mut form: TicketForm = TicketForm::open(None);

        assert_eq!(form.submit(&mut store, test_now()), SubmitOutcome::Invalid);

        assert_eq!(
            form.field_errors().get("category").map(String::as_str),
            Some("At least one category is required")
        );
        assert_eq!(
            form.field_errors().get("site_id").map(String::as_str),
            Some("Site is required")
        );
        assert!(form.field_errors().contains_key("ticket_name"));
        assert!(store.calls.is_empty());
    }

    #[test]
    fn test_new_ticket_gets_number_and_creation_date() {
        let mut store: RecordingStore<Ticket> = RecordingStore::new();
        let mut form: TicketForm = filled_ticket_form();

        let outcome: SubmitOutcome = form.submit(&mut store, test_now());

        assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
        let ticket: &Ticket = &store.inserted[0];
        assert!(is_ticket_number(&ticket.ticket_number));
        assert!(ticket.ticket_number.starts_with("T-20240315-"));
        assert_eq!(ticket.creation_date, test_now());
        assert_eq!(
            ticket.category,
            Selection::from_items(&[TicketCategory::Electrical])
        );
        assert_eq!(ticket.site_id, Some(7));
    }

    #[test]
    fn test_edit_keeps_ticket_number() {
        let mut store: RecordingStore<Ticket> = RecordingStore::new();
        let existing: Ticket = create_test_ticket(Some(21), "Fence repair");
        let mut form: TicketForm = TicketForm::open(Some(existing));
        assert_eq!(form.value("creation_date"), Some("2024-01-01T09:30"));
        assert!(form.set_field("ticket_number", "T-19990101-0000").is_err());

        form.set_field("status", "Closed").unwrap();
        let outcome: SubmitOutcome = form.submit(&mut store, test_now());

        assert_eq!(outcome, SubmitOutcome::Saved { id: 21 });
        let (id, ticket) = &store.updated[0];
        assert_eq!(*id, 21);
        assert_eq!(ticket.ticket_number, "T-20240101-0042");
        assert_eq!(ticket.creation_date, datetime!(2024-01-01 09:30));
    }

    #[test]
    fn test_downtime_duration_follows_end() {
        let mut form: TicketForm = filled_ticket_form();
        form.set_field("availability_loss", "true").unwrap();
        form.set_field("downtime_start", "2024-01-01T10:00").unwrap();
        assert_eq!(form.value("downtime_duration"), Some(""));

        form.set_field("downtime_end", "2024-01-01T10:45").unwrap();
        assert_eq!(form.value("downtime_duration"), Some("45 min"));

        form.set_field("downtime_end", "2024-01-01T09:30").unwrap();
        assert_eq!(form.value("downtime_duration"), Some("-30 min"));

        form.set_field("downtime_end", "").unwrap();
        assert_eq!(form.value("downtime_duration"), Some(""));
    }

    #[test]
    fn test_downtime_duration_is_not_settable() {
        let mut store: RecordingStore<Ticket> = RecordingStore::new();
        let mut form: TicketForm = filled_ticket_form();
        form.set_field("downtime_start", "2024-01-01T10:00").unwrap();
        form.set_field("downtime_end", "2024-01-01T10:45").unwrap();

        let err: ApiError = form.set_field("downtime_duration", "999 min").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput { .. }));
        let _ = form.submit(&mut store, test_now());

        assert_eq!(
            store.inserted[0].downtime_duration.as_deref(),
            Some("45 min")
        );
    }

    #[test]
    fn test_changing_start_recomputes_stored_duration() {
        let mut store: RecordingStore<Ticket> = RecordingStore::new();
        let mut existing: Ticket = create_test_ticket(Some(21), "Inverter 3 trip");
        existing.availability_loss = true;
        existing.downtime_start = Some(datetime!(2024-01-01 10:00));
        existing.downtime_end = Some(datetime!(2024-01-01 10:45));
        existing.downtime_duration = Some(String::from("45 min"));
        let mut form: TicketForm = TicketForm::open(Some(existing));

        form.set_field("downtime_start", "2024-01-01T08:00").unwrap();
        assert_eq!(form.value("downtime_duration"), Some("165 min"));
        let _ = form.submit(&mut store, test_now());

        assert_eq!(
            store.updated[0].1.downtime_duration.as_deref(),
            Some("165 min")
        );
    }

    #[test]
    fn test_stale_stored_duration_is_dropped() {
        let mut store: RecordingStore<Ticket> = RecordingStore::new();
        let mut existing: Ticket = create_test_ticket(Some(21), "Inverter 3 trip");
        existing.downtime_duration = Some(String::from("999 min"));
        let mut form: TicketForm = TicketForm::open(Some(existing));

        let _ = form.submit(&mut store, test_now());

        assert_eq!(store.updated[0].1.downtime_duration, None);
    }

    #[test]
    fn test_successive_creates_get_distinct_numbers() {
        let mut store: RecordingStore<Ticket> = RecordingStore::new();

        for _ in 0..2 {
            let mut form: TicketForm = filled_ticket_form();
            let outcome: SubmitOutcome = form.submit(&mut store, test_now());
            assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
        }

        assert_ne!(
            store.inserted[0].ticket_number,
            store.inserted[1].ticket_number
        );
    }

    #[test]
    fn test_downtime_without_start_is_blank() {
        let mut form: TicketForm = filled_ticket_form();

        form.set_field("downtime_end", "2024-01-01T10:45").unwrap();

        assert_eq!(form.value("downtime_duration"), Some(""));
    }

    #[test]
    fn test_sections_follow_gates_and_hidden_values_are_kept() {
        let mut store: RecordingStore<Ticket> = RecordingStore::new();
        let mut form: TicketForm = filled_ticket_form();
        form.set_field("component_type", "Inverter").unwrap();
        form.set_field("srs_ond_sales", "true").unwrap();
        form.set_field("sales_amount", "125000").unwrap();
        assert_eq!(
            form.visible_sections(),
            vec![Section::Electrical, Section::Sales]
        );

        form.toggle_choice("category", "Electrical", false).unwrap();
        form.toggle_choice("category", "Vegetation", true).unwrap();
        form.set_field("srs_ond_sales", "").unwrap();
        assert!(form.visible_sections().is_empty());

        let _ = form.submit(&mut store, test_now());

        let ticket: &Ticket = &store.inserted[0];
        assert_eq!(ticket.component_type.as_deref(), Some("Inverter"));
        assert_eq!(ticket.sales_amount, Some(125_000.0));
        assert!(!ticket.srs_ond_sales);
    }

    #[test]
    fn test_options_load_from_source() {
        use saferay_ops_persistence::{PersistenceError, TicketOptionSource};

        struct FixedOptions;

        impl TicketOptionSource for FixedOptions {
            fn team_options(&mut self) -> Result<Vec<SelectOption>, PersistenceError> {
                Ok(vec![SelectOption {
                    id: 3,
                    label: String::from("Ren Sato"),
                }])
            }

            fn site_options(&mut self) -> Result<Vec<SelectOption>, PersistenceError> {
                Ok(Vec::new())
            }

            fn client_options(&mut self) -> Result<Vec<SelectOption>, PersistenceError> {
                Err(PersistenceError::QueryFailed(String::from("timeout")))
            }
        }

        assert!(TicketFormOptions::load(&mut FixedOptions).is_err());
    }
}
