// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use saferay_ops_domain::{
    Client, InvoiceStatus, Site, TeamMember, Ticket, TicketCategory, TicketListing, TicketStatus,
};
use time::macros::{date, datetime};

use crate::tests::{
    create_test_client, create_test_site, create_test_team_member, create_test_ticket,
};
use crate::{EntityStore, PersistenceError, SqlitePersistence};

#[test]
fn test_insert_and_get_ticket() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let site_id =
        EntityStore::<Site>::insert(&mut persistence, &create_test_site("Kagoshima")).unwrap();

    let id = EntityStore::<Ticket>::insert(
        &mut persistence,
        &create_test_ticket("Inverter trip", Some(site_id)),
    )
    .unwrap();
    let stored: Ticket = persistence.get(id).unwrap().unwrap();

    assert_eq!(stored.ticket_number, "T-20240101-0042");
    assert_eq!(stored.category.items(), &[TicketCategory::Electrical]);
    assert!(stored.availability_loss);
    assert!(!stored.srs_ond_sales);
    assert_eq!(stored.downtime_start, Some(datetime!(2024-01-01 10:00)));
    assert_eq!(stored.downtime_duration.as_deref(), Some("45 min"));
    assert_eq!(stored.status, Some(TicketStatus::Pending));
    assert_eq!(stored.creation_date, datetime!(2024-01-01 09:30));
}

#[test]
fn test_update_ticket_never_rewrites_number() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let id = EntityStore::<Ticket>::insert(&mut persistence, &create_test_ticket("Trip", None))
        .unwrap();

    let mut edited = create_test_ticket("Trip (resolved)", None);
    edited.ticket_number = String::from("T-20991231-9999");
    edited.status = Some(TicketStatus::Closed);
    edited.srs_ond_sales = true;
    edited.sales_amount = Some(1500.0);
    edited.invoice_date = Some(date!(2024 - 02 - 01));
    edited.invoice_status = Some(InvoiceStatus::PartiallyInvoiced);
    persistence.update(id, &edited).unwrap();

    let stored: Ticket = persistence.get(id).unwrap().unwrap();
    assert_eq!(stored.ticket_number, "T-20240101-0042");
    assert_eq!(stored.ticket_name, "Trip (resolved)");
    assert_eq!(stored.status, Some(TicketStatus::Closed));
    assert_eq!(stored.sales_amount, Some(1500.0));
    assert_eq!(stored.invoice_date, Some(date!(2024 - 02 - 01)));
    assert_eq!(stored.invoice_status, Some(InvoiceStatus::PartiallyInvoiced));
}

#[test]
fn test_ticket_listing_joins_reference_names() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let site_id =
        EntityStore::<Site>::insert(&mut persistence, &create_test_site("Miyazaki")).unwrap();
    let client_id =
        EntityStore::<Client>::insert(&mut persistence, &create_test_client("Aso Energy"))
            .unwrap();
    let member_id =
        EntityStore::<TeamMember>::insert(&mut persistence, &create_test_team_member("Ren"))
            .unwrap();

    let mut ticket = create_test_ticket("Fence damage", Some(site_id));
    ticket.client_id = Some(client_id);
    ticket.allocated_to = Some(member_id);
    EntityStore::<Ticket>::insert(&mut persistence, &ticket).unwrap();
    EntityStore::<Ticket>::insert(&mut persistence, &create_test_ticket("Orphan", None))
        .unwrap();

    let listings: Vec<TicketListing> = EntityStore::<Ticket>::list(&mut persistence).unwrap();

    assert_eq!(listings.len(), 2);
    let joined = listings
        .iter()
        .find(|l| l.ticket.ticket_name == "Fence damage")
        .unwrap();
    assert_eq!(joined.site_name.as_deref(), Some("Miyazaki"));
    assert_eq!(joined.client_name.as_deref(), Some("Aso Energy"));
    assert_eq!(joined.allocated_name.as_deref(), Some("Ren"));

    let orphan = listings
        .iter()
        .find(|l| l.ticket.ticket_name == "Orphan")
        .unwrap();
    assert_eq!(orphan.site_name, None);
    assert_eq!(orphan.client_name, None);
    assert_eq!(orphan.allocated_name, None);
}

#[test]
fn test_get_ticket_listing_by_id() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let site_id =
        EntityStore::<Site>::insert(&mut persistence, &create_test_site("Oita")).unwrap();
    EntityStore::<Ticket>::insert(&mut persistence, &create_test_ticket("Other", None)).unwrap();
    let id = EntityStore::<Ticket>::insert(
        &mut persistence,
        &create_test_ticket("Tracker stuck", Some(site_id)),
    )
    .unwrap();

    let listing: TicketListing = persistence.get_ticket_listing(id).unwrap().unwrap();

    assert_eq!(listing.ticket.id, Some(id));
    assert_eq!(listing.ticket.ticket_name, "Tracker stuck");
    assert_eq!(listing.site_name.as_deref(), Some("Oita"));
    assert_eq!(listing.client_name, None);
    assert!(persistence.get_ticket_listing(id + 100).unwrap().is_none());
}

#[test]
fn test_tickets_are_listed_by_creation_date_descending() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let mut older = create_test_ticket("Older", None);
    older.creation_date = datetime!(2024-01-01 08:00);
    let mut newer = create_test_ticket("Newer", None);
    newer.creation_date = datetime!(2024-03-01 08:00);
    EntityStore::<Ticket>::insert(&mut persistence, &older).unwrap();
    EntityStore::<Ticket>::insert(&mut persistence, &newer).unwrap();

    let listings: Vec<TicketListing> = EntityStore::<Ticket>::list(&mut persistence).unwrap();
    let names: Vec<&str> = listings
        .iter()
        .map(|l| l.ticket.ticket_name.as_str())
        .collect();

    assert_eq!(names, vec!["Newer", "Older"]);
}

#[test]
fn test_deleting_site_nulls_ticket_reference() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let site_id =
        EntityStore::<Site>::insert(&mut persistence, &create_test_site("Nagasaki")).unwrap();
    let ticket_id = EntityStore::<Ticket>::insert(
        &mut persistence,
        &create_test_ticket("Cable cut", Some(site_id)),
    )
    .unwrap();

    EntityStore::<Site>::delete(&mut persistence, site_id).unwrap();

    let stored: Ticket = persistence.get(ticket_id).unwrap().unwrap();
    assert_eq!(stored.site_id, None);
}

#[test]
fn test_ticket_with_unknown_site_is_rejected() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result =
        EntityStore::<Ticket>::insert(&mut persistence, &create_test_ticket("Ghost", Some(404)));

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}
