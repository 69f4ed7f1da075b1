// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use saferay_ops_domain::{Selection, Site, SiteKind};
use time::macros::date;

use crate::tests::create_test_site;
use crate::{EntityStore, SqlitePersistence};

#[test]
fn test_insert_site_stamps_created_at() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let id = EntityStore::<Site>::insert(&mut persistence, &create_test_site("Kumamoto 1"))
        .unwrap();
    let stored: Site = persistence.get(id).unwrap().unwrap();

    assert!(stored.created_at.is_some());
    assert_eq!(stored.site_type.items(), &[SiteKind::Pv]);
    assert_eq!(stored.dc_capacity_kw, Some(1200.5));
    assert_eq!(stored.module_quantity, Some(2180));
}

#[test]
fn test_site_type_and_hidden_groups_round_trip() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let mut site = create_test_site("Oita Hybrid");
    site.site_type = Selection::from_items(&[SiteKind::Bess]);
    site.battery = Some(String::from("LFP 280Ah"));
    site.battery_containers_qty = Some(4);
    site.cod = Some(date!(2023 - 04 - 01));

    let id = EntityStore::<Site>::insert(&mut persistence, &site).unwrap();
    let stored: Site = persistence.get(id).unwrap().unwrap();

    assert_eq!(stored.site_type.to_string(), "BESS");
    // PV values stay stored even though the site is BESS only.
    assert_eq!(stored.dc_capacity_kw, Some(1200.5));
    assert_eq!(stored.battery.as_deref(), Some("LFP 280Ah"));
    assert_eq!(stored.battery_containers_qty, Some(4));
    assert_eq!(stored.cod, Some(date!(2023 - 04 - 01)));
}

#[test]
fn test_sites_are_listed_newest_first() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let first = EntityStore::<Site>::insert(&mut persistence, &create_test_site("First"))
        .unwrap();
    let second = EntityStore::<Site>::insert(&mut persistence, &create_test_site("Second"))
        .unwrap();

    let sites: Vec<Site> = EntityStore::<Site>::list(&mut persistence).unwrap();
    let ids: Vec<Option<i64>> = sites.iter().map(|s| s.id).collect();

    assert_eq!(ids, vec![Some(second), Some(first)]);
}

#[test]
fn test_update_site_keeps_created_at() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let id = EntityStore::<Site>::insert(&mut persistence, &create_test_site("Saga"))
        .unwrap();
    let original: Site = persistence.get(id).unwrap().unwrap();

    let mut edited = original.clone();
    edited.site_name = String::from("Saga East");
    edited.representative_aerial_url = Some(String::from("1700000000000-abc.jpg"));
    persistence.update(id, &edited).unwrap();

    let stored: Site = persistence.get(id).unwrap().unwrap();
    assert_eq!(stored.site_name, "Saga East");
    assert_eq!(stored.created_at, original.created_at);
    assert_eq!(
        stored.representative_aerial_url.as_deref(),
        Some("1700000000000-abc.jpg")
    );
}
