// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use saferay_ops_domain::Client;

use crate::tests::create_test_client;
use crate::{DashboardSource, EntityStore, SqlitePersistence, TicketOptionSource};

#[test]
fn test_insert_and_list_clients() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let first = EntityStore::<Client>::insert(&mut persistence, &create_test_client("Kita Solar"))
        .unwrap();
    let second =
        EntityStore::<Client>::insert(&mut persistence, &create_test_client("Aso Energy"))
            .unwrap();

    let clients: Vec<Client> = EntityStore::<Client>::list(&mut persistence).unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].id, Some(first));
    assert_eq!(clients[1].id, Some(second));
    assert_eq!(clients[0].tax_number.as_deref(), Some("T1234567890123"));
}

#[test]
fn test_update_client_clears_optional_fields() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let id = EntityStore::<Client>::insert(&mut persistence, &create_test_client("Kita Solar"))
        .unwrap();

    let mut edited = create_test_client("Kita Solar KK");
    edited.tax_number = None;
    edited.owner = Some(String::from("H. Kita"));
    persistence.update(id, &edited).unwrap();

    let stored: Client = persistence.get(id).unwrap().unwrap();
    assert_eq!(stored.company_name, "Kita Solar KK");
    assert_eq!(stored.tax_number, None);
    assert_eq!(stored.owner.as_deref(), Some("H. Kita"));
}

#[test]
fn test_count_clients_and_options() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert_eq!(persistence.count_clients().unwrap(), 0);

    for name in ["Zen Power", "Aso Energy"] {
        EntityStore::<Client>::insert(&mut persistence, &create_test_client(name)).unwrap();
    }

    assert_eq!(persistence.count_clients().unwrap(), 2);
    let labels: Vec<String> = persistence
        .client_options()
        .unwrap()
        .into_iter()
        .map(|option| option.label)
        .collect();
    assert_eq!(labels, vec!["Aso Energy", "Zen Power"]);
}
