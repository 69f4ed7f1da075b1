// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use saferay_ops_domain::{ContractType, TeamMember};

use crate::tests::create_test_team_member;
use crate::{EntityStore, PersistenceError, SqlitePersistence, TicketOptionSource};

#[test]
fn test_insert_and_get_team_member() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let member = create_test_team_member("Aiko Tanaka");

    let id = EntityStore::<TeamMember>::insert(&mut persistence, &member).unwrap();
    let stored: TeamMember = persistence.get(id).unwrap().unwrap();

    assert_eq!(stored.id, Some(id));
    assert_eq!(stored.name, "Aiko Tanaka");
    assert_eq!(stored.contract_type, Some(ContractType::Employee));
    assert_eq!(stored.phone, None);
}

#[test]
fn test_team_list_is_ordered_by_id_ascending() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    for name in ["Charlie", "Alice", "Bob"] {
        EntityStore::<TeamMember>::insert(&mut persistence, &create_test_team_member(name))
            .unwrap();
    }

    let members: Vec<TeamMember> = EntityStore::<TeamMember>::list(&mut persistence).unwrap();
    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();

    assert_eq!(names, vec!["Charlie", "Alice", "Bob"]);
}

#[test]
fn test_update_team_member_overwrites_nullable_columns() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let id =
        EntityStore::<TeamMember>::insert(&mut persistence, &create_test_team_member("Ken"))
            .unwrap();

    let mut edited = create_test_team_member("Ken Sato");
    edited.position = None;
    edited.contract_type = Some(ContractType::Contractor);
    persistence.update(id, &edited).unwrap();

    let stored: TeamMember = persistence.get(id).unwrap().unwrap();
    assert_eq!(stored.name, "Ken Sato");
    assert_eq!(stored.position, None);
    assert_eq!(stored.contract_type, Some(ContractType::Contractor));
}

#[test]
fn test_update_unknown_team_member_is_not_found() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let result = persistence.update(42, &create_test_team_member("Nobody"));

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_team_member() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let id =
        EntityStore::<TeamMember>::insert(&mut persistence, &create_test_team_member("Yui"))
            .unwrap();

    EntityStore::<TeamMember>::delete(&mut persistence, id).unwrap();

    assert!(EntityStore::<TeamMember>::get(&mut persistence, id)
        .unwrap()
        .is_none());
    assert!(matches!(
        EntityStore::<TeamMember>::delete(&mut persistence, id),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_team_options_are_sorted_by_name() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    for name in ["Mei", "Haruto", "Sora"] {
        EntityStore::<TeamMember>::insert(&mut persistence, &create_test_team_member(name))
            .unwrap();
    }

    let labels: Vec<String> = persistence
        .team_options()
        .unwrap()
        .into_iter()
        .map(|option| option.label)
        .collect();

    assert_eq!(labels, vec!["Haruto", "Mei", "Sora"]);
}
