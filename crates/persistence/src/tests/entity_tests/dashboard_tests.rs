// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use saferay_ops_domain::{Site, Ticket, TicketStatus};

use crate::tests::{create_test_site, create_test_ticket};
use crate::{DashboardSource, EntityStore, SqlitePersistence, TicketOptionSource, TicketStat};

#[test]
fn test_ticket_stats_report_status_and_site() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let site_id =
        EntityStore::<Site>::insert(&mut persistence, &create_test_site("Beppu")).unwrap();

    let mut closed = create_test_ticket("Closed one", Some(site_id));
    closed.status = Some(TicketStatus::Closed);
    let mut unset = create_test_ticket("No status", None);
    unset.status = None;
    EntityStore::<Ticket>::insert(&mut persistence, &closed).unwrap();
    EntityStore::<Ticket>::insert(&mut persistence, &unset).unwrap();

    let stats: Vec<TicketStat> = persistence.ticket_stats().unwrap();

    assert_eq!(
        stats,
        vec![
            TicketStat {
                status: Some(String::from("Closed")),
                site_id: Some(site_id),
            },
            TicketStat {
                status: None,
                site_id: None,
            },
        ]
    );
}

#[test]
fn test_site_names_and_options() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let kumamoto =
        EntityStore::<Site>::insert(&mut persistence, &create_test_site("Kumamoto")).unwrap();
    let aso = EntityStore::<Site>::insert(&mut persistence, &create_test_site("Aso")).unwrap();

    assert_eq!(
        persistence.site_names().unwrap(),
        vec![
            (kumamoto, String::from("Kumamoto")),
            (aso, String::from("Aso"))
        ]
    );

    let options = persistence.site_options().unwrap();
    assert_eq!(options[0].id, aso);
    assert_eq!(options[0].label, "Aso");
}
