// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod entity_tests;
mod operator_tests;

use saferay_ops_domain::{
    Client, ContractType, GridVoltage, Region, Selection, Site, SiteKind, SiteOperator,
    TeamMember, Ticket, TicketCategory, TicketStatus,
};
use time::macros::datetime;

pub fn create_test_team_member(name: &str) -> TeamMember {
    TeamMember {
        id: None,
        name: name.to_string(),
        position: Some(String::from("Field Technician")),
        main_location: Some(String::from("Fukuoka")),
        contract_type: Some(ContractType::Employee),
        email: format!("{}@saferay.test", name.to_lowercase().replace(' ', ".")),
        phone: None,
    }
}

pub fn create_test_client(company_name: &str) -> Client {
    Client {
        id: None,
        company_name: company_name.to_string(),
        owner: None,
        tax_number: Some(String::from("T1234567890123")),
        company_address: String::from("1-2-3 Tenjin, Chuo-ku, Fukuoka"),
        contact_data: String::from("ops@client.test"),
    }
}

pub fn create_test_site(site_name: &str) -> Site {
    Site {
        id: None,
        site_name: site_name.to_string(),
        official_name: None,
        site_type: Selection::from_items(&[SiteKind::Pv]),
        region: Some(Region::Kyushu),
        address: None,
        coordinates: Some(String::from("33.59, 130.40")),
        grid_connection_voltage: GridVoltage::Hv,
        cee: None,
        operator: SiteOperator::Sro,
        dc_capacity_kw: Some(1200.5),
        ac_capacity_kw: Some(1000.0),
        pcs: None,
        pcs_quantity: None,
        module: Some(String::from("Mono 550W")),
        module_quantity: Some(2180),
        tilt: Some(String::from("25")),
        rated_power: None,
        nominal_energy_capacity: None,
        operating_capacity: None,
        battery: None,
        battery_containers_qty: None,
        battery_modules_per_rack: None,
        c_rate: None,
        electricity_selling_rate: None,
        cod: None,
        representative_aerial_url: None,
        representative_layout_url: None,
        site_documentation_url: None,
        created_at: None,
    }
}

pub fn create_test_ticket(ticket_name: &str, site_id: Option<i64>) -> Ticket {
    Ticket {
        id: None,
        ticket_number: String::from("T-20240101-0042"),
        ticket_name: ticket_name.to_string(),
        category: Selection::from_items(&[TicketCategory::Electrical]),
        component_type: Some(String::from("Inverter")),
        component_no: Some(String::from("INV-07")),
        error_message: None,
        availability_loss: true,
        downtime_start: Some(datetime!(2024-01-01 10:00)),
        downtime_end: Some(datetime!(2024-01-01 10:45)),
        downtime_duration: Some(String::from("45 min")),
        spare_parts_used: None,
        ticket_description: Some(String::from("Inverter tripped on overvoltage")),
        photo_url: None,
        photo_description: None,
        document_url: None,
        allocated_to: None,
        status: Some(TicketStatus::Pending),
        srs_ond_sales: false,
        sales_amount: None,
        client_id: None,
        invoice_date: None,
        invoice_status: None,
        site_id,
        creation_date: datetime!(2024-01-01 09:30),
        closure_date: None,
    }
}
