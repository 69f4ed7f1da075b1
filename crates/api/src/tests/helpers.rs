// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions, fixtures, and recording fakes.

use saferay_ops_domain::{
    Client, ContractType, Entity, GridVoltage, Region, Selection, Site, SiteKind, SiteOperator,
    TeamMember, Ticket, TicketCategory, TicketListing, TicketStatus,
};
use saferay_ops_persistence::{BlobStore, EntityStore, PersistenceError, StorageError};
use time::PrimitiveDateTime;
use time::macros::datetime;

/// A store call, in the order it was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Get(i64),
    Insert,
    Update(i64),
    Delete(i64),
}

/// An `EntityStore` that records every call and the records written.
pub struct RecordingStore<E: Entity> {
    pub rows: Vec<E::Listing>,
    pub records: Vec<E>,
    pub calls: Vec<StoreCall>,
    pub inserted: Vec<E>,
    pub updated: Vec<(i64, E)>,
    pub fail_list: bool,
    pub fail_writes: bool,
    pub next_id: i64,
}

impl<E: Entity> RecordingStore<E> {
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            records: Vec::new(),
            calls: Vec::new(),
            inserted: Vec::new(),
            updated: Vec::new(),
            fail_list: false,
            fail_writes: false,
            next_id: 100,
        }
    }

    pub fn with_rows(rows: Vec<E::Listing>) -> Self {
        let mut store: Self = Self::new();
        store.rows = rows;
        store
    }

    pub fn writes(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| !matches!(call, StoreCall::List | StoreCall::Get(_)))
            .count()
    }

    fn write_result(&self) -> Result<(), PersistenceError> {
        if self.fail_writes {
            Err(PersistenceError::DatabaseError(String::from(
                "FOREIGN KEY constraint failed",
            )))
        } else {
            Ok(())
        }
    }
}

impl<E: Entity> EntityStore<E> for RecordingStore<E> {
    fn list(&mut self) -> Result<Vec<E::Listing>, PersistenceError> {
        self.calls.push(StoreCall::List);
        if self.fail_list {
            return Err(PersistenceError::DatabaseConnectionFailed(String::from(
                "unreachable",
            )));
        }
        Ok(self.rows.clone())
    }

    fn get(&mut self, id: i64) -> Result<Option<E>, PersistenceError> {
        self.calls.push(StoreCall::Get(id));
        Ok(self.records.iter().find(|r| r.id() == Some(id)).cloned())
    }

    fn insert(&mut self, record: &E) -> Result<i64, PersistenceError> {
        self.calls.push(StoreCall::Insert);
        self.write_result()?;
        self.inserted.push(record.clone());
        self.next_id += 1;
        Ok(self.next_id)
    }

    fn update(&mut self, id: i64, record: &E) -> Result<(), PersistenceError> {
        self.calls.push(StoreCall::Update(id));
        self.write_result()?;
        self.updated.push((id, record.clone()));
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<(), PersistenceError> {
        self.calls.push(StoreCall::Delete(id));
        self.write_result()
    }
}

/// A blob store where every call fails.
pub struct UnavailableBlobStore;

impl BlobStore for UnavailableBlobStore {
    fn upload(&self, bucket: &str, _path: &str, _bytes: &[u8]) -> Result<String, StorageError> {
        Err(StorageError::Other(format!("bucket '{bucket}' unavailable")))
    }

    fn download(&self, bucket: &str, _path: &str) -> Result<Vec<u8>, StorageError> {
        Err(StorageError::Other(format!("bucket '{bucket}' unavailable")))
    }

    fn remove(&self, bucket: &str, _paths: &[String]) -> Result<(), StorageError> {
        Err(StorageError::Other(format!("bucket '{bucket}' unavailable")))
    }
}

pub const fn test_now() -> PrimitiveDateTime {
    datetime!(2024-03-15 08:20)
}

pub fn create_test_team_member(id: Option<i64>, name: &str) -> TeamMember {
    TeamMember {
        id,
        name: name.to_string(),
        position: Some(String::from("Field Technician")),
        main_location: Some(String::from("Fukuoka")),
        contract_type: Some(ContractType::Contractor),
        email: format!("{}@saferay.test", name.to_lowercase().replace(' ', ".")),
        phone: None,
    }
}

pub fn create_test_client(id: Option<i64>, company_name: &str) -> Client {
    Client {
        id,
        company_name: company_name.to_string(),
        owner: Some(String::from("Aoi Tanaka")),
        tax_number: None,
        company_address: String::from("2-1 Marunouchi, Chiyoda-ku, Tokyo"),
        contact_data: String::from("+81 3 0000 0000"),
    }
}

pub fn create_test_site(id: Option<i64>, site_name: &str) -> Site {
    Site {
        id,
        site_name: site_name.to_string(),
        official_name: Some(format!("{site_name} Solar Park")),
        site_type: Selection::from_items(&[SiteKind::Pv]),
        region: Some(Region::Kyushu),
        address: None,
        coordinates: None,
        grid_connection_voltage: GridVoltage::Ehv,
        cee: None,
        operator: SiteOperator::Srs,
        dc_capacity_kw: Some(2400.0),
        ac_capacity_kw: Some(1990.0),
        pcs: Some(String::from("SG250HX")),
        pcs_quantity: Some(8),
        module: None,
        module_quantity: Some(4400),
        tilt: None,
        rated_power: None,
        nominal_energy_capacity: None,
        operating_capacity: None,
        battery: None,
        battery_containers_qty: None,
        battery_modules_per_rack: None,
        c_rate: None,
        electricity_selling_rate: Some(String::from("36 JPY/kWh")),
        cod: None,
        representative_aerial_url: None,
        representative_layout_url: None,
        site_documentation_url: None,
        created_at: Some(datetime!(2024-02-01 12:00)),
    }
}

pub fn create_test_ticket(id: Option<i64>, ticket_name: &str) -> Ticket {
    Ticket {
        id,
        ticket_number: String::from("T-20240101-0042"),
        ticket_name: ticket_name.to_string(),
        category: Selection::from_items(&[TicketCategory::MonthlyInspection]),
        component_type: None,
        component_no: None,
        error_message: None,
        availability_loss: false,
        downtime_start: None,
        downtime_end: None,
        downtime_duration: None,
        spare_parts_used: None,
        ticket_description: Some(String::from("Routine walk-down")),
        photo_url: None,
        photo_description: None,
        document_url: None,
        allocated_to: Some(3),
        status: Some(TicketStatus::Ongoing),
        srs_ond_sales: false,
        sales_amount: None,
        client_id: None,
        invoice_date: None,
        invoice_status: None,
        site_id: Some(7),
        creation_date: datetime!(2024-01-01 09:30),
        closure_date: None,
    }
}

pub fn create_test_listing(id: i64, ticket_name: &str) -> TicketListing {
    TicketListing {
        ticket: create_test_ticket(Some(id), ticket_name),
        site_name: Some(String::from("Kumamoto East")),
        client_name: None,
        allocated_name: Some(String::from("Ren Sato")),
    }
}

/// A 32x16 JPEG.
pub fn sample_jpeg() -> Vec<u8> {
    let pixels: image::RgbImage = image::RgbImage::from_pixel(32, 16, image::Rgb([0, 150, 162]));
    let mut bytes: Vec<u8> = Vec::new();
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .unwrap();
    bytes
}
