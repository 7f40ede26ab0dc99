use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog package as listed to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackageSummary {
    pub package_id: i32,
    pub package_name: String,
    pub event_type: String,
    pub capacity: i32,
    pub description: String,
    pub additional_capacity_charges: Decimal,
    pub charge_unit: i32,
    pub total_price: Decimal,
    pub status: String,
    pub created_at: Option<String>,
    pub venue: Option<PackageVenue>,
    pub gown_package: Option<PackageGownPackage>,
    pub suppliers: Vec<PackageSupplier>,
    pub additional_services: Vec<PackageAdditionalService>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackageVenue {
    pub venue_id: i32,
    pub name: String,
    pub location: Option<String>,
    pub price: Decimal,
    pub capacity: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackageGownPackage {
    pub gown_package_id: i32,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackageSupplier {
    pub supplier_id: i32,
    pub name: String,
    pub service: String,
    pub price: Decimal,
    pub remarks: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackageAdditionalService {
    pub service_id: i32,
    pub name: String,
    pub price: Decimal,
}

/// Package with its service rows flattened into parallel columns.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackageDetails {
    pub package_id: i32,
    pub package_name: String,
    pub event_type_name: Option<String>,
    pub capacity: Option<i32>,
    pub description: Option<String>,
    pub total_price: Decimal,
    pub additional_capacity_charges: Decimal,
    pub charge_unit: Option<i32>,
    pub venue_id: Option<i32>,
    pub venue_name: Option<String>,
    pub venue_location: Option<String>,
    pub venue_price: Decimal,
    pub gown_package_name: Option<String>,
    pub gown_package_price: Decimal,
    pub package_service_ids: Vec<Option<i32>>,
    pub supplier_ids: Vec<Option<i32>>,
    pub services: Vec<Option<String>>,
    pub service_prices: Vec<Decimal>,
    pub supplier_firstnames: Vec<Option<String>>,
    pub supplier_lastnames: Vec<Option<String>>,
    pub supplier_emails: Vec<Option<String>>,
    pub external_supplier_names: Vec<Option<String>>,
    pub external_supplier_contacts: Vec<Option<String>>,
    pub external_supplier_prices: Vec<Decimal>,
    pub remarks: Vec<Option<String>>,
}
