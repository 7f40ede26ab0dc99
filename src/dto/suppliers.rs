use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailabilityQuery {
    /// `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetAvailabilityRequest {
    pub date: Option<String>,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
    pub reason: Option<String>,
}

fn available_by_default() -> bool {
    true
}

/// An event in which the supplier's selection was approved.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SupplierEvent {
    pub events_id: i32,
    pub event_name: Option<String>,
    pub event_type: Option<String>,
    pub event_theme: Option<String>,
    pub event_color: Option<String>,
    pub schedule: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub event_status: String,
    pub event_total_price: Decimal,
    pub booking_type: String,
    pub client_firstname: String,
    pub client_lastname: String,
    pub client_contact: String,
    pub client_address: Option<String>,
    pub booking_status: String,
    pub supplier_price: Decimal,
    pub booking_remarks: Option<String>,
    pub supplier_service: String,
    pub supplier_username: String,
    pub package_name: Option<String>,
    pub venue_status: String,
    pub venue_id: Option<i32>,
    pub venue_name: Option<String>,
    pub venue_location: Option<String>,
    pub venue_price: Option<Decimal>,
    pub venue_description: Option<String>,
    pub venue_capacity: Option<i32>,
    pub venue_image: Option<String>,
    pub booked_venue_price: Option<Decimal>,
    pub outfit_details: Vec<SupplierEventOutfit>,
    pub is_upcoming: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierEventOutfit {
    pub wishlist_outfit_id: i32,
    pub outfit_id: Option<i32>,
    pub outfit_name: Option<String>,
    pub outfit_type: Option<String>,
    pub outfit_color: Option<String>,
    pub outfit_desc: Option<String>,
    pub outfit_img: Option<String>,
    pub gown_package_id: Option<i32>,
    pub gown_package_name: Option<String>,
    pub gown_package_price: Option<Decimal>,
    pub price: Decimal,
    pub status: String,
    pub remarks: Option<String>,
    pub created_at: String,
    pub has_been_updated: bool,
}
