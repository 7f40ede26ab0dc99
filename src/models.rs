use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PROFILE_PICTURE: &str = "/static/uploads/profile_pics/default-profile.jpg";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub userid: i32,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub contactnumber: String,
    pub address: Option<String>,
    pub user_type: String,
    pub user_img: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Outfit {
    pub outfit_id: i32,
    pub outfit_name: String,
    pub outfit_type: String,
    pub outfit_color: String,
    pub outfit_desc: String,
    pub rent_price: Decimal,
    pub status: String,
    pub outfit_img: Option<String>,
    pub size: Option<String>,
    pub weight: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookedOutfit {
    pub outfit_booked_id: i32,
    pub userid: i32,
    pub outfit_id: i32,
    pub pickup_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub additional_charges: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Venue {
    pub venue_id: i32,
    pub venue_name: String,
    pub location: Option<String>,
    pub venue_price: Decimal,
    pub description: Option<String>,
    pub venue_capacity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GownPackage {
    pub gown_package_id: i32,
    pub gown_package_name: String,
    pub gown_package_price: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdditionalService {
    pub add_service_id: i32,
    pub add_service_name: String,
    pub add_service_description: Option<String>,
    pub add_service_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventType {
    pub event_type_id: i32,
    pub event_type_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SocialMedia {
    pub platform: String,
    pub handle: String,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    pub supplier_id: i32,
    pub firstname: String,
    pub lastname: String,
    pub name: String,
    pub service: String,
    pub price: Decimal,
    pub email: String,
    pub contactnumber: String,
    pub address: Option<String>,
    pub user_img: Option<String>,
    pub social_media: Vec<SocialMedia>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub events_id: i32,
    pub userid: i32,
    pub event_name: Option<String>,
    pub event_type: Option<String>,
    pub event_theme: Option<String>,
    pub event_color: Option<String>,
    pub venue: Option<String>,
    pub schedule: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: String,
    pub total_price: Decimal,
    pub booking_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookedSchedule {
    pub schedule: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventsByMonth {
    #[serde(rename = "eventTypes")]
    pub event_types: Vec<String>,
    pub data: BTreeMap<String, Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub feedback_id: i32,
    pub userid: i32,
    pub rating: i32,
    pub feedback_text: Option<String>,
    pub created_at: String,
    pub user_firstname: String,
    pub user_lastname: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Availability {
    pub availability_id: i32,
    pub supplier_id: i32,
    pub date: NaiveDate,
    pub is_available: bool,
    pub reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_money_serializes_as_number() {
        let venue = Venue {
            venue_id: 1,
            venue_name: "Grand Ballroom".into(),
            location: None,
            venue_price: Decimal::ZERO,
            description: None,
            venue_capacity: 0,
        };
        let json = serde_json::to_value(&venue).unwrap();
        assert!(json["venue_price"].is_number());
        assert_eq!(json["venue_price"].as_f64(), Some(0.0));
    }

    #[test]
    fn decimal_money_keeps_cents() {
        let service = AdditionalService {
            add_service_id: 4,
            add_service_name: "Photo booth".into(),
            add_service_description: None,
            add_service_price: Decimal::new(1_250_050, 2),
        };
        let json = serde_json::to_value(&service).unwrap();
        assert_eq!(json["add_service_price"].as_f64(), Some(12_500.5));
    }
}
