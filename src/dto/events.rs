use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::dto::wishlist::{Inclusion, OutfitSelection, ServiceSelection, SupplierSelection};

pub const DEFAULT_EVENT_STATUS: &str = "Wishlist";
pub const DEFAULT_BOOKING_TYPE: &str = "Online";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    pub event_name: Option<String>,
    pub event_type: Option<String>,
    pub event_theme: Option<String>,
    pub event_color: Option<String>,
    pub package_id: Option<i32>,
    pub venue: Option<String>,
    pub schedule: Option<NaiveDate>,
    #[serde(default, deserialize_with = "clock_time")]
    #[schema(value_type = Option<String>, example = "14:00")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "clock_time")]
    #[schema(value_type = Option<String>, example = "18:30")]
    pub end_time: Option<NaiveTime>,
    pub status: Option<String>,
    pub total_price: Option<Decimal>,
    pub booking_type: Option<String>,
    #[serde(default)]
    pub suppliers: Vec<SupplierSelection>,
    #[serde(default)]
    pub outfits: Vec<OutfitSelection>,
    #[serde(default, alias = "additional_services")]
    pub services: Vec<ServiceSelection>,
    #[serde(default)]
    pub additional_items: Vec<AdditionalItem>,
    #[serde(default)]
    pub inclusions: Vec<Inclusion>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdditionalItem {
    pub item_type: String,
    pub item_id: Option<i32>,
    #[serde(default)]
    pub price: Decimal,
    pub remarks: Option<String>,
}

/// Per-event overrides of a catalog package.
#[derive(Debug, Default)]
pub struct PackageConfiguration {
    pub suppliers: Vec<SupplierSelection>,
    pub outfits: Vec<OutfitSelection>,
    pub services: Vec<ServiceSelection>,
}

impl CreateEventRequest {
    /// Explicit lists win; each empty list is filled from inclusions of the matching type.
    pub fn take_configuration(&mut self) -> PackageConfiguration {
        let mut config = PackageConfiguration {
            suppliers: std::mem::take(&mut self.suppliers),
            outfits: std::mem::take(&mut self.outfits),
            services: std::mem::take(&mut self.services),
        };
        let (fill_suppliers, fill_outfits, fill_services) = (
            config.suppliers.is_empty(),
            config.outfits.is_empty(),
            config.services.is_empty(),
        );
        for inclusion in std::mem::take(&mut self.inclusions) {
            match inclusion {
                Inclusion::Supplier(s) if fill_suppliers => config.suppliers.push(s),
                Inclusion::Outfit(o) if fill_outfits => config.outfits.push(o),
                Inclusion::Service(s) if fill_services => config.services.push(s),
                _ => {}
            }
        }
        config
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventCreated {
    pub events_id: i32,
}

/// Accepts `HH:MM` as well as `HH:MM:SS`.
fn clock_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveTime::parse_from_str(value, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn times_accept_minutes_or_seconds() {
        let body: CreateEventRequest = serde_json::from_value(json!({
            "event_name": "Reyes Wedding",
            "schedule": "2030-02-14",
            "start_time": "14:00",
            "end_time": "18:30:00"
        }))
        .unwrap();
        assert_eq!(body.start_time, NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(body.end_time, NaiveTime::from_hms_opt(18, 30, 0));
        assert!(body.status.is_none());
    }

    #[test]
    fn inclusions_fill_only_empty_lists() {
        let mut body: CreateEventRequest = serde_json::from_value(json!({
            "package_id": 3,
            "suppliers": [{ "supplier_id": 1, "price": 100 }],
            "inclusions": [
                { "type": "supplier", "data": { "supplier_id": 2 } },
                { "type": "outfit", "data": { "gown_package_id": 8, "price": 500 } },
                { "type": "service", "data": { "service_id": 4 } },
                { "type": "venue", "data": { "venue_id": 9 } }
            ]
        }))
        .unwrap();

        let config = body.take_configuration();
        assert_eq!(config.suppliers.len(), 1);
        assert_eq!(config.suppliers[0].supplier_id, 1);
        assert_eq!(config.outfits.len(), 1);
        assert_eq!(config.outfits[0].gown_package_id, Some(8));
        assert_eq!(config.services.len(), 1);
        assert_eq!(config.services[0].catalog_service_id(), Some(4));
        assert!(body.inclusions.is_empty());
    }
}
