use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One tagged selection in a package or event request.
///
/// Wire form is `{"type": "venue", "data": {...}}`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Inclusion {
    Venue(VenueSelection),
    Outfit(OutfitSelection),
    Service(ServiceSelection),
    Supplier(SupplierSelection),
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VenueSelection {
    pub venue_id: i32,
    pub venue_price: Option<Decimal>,
    pub price: Option<Decimal>,
    pub remarks: Option<String>,
}

impl VenueSelection {
    /// Price the client quoted, `venue_price` winning over `price`.
    pub fn quoted_price(&self) -> Option<Decimal> {
        self.venue_price.or(self.price)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OutfitSelection {
    pub gown_package_id: Option<i32>,
    pub outfit_id: Option<i32>,
    #[serde(default)]
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub modified_price: Option<Decimal>,
    #[serde(default)]
    pub is_modified: bool,
    #[serde(default)]
    pub is_removed: bool,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ServiceSelection {
    pub add_service_id: Option<i32>,
    pub service_id: Option<i32>,
    pub package_service_id: Option<i32>,
    pub supplier_id: Option<i32>,
    #[serde(default)]
    pub price: Decimal,
    pub remarks: Option<String>,
}

impl ServiceSelection {
    /// Catalog service id, `add_service_id` winning over `service_id`.
    pub fn catalog_service_id(&self) -> Option<i32> {
        self.add_service_id.or(self.service_id)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SupplierSelection {
    pub supplier_id: i32,
    #[serde(default)]
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub modified_price: Option<Decimal>,
    #[serde(default)]
    pub is_modified: bool,
    #[serde(default)]
    pub is_removed: bool,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWishlistPackageRequest {
    pub events_id: Option<i32>,
    pub package_name: Option<String>,
    pub capacity: Option<i32>,
    pub description: Option<String>,
    #[serde(default)]
    pub additional_capacity_charges: Decimal,
    pub charge_unit: Option<i32>,
    pub event_type_id: Option<i32>,
    pub status: Option<String>,
    #[serde(default)]
    pub inclusions: Vec<Inclusion>,
    /// Used when no supplier arrives through `inclusions`.
    #[serde(default)]
    pub suppliers: Vec<SupplierSelection>,
    /// Used when no service arrives through `inclusions`.
    #[serde(default)]
    pub services: Vec<ServiceSelection>,
}

/// Inclusions decoded into the rows a wishlist package owns.
#[derive(Debug, Default)]
pub struct PackageSelections {
    pub venue: Option<VenueSelection>,
    pub outfit: Option<OutfitSelection>,
    pub services: Vec<ServiceSelection>,
    pub suppliers: Vec<SupplierSelection>,
}

impl PackageSelections {
    /// First venue and first outfit win; services and suppliers accumulate.
    /// The flat `fallback_*` lists apply only when the inclusions carried none.
    pub fn collect(
        inclusions: Vec<Inclusion>,
        fallback_suppliers: Vec<SupplierSelection>,
        fallback_services: Vec<ServiceSelection>,
    ) -> Self {
        let mut selections = PackageSelections::default();
        for inclusion in inclusions {
            match inclusion {
                Inclusion::Venue(venue) => {
                    selections.venue.get_or_insert(venue);
                }
                Inclusion::Outfit(outfit) => {
                    selections.outfit.get_or_insert(outfit);
                }
                Inclusion::Service(service) => selections.services.push(service),
                Inclusion::Supplier(supplier) => selections.suppliers.push(supplier),
            }
        }
        if selections.services.is_empty() {
            selections.services = fallback_services;
        }
        if selections.suppliers.is_empty() {
            selections.suppliers = fallback_suppliers;
        }
        selections
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistPackageCreated {
    pub wishlist_id: i32,
    pub total_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistEntry {
    pub event: WishlistEvent,
    pub package: WishlistPackage,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistEvent {
    pub events_id: i32,
    pub event_name: Option<String>,
    pub event_type: Option<String>,
    pub event_theme: Option<String>,
    pub event_color: Option<String>,
    pub schedule: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistPackage {
    pub wishlist_id: i32,
    pub package_name: Option<String>,
    pub capacity: Option<i32>,
    pub description: Option<String>,
    pub total_price: Decimal,
    pub additional_capacity_charges: Decimal,
    pub charge_unit: i32,
    pub status: String,
    pub venue: Option<WishlistVenue>,
    pub gown_package: Option<WishlistGownPackage>,
    pub outfits: Vec<WishlistOutfit>,
    pub suppliers: Vec<WishlistSupplier>,
    pub additional_services: Vec<WishlistAdditionalService>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistVenue {
    pub venue_id: i32,
    pub venue_name: String,
    pub location: Option<String>,
    pub venue_price: Decimal,
    pub description: Option<String>,
    pub venue_capacity: Option<i32>,
    pub status: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistGownPackage {
    pub gown_package_id: i32,
    pub gown_package_name: String,
    pub gown_package_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistOutfit {
    pub wishlist_outfit_id: i32,
    pub outfit_id: Option<i32>,
    pub gown_package_id: Option<i32>,
    pub outfit_name: Option<String>,
    pub outfit_type: Option<String>,
    pub outfit_color: Option<String>,
    pub outfit_desc: Option<String>,
    pub outfit_img: Option<String>,
    pub price: Decimal,
    pub status: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistSupplier {
    pub supplier_id: i32,
    pub name: Option<String>,
    pub service: Option<String>,
    pub price: Decimal,
    pub status: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistAdditionalService {
    pub add_service_id: i32,
    pub add_service_name: Option<String>,
    pub add_service_description: Option<String>,
    pub add_service_price: Decimal,
    pub status: String,
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn inclusions_decode_by_type_tag() {
        let inclusions: Vec<Inclusion> = serde_json::from_value(json!([
            { "type": "venue", "data": { "venue_id": 5, "price": 1000 } },
            { "type": "outfit", "data": { "gown_package_id": 2, "price": 500 } },
            { "type": "service", "data": { "service_id": 7, "price": 250.5 } },
            { "type": "supplier", "data": { "supplier_id": 3 } }
        ]))
        .unwrap();

        assert!(matches!(
            &inclusions[0],
            Inclusion::Venue(v) if v.venue_id == 5 && v.quoted_price() == Some(Decimal::from(1000))
        ));
        assert!(matches!(&inclusions[1], Inclusion::Outfit(o) if o.gown_package_id == Some(2)));
        assert!(matches!(&inclusions[2], Inclusion::Service(s) if s.catalog_service_id() == Some(7)));
        assert!(matches!(
            &inclusions[3],
            Inclusion::Supplier(s) if s.supplier_id == 3 && s.price.is_zero()
        ));
    }

    #[test]
    fn service_accepts_both_id_keys() {
        let both: Inclusion = serde_json::from_value(json!({
            "type": "service",
            "data": { "service_id": 7, "add_service_id": 7 }
        }))
        .unwrap();
        assert!(matches!(&both, Inclusion::Service(s) if s.catalog_service_id() == Some(7)));

        let service: ServiceSelection =
            serde_json::from_value(json!({ "service_id": 3, "add_service_id": 9 })).unwrap();
        assert_eq!(service.catalog_service_id(), Some(9));

        let service: ServiceSelection = serde_json::from_value(json!({ "service_id": 3 })).unwrap();
        assert_eq!(service.catalog_service_id(), Some(3));

        let service: ServiceSelection = serde_json::from_value(json!({ "price": 10 })).unwrap();
        assert_eq!(service.catalog_service_id(), None);
    }

    #[test]
    fn unknown_inclusion_type_is_rejected() {
        let parsed = serde_json::from_value::<Inclusion>(json!({ "type": "catering", "data": {} }));
        assert!(parsed.is_err());

        let missing_data = serde_json::from_value::<Inclusion>(json!({ "type": "venue" }));
        assert!(missing_data.is_err());
    }

    #[test]
    fn venue_price_prefers_explicit_venue_price() {
        let venue: VenueSelection =
            serde_json::from_value(json!({ "venue_id": 1, "venue_price": 900, "price": 100 }))
                .unwrap();
        assert_eq!(venue.quoted_price(), Some(Decimal::from(900)));

        let venue: VenueSelection = serde_json::from_value(json!({ "venue_id": 1 })).unwrap();
        assert_eq!(venue.quoted_price(), None);
    }

    #[test]
    fn flat_lists_only_fill_gaps_left_by_inclusions() {
        let inclusions: Vec<Inclusion> = serde_json::from_value(json!([
            { "type": "venue", "data": { "venue_id": 5 } },
            { "type": "venue", "data": { "venue_id": 6 } },
            { "type": "service", "data": { "add_service_id": 7 } }
        ]))
        .unwrap();
        let fallback_services: Vec<ServiceSelection> =
            serde_json::from_value(json!([{ "add_service_id": 99 }])).unwrap();
        let fallback_suppliers: Vec<SupplierSelection> =
            serde_json::from_value(json!([{ "supplier_id": 4, "price": 3000 }])).unwrap();

        let selections =
            PackageSelections::collect(inclusions, fallback_suppliers, fallback_services);

        assert_eq!(selections.venue.map(|v| v.venue_id), Some(5));
        assert!(selections.outfit.is_none());
        assert_eq!(selections.services.len(), 1);
        assert_eq!(selections.services[0].add_service_id, Some(7));
        assert_eq!(selections.suppliers.len(), 1);
        assert_eq!(selections.suppliers[0].supplier_id, 4);
    }
}
