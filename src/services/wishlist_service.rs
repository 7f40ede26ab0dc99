//! Wishlist packages: the transactional writer and the read-side assembler.
//!
//! The read query pre-aggregates each child table into parallel arrays keyed by
//! `wishlist_id` and LEFT JOINs them onto the package row; rows are then
//! decomposed position by position into typed children.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{Connection, PgConnection};

use crate::{
    aggregate::{PgArray, at, money_at, positions},
    dto::wishlist::{
        CreateWishlistPackageRequest, PackageSelections, WishlistAdditionalService, WishlistEntry,
        WishlistEvent, WishlistGownPackage, WishlistOutfit, WishlistPackage,
        WishlistPackageCreated, WishlistSupplier, WishlistVenue,
    },
    error::{AppError, AppResult},
};

pub const PENDING: &str = "Pending";

/// Which events the assembler walks.
#[derive(Debug, Clone, Copy)]
pub enum WishlistScope {
    /// Every package on every event the user owns.
    User(i32),
    /// Packages on one event, provided the user owns it.
    Event { userid: i32, events_id: i32 },
}

impl WishlistScope {
    fn bindings(self) -> (i32, Option<i32>) {
        match self {
            WishlistScope::User(userid) => (userid, None),
            WishlistScope::Event { userid, events_id } => (userid, Some(events_id)),
        }
    }
}

const WISHLIST_QUERY: &str = r#"
WITH outfit_details AS (
    SELECT
        wo.wishlist_id,
        array_agg(wo.wishlist_outfit_id ORDER BY wo.wishlist_outfit_id, gpo.outfit_id) AS outfit_row_ids,
        array_agg(COALESCE(o.outfit_id, gpo_outfit.outfit_id) ORDER BY wo.wishlist_outfit_id, gpo.outfit_id) AS outfit_ids,
        array_agg(wo.gown_package_id ORDER BY wo.wishlist_outfit_id, gpo.outfit_id) AS outfit_gown_package_ids,
        array_agg(COALESCE(o.outfit_name, gpo_outfit.outfit_name) ORDER BY wo.wishlist_outfit_id, gpo.outfit_id) AS outfit_names,
        array_agg(COALESCE(o.outfit_type, gpo_outfit.outfit_type) ORDER BY wo.wishlist_outfit_id, gpo.outfit_id) AS outfit_types,
        array_agg(COALESCE(o.outfit_color, gpo_outfit.outfit_color) ORDER BY wo.wishlist_outfit_id, gpo.outfit_id) AS outfit_colors,
        array_agg(COALESCE(o.outfit_desc, gpo_outfit.outfit_desc) ORDER BY wo.wishlist_outfit_id, gpo.outfit_id) AS outfit_descs,
        array_agg(COALESCE(o.outfit_img, gpo_outfit.outfit_img) ORDER BY wo.wishlist_outfit_id, gpo.outfit_id) AS outfit_imgs,
        array_agg(wo.price ORDER BY wo.wishlist_outfit_id, gpo.outfit_id) AS outfit_prices,
        array_agg(wo.status ORDER BY wo.wishlist_outfit_id, gpo.outfit_id) AS outfit_statuses,
        array_agg(wo.remarks ORDER BY wo.wishlist_outfit_id, gpo.outfit_id) AS outfit_remarks
    FROM wishlist_outfits wo
    LEFT JOIN outfits o ON wo.outfit_id = o.outfit_id
    LEFT JOIN gown_package_outfits gpo
        ON wo.outfit_id IS NULL AND wo.gown_package_id = gpo.gown_package_id
    LEFT JOIN outfits gpo_outfit ON gpo.outfit_id = gpo_outfit.outfit_id
    GROUP BY wo.wishlist_id
),
supplier_details AS (
    SELECT
        ws.wishlist_id,
        array_agg(ws.supplier_id ORDER BY ws.wishlist_supplier_id) AS supplier_ids,
        array_agg(u.firstname || ' ' || u.lastname ORDER BY ws.wishlist_supplier_id) AS supplier_names,
        array_agg(s.service ORDER BY ws.wishlist_supplier_id) AS supplier_services,
        array_agg(ws.price ORDER BY ws.wishlist_supplier_id) AS supplier_prices,
        array_agg(ws.status ORDER BY ws.wishlist_supplier_id) AS supplier_statuses,
        array_agg(ws.remarks ORDER BY ws.wishlist_supplier_id) AS supplier_remarks
    FROM wishlist_suppliers ws
    LEFT JOIN suppliers s ON ws.supplier_id = s.supplier_id
    LEFT JOIN users u ON s.userid = u.userid
    GROUP BY ws.wishlist_id
),
additional_service_details AS (
    SELECT
        was.wishlist_id,
        array_agg(was.add_service_id ORDER BY was.wishlist_add_service_id) AS service_ids,
        array_agg(ads.add_service_name ORDER BY was.wishlist_add_service_id) AS service_names,
        array_agg(ads.add_service_description ORDER BY was.wishlist_add_service_id) AS service_descriptions,
        array_agg(was.price ORDER BY was.wishlist_add_service_id) AS service_prices,
        array_agg(was.status ORDER BY was.wishlist_add_service_id) AS service_statuses,
        array_agg(was.remarks ORDER BY was.wishlist_add_service_id) AS service_remarks
    FROM wishlist_additional_services was
    LEFT JOIN additional_services ads ON was.add_service_id = ads.add_service_id
    GROUP BY was.wishlist_id
)
SELECT
    e.events_id, e.event_name, e.event_type, e.event_theme, e.event_color,
    e.schedule, e.start_time, e.end_time, e.status AS event_status,
    wp.wishlist_id, wp.package_name, wp.capacity, wp.description AS package_description,
    wp.total_price, wp.additional_capacity_charges, wp.charge_unit, wp.status AS package_status,
    vd.venue_id, vd.venue_name, vd.location, vd.venue_price, vd.venue_description,
    vd.venue_capacity, vd.venue_status, vd.venue_remarks,
    gp.gown_package_id, gp.gown_package_name, gp.gown_package_price,
    od.outfit_row_ids, od.outfit_ids, od.outfit_gown_package_ids, od.outfit_names,
    od.outfit_types, od.outfit_colors, od.outfit_descs, od.outfit_imgs,
    od.outfit_prices, od.outfit_statuses, od.outfit_remarks,
    sd.supplier_ids, sd.supplier_names, sd.supplier_services, sd.supplier_prices,
    sd.supplier_statuses, sd.supplier_remarks,
    asd.service_ids, asd.service_names, asd.service_descriptions,
    asd.service_prices, asd.service_statuses, asd.service_remarks
FROM events e
JOIN wishlist_packages wp ON e.events_id = wp.events_id
LEFT JOIN LATERAL (
    SELECT
        v.venue_id, v.venue_name, v.location, wv.price AS venue_price,
        v.description AS venue_description, v.venue_capacity,
        wv.status AS venue_status, wv.remarks AS venue_remarks
    FROM wishlist_venues wv
    JOIN venues v ON wv.venue_id = v.venue_id
    WHERE wv.wishlist_id = wp.wishlist_id
    ORDER BY wv.wishlist_venue_id
    LIMIT 1
) vd ON TRUE
LEFT JOIN gown_package gp ON wp.gown_package_id = gp.gown_package_id
LEFT JOIN outfit_details od ON wp.wishlist_id = od.wishlist_id
LEFT JOIN supplier_details sd ON wp.wishlist_id = sd.wishlist_id
LEFT JOIN additional_service_details asd ON wp.wishlist_id = asd.wishlist_id
WHERE e.userid = $1
  AND ($2::int IS NULL OR e.events_id = $2)
  AND wp.status <> 'Cancelled'
ORDER BY wp.created_at DESC, wp.wishlist_id DESC
"#;

#[derive(Debug, Default, sqlx::FromRow)]
struct WishlistRow {
    events_id: i32,
    event_name: Option<String>,
    event_type: Option<String>,
    event_theme: Option<String>,
    event_color: Option<String>,
    schedule: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    event_status: String,

    wishlist_id: i32,
    package_name: Option<String>,
    capacity: Option<i32>,
    package_description: Option<String>,
    total_price: Decimal,
    additional_capacity_charges: Decimal,
    charge_unit: i32,
    package_status: String,

    venue_id: Option<i32>,
    venue_name: Option<String>,
    location: Option<String>,
    venue_price: Option<Decimal>,
    venue_description: Option<String>,
    venue_capacity: Option<i32>,
    venue_status: Option<String>,
    venue_remarks: Option<String>,

    gown_package_id: Option<i32>,
    gown_package_name: Option<String>,
    gown_package_price: Option<Decimal>,

    outfit_row_ids: PgArray<i32>,
    outfit_ids: PgArray<i32>,
    outfit_gown_package_ids: PgArray<i32>,
    outfit_names: PgArray<String>,
    outfit_types: PgArray<String>,
    outfit_colors: PgArray<String>,
    outfit_descs: PgArray<String>,
    outfit_imgs: PgArray<String>,
    outfit_prices: PgArray<Decimal>,
    outfit_statuses: PgArray<String>,
    outfit_remarks: PgArray<String>,

    supplier_ids: PgArray<i32>,
    supplier_names: PgArray<String>,
    supplier_services: PgArray<String>,
    supplier_prices: PgArray<Decimal>,
    supplier_statuses: PgArray<String>,
    supplier_remarks: PgArray<String>,

    service_ids: PgArray<i32>,
    service_names: PgArray<String>,
    service_descriptions: PgArray<String>,
    service_prices: PgArray<Decimal>,
    service_statuses: PgArray<String>,
    service_remarks: PgArray<String>,
}

pub async fn list_wishlist(
    conn: &mut PgConnection,
    scope: WishlistScope,
) -> AppResult<Vec<WishlistEntry>> {
    let (userid, events_id) = scope.bindings();
    let rows = sqlx::query_as::<_, WishlistRow>(WISHLIST_QUERY)
        .bind(userid)
        .bind(events_id)
        .fetch_all(&mut *conn)
        .await?;
    tracing::debug!(?scope, packages = rows.len(), "wishlist assembled");
    Ok(rows.into_iter().map(entry_from_row).collect())
}

fn status_at(column: &PgArray<String>, index: usize) -> String {
    at(column, index).unwrap_or_else(|| PENDING.to_string())
}

fn venue_of(row: &WishlistRow) -> Option<WishlistVenue> {
    Some(WishlistVenue {
        venue_id: row.venue_id?,
        venue_name: row.venue_name.clone().unwrap_or_default(),
        location: row.location.clone(),
        venue_price: row.venue_price.unwrap_or_default(),
        description: row.venue_description.clone(),
        venue_capacity: row.venue_capacity,
        status: row
            .venue_status
            .clone()
            .unwrap_or_else(|| PENDING.to_string()),
        remarks: row.venue_remarks.clone(),
    })
}

fn gown_package_of(row: &WishlistRow) -> Option<WishlistGownPackage> {
    Some(WishlistGownPackage {
        gown_package_id: row.gown_package_id?,
        gown_package_name: row.gown_package_name.clone().unwrap_or_default(),
        gown_package_price: row.gown_package_price.unwrap_or_default(),
    })
}

fn outfits_of(row: &WishlistRow) -> Vec<WishlistOutfit> {
    positions(&row.outfit_row_ids)
        .filter_map(|i| {
            Some(WishlistOutfit {
                wishlist_outfit_id: at(&row.outfit_row_ids, i)?,
                outfit_id: at(&row.outfit_ids, i),
                gown_package_id: at(&row.outfit_gown_package_ids, i),
                outfit_name: at(&row.outfit_names, i),
                outfit_type: at(&row.outfit_types, i),
                outfit_color: at(&row.outfit_colors, i),
                outfit_desc: at(&row.outfit_descs, i),
                outfit_img: at(&row.outfit_imgs, i),
                price: money_at(&row.outfit_prices, i),
                status: status_at(&row.outfit_statuses, i),
                remarks: at(&row.outfit_remarks, i),
            })
        })
        .collect()
}

fn suppliers_of(row: &WishlistRow) -> Vec<WishlistSupplier> {
    positions(&row.supplier_ids)
        .filter_map(|i| {
            Some(WishlistSupplier {
                supplier_id: at(&row.supplier_ids, i)?,
                name: at(&row.supplier_names, i),
                service: at(&row.supplier_services, i),
                price: money_at(&row.supplier_prices, i),
                status: status_at(&row.supplier_statuses, i),
                remarks: at(&row.supplier_remarks, i),
            })
        })
        .collect()
}

fn additional_services_of(row: &WishlistRow) -> Vec<WishlistAdditionalService> {
    positions(&row.service_ids)
        .filter_map(|i| {
            Some(WishlistAdditionalService {
                add_service_id: at(&row.service_ids, i)?,
                add_service_name: at(&row.service_names, i),
                add_service_description: at(&row.service_descriptions, i),
                add_service_price: money_at(&row.service_prices, i),
                status: status_at(&row.service_statuses, i),
                remarks: at(&row.service_remarks, i),
            })
        })
        .collect()
}

fn entry_from_row(row: WishlistRow) -> WishlistEntry {
    let venue = venue_of(&row);
    let gown_package = gown_package_of(&row);
    let outfits = outfits_of(&row);
    let suppliers = suppliers_of(&row);
    let additional_services = additional_services_of(&row);

    WishlistEntry {
        event: WishlistEvent {
            events_id: row.events_id,
            event_name: row.event_name,
            event_type: row.event_type,
            event_theme: row.event_theme,
            event_color: row.event_color,
            schedule: row.schedule,
            start_time: row.start_time,
            end_time: row.end_time,
            status: row.event_status,
        },
        package: WishlistPackage {
            wishlist_id: row.wishlist_id,
            package_name: row.package_name,
            capacity: row.capacity,
            description: row.package_description,
            total_price: row.total_price,
            additional_capacity_charges: row.additional_capacity_charges,
            charge_unit: row.charge_unit,
            status: row.package_status,
            venue,
            gown_package,
            outfits,
            suppliers,
            additional_services,
        },
    }
}

/// Sum of the selection prices, stored on the package when it is written.
///
/// Never recomputed afterwards; edits to the child rows leave it stale.
fn selection_total(venue_price: Decimal, selections: &PackageSelections) -> Decimal {
    venue_price
        + selections.outfit.as_ref().map_or(Decimal::ZERO, |o| o.price)
        + selections.services.iter().map(|s| s.price).sum::<Decimal>()
        + selections.suppliers.iter().map(|s| s.price).sum::<Decimal>()
}

/// Create a package with its venue, outfit, service and supplier rows in one
/// transaction. Any failed insert rolls the whole package back.
pub async fn create_wishlist_package(
    conn: &mut PgConnection,
    userid: i32,
    payload: CreateWishlistPackageRequest,
) -> AppResult<WishlistPackageCreated> {
    let Some(events_id) = payload.events_id else {
        return Err(AppError::bad_request("Event ID is required"));
    };

    let mut selections =
        PackageSelections::collect(payload.inclusions, payload.suppliers, payload.services);
    if let Some(outfit) = &selections.outfit {
        if outfit.gown_package_id.is_none() && outfit.outfit_id.is_none() {
            return Err(AppError::bad_request(
                "Outfit inclusion needs a gown_package_id or an outfit_id",
            ));
        }
    }
    selections.services.retain(|service| {
        let keep = service.catalog_service_id().is_some();
        if !keep {
            tracing::warn!(events_id, "service inclusion without a service id skipped");
        }
        keep
    });

    let mut tx = conn.begin().await?;

    let owned: Option<(i32,)> =
        sqlx::query_as("SELECT events_id FROM events WHERE events_id = $1 AND userid = $2")
            .bind(events_id)
            .bind(userid)
            .fetch_optional(&mut *tx)
            .await?;
    if owned.is_none() {
        return Err(AppError::not_found("Event not found"));
    }

    let venue_price = match &selections.venue {
        Some(venue) => {
            let listed: Option<(Decimal,)> =
                sqlx::query_as("SELECT venue_price FROM venues WHERE venue_id = $1")
                    .bind(venue.venue_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            let Some((listed_price,)) = listed else {
                return Err(AppError::not_found("Venue not found"));
            };
            venue.quoted_price().unwrap_or(listed_price)
        }
        None => Decimal::ZERO,
    };
    let total_price = selection_total(venue_price, &selections);

    let (wishlist_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO wishlist_packages (
            events_id, package_name, capacity, description, venue_id, gown_package_id,
            additional_capacity_charges, charge_unit, total_price, event_type_id, status,
            venue_status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING wishlist_id
        "#,
    )
    .bind(events_id)
    .bind(payload.package_name)
    .bind(payload.capacity)
    .bind(payload.description)
    .bind(selections.venue.as_ref().map(|v| v.venue_id))
    .bind(selections.outfit.as_ref().and_then(|o| o.gown_package_id))
    .bind(payload.additional_capacity_charges)
    .bind(payload.charge_unit.unwrap_or(1))
    .bind(total_price)
    .bind(payload.event_type_id)
    .bind(payload.status.unwrap_or_else(|| "Active".to_string()))
    .bind(PENDING)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(venue) = &selections.venue {
        sqlx::query(
            "INSERT INTO wishlist_venues (wishlist_id, venue_id, price, remarks, status) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(wishlist_id)
        .bind(venue.venue_id)
        .bind(venue_price)
        .bind(venue.remarks.as_deref())
        .bind(PENDING)
        .execute(&mut *tx)
        .await?;
    }

    if let Some(outfit) = &selections.outfit {
        sqlx::query(
            "INSERT INTO wishlist_outfits (wishlist_id, outfit_id, gown_package_id, price, remarks, status) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(wishlist_id)
        .bind(outfit.outfit_id)
        .bind(outfit.gown_package_id)
        .bind(outfit.price)
        .bind(outfit.remarks.as_deref())
        .bind(PENDING)
        .execute(&mut *tx)
        .await?;
    }

    for service in &selections.services {
        sqlx::query(
            "INSERT INTO wishlist_additional_services (wishlist_id, add_service_id, price, remarks, status) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(wishlist_id)
        .bind(service.catalog_service_id())
        .bind(service.price)
        .bind(service.remarks.as_deref())
        .bind(PENDING)
        .execute(&mut *tx)
        .await?;
    }

    for supplier in &selections.suppliers {
        sqlx::query(
            "INSERT INTO wishlist_suppliers (wishlist_id, supplier_id, price, remarks, status) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(wishlist_id)
        .bind(supplier.supplier_id)
        .bind(supplier.price)
        .bind(supplier.remarks.as_deref())
        .bind(PENDING)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(events_id, wishlist_id, %total_price, "wishlist package created");
    Ok(WishlistPackageCreated {
        wishlist_id,
        total_price,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::dto::wishlist::Inclusion;

    fn base_row() -> WishlistRow {
        WishlistRow {
            events_id: 11,
            event_status: "Wishlist".into(),
            wishlist_id: 21,
            total_price: Decimal::from(1500),
            charge_unit: 1,
            package_status: "Active".into(),
            ..Default::default()
        }
    }

    #[test]
    fn null_marker_aggregates_yield_empty_children() {
        let mut row = base_row();
        row.supplier_ids = Some(vec![None]);
        row.supplier_names = Some(vec![None]);
        row.supplier_prices = Some(vec![None]);
        row.service_ids = None;

        let entry = entry_from_row(row);
        assert!(entry.package.suppliers.is_empty());
        assert!(entry.package.additional_services.is_empty());
        assert!(entry.package.outfits.is_empty());
        assert!(entry.package.venue.is_none());

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["package"]["suppliers"], json!([]));
        assert_eq!(json["package"]["additional_services"], json!([]));
    }

    #[test]
    fn parallel_columns_zip_into_children() {
        let mut row = base_row();
        row.supplier_ids = Some(vec![Some(3), Some(8)]);
        row.supplier_names = Some(vec![Some("John Doe".into()), Some("Jane Smith".into())]);
        row.supplier_services = Some(vec![Some("Catering".into()), None]);
        row.supplier_prices = Some(vec![Some(Decimal::from(5000)), None]);
        row.supplier_statuses = Some(vec![Some("Approved".into()), None]);
        row.supplier_remarks = Some(vec![None, Some("weekend only".into())]);

        let suppliers = suppliers_of(&row);
        assert_eq!(suppliers.len(), 2);
        assert_eq!(suppliers[0].supplier_id, 3);
        assert_eq!(suppliers[0].status, "Approved");
        assert_eq!(suppliers[1].name.as_deref(), Some("Jane Smith"));
        assert_eq!(suppliers[1].price, Decimal::ZERO);
        assert_eq!(suppliers[1].status, PENDING);
        assert_eq!(suppliers[1].remarks.as_deref(), Some("weekend only"));
    }

    #[test]
    fn gown_package_rows_expand_to_outfits() {
        let mut row = base_row();
        row.gown_package_id = Some(2);
        row.gown_package_name = Some("Bridal Set".into());
        row.outfit_row_ids = Some(vec![Some(40), Some(40)]);
        row.outfit_ids = Some(vec![Some(7), Some(9)]);
        row.outfit_gown_package_ids = Some(vec![Some(2), Some(2)]);
        row.outfit_names = Some(vec![Some("Gown".into()), Some("Veil".into())]);
        row.outfit_prices = Some(vec![Some(Decimal::from(500)), Some(Decimal::from(500))]);

        let entry = entry_from_row(row);
        let outfits = &entry.package.outfits;
        assert_eq!(outfits.len(), 2);
        assert_eq!(outfits[1].outfit_id, Some(9));
        assert_eq!(outfits[1].gown_package_id, Some(2));
        assert_eq!(
            entry.package.gown_package.map(|g| g.gown_package_name),
            Some("Bridal Set".to_string())
        );
    }

    #[test]
    fn venue_is_built_only_when_joined() {
        let mut row = base_row();
        row.venue_id = Some(5);
        row.venue_name = Some("Ocean View".into());
        row.venue_price = Some(Decimal::from(1000));
        let venue = venue_of(&row).unwrap();
        assert_eq!(venue.venue_price, Decimal::from(1000));
        assert_eq!(venue.status, PENDING);
    }

    #[test]
    fn total_sums_every_selection() {
        let inclusions: Vec<Inclusion> = serde_json::from_value(json!([
            { "type": "venue", "data": { "venue_id": 5, "price": 1000 } },
            { "type": "outfit", "data": { "gown_package_id": 2, "price": 500 } },
            { "type": "service", "data": { "add_service_id": 1, "price": 120.25 } },
            { "type": "supplier", "data": { "supplier_id": 3, "price": 2000 } }
        ]))
        .unwrap();
        let selections = PackageSelections::collect(inclusions, Vec::new(), Vec::new());
        let venue_price = selections.venue.as_ref().and_then(|v| v.quoted_price()).unwrap();
        assert_eq!(
            selection_total(venue_price, &selections),
            Decimal::new(362_025, 2)
        );
    }

    #[test]
    fn scopes_bind_owner_and_optional_event() {
        assert_eq!(WishlistScope::User(4).bindings(), (4, None));
        assert_eq!(
            WishlistScope::Event {
                userid: 4,
                events_id: 9
            }
            .bindings(),
            (4, Some(9))
        );
    }
}
