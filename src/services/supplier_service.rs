use chrono::{Local, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use sqlx::{PgConnection, types::Json};

use crate::{
    dto::suppliers::{AvailabilityQuery, SetAvailabilityRequest, SupplierEvent, SupplierEventOutfit},
    entity::{SupplierAvailability, Suppliers, supplier_availability, suppliers},
    error::{AppError, AppResult},
    models::Availability,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Supplier row owned by the caller; callers without one are forbidden.
pub async fn supplier_id_for<C: ConnectionTrait>(db: &C, userid: i32) -> AppResult<i32> {
    Suppliers::find()
        .filter(suppliers::Column::Userid.eq(userid))
        .one(db)
        .await?
        .map(|s| s.supplier_id)
        .ok_or_else(|| AppError::Forbidden("User is not a supplier".into()))
}

pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("Invalid date format, expected YYYY-MM-DD"))
}

fn optional_date(raw: Option<&str>) -> AppResult<Option<NaiveDate>> {
    raw.map(str::trim)
        .filter(|r| !r.is_empty())
        .map(parse_date)
        .transpose()
}

#[derive(Debug, sqlx::FromRow)]
struct SupplierEventRow {
    events_id: i32,
    event_name: Option<String>,
    event_type: Option<String>,
    event_theme: Option<String>,
    event_color: Option<String>,
    schedule: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    event_status: String,
    event_total_price: Decimal,
    booking_type: String,
    client_firstname: String,
    client_lastname: String,
    client_contact: String,
    client_address: Option<String>,
    booking_status: String,
    supplier_price: Decimal,
    booking_remarks: Option<String>,
    supplier_service: String,
    supplier_username: String,
    package_name: Option<String>,
    venue_status: String,
    venue_id: Option<i32>,
    venue_name: Option<String>,
    venue_location: Option<String>,
    venue_price: Option<Decimal>,
    venue_description: Option<String>,
    venue_capacity: Option<i32>,
    venue_image: Option<String>,
    booked_venue_price: Option<Decimal>,
    outfit_details: Json<Vec<SupplierEventOutfit>>,
}

/// Events where this supplier's selection was approved, upcoming ones first.
pub async fn booked_events(
    conn: &mut PgConnection,
    supplier_id: i32,
) -> AppResult<Vec<SupplierEvent>> {
    let rows = sqlx::query_as::<_, SupplierEventRow>(
        r#"
        WITH outfit_info AS (
            SELECT
                wo.wishlist_id,
                json_agg(
                    json_build_object(
                        'wishlist_outfit_id', wo.wishlist_outfit_id,
                        'outfit_id', o.outfit_id,
                        'outfit_name', o.outfit_name,
                        'outfit_type', o.outfit_type,
                        'outfit_color', o.outfit_color,
                        'outfit_desc', o.outfit_desc,
                        'outfit_img', o.outfit_img,
                        'gown_package_id', wo.gown_package_id,
                        'gown_package_name', gp.gown_package_name,
                        'gown_package_price', gp.gown_package_price,
                        'price', wo.price,
                        'status', wo.status,
                        'remarks', wo.remarks,
                        'created_at', to_char(wo.created_at, 'YYYY-MM-DD HH24:MI:SS'),
                        'has_been_updated', wo.has_been_updated
                    )
                    ORDER BY wo.wishlist_outfit_id
                ) AS outfit_details
            FROM wishlist_outfits wo
            LEFT JOIN outfits o ON wo.outfit_id = o.outfit_id
            LEFT JOIN gown_package gp ON wo.gown_package_id = gp.gown_package_id
            GROUP BY wo.wishlist_id
        )
        SELECT
            e.events_id, e.event_name, e.event_type, e.event_theme, e.event_color,
            e.schedule, e.start_time, e.end_time,
            e.status AS event_status,
            e.total_price AS event_total_price,
            e.booking_type,
            client.firstname AS client_firstname,
            client.lastname AS client_lastname,
            client.contactnumber AS client_contact,
            client.address AS client_address,
            ws.status AS booking_status,
            ws.price AS supplier_price,
            ws.remarks AS booking_remarks,
            supp.service AS supplier_service,
            u.username AS supplier_username,
            wp.package_name,
            wp.venue_status,
            v.venue_id,
            v.venue_name,
            v.location AS venue_location,
            v.venue_price,
            v.description AS venue_description,
            v.venue_capacity,
            v.image AS venue_image,
            wv.price AS booked_venue_price,
            COALESCE(oi.outfit_details, '[]'::json) AS outfit_details
        FROM events e
        JOIN users client ON e.userid = client.userid
        JOIN wishlist_packages wp ON e.events_id = wp.events_id
        JOIN wishlist_suppliers ws ON wp.wishlist_id = ws.wishlist_id
        JOIN suppliers supp ON ws.supplier_id = supp.supplier_id
        JOIN users u ON supp.userid = u.userid
        LEFT JOIN LATERAL (
            SELECT venue_id, price
            FROM wishlist_venues
            WHERE wishlist_id = wp.wishlist_id
            ORDER BY wishlist_venue_id
            LIMIT 1
        ) wv ON TRUE
        LEFT JOIN venues v ON v.venue_id = COALESCE(wp.venue_id, wv.venue_id)
        LEFT JOIN outfit_info oi ON wp.wishlist_id = oi.wishlist_id
        WHERE supp.supplier_id = $1
          AND UPPER(ws.status) = 'APPROVED'
        ORDER BY
            CASE
                WHEN e.schedule > CURRENT_DATE THEN 1
                WHEN e.schedule = CURRENT_DATE THEN 2
                ELSE 3
            END,
            e.schedule ASC,
            e.start_time ASC
        "#,
    )
    .bind(supplier_id)
    .fetch_all(conn)
    .await?;

    let today = Local::now().date_naive();
    tracing::debug!(supplier_id, events = rows.len(), "supplier events loaded");
    Ok(rows
        .into_iter()
        .map(|row| supplier_event_from_row(row, today))
        .collect())
}

fn supplier_event_from_row(row: SupplierEventRow, today: NaiveDate) -> SupplierEvent {
    SupplierEvent {
        events_id: row.events_id,
        event_name: row.event_name,
        event_type: row.event_type,
        event_theme: row.event_theme,
        event_color: row.event_color,
        is_upcoming: row.schedule.is_some_and(|d| d >= today),
        schedule: row.schedule.map(|d| d.format("%Y-%m-%d").to_string()),
        start_time: row.start_time.map(|t| t.format("%H:%M:%S").to_string()),
        end_time: row.end_time.map(|t| t.format("%H:%M:%S").to_string()),
        event_status: row.event_status,
        event_total_price: row.event_total_price,
        booking_type: row.booking_type,
        client_firstname: row.client_firstname,
        client_lastname: row.client_lastname,
        client_contact: row.client_contact,
        client_address: row.client_address,
        booking_status: row.booking_status,
        supplier_price: row.supplier_price,
        booking_remarks: row.booking_remarks,
        supplier_service: row.supplier_service,
        supplier_username: row.supplier_username,
        package_name: row.package_name,
        venue_status: row.venue_status,
        venue_id: row.venue_id,
        venue_name: row.venue_name,
        venue_location: row.venue_location,
        venue_price: row.venue_price,
        venue_description: row.venue_description,
        venue_capacity: row.venue_capacity,
        venue_image: row.venue_image,
        booked_venue_price: row.booked_venue_price,
        outfit_details: row.outfit_details.0,
    }
}

pub async fn list_availability<C: ConnectionTrait>(
    db: &C,
    supplier_id: i32,
    query: AvailabilityQuery,
) -> AppResult<Vec<Availability>> {
    let start = optional_date(query.start_date.as_deref())?;
    let end = optional_date(query.end_date.as_deref())?;
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(AppError::bad_request("start_date must not be after end_date"));
        }
    }

    let mut finder = SupplierAvailability::find()
        .filter(supplier_availability::Column::SupplierId.eq(supplier_id));
    if let Some(start) = start {
        finder = finder.filter(supplier_availability::Column::AvailableOn.gte(start));
    }
    if let Some(end) = end {
        finder = finder.filter(supplier_availability::Column::AvailableOn.lte(end));
    }

    let items = finder
        .order_by_asc(supplier_availability::Column::AvailableOn)
        .all(db)
        .await?
        .into_iter()
        .map(availability_from_entity)
        .collect();
    Ok(items)
}

#[derive(Debug, sqlx::FromRow)]
struct AvailabilityRow {
    availability_id: i32,
    supplier_id: i32,
    date: NaiveDate,
    is_available: bool,
    reason: Option<String>,
    created_at: String,
    updated_at: String,
}

/// Insert or replace the availability entry for one date.
pub async fn set_availability(
    conn: &mut PgConnection,
    supplier_id: i32,
    payload: SetAvailabilityRequest,
) -> AppResult<Availability> {
    let Some(raw_date) = payload.date.as_deref().filter(|d| !d.trim().is_empty()) else {
        return Err(AppError::bad_request("Date is required"));
    };
    let date = parse_date(raw_date)?;
    let reason = payload
        .reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let row = sqlx::query_as::<_, AvailabilityRow>(
        r#"
        INSERT INTO supplier_availability (supplier_id, date, is_available, reason)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (supplier_id, date)
        DO UPDATE SET
            is_available = EXCLUDED.is_available,
            reason = EXCLUDED.reason,
            updated_at = CURRENT_TIMESTAMP
        RETURNING
            availability_id, supplier_id, date, is_available, reason,
            to_char(created_at, 'YYYY-MM-DD HH24:MI:SS') AS created_at,
            to_char(updated_at, 'YYYY-MM-DD HH24:MI:SS') AS updated_at
        "#,
    )
    .bind(supplier_id)
    .bind(date)
    .bind(payload.is_available)
    .bind(reason)
    .fetch_one(conn)
    .await?;

    tracing::info!(supplier_id, %date, is_available = row.is_available, "availability set");
    Ok(Availability {
        availability_id: row.availability_id,
        supplier_id: row.supplier_id,
        date: row.date,
        is_available: row.is_available,
        reason: row.reason,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub async fn delete_availability<C: ConnectionTrait>(
    db: &C,
    supplier_id: i32,
    raw_date: &str,
) -> AppResult<()> {
    let date = parse_date(raw_date)?;
    let result = SupplierAvailability::delete_many()
        .filter(supplier_availability::Column::SupplierId.eq(supplier_id))
        .filter(supplier_availability::Column::AvailableOn.eq(date))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found(
            "No availability record found for this date",
        ));
    }
    Ok(())
}

fn availability_from_entity(model: supplier_availability::Model) -> Availability {
    Availability {
        availability_id: model.availability_id,
        supplier_id: model.supplier_id,
        date: model.available_on,
        is_available: model.is_available,
        reason: model.reason,
        created_at: model.created_at.format(TIMESTAMP_FORMAT).to_string(),
        updated_at: model.updated_at.format(TIMESTAMP_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_must_be_iso() {
        assert_eq!(
            parse_date("2030-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()
        );
        assert!(matches!(parse_date("06/01/2030"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_date("2030-02-30"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn blank_range_bounds_are_ignored() {
        assert_eq!(optional_date(Some("  ")).unwrap(), None);
        assert_eq!(optional_date(None).unwrap(), None);
        assert!(optional_date(Some("tomorrow")).is_err());
    }
}
