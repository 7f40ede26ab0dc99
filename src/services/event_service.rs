use std::collections::{BTreeMap, HashMap};

use chrono::Local;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use sqlx::{Connection, PgConnection};

use crate::{
    dto::events::{
        CreateEventRequest, DEFAULT_BOOKING_TYPE, DEFAULT_EVENT_STATUS, EventCreated,
        PackageConfiguration,
    },
    entity::{Events, events},
    error::{AppError, AppResult},
    models::{BookedSchedule, Event, EventsByMonth},
};

const CANCELLED: &str = "Cancelled";

/// Insert an event, its package configuration and its extra items in one transaction.
pub async fn create_event(
    conn: &mut PgConnection,
    userid: i32,
    mut payload: CreateEventRequest,
) -> AppResult<EventCreated> {
    let config = payload.take_configuration();

    let mut tx = conn.begin().await?;

    if let Some(package_id) = payload.package_id {
        let exists: Option<(i32,)> =
            sqlx::query_as("SELECT package_id FROM event_packages WHERE package_id = $1")
                .bind(package_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(AppError::not_found("Package not found"));
        }
    }

    let (events_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO events (
            userid, event_name, event_type, event_theme, event_color, package_id, venue,
            schedule, start_time, end_time, status, total_price, booking_type
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING events_id
        "#,
    )
    .bind(userid)
    .bind(payload.event_name)
    .bind(payload.event_type)
    .bind(payload.event_theme)
    .bind(payload.event_color)
    .bind(payload.package_id)
    .bind(payload.venue)
    .bind(payload.schedule)
    .bind(payload.start_time)
    .bind(payload.end_time)
    .bind(
        payload
            .status
            .unwrap_or_else(|| DEFAULT_EVENT_STATUS.to_string()),
    )
    .bind(payload.total_price.unwrap_or(Decimal::ZERO))
    .bind(
        payload
            .booking_type
            .unwrap_or_else(|| DEFAULT_BOOKING_TYPE.to_string()),
    )
    .fetch_one(&mut *tx)
    .await?;

    match payload.package_id {
        Some(package_id) => {
            write_configuration(&mut *tx, events_id, package_id, &config).await?;
        }
        None if !config.suppliers.is_empty() || !config.outfits.is_empty() => {
            tracing::debug!(events_id, "supplier/outfit overrides ignored without a package");
        }
        None => {}
    }

    for service in &config.services {
        let (item_type, item_id) = match (service.package_service_id, service.catalog_service_id()) {
            (Some(id), _) => ("package_service", Some(id)),
            (None, Some(id)) => ("additional_service", Some(id)),
            (None, None) => continue,
        };
        insert_item(
            &mut *tx,
            events_id,
            item_type,
            item_id,
            service.price,
            service.remarks.as_deref(),
        )
        .await?;
    }

    for item in &payload.additional_items {
        insert_item(
            &mut *tx,
            events_id,
            &item.item_type,
            item.item_id,
            item.price,
            item.remarks.as_deref(),
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(userid, events_id, "event created");
    Ok(EventCreated { events_id })
}

async fn write_configuration(
    conn: &mut PgConnection,
    events_id: i32,
    package_id: i32,
    config: &PackageConfiguration,
) -> AppResult<()> {
    let (config_id,): (i32,) = sqlx::query_as(
        "INSERT INTO event_package_configurations (events_id, package_id) \
         VALUES ($1, $2) RETURNING config_id",
    )
    .bind(events_id)
    .bind(package_id)
    .fetch_one(&mut *conn)
    .await?;

    for supplier in &config.suppliers {
        let original = supplier.original_price.unwrap_or(supplier.price);
        sqlx::query(
            r#"
            INSERT INTO event_package_suppliers (
                config_id, supplier_id, original_price, modified_price, is_modified, is_removed, remarks
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(config_id)
        .bind(supplier.supplier_id)
        .bind(original)
        .bind(supplier.modified_price.unwrap_or(original))
        .bind(supplier.is_modified)
        .bind(supplier.is_removed)
        .bind(supplier.remarks.as_deref())
        .execute(&mut *conn)
        .await?;
    }

    for outfit in &config.outfits {
        let original = outfit.original_price.unwrap_or(outfit.price);
        sqlx::query(
            r#"
            INSERT INTO event_package_outfits (
                config_id, outfit_id, gown_package_id, original_price, modified_price,
                is_modified, is_removed, remarks
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(config_id)
        .bind(outfit.outfit_id)
        .bind(outfit.gown_package_id)
        .bind(original)
        .bind(outfit.modified_price.unwrap_or(original))
        .bind(outfit.is_modified)
        .bind(outfit.is_removed)
        .bind(outfit.remarks.as_deref())
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

async fn insert_item(
    conn: &mut PgConnection,
    events_id: i32,
    item_type: &str,
    item_id: Option<i32>,
    price: Decimal,
    remarks: Option<&str>,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO event_additional_items (events_id, item_type, item_id, price, remarks) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(events_id)
    .bind(item_type)
    .bind(item_id)
    .bind(price)
    .bind(remarks)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn booked_wishlist<C: ConnectionTrait>(db: &C, userid: i32) -> AppResult<Vec<Event>> {
    let items = Events::find()
        .filter(events::Column::Userid.eq(userid))
        .order_by_asc(events::Column::EventsId)
        .all(db)
        .await?
        .into_iter()
        .map(event_from_entity)
        .collect();
    Ok(items)
}

/// Delete one of the caller's events; wishlist packages and their rows cascade.
pub async fn delete_event<C: ConnectionTrait>(db: &C, userid: i32, events_id: i32) -> AppResult<()> {
    let result = Events::delete_many()
        .filter(events::Column::EventsId.eq(events_id))
        .filter(events::Column::Userid.eq(userid))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Event not found"));
    }
    tracing::info!(userid, events_id, "event deleted");
    Ok(())
}

/// Upcoming, non-cancelled slots that already have a date and both times.
pub async fn booked_schedules<C: ConnectionTrait>(db: &C) -> AppResult<Vec<BookedSchedule>> {
    let today = Local::now().date_naive();
    let rows = Events::find()
        .filter(events::Column::Schedule.gte(today))
        .filter(events::Column::StartTime.is_not_null())
        .filter(events::Column::EndTime.is_not_null())
        .filter(events::Column::Status.ne(CANCELLED))
        .order_by_asc(events::Column::Schedule)
        .order_by_asc(events::Column::StartTime)
        .all(db)
        .await?;

    let items = rows
        .into_iter()
        .filter_map(|e| {
            Some(BookedSchedule {
                schedule: e.schedule?.format("%Y-%m-%d").to_string(),
                start_time: e.start_time?.format("%H:%M").to_string(),
                end_time: e.end_time?.format("%H:%M").to_string(),
            })
        })
        .collect();
    Ok(items)
}

pub async fn upcoming_events<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Event>> {
    let today = Local::now().date_naive();
    let items = Events::find()
        .filter(events::Column::Schedule.gte(today))
        .order_by_asc(events::Column::Schedule)
        .order_by_asc(events::Column::StartTime)
        .all(db)
        .await?
        .into_iter()
        .map(event_from_entity)
        .collect();
    Ok(items)
}

pub async fn events_by_month(conn: &mut PgConnection) -> AppResult<EventsByMonth> {
    let types: Vec<String> =
        sqlx::query_scalar("SELECT event_type_name FROM event_type ORDER BY event_type_name")
            .fetch_all(&mut *conn)
            .await?;

    let counts: Vec<(String, i32, i64)> = sqlx::query_as(
        r#"
        SELECT event_type, EXTRACT(MONTH FROM schedule)::int AS month, COUNT(*) AS total
        FROM events
        WHERE schedule IS NOT NULL AND event_type IS NOT NULL
        GROUP BY event_type, month
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(tally_by_month(types, counts))
}

/// One twelve-slot series per known event type; counts for unknown types are dropped.
fn tally_by_month(types: Vec<String>, counts: Vec<(String, i32, i64)>) -> EventsByMonth {
    let mut by_type: HashMap<String, [i64; 12]> = HashMap::new();
    for (event_type, month, total) in counts {
        if let Some(slot) = usize::try_from(month - 1).ok().filter(|m| *m < 12) {
            by_type.entry(event_type).or_insert([0; 12])[slot] += total;
        }
    }

    let data: BTreeMap<String, Vec<i64>> = types
        .iter()
        .map(|name| {
            let series = by_type.get(name).copied().unwrap_or([0; 12]);
            (name.clone(), series.to_vec())
        })
        .collect();

    EventsByMonth {
        event_types: types,
        data,
    }
}

pub fn event_from_entity(model: events::Model) -> Event {
    Event {
        events_id: model.events_id,
        userid: model.userid,
        event_name: model.event_name,
        event_type: model.event_type,
        event_theme: model.event_theme,
        event_color: model.event_color,
        venue: model.venue,
        schedule: model.schedule,
        start_time: model.start_time,
        end_time: model.end_time,
        status: model.status,
        total_price: model.total_price,
        booking_type: model.booking_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_fill_twelve_slots_per_type() {
        let result = tally_by_month(
            vec!["Birthday".into(), "Wedding".into()],
            vec![
                ("Wedding".into(), 2, 3),
                ("Wedding".into(), 12, 1),
                ("Reunion".into(), 5, 9),
            ],
        );
        assert_eq!(result.event_types, vec!["Birthday", "Wedding"]);
        assert_eq!(result.data["Birthday"], vec![0; 12]);
        assert_eq!(result.data["Wedding"][1], 3);
        assert_eq!(result.data["Wedding"][11], 1);
        assert!(!result.data.contains_key("Reunion"));

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("eventTypes").is_some());
    }
}
