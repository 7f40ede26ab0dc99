mod common;

use event_booking_api::{
    dto::{
        auth::{LoginRequest, RegisterRequest},
        events::CreateEventRequest,
        feedback::SubmitFeedbackRequest,
        wishlist::CreateWishlistPackageRequest,
    },
    error::AppError,
    services::{
        auth_service, event_service, feedback_service,
        wishlist_service::{self, WishlistScope},
    },
};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgConnection;

// Integration flow: register -> login -> event -> wishlist package -> feedback -> delete.
#[tokio::test]
async fn wishlist_package_lifecycle() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };

    let state = common::setup_state(&database_url).await?;
    common::seed_catalog(&state).await?;

    // Accounts
    let register: RegisterRequest = serde_json::from_value(json!({
        "firstName": "Maria",
        "lastName": "Clara",
        "username": "mclara",
        "email": "maria@example.com",
        "contactNumber": "09170000000",
        "password": "secret-pass",
    }))?;
    let userid = auth_service::register_user(&state.orm, register).await?.userid;

    let login = auth_service::login_user(
        &state.orm,
        &state.tokens,
        LoginRequest {
            identifier: Some("mclara".into()),
            password: Some("secret-pass".into()),
        },
    )
    .await?;
    assert_eq!(login.user_type, "Client");
    let claims = state.tokens.verify(&login.access_token)?;
    assert_eq!(claims.sub, userid.to_string());

    let wrong = auth_service::login_user(
        &state.orm,
        &state.tokens,
        LoginRequest {
            identifier: Some("maria@example.com".into()),
            password: Some("not-it".into()),
        },
    )
    .await;
    assert!(matches!(wrong, Err(AppError::Unauthorized(_))));

    // Event
    let mut conn = state.pool.acquire().await?;
    let event: CreateEventRequest = serde_json::from_value(json!({
        "event_name": "Our Wedding",
        "event_type": "Wedding",
        "schedule": "2099-06-01",
        "start_time": "14:00",
        "end_time": "18:30",
    }))?;
    let events_id = event_service::create_event(&mut conn, userid, event)
        .await?
        .events_id;

    // Events may run past midnight
    let overnight: CreateEventRequest = serde_json::from_value(json!({
        "event_name": "After Party",
        "event_type": "Wedding",
        "schedule": "2099-06-01",
        "start_time": "20:00",
        "end_time": "01:00",
    }))?;
    let overnight_id = event_service::create_event(&mut conn, userid, overnight)
        .await?
        .events_id;
    let times: (Option<chrono::NaiveTime>, Option<chrono::NaiveTime>) =
        sqlx::query_as("SELECT start_time, end_time FROM events WHERE events_id = $1")
            .bind(overnight_id)
            .fetch_one(&mut *conn)
            .await?;
    assert_eq!(times.0, chrono::NaiveTime::from_hms_opt(20, 0, 0));
    assert_eq!(times.1, chrono::NaiveTime::from_hms_opt(1, 0, 0));

    // Wishlist package with one venue and one gown package
    let package: CreateWishlistPackageRequest = serde_json::from_value(json!({
        "events_id": events_id,
        "package_name": "Garden Package",
        "capacity": 100,
        "inclusions": [
            { "type": "venue", "data": { "venue_id": 5, "price": 1000 } },
            { "type": "outfit", "data": { "gown_package_id": 2, "price": 500 } },
        ],
    }))?;
    let created = wishlist_service::create_wishlist_package(&mut conn, userid, package).await?;
    assert_eq!(created.total_price, Decimal::from(1500));

    // A failing supplier insert leaves no trace of the package
    let before = wishlist_row_counts(&mut conn, events_id).await?;
    let broken: CreateWishlistPackageRequest = serde_json::from_value(json!({
        "events_id": events_id,
        "package_name": "Broken Package",
        "inclusions": [
            { "type": "venue", "data": { "venue_id": 5, "price": 1000 } },
            { "type": "outfit", "data": { "gown_package_id": 2, "price": 500 } },
            { "type": "supplier", "data": { "supplier_id": 999, "price": 100 } },
        ],
    }))?;
    let failed = wishlist_service::create_wishlist_package(&mut conn, userid, broken).await;
    assert!(matches!(failed, Err(AppError::DbError(_))));
    assert_eq!(wishlist_row_counts(&mut conn, events_id).await?, before);

    let venue_rows: (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'Pending') FROM wishlist_venues WHERE wishlist_id = $1",
    )
    .bind(created.wishlist_id)
    .fetch_one(&mut *conn)
    .await?;
    assert_eq!(venue_rows, (1, 1));

    let outfit_rows: (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'Pending') FROM wishlist_outfits WHERE wishlist_id = $1",
    )
    .bind(created.wishlist_id)
    .fetch_one(&mut *conn)
    .await?;
    assert_eq!(outfit_rows, (1, 1));

    let wishlist = wishlist_service::list_wishlist(&mut conn, WishlistScope::User(userid)).await?;
    assert_eq!(wishlist.len(), 1);
    let body = serde_json::to_value(&wishlist[0])?;
    assert_eq!(body["package"]["suppliers"], json!([]));
    assert_eq!(body["package"]["additional_services"], json!([]));
    assert_eq!(body["package"]["venue"]["venue_id"], 5);
    assert_eq!(body["package"]["gown_package"]["gown_package_id"], 2);
    assert_eq!(body["package"]["total_price"], json!(1500.0));

    // Feedback is accepted once per (event, user)
    let feedback = || -> anyhow::Result<SubmitFeedbackRequest> {
        Ok(serde_json::from_value(json!({
            "events_id": events_id,
            "rating": 5,
            "feedback_text": "Lovely venue",
        }))?)
    };
    feedback_service::submit_feedback(&state.orm, userid, feedback()?).await?;
    let second = feedback_service::submit_feedback(&state.orm, userid, feedback()?).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
    let listed = feedback_service::list_feedback(&state.orm, events_id).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].user_firstname, "Maria");

    // Deleting the event removes it everywhere
    event_service::delete_event(&state.orm, userid, events_id).await?;
    let wishlist = wishlist_service::list_wishlist(&mut conn, WishlistScope::User(userid)).await?;
    assert!(wishlist.is_empty());
    let booked = event_service::booked_wishlist(&state.orm, userid).await?;
    assert!(booked.iter().all(|e| e.events_id != events_id));

    let again = event_service::delete_event(&state.orm, userid, events_id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    Ok(())
}

/// Package, venue and outfit rows hanging off one event.
async fn wishlist_row_counts(conn: &mut PgConnection, events_id: i32) -> anyhow::Result<(i64, i64, i64)> {
    let counts = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM wishlist_packages WHERE events_id = $1),
            (SELECT COUNT(*) FROM wishlist_venues wv
                JOIN wishlist_packages wp ON wv.wishlist_id = wp.wishlist_id
                WHERE wp.events_id = $1),
            (SELECT COUNT(*) FROM wishlist_outfits wo
                JOIN wishlist_packages wp ON wo.wishlist_id = wp.wishlist_id
                WHERE wp.events_id = $1)
        "#,
    )
    .bind(events_id)
    .fetch_one(conn)
    .await?;
    Ok(counts)
}
