mod common;

use std::{path::PathBuf, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use event_booking_api::{
    config::AppConfig,
    dto::suppliers::{AvailabilityQuery, SetAvailabilityRequest},
    entity::suppliers::ActiveModel as SupplierActive,
    error::AppError,
    routes::create_router,
    services::{package_service, supplier_service},
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, NotSet, Set};
use serde_json::json;
use tower::ServiceExt;

// Pool size is 10; every flow below is run with twice that many requests in flight.
const CONCURRENT_REQUESTS: usize = 20;

// Integration flow: supplier calendar -> package details -> supplier routes under load.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn supplier_calendar_and_packages() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };

    let state = common::setup_state(&database_url).await?;
    common::seed_catalog(&state).await?;

    let (supplier_user, supplier_token) = common::account(&state, "lightsmith", "Supplier").await?;
    let supplier_id = SupplierActive {
        supplier_id: NotSet,
        userid: Set(supplier_user),
        service: Set("Catering".into()),
        price: Set(Decimal::from(3000)),
        status: Set("Active".into()),
    }
    .insert(&state.orm)
    .await?
    .supplier_id;
    let (client_user, _) = common::account(&state, "jdelacruz", "Client").await?;

    availability_calendar(&state, supplier_id, client_user).await?;
    catalog_package_details(&state, supplier_id).await?;
    routes_under_load(&state, supplier_id, &supplier_token).await?;

    Ok(())
}

async fn availability_calendar(
    state: &AppState,
    supplier_id: i32,
    client_user: i32,
) -> anyhow::Result<()> {
    let not_supplier = supplier_service::supplier_id_for(&state.orm, client_user).await;
    assert!(matches!(not_supplier, Err(AppError::Forbidden(_))));

    let request = |body: serde_json::Value| -> anyhow::Result<SetAvailabilityRequest> {
        Ok(serde_json::from_value(body)?)
    };
    let mut conn = state.pool.acquire().await?;

    let missing = supplier_service::set_availability(&mut conn, supplier_id, request(json!({}))?).await;
    assert!(matches!(missing, Err(AppError::BadRequest(_))));

    let first = supplier_service::set_availability(
        &mut conn,
        supplier_id,
        request(json!({ "date": "2099-03-15" }))?,
    )
    .await?;
    assert!(first.is_available);

    // Same date again updates the existing row
    let second = supplier_service::set_availability(
        &mut conn,
        supplier_id,
        request(json!({ "date": "2099-03-15", "is_available": false, "reason": " Fully booked " }))?,
    )
    .await?;
    assert_eq!(second.availability_id, first.availability_id);
    assert!(!second.is_available);
    assert_eq!(second.reason.as_deref(), Some("Fully booked"));
    drop(conn);

    let listed = supplier_service::list_availability(
        &state.orm,
        supplier_id,
        AvailabilityQuery {
            start_date: Some("2099-03-01".into()),
            end_date: Some("2099-03-31".into()),
        },
    )
    .await?;
    assert_eq!(listed.len(), 1);
    assert!(!listed[0].is_available);

    supplier_service::delete_availability(&state.orm, supplier_id, "2099-03-15").await?;
    let again = supplier_service::delete_availability(&state.orm, supplier_id, "2099-03-15").await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    Ok(())
}

async fn catalog_package_details(state: &AppState, supplier_id: i32) -> anyhow::Result<()> {
    let mut conn = state.pool.acquire().await?;

    let (event_type_id,): (i32,) =
        sqlx::query_as("INSERT INTO event_type (event_type_name) VALUES ('Wedding') RETURNING event_type_id")
            .fetch_one(&mut *conn)
            .await?;

    let insert_package = r#"
        INSERT INTO event_packages (package_name, event_type_id, capacity, venue_id, gown_package_id, total_price, status)
        VALUES ($1, $2, 100, 5, 2, 25000, 'Active')
        RETURNING package_id
    "#;
    let (package_id,): (i32,) = sqlx::query_as(insert_package)
        .bind("Garden Wedding")
        .bind(event_type_id)
        .fetch_one(&mut *conn)
        .await?;
    let (bare_package_id,): (i32,) = sqlx::query_as(insert_package)
        .bind("Venue Only")
        .bind(event_type_id)
        .fetch_one(&mut *conn)
        .await?;

    let (linked,): (i32,) = sqlx::query_as(
        "INSERT INTO package_service (supplier_id, remarks) VALUES ($1, 'Buffet for 100') RETURNING package_service_id",
    )
    .bind(supplier_id)
    .fetch_one(&mut *conn)
    .await?;
    let (external,): (i32,) = sqlx::query_as(
        "INSERT INTO package_service (external_supplier_name, external_supplier_contact, external_supplier_price) \
         VALUES ('Lights Co', '0918', 450) RETURNING package_service_id",
    )
    .fetch_one(&mut *conn)
    .await?;
    for service_id in [linked, external] {
        sqlx::query("INSERT INTO event_package_services (package_id, package_service_id) VALUES ($1, $2)")
            .bind(package_id)
            .bind(service_id)
            .execute(&mut *conn)
            .await?;
    }

    let details = package_service::package_details(&mut conn, package_id).await?;
    assert_eq!(details.package_name, "Garden Wedding");
    assert_eq!(details.event_type_name.as_deref(), Some("Wedding"));
    assert_eq!(details.venue_price, Decimal::from(1200));
    assert_eq!(details.gown_package_price, Decimal::from(800));
    assert_eq!(details.package_service_ids, vec![Some(linked), Some(external)]);
    assert_eq!(details.supplier_ids, vec![Some(supplier_id), None]);
    assert_eq!(details.services, vec![Some("Catering".to_string()), None]);
    assert_eq!(details.service_prices, vec![Decimal::from(3000), Decimal::ZERO]);
    assert_eq!(
        details.supplier_emails,
        vec![Some("lightsmith@example.com".to_string()), None]
    );
    assert_eq!(details.remarks, vec![Some("Buffet for 100".to_string()), None]);

    let bare = package_service::package_details(&mut conn, bare_package_id).await?;
    assert!(bare.package_service_ids.is_empty());
    assert!(bare.supplier_ids.is_empty());
    assert!(bare.service_prices.is_empty());

    let missing = package_service::package_details(&mut conn, 9999).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}

/// Fire many requests at once; each must finish well inside the pool's acquire timeout.
async fn routes_under_load(
    state: &AppState,
    supplier_id: i32,
    supplier_token: &str,
) -> anyhow::Result<()> {
    let config = AppConfig {
        database_url: String::new(),
        jwt_secret: String::new(),
        host: "127.0.0.1".into(),
        port: 0,
        assets_dir: PathBuf::from("uploads"),
        cors_origins: Vec::new(),
    };
    let app: Router = create_router(&config).with_state(state.clone());
    let bearer = format!("Bearer {supplier_token}");

    let mut handles = Vec::new();
    for i in 0..CONCURRENT_REQUESTS {
        let requests = [
            Request::builder()
                .uri("/api/supplier/events")
                .header(header::AUTHORIZATION, &bearer)
                .body(Body::empty())?,
            Request::builder()
                .method(Method::POST)
                .uri("/api/supplier/availability")
                .header(header::AUTHORIZATION, &bearer)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "date": format!("2099-04-{:02}", i + 1) }).to_string(),
                ))?,
            Request::builder()
                .uri("/events-by-month")
                .body(Body::empty())?,
        ];
        for request in requests {
            let app = app.clone();
            let uri = request.uri().to_string();
            handles.push(tokio::spawn(async move {
                let outcome = tokio::time::timeout(Duration::from_secs(10), app.oneshot(request)).await;
                (uri, outcome.map(|response| response.map(|r| r.status())))
            }));
        }
    }

    for handle in handles {
        let (uri, outcome) = handle.await?;
        match outcome {
            Ok(Ok(status)) => assert_eq!(status, StatusCode::OK, "{uri}"),
            Ok(Err(infallible)) => match infallible {},
            Err(_) => panic!("{uri} did not finish within 10s"),
        }
    }

    let calendar = supplier_service::list_availability(
        &state.orm,
        supplier_id,
        AvailabilityQuery {
            start_date: Some("2099-04-01".into()),
            end_date: Some("2099-04-30".into()),
        },
    )
    .await?;
    assert_eq!(calendar.len(), CONCURRENT_REQUESTS);

    Ok(())
}
