#![allow(dead_code)]

use event_booking_api::{
    db::{DbPool, create_orm_conn, create_pool, run_migrations},
    dto::auth::{LoginRequest, RegisterRequest},
    entity::{gown_package::ActiveModel as GownPackageActive, venues::ActiveModel as VenueActive},
    services::auth_service,
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use serde_json::json;

/// Database for integration flows, or `None` to skip them.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            None
        }
    }
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool: DbPool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    let orm = create_orm_conn(&pool);

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE users, venues, gown_package, outfits, additional_services, event_type, event_packages, package_service RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState::new(pool, orm, "integration-test-secret"))
}

pub async fn seed_catalog(state: &AppState) -> anyhow::Result<()> {
    VenueActive {
        venue_id: Set(5),
        venue_name: Set("Garden Pavilion".into()),
        location: Set(Some("Tagaytay".into())),
        venue_price: Set(Decimal::from(1200)),
        description: Set(None),
        venue_capacity: Set(Some(150)),
        image: Set(None),
        status: Set("Active".into()),
    }
    .insert(&state.orm)
    .await?;

    GownPackageActive {
        gown_package_id: Set(2),
        gown_package_name: Set("Bridal Set".into()),
        gown_package_price: Set(Decimal::from(800)),
        description: Set(None),
        status: Set("Active".into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(())
}

/// Register an account and return its id with a fresh access token.
pub async fn account(
    state: &AppState,
    username: &str,
    user_type: &str,
) -> anyhow::Result<(i32, String)> {
    let register: RegisterRequest = serde_json::from_value(json!({
        "firstName": "Test",
        "lastName": username,
        "username": username,
        "email": format!("{username}@example.com"),
        "contactNumber": "09170000000",
        "password": "secret-pass",
        "user_type": user_type,
    }))?;
    let userid = auth_service::register_user(&state.orm, register).await?.userid;

    let login = auth_service::login_user(
        &state.orm,
        &state.tokens,
        LoginRequest {
            identifier: Some(username.into()),
            password: Some("secret-pass".into()),
        },
    )
    .await?;
    Ok((userid, login.access_token))
}
