use event_booking_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    security::hash_password,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

const EVENT_TYPES: &[&str] = &[
    "Wedding",
    "Birthday",
    "Corporate Event",
    "Anniversary",
    "Graduation",
    "Family Gathering",
    "Reunion",
    "Conference",
    "Seminar",
    "Other",
];

struct TestSupplier {
    firstname: &'static str,
    lastname: &'static str,
    username: &'static str,
    email: &'static str,
    contactnumber: &'static str,
    service: &'static str,
}

const TEST_SUPPLIERS: &[TestSupplier] = &[
    TestSupplier {
        firstname: "John",
        lastname: "Doe",
        username: "johndoe",
        email: "john.doe@example.com",
        contactnumber: "09171234567",
        service: "Photography",
    },
    TestSupplier {
        firstname: "Jane",
        lastname: "Smith",
        username: "janesmith",
        email: "jane.smith@example.com",
        contactnumber: "09181234567",
        service: "Catering",
    },
    TestSupplier {
        firstname: "Mike",
        lastname: "Johnson",
        username: "mikejohnson",
        email: "mike.johnson@example.com",
        contactnumber: "09191234567",
        service: "Sound and Lights",
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    seed_event_types(&pool).await?;
    for supplier in TEST_SUPPLIERS {
        ensure_supplier(&pool, supplier).await?;
    }

    tracing::info!("seed completed");
    Ok(())
}

async fn seed_event_types(pool: &PgPool) -> anyhow::Result<()> {
    for name in EVENT_TYPES {
        sqlx::query("INSERT INTO event_type (event_type_name) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(*name)
            .execute(pool)
            .await?;
    }
    tracing::info!(count = EVENT_TYPES.len(), "event types ensured");
    Ok(())
}

async fn ensure_supplier(pool: &PgPool, supplier: &TestSupplier) -> anyhow::Result<()> {
    let password = hash_password("password123")?;

    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO users (firstname, lastname, username, email, contactnumber, password, user_type)
        VALUES ($1, $2, $3, $4, $5, $6, 'Supplier')
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(supplier.firstname)
    .bind(supplier.lastname)
    .bind(supplier.username)
    .bind(supplier.email)
    .bind(supplier.contactnumber)
    .bind(password)
    .execute(&mut *tx)
    .await?;

    let (userid,): (i32,) = sqlx::query_as("SELECT userid FROM users WHERE email = $1")
        .bind(supplier.email)
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO suppliers (userid, service, price, status)
        VALUES ($1, $2, $3, 'Active')
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(userid)
    .bind(supplier.service)
    .bind(Decimal::from(5000))
    .execute(&mut *tx)
    .await?;

    let (supplier_id,): (i32,) = sqlx::query_as("SELECT supplier_id FROM suppliers WHERE userid = $1")
        .bind(userid)
        .fetch_one(&mut *tx)
        .await?;

    let handle = format!("{}_events", supplier.username);
    for (platform, base) in [
        ("facebook", "https://facebook.com"),
        ("instagram", "https://instagram.com"),
    ] {
        sqlx::query(
            r#"
            INSERT INTO supplier_social_media (supplier_id, platform, handle, url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(supplier_id)
        .bind(platform)
        .bind(&handle)
        .bind(format!("{base}/{handle}"))
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!(email = supplier.email, supplier_id, "test supplier ensured");
    Ok(())
}
