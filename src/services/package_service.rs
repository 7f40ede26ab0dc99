use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::{
    aggregate::{PgArray, money_or_empty, present_or_empty},
    dto::packages::{
        PackageAdditionalService, PackageDetails, PackageGownPackage, PackageSummary,
        PackageSupplier, PackageVenue,
    },
    error::{AppError, AppResult},
};

/// Venue images shipped with the client bundle rather than uploaded.
const BUNDLED_VENUE_IMAGES: [&str; 5] = [
    "grandballroom.png",
    "hogwarts.png",
    "oceanview.png",
    "paseo.png",
    "sealavie.png",
];

/// Map a stored venue image path to the URL the client should load.
pub fn venue_image_url(stored: &str) -> String {
    let file = stored
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(stored);
    if BUNDLED_VENUE_IMAGES.iter().any(|img| file.ends_with(img)) {
        format!("/img/venues-img/{file}")
    } else {
        format!("/api/venue-image/{file}")
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PackageRow {
    package_id: i32,
    package_name: String,
    event_type: String,
    capacity: i32,
    description: String,
    additional_capacity_charges: Decimal,
    charge_unit: i32,
    total_price: Decimal,
    status: String,
    created_at: Option<String>,
    venue_id: Option<i32>,
    venue_name: Option<String>,
    venue_location: Option<String>,
    venue_price: Option<Decimal>,
    venue_capacity: Option<i32>,
    venue_description: Option<String>,
    venue_image: Option<String>,
    gown_package_id: Option<i32>,
    gown_package_name: Option<String>,
    gown_package_price: Option<Decimal>,
    gown_package_description: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct PackageSupplierRow {
    package_id: i32,
    supplier_id: i32,
    firstname: String,
    lastname: String,
    service: String,
    price: Decimal,
    remarks: String,
}

#[derive(Debug, sqlx::FromRow)]
struct PackageServiceRow {
    package_id: i32,
    add_service_id: i32,
    add_service_name: String,
    add_service_price: Decimal,
}

/// Active catalog packages with venue, gown package, suppliers and add-ons.
pub async fn created_packages(conn: &mut PgConnection) -> AppResult<Vec<PackageSummary>> {
    let rows = sqlx::query_as::<_, PackageRow>(
        r#"
        SELECT
            p.package_id,
            p.package_name,
            COALESCE(et.event_type_name, 'Unknown') AS event_type,
            COALESCE(p.capacity, 0) AS capacity,
            COALESCE(p.description, '') AS description,
            COALESCE(p.additional_capacity_charges, 0) AS additional_capacity_charges,
            COALESCE(p.charge_unit, 1) AS charge_unit,
            COALESCE(p.total_price, 0) AS total_price,
            COALESCE(p.status, 'Active') AS status,
            to_char(p.created_at, 'YYYY-MM-DD') AS created_at,
            v.venue_id,
            v.venue_name,
            v.location AS venue_location,
            v.venue_price,
            v.venue_capacity,
            v.description AS venue_description,
            v.image AS venue_image,
            gp.gown_package_id,
            gp.gown_package_name,
            gp.gown_package_price,
            gp.description AS gown_package_description
        FROM event_packages p
        LEFT JOIN venues v ON p.venue_id = v.venue_id
        LEFT JOIN gown_package gp ON p.gown_package_id = gp.gown_package_id
        LEFT JOIN event_type et ON p.event_type_id = et.event_type_id
        WHERE UPPER(COALESCE(p.status, 'Active')) = 'ACTIVE'
        ORDER BY p.created_at DESC, p.package_id DESC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = rows.iter().map(|r| r.package_id).collect();

    let supplier_rows = sqlx::query_as::<_, PackageSupplierRow>(
        r#"
        SELECT
            eps.package_id,
            s.supplier_id,
            COALESCE(u.firstname, '') AS firstname,
            COALESCE(u.lastname, '') AS lastname,
            COALESCE(s.service, 'Unknown') AS service,
            COALESCE(s.price, 0) AS price,
            COALESCE(ps.remarks, '') AS remarks
        FROM event_package_services eps
        JOIN package_service ps ON eps.package_service_id = ps.package_service_id
        JOIN suppliers s ON ps.supplier_id = s.supplier_id
        LEFT JOIN users u ON s.userid = u.userid
        WHERE eps.package_id = ANY($1)
        ORDER BY eps.package_id, ps.package_service_id
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    let service_rows = sqlx::query_as::<_, PackageServiceRow>(
        r#"
        SELECT
            epas.package_id,
            a.add_service_id,
            COALESCE(a.add_service_name, 'Unknown Service') AS add_service_name,
            COALESCE(a.add_service_price, 0) AS add_service_price
        FROM event_package_additional_services epas
        JOIN additional_services a ON epas.add_service_id = a.add_service_id
        WHERE epas.package_id = ANY($1)
        ORDER BY epas.package_id, a.add_service_id
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut suppliers: HashMap<i32, Vec<PackageSupplier>> = HashMap::new();
    for row in supplier_rows {
        suppliers.entry(row.package_id).or_default().push(PackageSupplier {
            supplier_id: row.supplier_id,
            name: format!("{} {}", row.firstname, row.lastname).trim().to_string(),
            service: row.service,
            price: row.price,
            remarks: row.remarks,
        });
    }

    let mut services: HashMap<i32, Vec<PackageAdditionalService>> = HashMap::new();
    for row in service_rows {
        services
            .entry(row.package_id)
            .or_default()
            .push(PackageAdditionalService {
                service_id: row.add_service_id,
                name: row.add_service_name,
                price: row.add_service_price,
            });
    }

    let packages = rows
        .into_iter()
        .map(|row| {
            let suppliers = suppliers.remove(&row.package_id).unwrap_or_default();
            let additional_services = services.remove(&row.package_id).unwrap_or_default();
            summary_from_row(row, suppliers, additional_services)
        })
        .collect();
    Ok(packages)
}

fn summary_from_row(
    row: PackageRow,
    suppliers: Vec<PackageSupplier>,
    additional_services: Vec<PackageAdditionalService>,
) -> PackageSummary {
    let venue = match (row.venue_id, row.venue_name) {
        (Some(venue_id), Some(name)) => Some(PackageVenue {
            venue_id,
            name,
            location: row.venue_location,
            price: row.venue_price.unwrap_or_default(),
            capacity: row.venue_capacity,
            description: row.venue_description,
            image: row.venue_image.as_deref().map(venue_image_url),
        }),
        _ => None,
    };
    let gown_package = match (row.gown_package_id, row.gown_package_name) {
        (Some(gown_package_id), Some(name)) => Some(PackageGownPackage {
            gown_package_id,
            name,
            price: row.gown_package_price.unwrap_or_default(),
            description: row.gown_package_description,
        }),
        _ => None,
    };

    PackageSummary {
        package_id: row.package_id,
        package_name: row.package_name,
        event_type: row.event_type,
        capacity: row.capacity,
        description: row.description,
        additional_capacity_charges: row.additional_capacity_charges,
        charge_unit: row.charge_unit,
        total_price: row.total_price,
        status: row.status,
        created_at: row.created_at,
        venue,
        gown_package,
        suppliers,
        additional_services,
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PackageDetailsRow {
    package_id: i32,
    package_name: String,
    event_type_name: Option<String>,
    capacity: Option<i32>,
    description: Option<String>,
    total_price: Option<Decimal>,
    additional_capacity_charges: Option<Decimal>,
    charge_unit: Option<i32>,
    venue_id: Option<i32>,
    venue_name: Option<String>,
    venue_location: Option<String>,
    venue_price: Option<Decimal>,
    gown_package_name: Option<String>,
    gown_package_price: Option<Decimal>,
    package_service_ids: PgArray<i32>,
    supplier_ids: PgArray<i32>,
    services: PgArray<String>,
    service_prices: PgArray<Decimal>,
    supplier_firstnames: PgArray<String>,
    supplier_lastnames: PgArray<String>,
    supplier_emails: PgArray<String>,
    external_supplier_names: PgArray<String>,
    external_supplier_contacts: PgArray<String>,
    external_supplier_prices: PgArray<Decimal>,
    remarks: PgArray<String>,
}

pub async fn package_details(conn: &mut PgConnection, package_id: i32) -> AppResult<PackageDetails> {
    let row = sqlx::query_as::<_, PackageDetailsRow>(
        r#"
        SELECT
            ep.package_id, ep.package_name, et.event_type_name, ep.capacity, ep.description,
            ep.total_price, ep.additional_capacity_charges, ep.charge_unit,
            v.venue_id, v.venue_name, v.location AS venue_location, v.venue_price,
            gp.gown_package_name, gp.gown_package_price,
            array_agg(ps.package_service_id ORDER BY eps.package_service_id) AS package_service_ids,
            array_agg(ps.supplier_id ORDER BY eps.package_service_id) AS supplier_ids,
            array_agg(s.service ORDER BY eps.package_service_id) AS services,
            array_agg(s.price ORDER BY eps.package_service_id) AS service_prices,
            array_agg(u.firstname ORDER BY eps.package_service_id) AS supplier_firstnames,
            array_agg(u.lastname ORDER BY eps.package_service_id) AS supplier_lastnames,
            array_agg(u.email ORDER BY eps.package_service_id) AS supplier_emails,
            array_agg(ps.external_supplier_name ORDER BY eps.package_service_id) AS external_supplier_names,
            array_agg(ps.external_supplier_contact ORDER BY eps.package_service_id) AS external_supplier_contacts,
            array_agg(ps.external_supplier_price ORDER BY eps.package_service_id) AS external_supplier_prices,
            array_agg(ps.remarks ORDER BY eps.package_service_id) AS remarks
        FROM event_packages ep
        LEFT JOIN event_type et ON ep.event_type_id = et.event_type_id
        LEFT JOIN venues v ON ep.venue_id = v.venue_id
        LEFT JOIN gown_package gp ON ep.gown_package_id = gp.gown_package_id
        LEFT JOIN event_package_services eps ON ep.package_id = eps.package_id
        LEFT JOIN package_service ps ON eps.package_service_id = ps.package_service_id
        LEFT JOIN suppliers s ON ps.supplier_id = s.supplier_id
        LEFT JOIN users u ON s.userid = u.userid
        WHERE ep.package_id = $1
        GROUP BY ep.package_id, et.event_type_name, v.venue_id, gp.gown_package_id
        "#,
    )
    .bind(package_id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| AppError::not_found("Package not found"))?;

    Ok(details_from_row(row))
}

fn details_from_row(row: PackageDetailsRow) -> PackageDetails {
    PackageDetails {
        package_id: row.package_id,
        package_name: row.package_name,
        event_type_name: row.event_type_name,
        capacity: row.capacity,
        description: row.description,
        total_price: row.total_price.unwrap_or_default(),
        additional_capacity_charges: row.additional_capacity_charges.unwrap_or_default(),
        charge_unit: row.charge_unit,
        venue_id: row.venue_id,
        venue_name: row.venue_name,
        venue_location: row.venue_location,
        venue_price: row.venue_price.unwrap_or_default(),
        gown_package_name: row.gown_package_name,
        gown_package_price: row.gown_package_price.unwrap_or_default(),
        package_service_ids: present_or_empty(row.package_service_ids),
        supplier_ids: present_or_empty(row.supplier_ids),
        services: present_or_empty(row.services),
        service_prices: money_or_empty(row.service_prices),
        supplier_firstnames: present_or_empty(row.supplier_firstnames),
        supplier_lastnames: present_or_empty(row.supplier_lastnames),
        supplier_emails: present_or_empty(row.supplier_emails),
        external_supplier_names: present_or_empty(row.external_supplier_names),
        external_supplier_contacts: present_or_empty(row.external_supplier_contacts),
        external_supplier_prices: money_or_empty(row.external_supplier_prices),
        remarks: present_or_empty(row.remarks),
    }
}
