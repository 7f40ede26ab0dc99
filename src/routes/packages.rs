use axum::{
    Json, Router,
    extract::Path,
    routing::get,
};

use crate::{
    db::DbConn,
    dto::packages::{PackageDetails, PackageSummary},
    error::AppResult,
    middleware::auth::AuthUser,
    services::package_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/created-packages", get(created_packages))
        .route("/packages/{id}", get(package_details))
}

#[utoipa::path(
    get,
    path = "/created-packages",
    responses(
        (status = 200, description = "Active event packages with their children", body = Vec<PackageSummary>)
    ),
    tag = "Packages"
)]
pub async fn created_packages(mut conn: DbConn) -> AppResult<Json<Vec<PackageSummary>>> {
    Ok(Json(package_service::created_packages(&mut conn).await?))
}

#[utoipa::path(
    get,
    path = "/packages/{id}",
    params(
        ("id" = i32, Path, description = "Package ID")
    ),
    responses(
        (status = 200, description = "Package details", body = PackageDetails),
        (status = 404, description = "Package not found")
    ),
    tag = "Packages"
)]
pub async fn package_details(
    _user: AuthUser,
    mut conn: DbConn,
    Path(id): Path<i32>,
) -> AppResult<Json<PackageDetails>> {
    Ok(Json(package_service::package_details(&mut conn, id).await?))
}
