use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::outfits::{BookOutfitRequest, CreateOutfitRequest},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::{AdditionalService, BookedOutfit, EventType, GownPackage, Outfit, Supplier, Venue},
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/outfits", post(create_outfit).get(list_outfits))
        .route("/outfits/{id}", get(get_outfit))
        .route("/book-outfit", post(book_outfit))
        .route("/booked-outfits", get(booked_outfits))
        .route("/available-suppliers", get(available_suppliers))
        .route("/api/suppliers", get(suppliers))
        .route("/available-venues", get(available_venues))
        .route("/available-gown-packages", get(available_gown_packages))
        .route("/created-services", get(created_services))
        .route("/api/gown-package/{id}/outfits", get(gown_package_outfits))
        .route("/event-types", get(event_types))
}

#[utoipa::path(
    post,
    path = "/outfits",
    request_body = CreateOutfitRequest,
    responses(
        (status = 201, description = "Outfit added", body = ApiResponse<Outfit>),
        (status = 400, description = "Missing fields"),
        (status = 403, description = "Admin access required")
    ),
    tag = "Catalog"
)]
pub async fn create_outfit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOutfitRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Outfit>>)> {
    ensure_admin(&user)?;
    let outfit = catalog_service::create_outfit(&state.orm, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Outfit added successfully!", outfit)),
    ))
}

#[utoipa::path(
    get,
    path = "/outfits",
    responses(
        (status = 200, description = "All outfits", body = Vec<Outfit>)
    ),
    tag = "Catalog"
)]
pub async fn list_outfits(State(state): State<AppState>) -> AppResult<Json<Vec<Outfit>>> {
    Ok(Json(catalog_service::list_outfits(&state.orm).await?))
}

#[utoipa::path(
    get,
    path = "/outfits/{id}",
    params(
        ("id" = i32, Path, description = "Outfit ID")
    ),
    responses(
        (status = 200, description = "Outfit", body = Outfit),
        (status = 404, description = "Outfit not found")
    ),
    tag = "Catalog"
)]
pub async fn get_outfit(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Outfit>> {
    Ok(Json(catalog_service::get_outfit(&state.orm, id).await?))
}

#[utoipa::path(
    post,
    path = "/book-outfit",
    request_body = BookOutfitRequest,
    responses(
        (status = 201, description = "Outfit booked", body = ApiResponse<BookedOutfit>),
        (status = 404, description = "Outfit not found")
    ),
    tag = "Catalog"
)]
pub async fn book_outfit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<BookOutfitRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookedOutfit>>)> {
    let booking = catalog_service::book_outfit(&state.orm, user.user_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Outfit booked successfully!", booking)),
    ))
}

#[utoipa::path(
    get,
    path = "/booked-outfits",
    responses(
        (status = 200, description = "Caller's outfit bookings", body = Vec<BookedOutfit>)
    ),
    tag = "Catalog"
)]
pub async fn booked_outfits(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<BookedOutfit>>> {
    Ok(Json(
        catalog_service::list_booked_outfits(&state.orm, user.user_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/available-suppliers",
    responses(
        (status = 200, description = "Active suppliers", body = Vec<Supplier>)
    ),
    tag = "Catalog"
)]
pub async fn available_suppliers(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Supplier>>> {
    Ok(Json(catalog_service::available_suppliers(&state.orm).await?))
}

#[utoipa::path(
    get,
    path = "/api/suppliers",
    responses(
        (status = 200, description = "Active suppliers", body = ApiResponse<Vec<Supplier>>)
    ),
    tag = "Catalog"
)]
pub async fn suppliers(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Supplier>>>> {
    let items = catalog_service::available_suppliers(&state.orm).await?;
    tracing::debug!(count = items.len(), "suppliers listed");
    Ok(Json(ApiResponse::success("Suppliers", items)))
}

#[utoipa::path(
    get,
    path = "/available-venues",
    responses(
        (status = 200, description = "Active venues", body = Vec<Venue>)
    ),
    tag = "Catalog"
)]
pub async fn available_venues(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Venue>>> {
    Ok(Json(catalog_service::available_venues(&state.orm).await?))
}

#[utoipa::path(
    get,
    path = "/available-gown-packages",
    responses(
        (status = 200, description = "Active gown packages", body = Vec<GownPackage>)
    ),
    tag = "Catalog"
)]
pub async fn available_gown_packages(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<GownPackage>>> {
    Ok(Json(
        catalog_service::available_gown_packages(&state.orm).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/created-services",
    responses(
        (status = 200, description = "Active additional services", body = Vec<AdditionalService>)
    ),
    tag = "Catalog"
)]
pub async fn created_services(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<AdditionalService>>> {
    Ok(Json(catalog_service::available_services(&state.orm).await?))
}

#[utoipa::path(
    get,
    path = "/api/gown-package/{id}/outfits",
    params(
        ("id" = i32, Path, description = "Gown package ID")
    ),
    responses(
        (status = 200, description = "Outfits in the gown package", body = ApiResponse<Vec<Outfit>>)
    ),
    tag = "Catalog"
)]
pub async fn gown_package_outfits(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<Outfit>>>> {
    let items = catalog_service::gown_package_outfits(&state.orm, id).await?;
    Ok(Json(ApiResponse::success("Gown package outfits", items)))
}

#[utoipa::path(
    get,
    path = "/event-types",
    responses(
        (status = 200, description = "Event types by name", body = Vec<EventType>)
    ),
    tag = "Catalog"
)]
pub async fn event_types(State(state): State<AppState>) -> AppResult<Json<Vec<EventType>>> {
    Ok(Json(catalog_service::event_types(&state.orm).await?))
}
