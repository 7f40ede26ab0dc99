use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};

use crate::{
    dto::suppliers::{AvailabilityQuery, SetAvailabilityRequest, SupplierEvent},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Availability,
    response::ApiResponse,
    services::supplier_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/supplier/events", get(supplier_events))
        .route(
            "/api/supplier/availability",
            get(list_availability).post(set_availability),
        )
        .route("/api/supplier/availability/{date}", delete(delete_availability))
}

#[utoipa::path(
    get,
    path = "/api/supplier/events",
    responses(
        (status = 200, description = "Events with an approved selection of this supplier", body = ApiResponse<Vec<SupplierEvent>>),
        (status = 403, description = "User is not a supplier")
    ),
    tag = "Suppliers"
)]
pub async fn supplier_events(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<SupplierEvent>>>> {
    let supplier_id = supplier_service::supplier_id_for(&state.orm, user.user_id).await?;
    let mut conn = state.pool.acquire().await?;
    let events = supplier_service::booked_events(&mut conn, supplier_id).await?;
    Ok(Json(ApiResponse::success("Supplier events", events)))
}

#[utoipa::path(
    get,
    path = "/api/supplier/availability",
    params(
        ("start_date" = Option<String>, Query, description = "First date, YYYY-MM-DD"),
        ("end_date" = Option<String>, Query, description = "Last date, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, description = "Availability calendar", body = ApiResponse<Vec<Availability>>),
        (status = 400, description = "Invalid date"),
        (status = 403, description = "User is not a supplier")
    ),
    tag = "Suppliers"
)]
pub async fn list_availability(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<ApiResponse<Vec<Availability>>>> {
    let supplier_id = supplier_service::supplier_id_for(&state.orm, user.user_id).await?;
    let items = supplier_service::list_availability(&state.orm, supplier_id, query).await?;
    Ok(Json(ApiResponse::success("Supplier availability", items)))
}

#[utoipa::path(
    post,
    path = "/api/supplier/availability",
    request_body = SetAvailabilityRequest,
    responses(
        (status = 200, description = "Availability updated", body = ApiResponse<Availability>),
        (status = 400, description = "Missing or invalid date"),
        (status = 403, description = "User is not a supplier")
    ),
    tag = "Suppliers"
)]
pub async fn set_availability(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SetAvailabilityRequest>,
) -> AppResult<Json<ApiResponse<Availability>>> {
    let supplier_id = supplier_service::supplier_id_for(&state.orm, user.user_id).await?;
    // Taken only after the lookup has handed its connection back.
    let mut conn = state.pool.acquire().await?;
    let entry = supplier_service::set_availability(&mut conn, supplier_id, payload).await?;
    Ok(Json(ApiResponse::success(
        "Availability updated successfully",
        entry,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/supplier/availability/{date}",
    params(
        ("date" = String, Path, description = "Date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Availability removed", body = ApiResponse<String>),
        (status = 403, description = "User is not a supplier"),
        (status = 404, description = "No availability record found for this date")
    ),
    tag = "Suppliers"
)]
pub async fn delete_availability(
    State(state): State<AppState>,
    user: AuthUser,
    Path(date): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let supplier_id = supplier_service::supplier_id_for(&state.orm, user.user_id).await?;
    supplier_service::delete_availability(&state.orm, supplier_id, &date).await?;
    Ok(Json(ApiResponse::message("Availability removed successfully")))
}
