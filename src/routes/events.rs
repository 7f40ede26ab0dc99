use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};

use crate::{
    db::DbConn,
    dto::{
        events::{CreateEventRequest, EventCreated},
        wishlist::WishlistEntry,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{BookedSchedule, Event, EventsByMonth},
    response::ApiResponse,
    services::{
        event_service,
        wishlist_service::{self, WishlistScope},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(upcoming_events).post(create_event))
        .route("/events-by-month", get(events_by_month))
        .route("/events/{events_id}/wishlist", get(event_wishlist))
        .route("/booked-wishlist", get(booked_wishlist))
        .route("/booked_wishlist/{events_id}", delete(delete_event))
        .route("/api/events/schedules", get(schedules))
}

#[utoipa::path(
    post,
    path = "/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = ApiResponse<EventCreated>),
        (status = 422, description = "Malformed body or time value"),
        (status = 404, description = "Package not found")
    ),
    tag = "Events"
)]
pub async fn create_event(
    user: AuthUser,
    mut conn: DbConn,
    Json(payload): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<EventCreated>>)> {
    let created = event_service::create_event(&mut conn, user.user_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Event created successfully", created)),
    ))
}

#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "Upcoming events by date", body = Vec<Event>)
    ),
    tag = "Events"
)]
pub async fn upcoming_events(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    Ok(Json(event_service::upcoming_events(&state.orm).await?))
}

#[utoipa::path(
    get,
    path = "/events-by-month",
    responses(
        (status = 200, description = "Event counts per type per month", body = EventsByMonth)
    ),
    tag = "Events"
)]
pub async fn events_by_month(mut conn: DbConn) -> AppResult<Json<EventsByMonth>> {
    Ok(Json(event_service::events_by_month(&mut conn).await?))
}

#[utoipa::path(
    get,
    path = "/events/{events_id}/wishlist",
    params(
        ("events_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Wishlist packages of one event", body = Vec<WishlistEntry>)
    ),
    tag = "Events"
)]
pub async fn event_wishlist(
    user: AuthUser,
    mut conn: DbConn,
    Path(events_id): Path<i32>,
) -> AppResult<Json<Vec<WishlistEntry>>> {
    let scope = WishlistScope::Event {
        userid: user.user_id,
        events_id,
    };
    Ok(Json(wishlist_service::list_wishlist(&mut conn, scope).await?))
}

#[utoipa::path(
    get,
    path = "/booked-wishlist",
    responses(
        (status = 200, description = "Caller's events", body = Vec<Event>)
    ),
    tag = "Events"
)]
pub async fn booked_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Event>>> {
    Ok(Json(
        event_service::booked_wishlist(&state.orm, user.user_id).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/booked_wishlist/{events_id}",
    params(
        ("events_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted", body = ApiResponse<String>),
        (status = 404, description = "Event not found")
    ),
    tag = "Events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(events_id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    event_service::delete_event(&state.orm, user.user_id, events_id).await?;
    Ok(Json(ApiResponse::message("Event item deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/events/schedules",
    responses(
        (status = 200, description = "Upcoming booked schedules", body = Vec<BookedSchedule>)
    ),
    tag = "Events"
)]
pub async fn schedules(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<BookedSchedule>>> {
    Ok(Json(event_service::booked_schedules(&state.orm).await?))
}
