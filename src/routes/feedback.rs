use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::feedback::{FeedbackCreated, SubmitFeedbackRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Feedback,
    response::ApiResponse,
    services::feedback_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/event-feedback", post(submit_feedback))
        .route("/event-feedback/{events_id}", get(event_feedback))
}

#[utoipa::path(
    post,
    path = "/event-feedback",
    request_body = SubmitFeedbackRequest,
    responses(
        (status = 201, description = "Feedback submitted", body = ApiResponse<FeedbackCreated>),
        (status = 400, description = "Missing event or rating out of range"),
        (status = 409, description = "Feedback already submitted for this event")
    ),
    tag = "Feedback"
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SubmitFeedbackRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<FeedbackCreated>>)> {
    let created = feedback_service::submit_feedback(&state.orm, user.user_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Feedback submitted successfully", created)),
    ))
}

#[utoipa::path(
    get,
    path = "/event-feedback/{events_id}",
    params(
        ("events_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Feedback for the event, newest first", body = ApiResponse<Vec<Feedback>>)
    ),
    tag = "Feedback"
)]
pub async fn event_feedback(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(events_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<Feedback>>>> {
    let items = feedback_service::list_feedback(&state.orm, events_id).await?;
    Ok(Json(ApiResponse::success("Event feedback", items)))
}
