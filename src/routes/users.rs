use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};

use crate::{
    dto::users::{ChangePasswordRequest, UpdateProfileRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::UserProfile,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/user/profile", get(my_profile))
        .route("/api/users/{userid}", get(user_profile))
        .route("/api/users/info/{userid}", get(user_profile))
        .route("/api/user-details/{userid}", get(user_profile))
        .route("/api/user/update-profile", put(update_profile))
        .route("/api/user/change-password", post(change_password))
}

#[utoipa::path(
    get,
    path = "/api/user/profile",
    responses(
        (status = 200, description = "Caller's profile", body = ApiResponse<UserProfile>),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn my_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let profile = auth_service::get_profile(&state.orm, user.user_id).await?;
    Ok(Json(ApiResponse::success("User profile", profile)))
}

#[utoipa::path(
    get,
    path = "/api/users/{userid}",
    params(
        ("userid" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = ApiResponse<UserProfile>),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn user_profile(
    State(state): State<AppState>,
    Path(userid): Path<i32>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let profile = auth_service::get_profile(&state.orm, userid).await?;
    Ok(Json(ApiResponse::success("User profile", profile)))
}

#[utoipa::path(
    put,
    path = "/api/user/update-profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserProfile>),
        (status = 409, description = "Username already taken")
    ),
    tag = "Users"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let profile = auth_service::update_profile(&state.orm, user.user_id, payload).await?;
    Ok(Json(ApiResponse::success("Profile updated successfully", profile)))
}

#[utoipa::path(
    post,
    path = "/api/user/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<String>),
        (status = 400, description = "Missing fields or wrong current password")
    ),
    tag = "Users"
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    auth_service::change_password(&state.orm, user.user_id, payload).await?;
    Ok(Json(ApiResponse::message("Password changed successfully")))
}
