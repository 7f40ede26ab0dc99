use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::auth_service::{login_user, register_user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/check-auth", get(check_auth))
        .route("/logout", post(logout))
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Register user", body = ApiResponse<RegisterResponse>),
        (status = 400, description = "Missing fields or invalid user type"),
        (status = 409, description = "Email or username already taken")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<RegisterResponse>>)> {
    let resp = register_user(&state.orm, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Registration successful!", resp)),
    ))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = LoginResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let resp = login_user(&state.orm, &state.tokens, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/check-auth",
    responses(
        (status = 200, description = "Token is valid", body = ApiResponse<String>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Auth"
)]
pub async fn check_auth(user: AuthUser) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::message(format!(
        "Token is valid for user: {}",
        user.email
    )))
}

/// Tokens are stateless; the client discards its copy.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<String>)
    ),
    tag = "Auth"
)]
pub async fn logout() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::message("Logged out successfully"))
}
