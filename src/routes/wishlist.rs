use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    db::DbConn,
    dto::wishlist::{CreateWishlistPackageRequest, WishlistEntry, WishlistPackageCreated},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::wishlist_service::{self, WishlistScope},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(wishlist))
        .route("/wishlist-packages", post(create_wishlist_package))
}

#[utoipa::path(
    get,
    path = "/wishlist",
    responses(
        (status = 200, description = "Caller's wishlist packages", body = Vec<WishlistEntry>)
    ),
    tag = "Wishlist"
)]
pub async fn wishlist(user: AuthUser, mut conn: DbConn) -> AppResult<Json<Vec<WishlistEntry>>> {
    let entries =
        wishlist_service::list_wishlist(&mut conn, WishlistScope::User(user.user_id)).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    post,
    path = "/wishlist-packages",
    request_body = CreateWishlistPackageRequest,
    responses(
        (status = 201, description = "Wishlist package created", body = ApiResponse<WishlistPackageCreated>),
        (status = 400, description = "Missing event or malformed inclusion"),
        (status = 404, description = "Event or venue not found")
    ),
    tag = "Wishlist"
)]
pub async fn create_wishlist_package(
    user: AuthUser,
    mut conn: DbConn,
    Json(payload): Json<CreateWishlistPackageRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<WishlistPackageCreated>>)> {
    let created =
        wishlist_service::create_wishlist_package(&mut conn, user.user_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Wishlist package created successfully",
            created,
        )),
    ))
}
