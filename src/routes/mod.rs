use axum::{Router, routing::get};

use crate::{config::AppConfig, state::AppState};

pub mod assets;
pub mod auth;
pub mod catalog;
pub mod doc;
pub mod events;
pub mod feedback;
pub mod health;
pub mod packages;
pub mod suppliers;
pub mod users;
pub mod wishlist;

// Build the router without binding state; it will be provided at the top level.
pub fn create_router(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(auth::router())
        .merge(users::router())
        .merge(catalog::router())
        .merge(events::router())
        .merge(wishlist::router())
        .merge(packages::router())
        .merge(suppliers::router())
        .merge(feedback::router())
        .merge(assets::router(&config.assets_dir))
}
