// src/web/mod.rs
// Web server layer: the chat page, its forms and a JSON API

pub mod api;
pub mod pages;
pub mod render;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Create the web server router
pub fn create_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/state", get(api::get_state))
        .route("/send", post(api::send))
        .route("/clear", post(api::clear))
        .route("/new-topic", post(api::new_topic))
        .route("/settings", post(api::update_settings));

    Router::new()
        .route("/", get(pages::index))
        .route("/send", post(pages::send))
        .route("/clear", post(pages::clear))
        .route("/new-topic", post(pages::new_topic))
        .route("/settings", post(pages::settings))
        .route("/health", get(api::health))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
