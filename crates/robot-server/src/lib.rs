//! Robot bridge server library logic.
//!
//! Hosts the HTTP dashboard and control API, the message-bus subscriber and
//! the voice-recognition loop. All three hand their input to the same
//! [`robot_core::Dispatcher`].

pub mod api;
pub mod background;
pub mod config;
pub mod error;
pub mod mqtt;

pub use error::ServerError;

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use robot_core::Dispatcher;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Entry point into the shared robot state and output sink.
    pub dispatcher: Dispatcher,
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index_handler))
        .route("/health", get(health))
        .route("/status", get(api::status_handler))
        .route("/control", post(api::control_handler))
        .route("/voice/toggle", post(api::toggle_voice_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
