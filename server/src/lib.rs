//! In-memory todo service.
//!
//! # Overview
//! Two fixed categories of todos (`personal`, `professional`) held in a
//! [`TodoStore`] and exposed over HTTP under [`api::TODOS_PATH`].
//!
//! # Design
//! - [`store`] owns the records and does no validation.
//! - [`api`] validates requests and maps store outcomes to responses.
//! - The store is built by the caller and handed to [`router`], so every test
//!   can start from an empty collection.

pub mod api;
pub mod config;
pub mod model;
pub mod store;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use api::ApiError;
pub use config::Settings;
pub use model::{Category, Todo, TodoPatch};
pub use store::{SharedStore, TodoStore};

/// Application router with a fresh store and default settings.
pub fn app() -> Router {
    router(TodoStore::new().shared(), &Settings::default())
}

pub fn router(store: SharedStore, settings: &Settings) -> Router {
    Router::new()
        .route("/", get(health))
        .nest(api::TODOS_PATH, api::routes())
        .with_state(store)
        .layer(cors_layer(&settings.cors.origin))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, settings: Settings) -> Result<(), std::io::Error> {
    let app = router(TodoStore::new().shared(), &settings);
    axum::serve(listener, app).await
}

async fn health() -> &'static str {
    "OK"
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    match origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(err) => {
            tracing::warn!(%origin, error = %err, "ignoring unusable CORS origin");
            layer
        }
    }
}
