//! HTTP handlers and routing

pub mod authors;
pub mod books;
pub mod catalog;
pub mod health;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Catalog
        .route("/", get(catalog::home))
        .route("/sort", post(catalog::sort))
        .route("/search", post(catalog::search))
        // Authors
        .route("/add_author", get(authors::author_form).post(authors::add_author))
        .route("/author/delete", post(authors::delete_author))
        // Books
        .route("/add_book", get(books::book_form).post(books::add_book))
        .route("/book/:id/delete", post(books::delete_book))
        // OpenAPI documentation
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
