//! OpenAPI documentation

use axum::Json;
use utoipa::OpenApi;

use crate::api::{authors, books, catalog, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "0.1.0",
        description = "Authors, books, search and guarded deletes"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        catalog::home,
        catalog::sort,
        catalog::search,
        // Authors
        authors::author_form,
        authors::add_author,
        authors::delete_author,
        // Books
        books::book_form,
        books::add_book,
        books::delete_book,
    ),
    components(
        schemas(
            crate::models::Author,
            crate::models::AuthorForm,
            crate::models::DeleteAuthorForm,
            crate::models::Book,
            crate::models::BookWithAuthor,
            crate::models::BookForm,
            crate::models::SortForm,
            crate::models::SearchForm,
            crate::models::AuthorFormView,
            crate::models::BookFormView,
            crate::models::CatalogView,
            crate::models::SearchView,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Listing, sort and search"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book management")
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
