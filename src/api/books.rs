//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{BookForm, BookFormView, CatalogView},
    AppState,
};

/// Empty add-book form with the author picker
#[utoipa::path(
    get,
    path = "/add_book",
    tag = "books",
    responses(
        (status = 200, description = "Empty book form and all authors", body = BookFormView)
    )
)]
pub async fn book_form(State(state): State<AppState>) -> AppResult<Json<BookFormView>> {
    let view = state.services.catalog.book_form().await?;
    Ok(Json(view))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/add_book",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Book created", body = BookFormView),
        (status = 400, description = "Invalid title, year, ISBN or author id", body = ErrorResponse),
        (status = 422, description = "Author does not exist", body = ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<(StatusCode, Json<BookFormView>)> {
    let view = state.services.catalog.add_book(form).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Delete a book
#[utoipa::path(
    post,
    path = "/book/{id}/delete",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted, refreshed listing", body = CatalogView),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CatalogView>> {
    let view = state.services.catalog.delete_book(id).await?;
    Ok(Json(view))
}
