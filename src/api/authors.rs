//! Author endpoints

use axum::{extract::State, http::StatusCode, Form, Json};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{AuthorForm, AuthorFormView, CatalogView, DeleteAuthorForm},
    AppState,
};

/// Empty add-author form
#[utoipa::path(
    get,
    path = "/add_author",
    tag = "authors",
    responses(
        (status = 200, description = "Empty author form", body = AuthorFormView)
    )
)]
pub async fn author_form() -> Json<AuthorFormView> {
    Json(AuthorFormView { author: None })
}

/// Create an author
#[utoipa::path(
    post,
    path = "/add_author",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Author created", body = AuthorFormView),
        (status = 400, description = "Invalid name or date", body = ErrorResponse)
    )
)]
pub async fn add_author(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<(StatusCode, Json<AuthorFormView>)> {
    let author = state.services.catalog.add_author(form).await?;
    Ok((StatusCode::CREATED, Json(AuthorFormView { author: Some(author) })))
}

/// Delete an author that has no books
#[utoipa::path(
    post,
    path = "/author/delete",
    tag = "authors",
    request_body(content = DeleteAuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome message (deleted, not found or blocked) and refreshed listing", body = CatalogView),
        (status = 400, description = "author_id is not an integer", body = ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Form(form): Form<DeleteAuthorForm>,
) -> AppResult<Json<CatalogView>> {
    let view = state.services.catalog.delete_author(form).await?;
    Ok(Json(view))
}
