//! Listing, sort and search endpoints

use axum::{extract::State, Form, Json};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{CatalogView, SearchForm, SearchView, SortForm},
    AppState,
};

/// Every book and every author
#[utoipa::path(
    get,
    path = "/",
    tag = "catalog",
    responses(
        (status = 200, description = "Full listing", body = CatalogView)
    )
)]
pub async fn home(State(state): State<AppState>) -> AppResult<Json<CatalogView>> {
    let view = state.services.catalog.catalog().await?;
    Ok(Json(view))
}

/// Books of one author, or with one exact title
#[utoipa::path(
    post,
    path = "/sort",
    tag = "catalog",
    request_body(content = SortForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Filtered listing", body = CatalogView),
        (status = 400, description = "author_id is not an integer", body = ErrorResponse)
    )
)]
pub async fn sort(
    State(state): State<AppState>,
    Form(form): Form<SortForm>,
) -> AppResult<Json<CatalogView>> {
    let view = state.services.catalog.sort(form).await?;
    Ok(Json(view))
}

/// Books whose title or author name contains the query
#[utoipa::path(
    post,
    path = "/search",
    tag = "catalog",
    request_body(content = SearchForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Matching books with their authors", body = SearchView)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> AppResult<Json<SearchView>> {
    let view = state.services.catalog.search(form).await?;
    Ok(Json(view))
}
