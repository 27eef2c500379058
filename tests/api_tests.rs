//! API integration tests, driven in-process against an in-memory store

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use library_catalog::{api, repository::Repository, AppConfig, AppState};

/// Fresh router over an empty in-memory database
async fn app() -> Router {
    let repository = Repository::open_in_memory()
        .await
        .expect("Failed to open in-memory database");
    api::router(AppState::new(AppConfig::default(), repository))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request");
    send(app, request).await
}

/// POST an already url-encoded form body
async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("Failed to build request");
    send(app, request).await
}

async fn add_author(app: &Router, form: &str) -> i64 {
    let (status, body) = post_form(app, "/add_author", form).await;
    assert_eq!(status, StatusCode::CREATED, "add_author failed: {}", body);
    body["author"]["id"].as_i64().expect("No author ID")
}

async fn add_book(app: &Router, form: &str) -> i64 {
    let (status, body) = post_form(app, "/add_book", form).await;
    assert_eq!(status, StatusCode::CREATED, "add_book failed: {}", body);
    body["book"]["id"].as_i64().expect("No book ID")
}

fn titles(books: &Value) -> Vec<String> {
    books
        .as_array()
        .expect("books is not an array")
        .iter()
        .map(|b| b["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Two authors, four books; `dune` is lower-case on purpose
async fn seeded() -> (Router, i64, i64) {
    let app = app().await;
    let herbert = add_author(
        &app,
        "name=Frank+Herbert&birthdate=1920-10-08&date_of_death=1986-02-11",
    )
    .await;
    let tolkien = add_author(
        &app,
        "name=J.R.R.+Tolkien&birthdate=1892-01-03&date_of_death=1973-09-02",
    )
    .await;

    add_book(&app, &format!("title=Dune&publication_year=1965&isbn=978-0-441-01359-3&author_id={}", herbert)).await;
    add_book(&app, &format!("title=dune&publication_year=1965&isbn=0441013597&author_id={}", herbert)).await;
    add_book(&app, &format!("title=The+Hobbit&publication_year=1937&isbn=9780547928227&author_id={}", tolkien)).await;
    add_book(&app, &format!("title=The+Lord+of+the+Rings&publication_year=1954&isbn=978+0+261+10235+4&author_id={}", tolkien)).await;

    (app, herbert, tolkien)
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = app().await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app().await;
    let (status, body) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/author/delete"].is_object());
    assert!(body["paths"]["/book/{id}/delete"].is_object());
}

#[tokio::test]
async fn test_empty_forms() {
    let app = app().await;

    let (status, body) = get(&app, "/add_author").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["author"].is_null());

    let id = add_author(&app, "name=Ursula+K.+Le+Guin&birthdate=1929-10-21").await;
    let (status, body) = get(&app, "/add_book").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["book"].is_null());
    assert_eq!(body["authors"][0]["id"], id);
}

#[tokio::test]
async fn test_add_author() {
    let app = app().await;

    let (status, body) = post_form(&app, "/add_author", "name=Ursula+K.+Le+Guin&birthdate=1929-10-21&date_of_death=").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"]["name"], "Ursula K. Le Guin");
    assert_eq!(body["author"]["birth_date"], "1929-10-21");
    assert!(body["author"]["date_of_death"].is_null());

    let first = body["author"]["id"].as_i64().expect("No author ID");
    let second = add_author(&app, "name=Frank+Herbert&birthdate=1920-10-08").await;
    assert_ne!(first, second);

    let (_, body) = get(&app, "/").await;
    assert_eq!(body["authors"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_add_author_validation() {
    let app = app().await;

    for form in [
        "name=Frank+Herbert&birthdate=08%2F10%2F1920",
        "name=Frank+Herbert",
        "name=&birthdate=1920-10-08",
        "name=Frank+Herbert&birthdate=1920-10-08&date_of_death=soon",
    ] {
        let (status, body) = post_form(&app, "/add_author", form).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "form {} was accepted", form);
        assert_eq!(body["error"], "BadValue");
    }

    let (_, body) = get(&app, "/").await;
    assert_eq!(body["authors"], Value::Array(vec![]));
}

#[tokio::test]
async fn test_add_book_with_unknown_author() {
    let app = app().await;

    let (status, body) = post_form(
        &app,
        "/add_book",
        "title=Dune&publication_year=1965&isbn=9780441013593&author_id=7",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "NoSuchAuthor");

    let (_, body) = get(&app, "/").await;
    assert_eq!(body["books"], Value::Array(vec![]));
}

#[tokio::test]
async fn test_add_book_with_bad_isbn() {
    let app = app().await;
    let author = add_author(&app, "name=Frank+Herbert&birthdate=1920-10-08").await;

    for isbn in ["0000000000", "9780441013594", "12345", "abc"] {
        let (status, body) = post_form(
            &app,
            "/add_book",
            &format!("title=Dune&publication_year=1965&isbn={}&author_id={}", isbn, author),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "isbn {} was accepted", isbn);
        assert_eq!(body["error"], "BadValue");
    }

    let (status, _) = post_form(
        &app,
        "/add_book",
        &format!("title=Dune&publication_year=MCMLXV&isbn=9780441013593&author_id={}", author),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/").await;
    assert_eq!(body["books"], Value::Array(vec![]));
}

#[tokio::test]
async fn test_add_book_normalizes_isbn() {
    let (app, _, _) = seeded().await;
    let (_, body) = get(&app, "/").await;
    assert_eq!(body["books"][0]["isbn"], "9780441013593");
    assert_eq!(body["books"][3]["isbn"], "9780261102354");
}

#[tokio::test]
async fn test_home_lists_everything_in_id_order() {
    let (app, _, _) = seeded().await;
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        titles(&body["books"]),
        vec!["Dune", "dune", "The Hobbit", "The Lord of the Rings"]
    );
    assert_eq!(body["authors"].as_array().map(Vec::len), Some(2));
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_sort_by_author() {
    let (app, _, tolkien) = seeded().await;

    let (status, body) = post_form(&app, "/sort", &format!("author_id={}&book_title=Dune", tolkien)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body["books"]), vec!["The Hobbit", "The Lord of the Rings"]);
    assert!(body["books"]
        .as_array()
        .expect("books is not an array")
        .iter()
        .all(|b| b["author_id"] == tolkien));
    assert_eq!(body["authors"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_sort_by_exact_title() {
    let (app, herbert, _) = seeded().await;

    let (status, body) = post_form(&app, "/sort", "author_id=&book_title=Dune").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body["books"]), vec!["Dune"]);
    assert_eq!(body["books"][0]["author_id"], herbert);

    let (_, body) = post_form(&app, "/sort", "book_title=Hobbit").await;
    assert_eq!(body["books"], Value::Array(vec![]));

    let (_, body) = post_form(&app, "/sort", "").await;
    assert_eq!(titles(&body["books"]).len(), 4);

    let (status, _) = post_form(&app, "/sort", "author_id=two").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_by_author_name() {
    let (app, _, tolkien) = seeded().await;

    let (status, body) = post_form(&app, "/search", "search=tolk").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body["books"]), vec!["The Hobbit", "The Lord of the Rings"]);
    assert_eq!(body["books"][0]["author"]["id"], tolkien);
    assert_eq!(body["books"][0]["author"]["name"], "J.R.R. Tolkien");
}

#[tokio::test]
async fn test_search_by_title() {
    let (app, _, _) = seeded().await;

    let (_, body) = post_form(&app, "/search", "search=DUNE").await;
    assert_eq!(titles(&body["books"]), vec!["Dune", "dune"]);
    assert_eq!(body["books"][1]["author"]["name"], "Frank Herbert");

    let (_, body) = post_form(&app, "/search", "search=the").await;
    assert_eq!(titles(&body["books"]), vec!["The Hobbit", "The Lord of the Rings"]);

    let (_, body) = post_form(&app, "/search", "search=100%25").await;
    assert_eq!(body["books"], Value::Array(vec![]));
}

#[tokio::test]
async fn test_delete_book() {
    let (app, _, _) = seeded().await;

    let (status, body) = post_form(&app, "/book/3/delete", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "The Hobbit deleted successfully");
    assert_eq!(titles(&body["books"]), vec!["Dune", "dune", "The Lord of the Rings"]);
}

#[tokio::test]
async fn test_delete_missing_book() {
    let app = app().await;

    let (status, body) = post_form(&app, "/book/42/delete", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test]
async fn test_delete_author_outcomes() {
    let (app, herbert, _) = seeded().await;

    let (status, body) = post_form(&app, "/author/delete", "author_id=999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Author not found.");

    let (status, body) = post_form(&app, "/author/delete", &format!("author_id={}", herbert)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Author 'Frank Herbert' cannot be deleted because they have books."
    );
    assert_eq!(body["authors"].as_array().map(Vec::len), Some(2));
    assert_eq!(titles(&body["books"]).len(), 4);

    let (status, _) = post_form(&app, "/author/delete", "author_id=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unread = add_author(&app, "name=Nobody+Yet&birthdate=2000-01-01").await;
    let (status, body) = post_form(&app, "/author/delete", &format!("author_id={}", unread)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Author 'Nobody Yet' deleted successfully.");
    assert_eq!(body["authors"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_author_delete_unblocked_after_book_delete() {
    let app = app().await;

    let author = add_author(&app, "name=J.R.R.+Tolkien&birthdate=1892-01-03").await;
    assert_eq!(author, 1);
    let book = add_book(
        &app,
        "title=The+Hobbit&publication_year=1937&isbn=9780547928227&author_id=1",
    )
    .await;
    assert_eq!(book, 1);

    let (_, body) = post_form(&app, "/author/delete", "author_id=1").await;
    assert_eq!(
        body["message"],
        "Author 'J.R.R. Tolkien' cannot be deleted because they have books."
    );

    let (status, _) = post_form(&app, "/book/1/delete", "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_form(&app, "/author/delete", "author_id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Author 'J.R.R. Tolkien' deleted successfully.");
    assert_eq!(body["authors"], Value::Array(vec![]));
    assert_eq!(body["books"], Value::Array(vec![]));
}
