//! Page payloads handed to the presentation layer

use serde::Serialize;
use utoipa::ToSchema;

use super::{Author, Book, BookWithAuthor};

/// Add-author page: empty form, or the author just created
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorFormView {
    pub author: Option<Author>,
}

/// Add-book page: author picker plus the book just created, if any
#[derive(Debug, Serialize, ToSchema)]
pub struct BookFormView {
    pub authors: Vec<Author>,
    pub book: Option<Book>,
}

/// Home listing, also returned by sort and the delete operations
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogView {
    pub books: Vec<Book>,
    pub authors: Vec<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Search results
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchView {
    pub books: Vec<BookWithAuthor>,
}
