//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::author::Author,
    validation::{normalize_isbn, parse_integer, parse_optional_integer},
};

/// Book row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    /// Normalized ISBN-10 or ISBN-13, no hyphens or spaces
    pub isbn: String,
    pub title: String,
    pub publication_year: i64,
    pub author_id: i64,
}

/// Book joined with its author, as returned by search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookWithAuthor {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub publication_year: i64,
    pub author_id: i64,
    pub author: Author,
}

/// Add-book form as submitted
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "title is required (at most 255 characters)"))]
    pub title: String,
    pub publication_year: Option<String>,
    pub isbn: Option<String>,
    pub author_id: Option<String>,
}

/// Validated book ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub publication_year: i64,
    pub author_id: i64,
}

impl BookForm {
    pub fn validated(self) -> AppResult<NewBook> {
        let form = BookForm {
            title: self.title.trim().to_string(),
            ..self
        };
        form.validate()?;

        let publication_year = parse_integer("publication_year", form.publication_year.as_deref())?;
        let isbn = normalize_isbn(form.isbn.as_deref().unwrap_or_default())?;
        let author_id = parse_integer("author_id", form.author_id.as_deref())?;

        Ok(NewBook {
            isbn,
            title: form.title,
            publication_year,
            author_id,
        })
    }
}

/// Sort form: `author_id` wins over `book_title` when both are filled
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SortForm {
    pub author_id: Option<String>,
    pub book_title: Option<String>,
}

/// Search form
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchForm {
    pub search: Option<String>,
}

/// Which books a listing should contain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookFilter {
    #[default]
    All,
    ByAuthor(i64),
    /// Exact, case-sensitive title match
    ByTitle(String),
}

impl SortForm {
    pub fn filter(&self) -> AppResult<BookFilter> {
        if let Some(author_id) = parse_optional_integer("author_id", self.author_id.as_deref())? {
            return Ok(BookFilter::ByAuthor(author_id));
        }
        Ok(match self.book_title.as_deref() {
            Some(title) if !title.is_empty() => BookFilter::ByTitle(title.to_string()),
            _ => BookFilter::All,
        })
    }
}
