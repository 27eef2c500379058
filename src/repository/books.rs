//! Books repository for database operations

use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookFilter, BookWithAuthor, NewBook},
    },
};

use super::is_foreign_key_violation;

/// Escape LIKE wildcards so the query matches literally
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn book_with_author(row: &SqliteRow) -> BookWithAuthor {
    BookWithAuthor {
        id: row.get("id"),
        isbn: row.get("isbn"),
        title: row.get("title"),
        publication_year: row.get("publication_year"),
        author_id: row.get("author_id"),
        author: Author {
            id: row.get("author_id"),
            name: row.get("author_name"),
            birth_date: row.get("author_birth_date"),
            date_of_death: row.get("author_date_of_death"),
        },
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Books matching the filter, in id order
    pub async fn list(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let books = match filter {
            BookFilter::All => {
                sqlx::query_as::<_, Book>(
                    "SELECT id, isbn, title, publication_year, author_id FROM books ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
            BookFilter::ByAuthor(author_id) => {
                sqlx::query_as::<_, Book>(
                    "SELECT id, isbn, title, publication_year, author_id FROM books WHERE author_id = ? ORDER BY id",
                )
                .bind(author_id)
                .fetch_all(&self.pool)
                .await?
            }
            BookFilter::ByTitle(title) => {
                // `=` on TEXT is binary in SQLite, so "dune" does not match "Dune"
                sqlx::query_as::<_, Book>(
                    "SELECT id, isbn, title, publication_year, author_id FROM books WHERE title = ? ORDER BY id",
                )
                .bind(title)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(books)
    }

    /// Insert a book after checking its author exists
    pub async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let author_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors WHERE id = ?")
            .bind(book.author_id)
            .fetch_one(&mut *tx)
            .await?;

        if author_count == 0 {
            return Err(AppError::ForeignKey(format!(
                "Author with id {} does not exist",
                book.author_id
            )));
        }

        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (isbn, title, publication_year, author_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, isbn, title, publication_year, author_id
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(book.publication_year)
        .bind(book.author_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::ForeignKey(format!("Author with id {} does not exist", book.author_id))
            } else {
                AppError::Database(e)
            }
        })?;

        tx.commit().await?;
        Ok(created)
    }

    /// Books whose title or author name contains `query`, ignoring case
    pub async fn search(&self, query: &str) -> AppResult<Vec<BookWithAuthor>> {
        let pattern = like_pattern(query);

        let rows = sqlx::query(
            r#"
            SELECT b.id, b.isbn, b.title, b.publication_year, b.author_id,
                   a.name AS author_name,
                   a.birth_date AS author_birth_date,
                   a.date_of_death AS author_date_of_death
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE b.title LIKE ? ESCAPE '\' OR a.name LIKE ? ESCAPE '\'
            ORDER BY b.id
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(book_with_author).collect())
    }

    /// Delete a book and return the removed row
    pub async fn delete(&self, id: i64) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            "SELECT id, isbn, title, publication_year, author_id FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(book)
    }
}
