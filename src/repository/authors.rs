//! Authors repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorDeletion, NewAuthor},
};

use super::is_foreign_key_violation;

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Sqlite>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// All authors in id order
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date, date_of_death FROM authors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// Insert an author and return the stored row
    pub async fn create(&self, author: &NewAuthor) -> AppResult<Author> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, birth_date, date_of_death)
            VALUES (?, ?, ?)
            RETURNING id, name, birth_date, date_of_death
            "#,
        )
        .bind(&author.name)
        .bind(author.birth_date)
        .bind(author.date_of_death)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Delete an author unless books still reference it.
    ///
    /// Lookup, book count and delete share one transaction. The schema's
    /// foreign key backs this up: a book inserted concurrently makes the
    /// delete fail, which surfaces as a conflict.
    pub async fn delete_guarded(&self, id: i64) -> AppResult<AuthorDeletion> {
        let mut tx = self.pool.begin().await?;

        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date, date_of_death FROM authors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(author) = author else {
            return Ok(AuthorDeletion::NotFound);
        };

        let book_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if book_count > 0 {
            return Ok(AuthorDeletion::HasBooks { author, book_count });
        }

        sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict(format!("Author '{}' still has books", author.name))
                } else {
                    AppError::Database(e)
                }
            })?;

        tx.commit().await?;
        Ok(AuthorDeletion::Deleted(author))
    }
}
