//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    validation::{parse_date, parse_optional_date},
};

/// Author row. Books are not materialized here; they are queried by `author_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
}

/// Add-author form as submitted
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name is required (at most 255 characters)"))]
    pub name: String,
    /// `YYYY-MM-DD`
    pub birthdate: Option<String>,
    /// `YYYY-MM-DD`, blank for living authors
    pub date_of_death: Option<String>,
}

/// Validated author ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
    pub name: String,
    pub birth_date: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorForm {
    pub fn validated(self) -> AppResult<NewAuthor> {
        let form = AuthorForm {
            name: self.name.trim().to_string(),
            ..self
        };
        form.validate()?;

        let birth_date = parse_date("birthdate", form.birthdate.as_deref())?;
        let date_of_death = parse_optional_date("date_of_death", form.date_of_death.as_deref())?;

        if let Some(death) = date_of_death {
            if death < birth_date {
                return Err(AppError::Validation(format!(
                    "date_of_death {} is before birthdate {}",
                    death, birth_date
                )));
            }
        }

        Ok(NewAuthor {
            name: form.name,
            birth_date,
            date_of_death,
        })
    }
}

/// Delete-author form as submitted
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteAuthorForm {
    pub author_id: Option<String>,
}

/// Result of a guarded author delete
#[derive(Debug, Clone, PartialEq)]
pub enum AuthorDeletion {
    NotFound,
    HasBooks { author: Author, book_count: i64 },
    Deleted(Author),
}
