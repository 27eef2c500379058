//! Data models for the catalog

pub mod author;
pub mod book;
pub mod view;

// Re-export commonly used types
pub use author::{Author, AuthorDeletion, AuthorForm, DeleteAuthorForm, NewAuthor};
pub use book::{Book, BookFilter, BookForm, BookWithAuthor, NewBook, SearchForm, SortForm};
pub use view::{AuthorFormView, BookFormView, CatalogView, SearchView};
