//! Catalog management service

use crate::{
    error::AppResult,
    models::{
        Author, AuthorDeletion, AuthorForm, BookFilter, BookForm, BookFormView, CatalogView,
        DeleteAuthorForm, SearchForm, SearchView, SortForm,
    },
    repository::Repository,
    validation::parse_integer,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a new author
    pub async fn add_author(&self, form: AuthorForm) -> AppResult<Author> {
        let new_author = form.validated()?;
        let author = self.repository.authors.create(&new_author).await?;
        tracing::info!(author_id = author.id, name = %author.name, "Author created");
        Ok(author)
    }

    /// Empty add-book page: just the author picker
    pub async fn book_form(&self) -> AppResult<BookFormView> {
        Ok(BookFormView {
            authors: self.repository.authors.list().await?,
            book: None,
        })
    }

    /// Validate and store a new book
    pub async fn add_book(&self, form: BookForm) -> AppResult<BookFormView> {
        let new_book = form.validated()?;
        let book = self.repository.books.create(&new_book).await?;
        tracing::info!(book_id = book.id, author_id = book.author_id, title = %book.title, "Book created");

        Ok(BookFormView {
            authors: self.repository.authors.list().await?,
            book: Some(book),
        })
    }

    /// Full unfiltered listing
    pub async fn catalog(&self) -> AppResult<CatalogView> {
        self.listing(&BookFilter::All, None).await
    }

    /// Listing narrowed by author or exact title
    pub async fn sort(&self, form: SortForm) -> AppResult<CatalogView> {
        let filter = form.filter()?;
        tracing::debug!(?filter, "Sorting catalog");
        self.listing(&filter, None).await
    }

    /// Case-insensitive search over titles and author names
    pub async fn search(&self, form: SearchForm) -> AppResult<SearchView> {
        let query = form.search.unwrap_or_default();
        let books = self.repository.books.search(&query).await?;
        tracing::debug!(query = %query, hits = books.len(), "Catalog search");
        Ok(SearchView { books })
    }

    /// Delete a book; a missing id is a `NotFound` error
    pub async fn delete_book(&self, id: i64) -> AppResult<CatalogView> {
        let book = self.repository.books.delete(id).await?;
        tracing::info!(book_id = book.id, title = %book.title, "Book deleted");

        let message = format!("{} deleted successfully", book.title);
        self.listing(&BookFilter::All, Some(message)).await
    }

    /// Delete an author unless books still reference it.
    ///
    /// Not-found and blocked outcomes are reported in the message, not as errors.
    pub async fn delete_author(&self, form: DeleteAuthorForm) -> AppResult<CatalogView> {
        let author_id = parse_integer("author_id", form.author_id.as_deref())?;

        let message = match self.repository.authors.delete_guarded(author_id).await? {
            AuthorDeletion::NotFound => {
                tracing::info!(author_id, "Author delete requested for unknown id");
                "Author not found.".to_string()
            }
            AuthorDeletion::HasBooks { author, book_count } => {
                tracing::warn!(author_id, book_count, "Author delete blocked by existing books");
                format!("Author '{}' cannot be deleted because they have books.", author.name)
            }
            AuthorDeletion::Deleted(author) => {
                tracing::info!(author_id, name = %author.name, "Author deleted");
                format!("Author '{}' deleted successfully.", author.name)
            }
        };

        self.listing(&BookFilter::All, Some(message)).await
    }

    async fn listing(&self, filter: &BookFilter, message: Option<String>) -> AppResult<CatalogView> {
        Ok(CatalogView {
            books: self.repository.books.list(filter).await?,
            authors: self.repository.authors.list().await?,
            message,
        })
    }
}
