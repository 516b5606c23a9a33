//! Catalog management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPatch, CreateBook, NewBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books. An empty catalog is an empty list, not an error.
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new listing owned by the caller
    pub async fn create_book(&self, owner_id: &str, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if book.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        if book.author.trim().is_empty() {
            return Err(AppError::Validation("Author is required".to_string()));
        }

        let genre = book
            .genre
            .parse()
            .map_err(|e: String| AppError::Validation(e))?;
        let condition = book
            .condition
            .parse()
            .map_err(|e: String| AppError::Validation(e))?;

        let created = self
            .repository
            .books
            .create(&NewBook {
                title: book.title.trim().to_string(),
                author: book.author.trim().to_string(),
                genre,
                condition,
                description: book.description,
                price: book.price,
                owner_id: owner_id.to_string(),
                cover_url: book.cover_url,
                cover_key: book.cover_key,
            })
            .await?;

        tracing::info!(book_id = %created.id, owner = %owner_id, "book listed");

        Ok(created)
    }

    /// Update a listing. Only the owner may mutate it.
    pub async fn update_book(&self, caller_id: &str, id: Uuid, update: UpdateBook) -> AppResult<Book> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.repository.books.get_by_id(id).await?;
        if existing.owner_id != caller_id {
            return Err(AppError::Authorization(
                "Only the owner may modify this book".to_string(),
            ));
        }

        let genre = update
            .genre
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e: String| AppError::Validation(e))?;
        let condition = update
            .condition
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e: String| AppError::Validation(e))?;

        let patch = BookPatch {
            title: update.title,
            author: update.author,
            genre,
            condition,
            description: update.description,
            price: update.price,
            available: update.available,
            cover_url: update.cover_url,
            cover_key: update.cover_key,
        };

        self.repository.books.update(id, &patch).await
    }
}
