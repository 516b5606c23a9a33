//! Books repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPatch, NewBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books in storage order
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Create a new book listing, available by default
    pub async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, genre, condition, description, price,
                               available, owner_id, cover_url, cover_key)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.genre)
        .bind(book.condition)
        .bind(&book.description)
        .bind(book.price)
        .bind(&book.owner_id)
        .bind(&book.cover_url)
        .bind(&book.cover_key)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Apply a partial update to a book. Absent fields keep their value.
    pub async fn update(&self, id: Uuid, patch: &BookPatch) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                genre = COALESCE($4, genre),
                condition = COALESCE($5, condition),
                description = COALESCE($6, description),
                price = COALESCE($7, price),
                available = COALESCE($8, available),
                cover_url = COALESCE($9, cover_url),
                cover_key = COALESCE($10, cover_key),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.author)
        .bind(patch.genre)
        .bind(patch.condition)
        .bind(&patch.description)
        .bind(patch.price)
        .bind(patch.available)
        .bind(&patch.cover_url)
        .bind(&patch.cover_key)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Flip availability. Used when a loan is approved or the book comes back.
    pub async fn set_available(&self, id: Uuid, available: bool) -> AppResult<()> {
        sqlx::query("UPDATE books SET available = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(available)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
