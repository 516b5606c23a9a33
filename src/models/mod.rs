//! Data models for BookSwap

pub mod book;
pub mod borrow;
pub mod enums;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookPatch, CreateBook, NewBook, UpdateBook};
pub use borrow::{BorrowRecord, CreateBorrowRequest, NewBorrowRecord};
pub use enums::{BorrowStatus, Condition, Genre};
pub use user::{UpsertProfile, UserProfile};
