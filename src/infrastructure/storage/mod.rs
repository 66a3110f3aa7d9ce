use async_trait::async_trait;
use thiserror::Error;

use crate::core::models::user::{NewUser, User};

pub mod in_memory;
pub mod postgres;

/// Failures reported by a [`Storage`] backend, classified at the store boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("unique constraint violated on users.{column}")]
    UniqueViolation { column: String },

    #[error("integrity constraint violated: {0}")]
    IntegrityViolation(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Persistence for user records. Each call is one atomic unit against the backend.
#[async_trait]
pub trait Storage: Send + Sync {
    /// All users ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, StorageError>;
    async fn get_user(&self, user_id: i64) -> Result<Option<User>, StorageError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;
    async fn insert_user(&self, user: NewUser) -> Result<User, StorageError>;
    /// Writes the mutable columns of `user`. Returns `None` when no row has `user.id`.
    async fn update_user(&self, user: &User) -> Result<Option<User>, StorageError>;
}
