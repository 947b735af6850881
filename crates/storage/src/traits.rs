//! Storage port consumed by request handlers.
//!
//! Identifiers cross this boundary as plain hex strings; each
//! implementation converts them to its native form. Dropping a returned
//! future aborts the in-flight store call.

use async_trait::async_trait;
use rest_api_core::User;

use crate::error::StorageError;

/// User persistence operations.
///
/// Not-found is reported uniformly as [`StorageError::NotFound`] by every
/// identifier-addressed operation.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Insert a new user from its non-id fields. Returns the generated id.
    async fn create(&self, user: &User) -> Result<String, StorageError>;

    /// Fetch one user by id.
    async fn find_one(&self, id: &str) -> Result<User, StorageError>;

    /// Fetch every user. No ordering guarantee.
    async fn find_all(&self) -> Result<Vec<User>, StorageError>;

    /// Set the fields present on `user` for the document `user.id`; absent
    /// fields keep their stored values.
    async fn update(&self, user: &User) -> Result<(), StorageError>;

    /// Physically remove a user.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}
