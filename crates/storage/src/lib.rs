//! Storage layer for rest-api
//!
//! The [`UserStorage`] port with MongoDB and in-memory implementations, and
//! the startup connection bootstrap in [`client`].

pub mod client;
mod document;
mod error;
mod memory_storage;
mod mongo_storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use client::ConnectError;
pub use error::StorageError;
pub use memory_storage::MemoryUserStorage;
pub use mongo_storage::MongoUserStorage;
pub use mongodb::Database;
pub use traits::UserStorage;
