//! Test utilities and module declarations for storage tests.

use rest_api_core::User;

use crate::MemoryUserStorage;

pub fn create_test_storage() -> MemoryUserStorage {
    MemoryUserStorage::new()
}

pub fn create_test_user(name: &str) -> User {
    User {
        name: Some(name.to_owned()),
        email: Some(format!("{name}@example.com")),
        password: Some("hunter2".to_owned()),
        ..User::default()
    }
}

/// Valid hex that no test ever inserts.
pub const UNKNOWN_ID: &str = "ffffffffffffffffffffffff";

mod memory_storage_tests;
