//! Core types for rest-api
//!
//! Domain types, the application error taxonomy and configuration shared
//! across all other crates.

pub mod config;
pub mod constants;
mod env_config;
mod error;
mod user;

pub use config::{ConnectConfig, ServerConfig, StorageConfig};
pub use constants::*;
pub use env_config::parse_with_default;
pub use error::AppError;
pub use user::User;
