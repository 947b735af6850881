//! Runtime configuration read from `REST_API_*` environment variables.
//!
//! Every loader takes a lookup closure so tests can feed a map instead of
//! mutating the process environment; `from_env` wires in `std::env::var`.

use std::time::Duration;

use crate::constants::{
    CONNECT_ATTEMPT_TIMEOUT_SECS, DEFAULT_CONNECT_ATTEMPTS, DEFAULT_CONNECT_DELAY_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_STORAGE_DATABASE, DEFAULT_STORAGE_HOST,
    DEFAULT_STORAGE_PORT, DEFAULT_USERS_COLLECTION,
};
use crate::env_config::parse_with_default;

pub const ENV_STORAGE_HOST: &str = "REST_API_MONGODB_HOST";
pub const ENV_STORAGE_PORT: &str = "REST_API_MONGODB_PORT";
pub const ENV_STORAGE_USERNAME: &str = "REST_API_MONGODB_USERNAME";
pub const ENV_STORAGE_PASSWORD: &str = "REST_API_MONGODB_PASSWORD";
pub const ENV_STORAGE_DATABASE: &str = "REST_API_MONGODB_DATABASE";
pub const ENV_STORAGE_AUTH_SOURCE: &str = "REST_API_MONGODB_AUTH_SOURCE";
pub const ENV_STORAGE_COLLECTION: &str = "REST_API_MONGODB_COLLECTION";
pub const ENV_CONNECT_ATTEMPTS: &str = "REST_API_CONNECT_ATTEMPTS";
pub const ENV_CONNECT_DELAY_SECS: &str = "REST_API_CONNECT_DELAY_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REST_API_REQUEST_TIMEOUT_SECS";

fn env_lookup(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

/// Where the backing store lives. Values are not validated here: a bad
/// host or password shows up as a connection failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    /// Database holding the credentials; the driver default when empty.
    pub auth_source: String,
    pub collection: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_STORAGE_HOST.to_owned(),
            port: DEFAULT_STORAGE_PORT,
            username: String::new(),
            password: String::new(),
            database: DEFAULT_STORAGE_DATABASE.to_owned(),
            auth_source: String::new(),
            collection: DEFAULT_USERS_COLLECTION.to_owned(),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup(ENV_STORAGE_HOST).unwrap_or(defaults.host),
            port: parse_with_default(ENV_STORAGE_PORT, lookup(ENV_STORAGE_PORT), defaults.port),
            username: lookup(ENV_STORAGE_USERNAME).unwrap_or(defaults.username),
            password: lookup(ENV_STORAGE_PASSWORD).unwrap_or(defaults.password),
            database: lookup(ENV_STORAGE_DATABASE).unwrap_or(defaults.database),
            auth_source: lookup(ENV_STORAGE_AUTH_SOURCE).unwrap_or(defaults.auth_source),
            collection: lookup(ENV_STORAGE_COLLECTION).unwrap_or(defaults.collection),
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }
}

/// Retry budget for the startup connection bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectConfig {
    /// Total attempts, not retries. Zero is treated as one.
    pub max_attempts: u32,
    /// Constant pause between failed attempts.
    pub delay: Duration,
    /// Upper bound for a single attempt.
    pub attempt_timeout: Duration,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_CONNECT_ATTEMPTS,
            delay: Duration::from_secs(DEFAULT_CONNECT_DELAY_SECS),
            attempt_timeout: Duration::from_secs(CONNECT_ATTEMPT_TIMEOUT_SECS),
        }
    }
}

impl ConnectConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let delay_secs = parse_with_default(
            ENV_CONNECT_DELAY_SECS,
            lookup(ENV_CONNECT_DELAY_SECS),
            DEFAULT_CONNECT_DELAY_SECS,
        );
        Self {
            max_attempts: parse_with_default(
                ENV_CONNECT_ATTEMPTS,
                lookup(ENV_CONNECT_ATTEMPTS),
                DEFAULT_CONNECT_ATTEMPTS,
            ),
            delay: Duration::from_secs(delay_secs),
            ..Self::default()
        }
    }

    /// Attempts actually made: at least one.
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// HTTP-side settings that are not listen flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Deadline for every storage call made on behalf of a request.
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS) }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secs = parse_with_default(
            ENV_REQUEST_TIMEOUT_SECS,
            lookup(ENV_REQUEST_TIMEOUT_SECS),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        );
        Self { request_timeout: Duration::from_secs(secs) }
    }
}
