//! Shared constants for rest-api.
//!
//! Error codes are part of the wire contract: clients branch on them, so a
//! code never changes meaning once released.

/// Unexpected failure with no client-facing detail.
pub const CODE_SYSTEM: &str = "US-000000";

/// Request body could not be decoded.
pub const CODE_BAD_REQUEST: &str = "US-000001";

/// Addressed entity does not exist.
pub const CODE_NOT_FOUND: &str = "US-000003";

/// External identifier is not a valid native identifier.
pub const CODE_INVALID_ID: &str = "US-000004";

/// Store call did not finish within the request deadline.
pub const CODE_DEADLINE_EXCEEDED: &str = "US-000005";

/// Default MongoDB host.
pub const DEFAULT_STORAGE_HOST: &str = "localhost";

/// Default MongoDB port.
pub const DEFAULT_STORAGE_PORT: u16 = 27017;

/// Default database name.
pub const DEFAULT_STORAGE_DATABASE: &str = "user-service";

/// Default collection holding user documents.
pub const DEFAULT_USERS_COLLECTION: &str = "users";

/// Connection bootstrap: total connection attempts before giving up.
pub const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;

/// Connection bootstrap: constant pause between failed attempts, in seconds.
pub const DEFAULT_CONNECT_DELAY_SECS: u64 = 5;

/// Connection bootstrap: upper bound for a single attempt, in seconds.
pub const CONNECT_ATTEMPT_TIMEOUT_SECS: u64 = 5;

/// Deadline applied to every storage call made on behalf of a request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Default HTTP listen address.
pub const DEFAULT_LISTEN_HOST: &str = "127.0.0.1";

/// Default HTTP listen port.
pub const DEFAULT_LISTEN_PORT: u16 = 1234;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;
