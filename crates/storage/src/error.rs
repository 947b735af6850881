//! Typed error enum for the storage layer.
//!
//! Callers match on the failure mode (not found, bad identifier, store
//! failure) instead of inspecting driver-specific sentinels.

use mongodb::bson;
use rest_api_core::AppError;
use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No document matched the identifier. Always carries the shared
    /// [`AppError::not_found`] instance.
    #[error("{0}")]
    NotFound(&'static AppError),

    /// External id is not a 24 character hex ObjectId.
    #[error("invalid user id {id:?}: {source}")]
    InvalidId {
        id: String,
        #[source]
        source: bson::oid::Error,
    },

    /// Driver-level failure: connection loss, timeout, write conflict.
    #[error("failed to {operation} ({target}): {source}")]
    Database {
        operation: &'static str,
        target: String,
        #[source]
        source: mongodb::error::Error,
    },

    /// User could not be turned into a BSON document.
    #[error("failed to encode user: {0}")]
    Encode(#[source] bson::ser::Error),

    /// Stored document could not be turned back into a user.
    #[error("failed to decode user ({context}): {source}")]
    Decode {
        context: String,
        #[source]
        source: bson::de::Error,
    },

    /// Store assigned something other than an ObjectId on insert.
    #[error("inserted id is not an ObjectId: {0}")]
    UnexpectedId(String),
}

impl StorageError {
    pub fn not_found() -> Self {
        Self::NotFound(AppError::not_found())
    }

    pub(crate) fn database(
        operation: &'static str,
        target: impl Into<String>,
        source: mongodb::error::Error,
    ) -> Self {
        Self::Database { operation, target: target.into(), source }
    }

    /// Whether this error is the shared not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether the caller supplied a malformed identifier.
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, Self::InvalidId { .. })
    }

    /// The application-level error this storage error stands for, if any.
    pub fn app_error(&self) -> Option<&'static AppError> {
        match self {
            Self::NotFound(e) => Some(e),
            _ => None,
        }
    }
}
