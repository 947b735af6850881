//! Application error surfaced across the API boundary.
//!
//! `AppError` is what a client eventually sees: an end-user message, an
//! optional developer message and a stable code. The underlying cause is
//! kept for logs and `source()` chains but never serialized.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::constants::{CODE_BAD_REQUEST, CODE_NOT_FOUND, CODE_SYSTEM};

type Cause = Arc<dyn StdError + Send + Sync>;

/// The one "not found" value. Compare with [`AppError::is_not_found`] or
/// `std::ptr::eq` against [`AppError::not_found`], never by message.
static NOT_FOUND: AppError = AppError::from_static("not found", "", CODE_NOT_FOUND);

static INTERNAL: AppError = AppError::from_static("internal system error", "", CODE_SYSTEM);

/// Classified failure with a stable `code`.
#[derive(Clone, Serialize)]
pub struct AppError {
    #[serde(skip)]
    cause: Option<Cause>,
    #[serde(skip_serializing_if = "is_blank")]
    message: Cow<'static, str>,
    #[serde(skip_serializing_if = "is_blank")]
    developer_message: Cow<'static, str>,
    #[serde(skip_serializing_if = "is_blank")]
    code: Cow<'static, str>,
}

fn is_blank(s: &Cow<'static, str>) -> bool {
    s.is_empty()
}

impl AppError {
    pub fn new<E>(
        cause: Option<E>,
        message: impl Into<Cow<'static, str>>,
        developer_message: impl Into<Cow<'static, str>>,
        code: impl Into<Cow<'static, str>>,
    ) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            cause: cause.map(|e| Arc::new(e) as Cause),
            message: message.into(),
            developer_message: developer_message.into(),
            code: code.into(),
        }
    }

    /// Cause-less constructor usable in `static` items.
    pub const fn from_static(
        message: &'static str,
        developer_message: &'static str,
        code: &'static str,
    ) -> Self {
        Self {
            cause: None,
            message: Cow::Borrowed(message),
            developer_message: Cow::Borrowed(developer_message),
            code: Cow::Borrowed(code),
        }
    }

    /// Shared not-found instance used by storage and HTTP layers alike.
    pub fn not_found() -> &'static Self {
        &NOT_FOUND
    }

    /// Generic system error body; the real cause is logged, never rendered.
    pub fn internal() -> &'static Self {
        &INTERNAL
    }

    /// Client sent something that could not be understood.
    pub fn bad_request(developer_message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(None::<NoCause>, "bad request", developer_message, CODE_BAD_REQUEST)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn developer_message(&self) -> &str {
        &self.developer_message
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_not_found(&self) -> bool {
        std::ptr::eq(self, &NOT_FOUND) || self.code == NOT_FOUND.code
    }

    /// JSON body `{message, developer_message, code}` with empty fields
    /// omitted. Returns an empty vector if encoding fails.
    pub fn render(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// First `AppError` found while walking `err` and its `source()` chain.
    pub fn find_in_chain<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Self> {
        std::iter::successors(Some(err), |&e| e.source()).find_map(|e| e.downcast_ref::<Self>())
    }
}

/// Placeholder cause type for constructors that have none.
#[derive(Debug)]
enum NoCause {}

impl fmt::Display for NoCause {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl StdError for NoCause {}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("message", &self.message)
            .field("developer_message", &self.developer_message)
            .field("code", &self.code)
            .field("cause", &self.cause.as_ref().map(ToString::to_string))
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|e| e as &(dyn StdError + 'static))
    }
}
