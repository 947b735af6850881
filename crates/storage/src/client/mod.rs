//! Startup connection bootstrap.
//!
//! A store that is not ready yet is retried a bounded number of times with
//! a constant delay. Each attempt has its own timeout so one hung attempt
//! cannot eat the whole budget. Exhaustion is returned as an error; the
//! binary decides to terminate.

pub mod mongo;
#[cfg(feature = "postgres")]
pub mod postgres;

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use rest_api_core::ConnectConfig;
use thiserror::Error;

/// Connection bootstrap failure.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// A single attempt exceeded its own timeout.
    #[error("connection attempt timed out after {0:?}")]
    Timeout(Duration),

    /// A single attempt was rejected by the driver.
    #[error("connection attempt failed: {0}")]
    Attempt(#[source] Box<dyn StdError + Send + Sync>),

    /// Every attempt failed.
    #[error("gave up after {attempts} attempt(s), last error: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<ConnectError>,
    },
}

/// Run `op` until it succeeds or `policy` runs out of attempts.
///
/// `max_attempts` counts tries, and zero is treated as one. There is no
/// pause after the final failure.
pub async fn do_with_tries<T, E, F, Fut>(policy: ConnectConfig, mut op: F) -> Result<T, ConnectError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    let max_attempts = policy.effective_attempts();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        let err = match tokio::time::timeout(policy.attempt_timeout, op()).await {
            Ok(Ok(value)) => {
                if attempt > 1 {
                    tracing::info!(attempt, "connected after retrying");
                }
                return Ok(value);
            },
            Ok(Err(e)) => ConnectError::Attempt(e.into()),
            Err(_) => ConnectError::Timeout(policy.attempt_timeout),
        };

        if attempt >= max_attempts {
            return Err(ConnectError::Exhausted { attempts: attempt, last: Box::new(err) });
        }

        tracing::warn!(
            attempt,
            max_attempts,
            delay = ?policy.delay,
            error = %err,
            "connection attempt failed, retrying"
        );
        tokio::time::sleep(policy.delay).await;
    }
}
