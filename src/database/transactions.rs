// ABOUTME: Retry wrapper for transient SQLite transaction failures
// ABOUTME: Bounded attempts with exponential backoff; constraint violations never retry
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transaction retry support
//!
//! A reward call is a single read-modify-write transaction per user. Under
//! write contention SQLite reports busy/locked errors; those are transient
//! and retried with backoff. Constraint violations and corrupt-data errors
//! are permanent and surface immediately.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, warn};

use crate::errors::AppResult;

/// Default number of attempts for a reward transaction
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Run a transactional operation, retrying transient failures
///
/// The closure must build a fresh transaction on every call; a failed
/// attempt's transaction has already rolled back by the time it returns.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or the first
/// non-retryable error.
pub async fn retry_transaction<F, Fut, T>(mut f: F, max_retries: u32) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempts = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempts += 1;
                if attempts >= max_retries {
                    error!(
                        attempts = attempts,
                        error = %e,
                        "transaction failed after max retries"
                    );
                    return Err(e);
                }

                let error_msg = format!("{e:?}");
                if is_retryable_error(&error_msg) {
                    // Exponential backoff: 10ms, 20ms, 40ms, ...
                    let backoff_ms = 10 * (1 << attempts);
                    warn!(
                        attempt = attempts,
                        backoff_ms = backoff_ms,
                        error = %e,
                        "transient transaction failure, retrying after backoff"
                    );
                    sleep(Duration::from_millis(backoff_ms)).await;
                } else {
                    return Err(e);
                }
            }
        }
    }
}

/// Check whether a database error is worth retrying
fn is_retryable_error(error_msg: &str) -> bool {
    let error_lower = error_msg.to_lowercase();

    // Non-retryable: constraint violations are permanent
    if error_lower.contains("unique constraint")
        || error_lower.contains("check constraint")
        || error_lower.contains("not null constraint")
        || error_lower.contains("foreign key constraint")
    {
        return false;
    }

    // Retryable: SQLite contention
    error_lower.contains("database is locked")
        || error_lower.contains("database table is locked")
        || error_lower.contains("busy")
        || error_lower.contains("timed out")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_retryable_classification() {
        assert!(is_retryable_error("error: database is locked"));
        assert!(is_retryable_error("SqliteError: database busy"));
        assert!(!is_retryable_error("UNIQUE constraint failed: achievements"));
        assert!(!is_retryable_error("CHECK constraint failed: coins"));
    }

    #[tokio::test]
    async fn test_retry_gives_up_on_permanent_error() {
        let calls = AtomicU32::new(0);
        let result: AppResult<()> = retry_transaction(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(AppError::database("UNIQUE constraint failed")) }
            },
            3,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_error() {
        let calls = AtomicU32::new(0);
        let result = retry_transaction(
            || {
                let attempt = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt == 0 {
                        Err(AppError::database("database is locked"))
                    } else {
                        Ok(42)
                    }
                }
            },
            3,
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
