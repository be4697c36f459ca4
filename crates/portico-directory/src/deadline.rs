//! Deadline propagation for directory operations.
//!
//! Cancellation in this stack is structural: dropping a store future
//! aborts the in-flight backend call. Deadlines are the caller's
//! responsibility and are expressed by wrapping an operation here.

use std::time::Duration;

use portico_core::DirectoryResult;
use portico_core::error::DirectoryError;

/// Run a directory operation under a deadline.
///
/// Returns [`DirectoryError::DeadlineExceeded`] when the limit
/// elapses first; the wrapped future is dropped, aborting the
/// backend call.
pub async fn with_deadline<T>(
    limit: Duration,
    op: impl Future<Output = DirectoryResult<T>>,
) -> DirectoryResult<T> {
    match tokio::time::timeout(limit, op).await {
        Ok(result) => result,
        Err(_) => Err(DirectoryError::DeadlineExceeded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_result_through_within_deadline() {
        let out = with_deadline(Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(out.unwrap(), 7);
    }

    #[tokio::test]
    async fn overrun_yields_deadline_exceeded() {
        let err = with_deadline(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, DirectoryError::DeadlineExceeded));
    }
}
