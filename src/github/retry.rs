//! Exponential backoff retry for transport failures.
//!
//! Retrying is a caller-level policy around collaborator calls; the version
//! inference core never retries anything.

use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use tracing::warn;

use crate::error::GitHubError;

const MAX_RETRIES: u32 = 3;
const INITIAL_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 30;

/// Run a GitHub API call, retrying transport failures with exponential
/// backoff. Typed outcomes (`NotFound`, rate limits, auth failures) are
/// returned immediately: retrying cannot change them.
pub async fn with_transport_retry<T, F, Fut>(
    operation: &str,
    mut call: F,
) -> Result<T, GitHubError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GitHubError>>,
{
    let mut backoff = ExponentialBackoff {
        initial_interval: Duration::from_secs(INITIAL_INTERVAL_SECS),
        max_interval: Duration::from_secs(MAX_INTERVAL_SECS),
        max_elapsed_time: None,
        ..Default::default()
    };

    let mut attempts = 0;

    loop {
        attempts += 1;

        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if attempts < MAX_RETRIES && is_retryable(&e) => {
                warn!(operation, attempt = attempts, error = %e, "Retrying after transport failure");

                if let Some(wait) = backoff.next_backoff() {
                    tokio::time::sleep(wait).await;
                }
            }
            Err(e) => return Err(e),
        }
    }
}

fn is_retryable(error: &GitHubError) -> bool {
    matches!(error, GitHubError::Transport(_))
}
