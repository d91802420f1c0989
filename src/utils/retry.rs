//! Retry utilities for navigation attempts
//!
//! Bounded retry with a fixed delay between attempts. Implemented as an
//! explicit loop with an attempt counter, so stack depth never depends on
//! the retry count.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial one
    pub max_retries: u32,

    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(5),
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }
}

/// Execute an operation with bounded fixed-delay retries
///
/// The operation runs up to `max_retries + 1` times. On success the result
/// is returned immediately; once all attempts fail, the *last* error is
/// returned so the failure reason stays available for diagnostics.
pub async fn with_retry<T, E, F, Fut>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            debug!(
                attempt = attempt,
                delay_ms = config.delay.as_millis() as u64,
                "Retrying after delay"
            );
            tokio::time::sleep(config.delay).await;
        }

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(attempt = attempt, "Operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) => {
                warn!(
                    attempt = attempt,
                    max_retries = config.max_retries,
                    error = %e,
                    "Operation failed"
                );
                last_error = Some(e);
            }
        }
    }

    // All attempts exhausted; last_error is always set here
    Err(last_error.expect("retry loop ran at least once"))
}
