use crate::error::{RetryError, TooManyAttempts};
use crate::retry::options::RetryConfiguration;
use crate::utils::lift::lift;
use crate::utils::time::{as_millis_u64, pause};
use std::future::Future;
use tracing::{debug, warn};

/// Calls `operation` until it returns an accepted `Ok`, or until
/// `config.max_attempts` attempts have been made.
///
/// Attempts run one after another with `config.delay` between them. When the
/// budget runs out on an error, that error is returned as
/// [`RetryError::Operation`]; when it runs out on results the acceptance
/// check kept rejecting, [`RetryError::TooManyAttempts`] is returned instead.
pub async fn retry_async<T, E, F, Fut>(
    mut operation: F,
    config: RetryConfiguration<T>,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut remaining = config.max_attempts.get();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        remaining -= 1;

        match operation().await {
            Ok(value) if config.accepts(&value) => return Ok(value),
            Ok(_) => {
                if remaining == 0 {
                    warn!(attempts = attempt, "Result never accepted, giving up");
                    return Err(RetryError::TooManyAttempts(TooManyAttempts::default()));
                }

                debug!(
                    attempt = attempt,
                    remaining = remaining,
                    delay_ms = as_millis_u64(config.delay),
                    "Result rejected by acceptance check, retrying"
                );
            }
            Err(e) => {
                if remaining == 0 {
                    warn!(attempts = attempt, "Operation failed on every attempt");
                    return Err(RetryError::Operation(e));
                }

                debug!(
                    attempt = attempt,
                    remaining = remaining,
                    delay_ms = as_millis_u64(config.delay),
                    "Operation failed, retrying"
                );
            }
        }

        pause(config.delay).await;
    }
}

/// Synchronous-operation flavour of [`retry_async`].
pub async fn retry<T, E, F>(
    operation: F,
    config: RetryConfiguration<T>,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
{
    retry_async(lift(operation), config).await
}
