use crate::error::{TimeoutError, WaitError};
use crate::utils::lift::lift_once;
use crate::utils::time::as_millis_u64;
use crate::wait::options::get_default_duration;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Races `future` against a `duration` timer.
///
/// Returns `None` when the timer fires first. In that case the future is not
/// dropped: it is handed to the runtime and keeps running to completion, with
/// its output discarded. If both are ready on the same poll the future wins.
async fn race<T, E, Fut>(future: Fut, duration: Duration) -> Option<Result<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let mut operation = Box::pin(future);

    tokio::select! {
        biased;
        outcome = &mut operation => return Some(outcome),
        () = tokio::time::sleep(duration) => {}
    }

    debug!(
        duration_ms = as_millis_u64(duration),
        "Deadline elapsed before operation settled, detaching it"
    );
    tokio::spawn(operation);

    None
}

/// Runs `operation` and fails with a [`TimeoutError`] if it has not settled
/// within `duration`.
pub async fn wait_until_async<T, E, F, Fut>(
    operation: F,
    duration: Duration,
) -> Result<T, WaitError<E>>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    match race(operation(), duration).await {
        Some(outcome) => outcome.map_err(WaitError::Operation),
        None => Err(WaitError::Timeout(TimeoutError::default())),
    }
}

/// Like [`wait_until_async`], but returns `on_timeout` when the deadline wins.
pub async fn wait_until_async_or<T, E, F, Fut>(
    operation: F,
    duration: Duration,
    on_timeout: E,
) -> Result<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    race(operation(), duration).await.unwrap_or(Err(on_timeout))
}

pub async fn wait_until_default_async<T, E, F, Fut>(operation: F) -> Result<T, WaitError<E>>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    wait_until_async(operation, get_default_duration()).await
}

/// Synchronous-operation flavour of [`wait_until_async`].
///
/// The operation runs before the timer is armed, so its outcome is always
/// what comes back; the deadline cannot interrupt blocking work.
pub async fn wait_until<T, E, F>(operation: F, duration: Duration) -> Result<T, WaitError<E>>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce() -> Result<T, E>,
{
    wait_until_async(lift_once(operation), duration).await
}

pub async fn wait_until_or<T, E, F>(operation: F, duration: Duration, on_timeout: E) -> Result<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce() -> Result<T, E>,
{
    wait_until_async_or(lift_once(operation), duration, on_timeout).await
}
