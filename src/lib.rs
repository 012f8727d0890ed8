//! Async retry and timeout combinators.
//!
//! - [`retry`](retry::retry) / [`retry_async`](retry::retry_async) call an
//!   operation again after a constant delay until it succeeds, an acceptance
//!   check passes, or the attempt budget runs out.
//! - [`wait_until`](wait::wait_until) / [`wait_until_async`](wait::wait_until_async)
//!   race an operation against a deadline.
//!
//! Library-raised errors carry an [`ErrorKind`] marker; use
//! [`is_timeout_error`] and [`is_too_many_attempts`] to branch on them.
//!
//! ```rust,no_run
//! use retry_wait::{RetryConfiguration, retry_async, wait_until_async};
//! use std::num::NonZeroU32;
//! use std::time::Duration;
//!
//! # async fn fetch() -> Result<String, std::io::Error> { Ok(String::new()) }
//! # async fn run() {
//! let config = RetryConfiguration::default()
//!     .max_attempts(NonZeroU32::new(5).unwrap())
//!     .delay(Duration::from_millis(250));
//!
//! // Each attempt bounded to one second, five attempts overall.
//! let _body = retry_async(
//!     || wait_until_async(fetch, Duration::from_secs(1)),
//!     config,
//! )
//! .await;
//! # }
//! ```

pub mod config;
pub mod error;
pub mod retry;
pub mod utils;
pub mod wait;

pub use error::{
    Classify, Error, ErrorKind, Result, RetryError, TimeoutError, TooManyAttempts, WaitError,
    is_timeout_error, is_too_many_attempts,
};
pub use retry::{
    PartialRetryDefaults, RetryConfiguration, RetryDefaults, Truthy,
    get_default_retry_configuration, retry, retry_async, retry_async_until_defined,
    retry_async_until_truthy, retry_until_defined, retry_until_truthy,
    set_default_retry_configuration,
};
pub use wait::{
    get_default_duration, set_default_duration, wait_until, wait_until_async, wait_until_async_or,
    wait_until_default_async, wait_until_or,
};
