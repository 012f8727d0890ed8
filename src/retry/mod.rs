//! Retrying fallible operations with a constant delay between attempts.
//!
//! [`retry_async`] drives an async operation, [`retry`] a synchronous one.
//! Both take a [`RetryConfiguration`], usually built from the process-wide
//! defaults with [`RetryConfiguration::default`] and then adjusted.

mod engine;
mod options;
mod until;

pub use engine::{retry, retry_async};
pub use options::{
    AcceptanceCheck, PartialRetryDefaults, RetryConfiguration, RetryDefaults,
    get_default_retry_configuration, set_default_retry_configuration,
};
pub use until::{
    Truthy, retry_async_until_defined, retry_async_until_truthy, retry_until_defined,
    retry_until_truthy,
};
