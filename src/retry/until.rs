use crate::error::{RetryError, TooManyAttempts};
use crate::retry::engine::retry_async;
use crate::retry::options::RetryConfiguration;
use crate::utils::lift::lift;
use std::future::Future;

/// Values that count as "done" for [`retry_until_truthy`].
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for &str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

macro_rules! truthy_int {
    ($($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

/// Retries until the operation yields `Some`, and returns the inner value.
///
/// Any acceptance check already set on `config` is replaced.
pub async fn retry_async_until_defined<T, E, F, Fut>(
    operation: F,
    config: RetryConfiguration<Option<T>>,
) -> Result<T, RetryError<E>>
where
    T: 'static,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    match retry_async(operation, config.until(Option::is_some)).await? {
        Some(value) => Ok(value),
        None => Err(RetryError::TooManyAttempts(TooManyAttempts::default())),
    }
}

pub async fn retry_until_defined<T, E, F>(
    operation: F,
    config: RetryConfiguration<Option<T>>,
) -> Result<T, RetryError<E>>
where
    T: 'static,
    F: FnMut() -> Result<Option<T>, E>,
{
    retry_async_until_defined(lift(operation), config).await
}

/// Retries until the operation yields a [`Truthy`] value.
///
/// Any acceptance check already set on `config` is replaced.
pub async fn retry_async_until_truthy<T, E, F, Fut>(
    operation: F,
    config: RetryConfiguration<T>,
) -> Result<T, RetryError<E>>
where
    T: Truthy + 'static,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_async(operation, config.until(T::is_truthy)).await
}

pub async fn retry_until_truthy<T, E, F>(
    operation: F,
    config: RetryConfiguration<T>,
) -> Result<T, RetryError<E>>
where
    T: Truthy + 'static,
    F: FnMut() -> Result<T, E>,
{
    retry_async_until_truthy(lift(operation), config).await
}
