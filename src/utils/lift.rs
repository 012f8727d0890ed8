use std::future::{Ready, ready};

/// Turns a synchronous operation into one the async engines can drive.
///
/// The operation runs when the returned closure is called, and its result is
/// handed back as an already-completed future.
pub fn lift<T, E, F>(mut operation: F) -> impl FnMut() -> Ready<Result<T, E>>
where
    F: FnMut() -> Result<T, E>,
{
    move || ready(operation())
}

pub fn lift_once<T, E, F>(operation: F) -> impl FnOnce() -> Ready<Result<T, E>>
where
    F: FnOnce() -> Result<T, E>,
{
    move || ready(operation())
}
