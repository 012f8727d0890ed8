//! Bounding an operation by a deadline.
//!
//! The operation and a timer are raced; whichever settles first decides the
//! outcome. An operation that loses keeps running in the background.

mod engine;
mod options;

pub use engine::{
    wait_until, wait_until_async, wait_until_async_or, wait_until_default_async, wait_until_or,
};
pub use options::{INITIAL_DURATION, get_default_duration, set_default_duration};
