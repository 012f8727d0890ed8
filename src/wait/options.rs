use crate::utils::time::as_millis_u64;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tracing::debug;

pub const INITIAL_DURATION: Duration = Duration::from_secs(60);

static DEFAULT_DURATION: RwLock<Duration> = RwLock::new(INITIAL_DURATION);

pub fn get_default_duration() -> Duration {
    *DEFAULT_DURATION.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_default_duration(duration: Duration) {
    *DEFAULT_DURATION.write().unwrap_or_else(PoisonError::into_inner) = duration;
    debug!(duration_ms = as_millis_u64(duration), "Replaced default wait duration");
}
