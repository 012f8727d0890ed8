use crate::error::{Error, Result};
use crate::utils::time::{as_millis_u64, duration_ms};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::debug;

const INITIAL_MAX_ATTEMPTS: NonZeroU32 = match NonZeroU32::new(4 * 60) {
    Some(n) => n,
    None => unreachable!(),
};
const INITIAL_DELAY: Duration = Duration::from_millis(250);

static DEFAULT_RETRY: RwLock<RetryDefaults> = RwLock::new(RetryDefaults::INITIAL);

/// The process-wide part of a retry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryDefaults {
    pub max_attempts: NonZeroU32,
    #[serde(rename = "delay_ms", with = "duration_ms")]
    pub delay: Duration,
}

impl RetryDefaults {
    pub const INITIAL: RetryDefaults = RetryDefaults {
        max_attempts: INITIAL_MAX_ATTEMPTS,
        delay: INITIAL_DELAY,
    };

    pub fn merge(self, partial: PartialRetryDefaults) -> RetryDefaults {
        RetryDefaults {
            max_attempts: partial.max_attempts.unwrap_or(self.max_attempts),
            delay: partial.delay.unwrap_or(self.delay),
        }
    }
}

impl Default for RetryDefaults {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Fields to overwrite in the process-wide defaults; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialRetryDefaults {
    #[serde(default)]
    pub max_attempts: Option<NonZeroU32>,
    #[serde(default, rename = "delay_ms", with = "duration_ms::option")]
    pub delay: Option<Duration>,
}

impl From<RetryDefaults> for PartialRetryDefaults {
    fn from(defaults: RetryDefaults) -> Self {
        Self {
            max_attempts: Some(defaults.max_attempts),
            delay: Some(defaults.delay),
        }
    }
}

pub fn get_default_retry_configuration() -> RetryDefaults {
    *DEFAULT_RETRY.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_default_retry_configuration(partial: impl Into<PartialRetryDefaults>) -> RetryDefaults {
    let partial = partial.into();
    let mut current = DEFAULT_RETRY.write().unwrap_or_else(PoisonError::into_inner);
    *current = current.merge(partial);

    debug!(
        max_attempts = current.max_attempts.get(),
        delay_ms = as_millis_u64(current.delay),
        "Replaced default retry configuration"
    );

    *current
}

pub type AcceptanceCheck<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Configuration of a single retry call.
///
/// [`RetryConfiguration::default`] snapshots the process-wide defaults at the
/// time it is called.
pub struct RetryConfiguration<T> {
    pub max_attempts: NonZeroU32,
    pub delay: Duration,
    pub until: Option<AcceptanceCheck<T>>,
}

impl<T> RetryConfiguration<T> {
    pub fn new(max_attempts: NonZeroU32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            until: None,
        }
    }

    pub fn try_new(max_attempts: u32, delay: Duration) -> Result<Self> {
        let max_attempts = NonZeroU32::new(max_attempts).ok_or_else(|| {
            Error::InvalidConfiguration("max_attempts must be at least 1".to_string())
        })?;
        Ok(Self::new(max_attempts, delay))
    }

    pub fn from_defaults(defaults: RetryDefaults) -> Self {
        Self::new(defaults.max_attempts, defaults.delay)
    }

    pub fn max_attempts(mut self, max_attempts: NonZeroU32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn until<P>(mut self, check: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.until = Some(Arc::new(check));
        self
    }

    pub(crate) fn accepts(&self, value: &T) -> bool {
        self.until.as_ref().is_none_or(|check| check(value))
    }
}

impl<T> Default for RetryConfiguration<T> {
    fn default() -> Self {
        Self::from_defaults(get_default_retry_configuration())
    }
}

impl<T> Clone for RetryConfiguration<T> {
    fn clone(&self) -> Self {
        Self {
            max_attempts: self.max_attempts,
            delay: self.delay,
            until: self.until.clone(),
        }
    }
}

impl<T> fmt::Debug for RetryConfiguration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryConfiguration")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .field("until", &self.until.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl<T> From<RetryDefaults> for RetryConfiguration<T> {
    fn from(defaults: RetryDefaults) -> Self {
        Self::from_defaults(defaults)
    }
}
