use crate::error::Result;
use crate::retry::{PartialRetryDefaults, RetryDefaults, set_default_retry_configuration};
use crate::utils::time::duration_ms;
use crate::wait::{get_default_duration, set_default_duration};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const ENV_PREFIX: &str = "RETRY_WAIT";

/// Process-wide defaults as read from configuration sources.
///
/// Every field is optional; anything left out keeps the value currently
/// installed.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub retry: PartialRetryDefaults,
    #[serde(default)]
    pub wait: WaitSettings,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct WaitSettings {
    #[serde(default, rename = "duration_ms", with = "duration_ms::option")]
    pub duration: Option<Duration>,
}

/// Snapshot of both engines' defaults after [`Settings::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedDefaults {
    pub retry: RetryDefaults,
    pub wait_duration: Duration,
}

impl Settings {
    /// Reads `config/default.*` (if present) and `RETRY_WAIT__*` environment
    /// variables, e.g. `RETRY_WAIT__RETRY__MAX_ATTEMPTS=5`.
    pub fn new() -> Result<Self> {
        let builder = Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        Self::from_sources(builder)
    }

    pub fn from_sources(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;

        debug!(
            max_attempts = ?settings.retry.max_attempts,
            delay = ?settings.retry.delay,
            wait_duration = ?settings.wait.duration,
            "Loaded retry/wait settings"
        );

        Ok(settings)
    }

    /// Installs these settings as the process-wide defaults.
    pub fn apply(&self) -> AppliedDefaults {
        let retry = set_default_retry_configuration(self.retry);
        if let Some(duration) = self.wait.duration {
            set_default_duration(duration);
        }

        AppliedDefaults {
            retry,
            wait_duration: get_default_duration(),
        }
    }
}
