use retry_wait::config::Settings;
use retry_wait::{
    PartialRetryDefaults, RetryConfiguration, RetryDefaults, get_default_duration,
    get_default_retry_configuration, is_timeout_error, retry, set_default_duration,
    set_default_retry_configuration, wait_until_default_async,
};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

// Defaults are process-wide; tests in this file take turns.
static DEFAULTS: Mutex<()> = Mutex::const_new(());

fn attempts(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_setting_the_current_retry_defaults_changes_nothing() {
    let _guard = DEFAULTS.lock().await;
    let before = get_default_retry_configuration();

    set_default_retry_configuration(before);
    assert_eq!(get_default_retry_configuration(), before);
}

#[tokio::test]
async fn test_partial_update_merges_into_retry_defaults() {
    let _guard = DEFAULTS.lock().await;
    let initial = get_default_retry_configuration();

    let updated = set_default_retry_configuration(PartialRetryDefaults {
        max_attempts: Some(attempts(initial.max_attempts.get() + 1)),
        delay: None,
    });
    assert_eq!(updated.max_attempts.get(), initial.max_attempts.get() + 1);
    assert_eq!(updated.delay, initial.delay, "Unspecified fields keep their value");
    assert_eq!(get_default_retry_configuration(), updated);

    set_default_retry_configuration(initial);
}

#[tokio::test]
async fn test_configuration_snapshot_ignores_later_changes() {
    let _guard = DEFAULTS.lock().await;
    let initial = get_default_retry_configuration();

    set_default_retry_configuration(RetryDefaults {
        max_attempts: attempts(3),
        delay: Duration::ZERO,
    });
    let config = RetryConfiguration::<u32>::default();

    set_default_retry_configuration(RetryDefaults {
        max_attempts: attempts(9),
        delay: Duration::from_secs(1),
    });

    let calls = AtomicU32::new(0);
    let result = retry(
        || Err::<u32, _>(calls.fetch_add(1, Ordering::SeqCst)),
        config,
    )
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 3, "Snapshot taken before the change applies");
    assert_eq!(result.unwrap_err().into_operation_error(), Some(2));

    set_default_retry_configuration(initial);
}

#[tokio::test]
async fn test_setting_the_current_duration_changes_nothing() {
    let _guard = DEFAULTS.lock().await;
    let before = get_default_duration();

    set_default_duration(get_default_duration());
    assert_eq!(get_default_duration(), before);

    set_default_duration(before + Duration::from_millis(100));
    assert_eq!(get_default_duration(), before + Duration::from_millis(100));

    set_default_duration(before);
}

#[tokio::test(start_paused = true)]
async fn test_default_duration_is_read_at_call_time() {
    let _guard = DEFAULTS.lock().await;
    let initial = get_default_duration();

    set_default_duration(Duration::from_millis(20));
    let result = wait_until_default_async(|| async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok::<_, String>(())
    })
    .await;
    assert!(is_timeout_error(&result.unwrap_err()));

    set_default_duration(initial);
}

#[tokio::test]
async fn test_settings_apply_installs_defaults() {
    init_tracing();
    let _guard = DEFAULTS.lock().await;
    let initial_retry = get_default_retry_configuration();
    let initial_duration = get_default_duration();

    let settings = Settings::from_sources(config::Config::builder().add_source(
        config::File::from_str(
            "[retry]\ndelay_ms = 5\n\n[wait]\nduration_ms = 750\n",
            config::FileFormat::Toml,
        ),
    ))
    .unwrap();
    let applied = settings.apply();

    assert_eq!(applied.retry.delay, Duration::from_millis(5));
    assert_eq!(applied.retry.max_attempts, initial_retry.max_attempts);
    assert_eq!(applied.wait_duration, Duration::from_millis(750));
    assert_eq!(get_default_duration(), Duration::from_millis(750));

    // Empty settings leave the installed defaults alone.
    let applied = Settings::default().apply();
    assert_eq!(applied.retry.delay, Duration::from_millis(5));
    assert_eq!(applied.wait_duration, Duration::from_millis(750));

    set_default_retry_configuration(initial_retry);
    set_default_duration(initial_duration);
}
