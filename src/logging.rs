use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Logs go to stderr so they never interleave with prompt answers on
/// stdout. `RUST_LOG` takes precedence; otherwise the level is `warn`, or
/// `debug` when `debug_mode` is set.
pub fn setup_logging(debug_mode: bool) {
    let default_level = if debug_mode { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init();

    // A subscriber may already be set when embedded in tests.
    if result.is_ok() {
        tracing::debug!("Logging initialized: debug={}", debug_mode);
    }
}
