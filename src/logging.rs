use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable that overrides the log filter.
pub const LOG_ENV_VAR: &str = "LLN_ANKI_LOG";

/// Initialize human-readable logging on stderr.
///
/// Defaults to `warn` level unless overridden by `LLN_ANKI_LOG`. Stdout is reserved for
/// the TSV rows, so the subscriber never writes there.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_env_var(LOG_ENV_VAR)
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
