use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

/// Initialize logging on stderr; stdout is left to command output.
///
/// Uses the `RUST_LOG` env var if set, otherwise falls back to the provided level.
pub fn init(log_level: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.with_ansi(atty::is(atty::Stream::Stderr)).init(),
        LogFormat::Json => builder.json().init(),
    }
}
