use tracing_subscriber::{fmt, EnvFilter};

/// Install the global fmt subscriber.
///
/// The filter comes from `RUST_LOG`, then `LOG_LEVEL`, then `default_level`.
/// Returns `false` when a subscriber was already installed, which happens
/// when tests share a process.
pub fn init_tracing(default_level: &str) -> bool {
    fmt()
        .with_env_filter(build_filter(default_level))
        .with_target(true)
        .try_init()
        .is_ok()
}

fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}
