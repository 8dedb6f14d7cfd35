use tracing_subscriber::EnvFilter;

/// Installs the process-wide JSON log subscriber. The level filter comes
/// from `LOG_LEVEL` (falling back to `info`); call this once from the
/// binary before handling events.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
