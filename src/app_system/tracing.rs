use tracing_subscriber::EnvFilter;

/// Configures structured logging for the whole application.
///
/// Honors `RUST_LOG` when set, defaulting to `info`. Call once at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
