use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs a JSON log formatter so CloudWatch receives one structured
/// record per line. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init();
}
