use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Records go to stderr; stdout carries the
/// protocol. The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
