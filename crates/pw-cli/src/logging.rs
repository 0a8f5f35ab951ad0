use tracing_subscriber::EnvFilter;

/// Initializes stderr logging. `PW_LOG` takes precedence over `RUST_LOG`;
/// the default level is `warn`.
pub fn init() {
    let filter = EnvFilter::try_from_env("PW_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
