use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins; otherwise the crate logs at `level` (info by default),
/// and verbose mode adds dependency output at info.
fn filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    let directives = match (verbose, level) {
        (true, _) => "travely=debug,info".to_string(),
        (false, Some(level)) => format!("travely={}", level),
        (false, None) => "travely=info".to_string(),
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Compact human-readable output on stderr.
pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(verbose).compact();
    tracing_subscriber::registry().with(filter(verbose, level)).with(layer).init();
}

/// One JSON object per event on stderr.
pub fn init_json_logger(verbose: bool, level: Option<&str>) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .json()
        .with_current_span(false);
    tracing_subscriber::registry().with(filter(verbose, level)).with(layer).init();
}
