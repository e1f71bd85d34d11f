//! Log filtering for the terminal host.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter built from `RUST_LOG`-style `directives`, falling back to INFO when
/// they are absent or empty. Invalid directives are skipped.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}
