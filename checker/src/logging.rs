//! Developer tracing on stderr.
//!
//! Contestant-facing text never goes through here: it is rendered from the
//! report onto stdout and into the feedback directory, whatever `RUST_LOG`
//! says.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset or does not parse.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the stderr subscriber, e.g. `RUST_LOG=checker=debug`.
///
/// A second call keeps the subscriber that is already installed.
pub fn init() {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .compact();
    let _ = tracing_subscriber::registry()
        .with(filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(layer)
        .try_init();
}

fn filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
