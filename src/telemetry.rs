// src/telemetry.rs
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// Filter comes from `RUST_LOG` (default `info`); `LOG_FORMAT=json` selects JSON lines.
/// A subscriber installed earlier (e.g. by the hosting runtime) is left in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let res = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };

    if res.is_err() {
        tracing::debug!("tracing subscriber already installed; keeping it");
    }
}
