//! Showcase Sheets API — Binary Entrypoint
//! Boots the Axum HTTP server: config, tracing, optional metrics, routes.

use shuttle_axum::ShuttleAxum;
use tracing::{info, warn};

use showcase_sheets_api::api::{router_with_metrics, AppState};
use showcase_sheets_api::config::AppConfig;
use showcase_sheets_api::metrics::Metrics;
use showcase_sheets_api::telemetry::init_tracing;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = AppConfig::load_default()?;
    if config.credentials().is_err() {
        // Not fatal: list endpoints answer with the configuration error envelope.
        warn!("SPREADSHEET_ID or GOOGLE_SHEETS_API_KEY is not set");
    }
    info!(
        origins = config.allowed_origins.len(),
        base_url = %config.sheets_base_url,
        metrics = config.expose_metrics,
        "config loaded"
    );

    let metrics = if config.expose_metrics {
        Some(Metrics::install()?)
    } else {
        None
    };

    let state = AppState::from_config(config);
    let router = router_with_metrics(state, metrics.as_ref());

    Ok(router.into())
}
