//! Fetch one collection with the configured credentials and print the JSON envelope.
//!
//! Usage: `sheet_probe <achievements|news|projects> [limit]`

use anyhow::{bail, Result};
use serde::Serialize;

use showcase_sheets_api::api::{list_records, AppState, ListResponse};
use showcase_sheets_api::config::AppConfig;
use showcase_sheets_api::listing::Limit;
use showcase_sheets_api::records::{Achievement, NewsItem, Project, SheetRecord};
use showcase_sheets_api::telemetry::init_tracing;

async fn probe<R: SheetRecord>(state: &AppState, limit: Limit) -> Result<String> {
    let data = list_records::<R>(state, limit).await?;
    to_pretty_json(&ListResponse {
        success: true,
        data,
    })
}

fn to_pretty_json<T: Serialize>(v: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(v)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let mut args = std::env::args().skip(1);
    let kind = args.next().unwrap_or_else(|| "achievements".to_string());
    let limit = Limit::parse(args.next().as_deref())?;

    let state = AppState::from_config(AppConfig::load_default()?);
    let out = match kind.as_str() {
        "achievements" => probe::<Achievement>(&state, limit).await?,
        "news" => probe::<NewsItem>(&state, limit).await?,
        "projects" => probe::<Project>(&state, limit).await?,
        other => bail!("unknown collection '{other}' (expected achievements, news, projects)"),
    };

    println!("{out}");
    Ok(())
}
