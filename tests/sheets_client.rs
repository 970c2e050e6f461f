// tests/sheets_client.rs
//
// Exercises GoogleSheetsClient against a fake upstream served by axum on an
// ephemeral local port.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use showcase_sheets_api::config::SheetCredentials;
use showcase_sheets_api::error::ApiError;
use showcase_sheets_api::sheets::{
    GoogleSheetsClient, SheetSource, ACHIEVEMENTS_RANGE, NEWS_RANGE, PROJECTS_RANGE,
};

const KEY: &str = "test-key";

async fn values(
    Path((id, range)): Path<(String, String)>,
    Query(q): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if q.get("key").map(String::as_str) != Some(KEY) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"code": 403, "message": "bad key", "status": "PERMISSION_DENIED"}})),
        )
            .into_response();
    }
    match (id.as_str(), range.as_str()) {
        ("sheet-ok", "Achievements!A2:D") => Json(json!({
            "range": "Achievements!A2:D3",
            "majorDimension": "ROWS",
            "values": [["2024/3/1", "Title", "Summary", "有"], ["2023/1/1", "Other"]]
        }))
        .into_response(),
        ("sheet-ok", "NewsList!A2:G") => Json(json!({
            "range": "NewsList!A2:G1000",
            "majorDimension": "ROWS"
        }))
        .into_response(),
        ("sheet-ok", "Projects!A2:I") => {
            (StatusCode::OK, "{not json").into_response()
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND"}})),
        )
            .into_response(),
    }
}

async fn spawn_upstream() -> String {
    let app = Router::new().route("/v4/spreadsheets/{id}/values/{range}", get(values));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fake upstream");
    });
    format!("http://{addr}")
}

fn creds(id: &str, key: &str) -> SheetCredentials {
    SheetCredentials {
        spreadsheet_id: id.to_string(),
        api_key: key.to_string(),
    }
}

#[tokio::test]
async fn fetches_rows_for_range() {
    let client = GoogleSheetsClient::new(spawn_upstream().await);
    let v = client
        .fetch_values(&creds("sheet-ok", KEY), ACHIEVEMENTS_RANGE)
        .await
        .expect("fetch ok");
    assert_eq!(v.range.as_deref(), Some("Achievements!A2:D3"));
    let rows = v.into_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["2024/3/1", "Title", "Summary", "有"]);
    assert_eq!(rows[1], vec!["2023/1/1", "Other"]);
}

#[tokio::test]
async fn missing_values_field_is_empty() {
    let client = GoogleSheetsClient::new(spawn_upstream().await);
    let v = client
        .fetch_values(&creds("sheet-ok", KEY), NEWS_RANGE)
        .await
        .expect("fetch ok");
    assert!(v.into_rows().is_empty());
}

#[tokio::test]
async fn not_found_maps_to_upstream_status() {
    let client = GoogleSheetsClient::new(spawn_upstream().await);
    let err = client
        .fetch_values(&creds("no-such-sheet", KEY), ACHIEVEMENTS_RANGE)
        .await
        .expect_err("404 expected");
    assert!(matches!(err, ApiError::UpstreamStatus(404)), "got {err:?}");
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn wrong_key_maps_to_upstream_status() {
    let client = GoogleSheetsClient::new(spawn_upstream().await);
    let err = client
        .fetch_values(&creds("sheet-ok", "nope"), ACHIEVEMENTS_RANGE)
        .await
        .expect_err("403 expected");
    assert!(matches!(err, ApiError::UpstreamStatus(403)), "got {err:?}");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let client = GoogleSheetsClient::new(spawn_upstream().await);
    let err = client
        .fetch_values(&creds("sheet-ok", KEY), PROJECTS_RANGE)
        .await
        .expect_err("decode error expected");
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn connection_refused_is_a_transport_error_without_key() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GoogleSheetsClient::new(format!("http://{addr}"));
    let err = client
        .fetch_values(&creds("sheet-ok", "secret-key"), ACHIEVEMENTS_RANGE)
        .await
        .expect_err("transport error expected");
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    assert!(!err.to_string().contains("secret-key"));
}
