// src/sheets/client.rs
use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::Client;

use super::{SheetRange, SheetSource, UpstreamErrorBody, ValueRange};
use crate::config::SheetCredentials;
use crate::error::{ApiError, ApiResult};

/// Google Sheets v4 `values.get` over HTTPS.
#[derive(Clone)]
pub struct GoogleSheetsClient {
    base_url: String,
    client: Client,
}

impl GoogleSheetsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn values_url(&self, spreadsheet_id: &str, range: SheetRange) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, spreadsheet_id, range
        )
    }
}

#[async_trait]
impl SheetSource for GoogleSheetsClient {
    async fn fetch_values(
        &self,
        creds: &SheetCredentials,
        range: SheetRange,
    ) -> ApiResult<ValueRange> {
        let t0 = std::time::Instant::now();
        counter!("sheets_fetch_total", "sheet" => range.sheet).increment(1);

        let url = self.values_url(&creds.spreadsheet_id, range);
        // The key travels in the query string, so errors are stripped of their URL.
        let resp = match self
            .client
            .get(&url)
            .query(&[("key", creds.api_key.as_str())])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let e = e.without_url();
                tracing::warn!(error = %e, sheet = range.sheet, "sheets http error");
                counter!("sheets_fetch_errors_total", "sheet" => range.sheet).increment(1);
                return Err(ApiError::Transport(e));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            counter!("sheets_fetch_errors_total", "sheet" => range.sheet).increment(1);
            let body = resp.text().await.unwrap_or_default();
            match serde_json::from_str::<UpstreamErrorBody>(&body) {
                Ok(b) => tracing::warn!(
                    status = status.as_u16(),
                    code = b.error.code,
                    upstream_status = %b.error.status,
                    message = %b.error.message,
                    sheet = range.sheet,
                    "sheets returned an error"
                ),
                Err(_) => tracing::warn!(
                    status = status.as_u16(),
                    sheet = range.sheet,
                    "sheets returned a non-success status"
                ),
            }
            return Err(ApiError::UpstreamStatus(status.as_u16()));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.without_url()))?;
        let parsed = serde_json::from_slice::<ValueRange>(&bytes).map_err(|e| {
            counter!("sheets_fetch_errors_total", "sheet" => range.sheet).increment(1);
            ApiError::Decode(e.to_string())
        })?;

        histogram!("sheets_fetch_ms", "sheet" => range.sheet)
            .record(t0.elapsed().as_secs_f64() * 1_000.0);
        Ok(parsed)
    }

    fn name(&self) -> &'static str {
        "google-sheets"
    }
}
