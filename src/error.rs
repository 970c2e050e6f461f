// src/error.rs
//! Error taxonomy for the list endpoints and its JSON envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Spreadsheet id or API key is not configured. No upstream call is made.
    #[error("環境変数が設定されていません")]
    MissingConfig,

    /// The spreadsheet service answered with a non-2xx status.
    #[error("データの取得に失敗しました: {0}")]
    UpstreamStatus(u16),

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not a valid value range.
    #[error("malformed upstream response: {0}")]
    Decode(String),

    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    /// Anything else that aborted a request (panics caught at the router boundary).
    #[error("{0}")]
    Unexpected(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidLimit(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
