// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod dates;
pub mod error;
pub mod listing;
pub mod metrics;
pub mod records;
pub mod sheets;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::{AppConfig, SheetCredentials};
pub use crate::error::{ApiError, ApiResult};
