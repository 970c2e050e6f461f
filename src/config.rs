// src/config.rs
//! Runtime configuration: spreadsheet credentials, CORS allow-list, upstream base URL.
//!
//! Values come from an optional TOML file and the process environment; environment wins.
//! Handlers never read the environment themselves, they receive an [`AppConfig`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ApiError;

pub const ENV_SPREADSHEET_ID: &str = "SPREADSHEET_ID";
pub const ENV_API_KEY: &str = "GOOGLE_SHEETS_API_KEY";
pub const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
pub const ENV_LEGACY_ORIGINS: &str = "ORIGINS";
pub const ENV_SHEETS_BASE_URL: &str = "SHEETS_BASE_URL";
pub const ENV_METRICS_ROUTE: &str = "METRICS_ROUTE";
pub const ENV_CONFIG_PATH: &str = "APP_CONFIG_PATH";

pub const DEFAULT_CONFIG_PATH: &str = "config/app.toml";
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub spreadsheet_id: Option<String>,
    pub api_key: Option<String>,
    pub allowed_origins: Vec<String>,
    pub sheets_base_url: String,
    pub expose_metrics: bool,
}

/// The two values a list handler needs to reach the spreadsheet.
#[derive(Clone, PartialEq, Eq)]
pub struct SheetCredentials {
    pub spreadsheet_id: String,
    pub api_key: String,
}

// Keep the key out of logs and panic messages.
impl std::fmt::Debug for SheetCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetCredentials")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("api_key", &format_args!("<{} chars>", self.api_key.len()))
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            api_key: None,
            allowed_origins: Vec::new(),
            sheets_base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            expose_metrics: false,
        }
    }
}

/// File schema; every field optional so partial files work.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    spreadsheet_id: Option<String>,
    api_key: Option<String>,
    #[serde(default)]
    allowed_origins: Vec<String>,
    sheets_base_url: Option<String>,
    #[serde(default)]
    expose_metrics: bool,
}

impl AppConfig {
    /// Credentials for the upstream call, or the configuration error when either is missing.
    pub fn credentials(&self) -> Result<SheetCredentials, ApiError> {
        match (&self.spreadsheet_id, &self.api_key) {
            (Some(id), Some(key)) => Ok(SheetCredentials {
                spreadsheet_id: id.clone(),
                api_key: key.clone(),
            }),
            _ => Err(ApiError::MissingConfig),
        }
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|k| std::env::var(k).ok())
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let f: FileConfig = toml::from_str(s).context("parsing app config toml")?;
        Ok(Self {
            spreadsheet_id: non_blank(f.spreadsheet_id),
            api_key: non_blank(f.api_key),
            allowed_origins: clean_origins(f.allowed_origins),
            sheets_base_url: non_blank(f.sheets_base_url)
                .unwrap_or_else(|| DEFAULT_SHEETS_BASE_URL.to_string()),
            expose_metrics: f.expose_metrics,
        })
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading app config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load configuration using env var + fallbacks:
    /// 1) file at $APP_CONFIG_PATH (must exist when set)
    /// 2) config/app.toml
    /// 3) defaults
    ///
    /// Environment variables are applied on top in every case.
    pub fn load_default() -> Result<Self> {
        let base = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => {
                let pb = PathBuf::from(p);
                if !pb.exists() {
                    anyhow::bail!("{ENV_CONFIG_PATH} points to non-existent path");
                }
                Self::load_from_file(&pb)?
            }
            Err(_) => {
                let pb = PathBuf::from(DEFAULT_CONFIG_PATH);
                if pb.exists() {
                    Self::load_from_file(&pb)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(base.with_env_overrides(|k| std::env::var(k).ok()))
    }

    /// Overlay values from a key lookup (the process env in production, a map in tests).
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = non_blank(lookup(ENV_SPREADSHEET_ID)) {
            self.spreadsheet_id = Some(v);
        }
        if let Some(v) = non_blank(lookup(ENV_API_KEY)) {
            self.api_key = Some(v);
        }
        let origins = non_blank(lookup(ENV_ALLOWED_ORIGINS))
            .or_else(|| non_blank(lookup(ENV_LEGACY_ORIGINS)));
        if let Some(raw) = origins {
            self.allowed_origins = clean_origins(raw.split(',').map(str::to_string).collect());
        }
        if let Some(v) = non_blank(lookup(ENV_SHEETS_BASE_URL)) {
            self.sheets_base_url = v;
        }
        if let Some(v) = lookup(ENV_METRICS_ROUTE) {
            self.expose_metrics = v.trim() == "1";
        }
        self
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn clean_origins(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim().trim_end_matches('/');
        if !t.is_empty() && !out.iter().any(|o| o == t) {
            out.push(t.to_string());
        }
    }
    out
}
