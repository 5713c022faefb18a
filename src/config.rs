//! Configuration management
//!
//! Settings live in `settings.json` inside the application data directory:
//! ```json
//! {
//!   "api": { "baseUrl": "http://localhost:8080/api", "timeoutSecs": 30 },
//!   "session": { "autoLogoutOnExpiry": false }
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default banking API base URL
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the API base URL (for staging/testing)
pub const API_URL_ENV: &str = "LEDGERLINE_API_URL";

/// Environment variable overriding the auto-logout policy
pub const AUTO_LOGOUT_ENV: &str = "LEDGERLINE_AUTO_LOGOUT";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(default)]
    session: SessionSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionSettings {
    #[serde(default)]
    auto_logout_on_expiry: bool,
}

/// Ledgerline client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Escalate an authentication rejection during account sync to a
    /// logout. Applied uniformly; off by default.
    pub auto_logout_on_expiry: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auto_logout_on_expiry: false,
        }
    }
}

impl Config {
    /// Load config from the application data directory
    ///
    /// The API URL and auto-logout policy can be overridden via
    /// `LEDGERLINE_API_URL` and `LEDGERLINE_AUTO_LOGOUT` (for CI/testing).
    pub fn load(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let api_base_url = std::env::var(API_URL_ENV)
            .ok()
            .or(raw.api.base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let auto_logout_on_expiry = match std::env::var(AUTO_LOGOUT_ENV).ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.session.auto_logout_on_expiry,
        };

        let request_timeout =
            Duration::from_secs(raw.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Ok(Self {
            api_base_url,
            request_timeout,
            auto_logout_on_expiry,
        })
    }
}
