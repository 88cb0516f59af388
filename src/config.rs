//! Environment-driven configuration
//!
//! Environment variables (all optional):
//! - `ENVIRONMENT` (default: sandbox)
//! - `PORT` (default: 8080)
//! - `STOCKPULSE_BACKEND_URL` (default: http://localhost:8081)
//! - `STOCKPULSE_REQUEST_TIMEOUT_SECS` (default: 10)
//! - `STOCKPULSE_FETCH_RETRIES` (default: 3)
//! - `STOCKPULSE_DEFAULT_UNIVERSE` (default: SP500)
//! - `STOCKPULSE_COMPANY_NAMES` (path to a JSON object of extra company names)

use crate::error::ConfigError;
use crate::signals::companies::CompanyDirectory;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    /// Base URL of the backend serving `/api/signals` and `/api/universe`
    pub backend_url: String,
    pub request_timeout_secs: u64,
    /// Retries after the first attempt for transient backend failures
    pub fetch_retries: usize,
    pub default_universe: String,
    pub company_names_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: 8080,
            backend_url: "http://localhost:8081".to_string(),
            request_timeout_secs: 10,
            fetch_retries: 3,
            default_universe: "SP500".to_string(),
            company_names_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            environment: get_environment(),
            port: env_or("PORT", defaults.port),
            backend_url: env::var("STOCKPULSE_BACKEND_URL").unwrap_or(defaults.backend_url),
            request_timeout_secs: env_or(
                "STOCKPULSE_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            fetch_retries: env_or("STOCKPULSE_FETCH_RETRIES", defaults.fetch_retries),
            default_universe: env::var("STOCKPULSE_DEFAULT_UNIVERSE")
                .unwrap_or(defaults.default_universe),
            company_names_path: env::var("STOCKPULSE_COMPANY_NAMES")
                .ok()
                .filter(|p| !p.trim().is_empty()),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Built-in company names, extended by the override file when configured.
    pub fn company_directory(&self) -> Result<CompanyDirectory, ConfigError> {
        match &self.company_names_path {
            Some(path) => CompanyDirectory::from_json_file(path),
            None => Ok(CompanyDirectory::default()),
        }
    }
}
