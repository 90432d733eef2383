//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `DASHCART_HOST` - Bind address (default: 127.0.0.1)
//! - `DASHCART_PORT` - Listen port (default: 3000)
//! - `DUMMYJSON_BASE_URL` - Catalog API base URL (default: <https://dummyjson.com>)
//! - `DASHCART_STATIC_DIR` - Directory served under `/login` and `/dashboard`
//!   (default: crates/server/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_TRACES_SAMPLE_RATE` - Fraction of requests traced, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Public DummyJSON API.
pub const DEFAULT_DUMMYJSON_BASE_URL: &str = "https://dummyjson.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the remote catalog service
    pub dummyjson_base_url: Url,
    /// Directory holding the dashboard's static assets
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a present value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = get("DASHCART_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("DASHCART_HOST".to_string(), e.to_string()))?;
        let port = get("DASHCART_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("DASHCART_PORT".to_string(), e.to_string()))?;
        let dummyjson_base_url = parse_base_url(&get(
            "DUMMYJSON_BASE_URL",
            DEFAULT_DUMMYJSON_BASE_URL,
        ))?;
        let static_dir = PathBuf::from(get("DASHCART_STATIC_DIR", "crates/server/static"));

        let sentry_traces_sample_rate = get("SENTRY_TRACES_SAMPLE_RATE", "0.0")
            .parse::<f32>()
            .ok()
            .filter(|rate| (0.0..=1.0).contains(rate))
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "SENTRY_TRACES_SAMPLE_RATE".to_string(),
                    "must be a number between 0.0 and 1.0".to_string(),
                )
            })?;

        Ok(Self {
            host,
            port,
            dummyjson_base_url,
            static_dir,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse the catalog base URL, requiring http(s) and dropping a trailing `/`
/// so endpoint paths can be appended directly.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("DUMMYJSON_BASE_URL".to_string(), reason);

    let url = Url::parse(raw.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("must have a host".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.dummyjson_base_url.as_str(), "https://dummyjson.com/");
        assert_eq!(config.static_dir, PathBuf::from("crates/server/static"));
        assert!(config.sentry_dsn.is_none());
        assert!(config.sentry_traces_sample_rate.abs() < f32::EPSILON);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DASHCART_HOST", "0.0.0.0"),
            ("DASHCART_PORT", "8080"),
            ("DUMMYJSON_BASE_URL", "http://127.0.0.1:9999/"),
            ("SENTRY_TRACES_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.dummyjson_base_url.as_str(), "http://127.0.0.1:9999/");
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("DASHCART_PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("DASHCART_PORT"));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(load(&[("DUMMYJSON_BASE_URL", "not a url")]).is_err());
        assert!(load(&[("DUMMYJSON_BASE_URL", "ftp://dummyjson.com")]).is_err());
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        assert!(load(&[("SENTRY_TRACES_SAMPLE_RATE", "1.5")]).is_err());
    }
}
