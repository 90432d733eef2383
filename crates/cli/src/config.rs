//! Client configuration.

use std::path::PathBuf;

use url::Url;

use crate::error::{ClientError, Result};

/// Server the client talks to when none is given.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Directory holding the persisted stores when none is given.
pub const DEFAULT_DATA_DIR: &str = "~/.config/dashcart";

/// Resolved client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: Url,
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Parse the raw flag values.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` for a malformed server URL or a data
    /// directory referencing an unset variable.
    pub fn new(server_url: &str, data_dir: &str) -> Result<Self> {
        let server_url = Url::parse(server_url)
            .map_err(|e| ClientError::Config(format!("server URL '{server_url}': {e}")))?;
        Ok(Self {
            server_url,
            data_dir: expand_path(data_dir)?,
        })
    }
}

/// Expand `~` and environment variables in a path.
///
/// # Errors
///
/// Returns `ClientError::Config` if a referenced variable is unset.
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| ClientError::Config(format!("data directory '{raw}': {e}")))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values() {
        let config = ClientConfig::new("http://localhost:3000", "/tmp/dashcart").unwrap();
        assert_eq!(config.server_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/dashcart"));
    }

    #[test]
    fn test_bad_server_url() {
        assert!(matches!(
            ClientConfig::new("not a url", "/tmp/dashcart"),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_unset_variable_in_data_dir() {
        let err = expand_path("$DASHCART_TEST_SURELY_UNSET_VAR/data").unwrap_err();
        assert!(err.to_string().contains("data directory"));
    }
}
