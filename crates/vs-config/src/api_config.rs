use crate::{ConfigError, ConfigErrorResult, DEFAULT_BASE_URL};

use serde::Deserialize;

/// Where the auth and resource backends live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }
}

impl ApiConfig {
    /// The HTTP client is built without TLS, so only `http://` is usable.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.base_url.starts_with("https://") {
            return Err(ConfigError::api(format!(
                "api.base_url uses https, which this client does not support; \
                 put a local TLS-terminating proxy in front and use http://, got '{}'",
                self.base_url
            )));
        }

        let rest = self.base_url.strip_prefix("http://").ok_or_else(|| {
            ConfigError::api(format!(
                "api.base_url must start with http://, got '{}'",
                self.base_url
            ))
        })?;

        let host = rest.split('/').next().unwrap_or_default();
        if host.is_empty() {
            return Err(ConfigError::api(format!(
                "api.base_url has no host: '{}'",
                self.base_url
            )));
        }

        Ok(())
    }
}
