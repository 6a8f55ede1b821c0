//! Application configuration loaded from environment variables.

use std::fmt;
use std::time::Duration;

use reqwest::Url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No {0} specified")]
    Missing(&'static str),

    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("{name} is not a valid {expected}: {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Immutable settings shared by the whole process.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub backend_url: String,
    pub backend_key: String,
    pub backend_timeout: Duration,
    pub templates_dir: String,
    pub static_dir: String,
    pub template_dev_mode: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("backend_url", &self.backend_url)
            .field("backend_key", &"<redacted>")
            .field("backend_timeout", &self.backend_timeout)
            .field("templates_dir", &self.templates_dir)
            .field("static_dir", &self.static_dir)
            .field("template_dev_mode", &self.template_dev_mode)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let backend_url = required("SUPABASE_URL")?;
        Url::parse(&backend_url).map_err(|e| ConfigError::InvalidUrl {
            name: "SUPABASE_URL",
            reason: e.to_string(),
        })?;

        let backend_key = required("SUPABASE_KEY")?;

        let backend_timeout = match lookup("BACKEND_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid {
                    name: "BACKEND_TIMEOUT_SECS",
                    expected: "number of seconds",
                    value: raw,
                })?,
            None => Duration::from_secs(30),
        };

        let template_dev_mode = lookup("TEMPLATE_DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            backend_url,
            backend_key,
            backend_timeout,
            templates_dir: lookup("TEMPLATES_DIR").unwrap_or_else(|| "templates".to_string()),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            template_dev_mode,
        })
    }
}
