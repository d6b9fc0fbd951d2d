//! Configuration management

use anyhow::Result;
use std::time::Duration;

/// Console configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the captcha backend, without trailing slash
    pub base_url: String,

    /// HTTP request timeout
    pub request_timeout: Duration,

    /// Login kind sent by default (user or admin)
    pub default_login_type: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CAPTCHA_BACKEND_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout = std::env::var("CAPTCHA_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let default_login_type =
            std::env::var("CAPTCHA_LOGIN_TYPE").unwrap_or_else(|_| "user".to_string());

        Ok(Self {
            base_url,
            request_timeout,
            default_login_type,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout: Duration::from_secs(30),
            default_login_type: "user".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.default_login_type, "user");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
