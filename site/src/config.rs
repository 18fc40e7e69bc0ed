//! Configuration from environment variables.
//!
//! Everything has a default except the platform credentials, and even those
//! are not fatal: without `PLATFORM_URL`/`PLATFORM_ANON_KEY` the platform
//! handle stays absent and dependent features degrade instead of the process
//! refusing to start.

use std::env;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server binding
    pub server: ServerConfig,
    /// Platform credentials; `None` when not configured
    pub platform: Option<PlatformConfig>,
    /// Token distinguishing internal lead submissions from external ones
    pub internal_api_token: Option<String>,
    /// Simulated payment settlement delay in milliseconds
    pub payment_delay_ms: u64,
    /// Bound on the HTTP → store handoff in seconds
    pub store_timeout_secs: u64,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

/// Hosted platform credentials.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Base URL of the platform
    pub url: String,
    /// Anonymous API key
    pub anon_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let platform = match (env::var("PLATFORM_URL"), env::var("PLATFORM_ANON_KEY")) {
            (Ok(url), Ok(anon_key)) if !url.is_empty() && !anon_key.is_empty() => {
                Some(PlatformConfig { url, anon_key })
            }
            _ => {
                tracing::error!(
                    "PLATFORM_URL/PLATFORM_ANON_KEY not set; platform features will degrade"
                );
                None
            }
        };

        Self {
            server: ServerConfig {
                host: env::var("WAYFARE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("WAYFARE_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8080),
            },
            platform,
            internal_api_token: env::var("INTERNAL_API_TOKEN").ok().filter(|t| !t.is_empty()),
            payment_delay_ms: env::var("PAYMENT_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1500),
            store_timeout_secs: env::var("STORE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }

    /// The simulated gateway's settlement delay.
    #[must_use]
    pub const fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    /// The bound on the HTTP → store handoff.
    #[must_use]
    pub const fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable_without_any_environment() {
        // Do not set any variables; serial-unsafe env mutation is avoided by
        // only reading here.
        let config = Config::from_env();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.payment_delay(), Duration::from_millis(1500));
        assert_eq!(config.store_timeout(), Duration::from_secs(5));
    }
}
