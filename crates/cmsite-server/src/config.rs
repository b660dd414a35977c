//! Server configuration for `cmsite`.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `CMSITE_*` environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use cmsite_core::ApiConfig;
use cmsite_core::config::ApiEnvironment;
use cmsite_core::probe::DEFAULT_PROBE_DELAY;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Which defaults the content API settings start from.
    pub environment: ApiEnvironment,
    /// Content API location and frontend origin.
    pub api: ApiConfig,
    /// Pause between endpoint probes on the API debug view.
    pub probe_delay: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT`: port to bind on (binds to `0.0.0.0`)
    /// - `CMSITE_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `CMSITE_LOG_LEVEL`: log filter (default: `info`)
    /// - `CMSITE_ENV`: `development` or `production` (default: `production`)
    /// - `CMSITE_API_BASE`: content API base, relative or absolute
    /// - `CMSITE_FRONTEND_URL`: value of the `X-Frontend-Url` header
    /// - `CMSITE_DEV_ORIGIN`: origin that a relative API base is joined to
    /// - `CMSITE_PROBE_DELAY_MS`: delay between debug probes (default: `500`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        // Priority: CMSITE_BIND_ADDR > PORT > default 127.0.0.1:3000
        let bind_addr = if let Some(addr) = var("CMSITE_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000)))
        } else if let Some(port_str) = var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(3000);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 3000))
        };

        let log_level = var("CMSITE_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let environment = var("CMSITE_ENV")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let mut api = ApiConfig::for_environment(environment);
        if let Some(base) = var("CMSITE_API_BASE") {
            api.base = base;
        }
        if let Some(url) = var("CMSITE_FRONTEND_URL") {
            api.frontend_url = url;
        }
        if let Some(origin) = var("CMSITE_DEV_ORIGIN") {
            api.dev_origin = origin;
        }

        let probe_delay = var("CMSITE_PROBE_DELAY_MS")
            .and_then(|v| v.parse().ok())
            .map_or(DEFAULT_PROBE_DELAY, Duration::from_millis);

        Self {
            bind_addr,
            log_level,
            environment,
            api,
            probe_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_are_production() {
        let cfg = config(&[]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(cfg.environment, ApiEnvironment::Production);
        assert_eq!(cfg.api, ApiConfig::default());
        assert_eq!(cfg.probe_delay, Duration::from_millis(500));
    }

    #[test]
    fn port_binds_all_interfaces() {
        let cfg = config(&[("PORT", "8080")]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn bind_addr_overrides_port() {
        let cfg = config(&[("PORT", "8080"), ("CMSITE_BIND_ADDR", "127.0.0.1:9999")]);
        assert_eq!(cfg.bind_addr.port(), 9999);
    }

    #[test]
    fn development_with_overrides() {
        let cfg = config(&[
            ("CMSITE_ENV", "dev"),
            ("CMSITE_DEV_ORIGIN", "http://localhost:8000"),
            ("CMSITE_PROBE_DELAY_MS", "0"),
        ]);
        assert_eq!(cfg.environment, ApiEnvironment::Development);
        assert_eq!(
            cfg.api.endpoint_url("/mypages/"),
            "http://localhost:8000/blogs/api/v2/mypages/"
        );
        assert!(cfg.probe_delay.is_zero());
    }
}
