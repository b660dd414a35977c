//! Content API configuration.
//!
//! The only knob the site has is which environment it runs in: development
//! talks to the CMS through the local dev proxy under a relative path,
//! production talks to the CMS host directly. Both can be overridden.

use std::str::FromStr;

/// Relative API base used behind the development proxy.
pub const DEV_API_BASE: &str = "/blogs/api/v2";
/// Absolute API base in production.
pub const PROD_API_BASE: &str = "https://esign-admin.signmary.com/blogs/api/v2";
/// Origin of the development frontend (and of its proxy).
pub const DEV_FRONTEND_URL: &str = "http://localhost:5173";
/// Origin of the production frontend.
pub const PROD_FRONTEND_URL: &str = "https://w9hunter.com";

/// Deployment environment selecting the API base and frontend origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiEnvironment {
    Development,
    #[default]
    Production,
}

impl FromStr for ApiEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" | "local" => Ok(Self::Development),
            "prod" | "production" => Ok(Self::Production),
            other => Err(format!(
                "unknown environment '{other}' (expected 'development' or 'production')"
            )),
        }
    }
}

/// Where and how to reach the content API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// API base, either relative (`/blogs/api/v2`) or absolute.
    pub base: String,
    /// Value sent in the `X-Frontend-Url` header.
    pub frontend_url: String,
    /// Origin that relative bases are joined to.
    pub dev_origin: String,
}

impl ApiConfig {
    /// Defaults for an environment.
    pub fn for_environment(env: ApiEnvironment) -> Self {
        match env {
            ApiEnvironment::Development => Self {
                base: DEV_API_BASE.to_owned(),
                frontend_url: DEV_FRONTEND_URL.to_owned(),
                dev_origin: DEV_FRONTEND_URL.to_owned(),
            },
            ApiEnvironment::Production => Self {
                base: PROD_API_BASE.to_owned(),
                frontend_url: PROD_FRONTEND_URL.to_owned(),
                dev_origin: DEV_FRONTEND_URL.to_owned(),
            },
        }
    }

    /// Absolute URL for a resource path such as `/mypages/`.
    pub fn endpoint_url(&self, resource_path: &str) -> String {
        let base = self.base.trim_end_matches('/');
        let path = if resource_path.starts_with('/') {
            resource_path.to_owned()
        } else {
            format!("/{resource_path}")
        };
        if base.starts_with("http://") || base.starts_with("https://") {
            format!("{base}{path}")
        } else {
            let origin = self.dev_origin.trim_end_matches('/');
            let base = base.trim_start_matches('/');
            format!("{origin}/{base}{path}")
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_environment(ApiEnvironment::default())
    }
}
