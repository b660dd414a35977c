//! Shared application state for the `cmsite` server.
//!
//! Built once at startup and shared across handlers via `Arc`. It is
//! immutable: per-page state lives in the request's own page session.

use std::sync::Arc;
use std::time::Duration;

use cmsite_core::{ApiConfig, ContentSource, HttpContentFetcher};

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Where page content comes from.
    pub content: Arc<dyn ContentSource>,
    /// Direct HTTP access to the content API for endpoint probing.
    pub prober: HttpContentFetcher,
    /// Content API configuration, shown on the debug views.
    pub api: ApiConfig,
    /// Pause between endpoint probes.
    pub probe_delay: Duration,
}

impl AppState {
    /// State backed entirely by the HTTP content API.
    pub fn from_fetcher(fetcher: HttpContentFetcher, probe_delay: Duration) -> Self {
        Self {
            content: Arc::new(fetcher.clone()),
            api: fetcher.config().clone(),
            prober: fetcher,
            probe_delay,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("api", &self.api)
            .field("probe_delay", &self.probe_delay)
            .finish_non_exhaustive()
    }
}
