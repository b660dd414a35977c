//! Endpoint probing for the API debug view.
//!
//! Hits each known CMS listing endpoint in turn and records what came
//! back, successful or not. Probes run sequentially with a pause between
//! them so the CMS is not hammered.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::fetch::HttpContentFetcher;

/// Endpoints the debug view enumerates, in probe order.
pub const DEBUG_ENDPOINTS: [&str; 5] = [
    "/mypages/",
    "/pages/",
    "/features-pages/",
    "/documents/",
    "/images/",
];

/// Pause between consecutive probes.
pub const DEFAULT_PROBE_DELAY: Duration = Duration::from_millis(500);

/// Result of probing one endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub endpoint: String,
    pub url: String,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The endpoint answered. Non-JSON bodies are kept as a string.
    Response { status: u16, body: Value },
    /// No response was received.
    Error { message: String },
}

impl ProbeReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Response { status, .. } if (200..300).contains(&status))
    }
}

impl HttpContentFetcher {
    /// Probe a single endpoint. Never fails; errors are part of the report.
    pub async fn probe(&self, endpoint: &str) -> ProbeReport {
        let url = self.config().endpoint_url(endpoint);
        let outcome = match self.get_raw(endpoint).await {
            Ok(raw) => {
                let body = serde_json::from_str(&raw.body).unwrap_or(Value::String(raw.body));
                tracing::debug!(endpoint, status = raw.status, "probe answered");
                ProbeOutcome::Response {
                    status: raw.status,
                    body,
                }
            }
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "probe failed");
                ProbeOutcome::Error {
                    message: e.to_string(),
                }
            }
        };

        ProbeReport {
            endpoint: endpoint.to_owned(),
            url,
            outcome,
            timestamp: Utc::now(),
        }
    }
}

/// Probe every endpoint in order, sleeping `delay` between probes.
pub async fn probe_all(fetcher: &HttpContentFetcher, delay: Duration) -> Vec<ProbeReport> {
    let mut reports = Vec::with_capacity(DEBUG_ENDPOINTS.len());
    for (i, endpoint) in DEBUG_ENDPOINTS.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reports.push(fetcher.probe(endpoint).await);
    }
    tracing::info!(
        probed = reports.len(),
        ok = reports.iter().filter(|r| r.is_success()).count(),
        "endpoint probe finished"
    );
    reports
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn unreachable_fetcher() -> HttpContentFetcher {
        HttpContentFetcher::new(ApiConfig {
            base: "http://127.0.0.1:9/blogs/api/v2".to_owned(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_error() {
        let report = unreachable_fetcher().probe("/pages/").await;
        assert_eq!(report.endpoint, "/pages/");
        assert_eq!(report.url, "http://127.0.0.1:9/blogs/api/v2/pages/");
        assert!(matches!(report.outcome, ProbeOutcome::Error { .. }));
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn probe_all_covers_every_endpoint_in_order() {
        let reports = probe_all(&unreachable_fetcher(), Duration::ZERO).await;
        let endpoints: Vec<&str> = reports.iter().map(|r| r.endpoint.as_str()).collect();
        assert_eq!(endpoints, DEBUG_ENDPOINTS);
        assert!(reports.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn report_serializes_flat_with_rfc3339_timestamp() {
        let report = ProbeReport {
            endpoint: "/images/".to_owned(),
            url: "https://cms.test/images/".to_owned(),
            outcome: ProbeOutcome::Response {
                status: 200,
                body: serde_json::json!({ "items": [] }),
            },
            timestamp: "2024-05-01T12:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "response");
        assert_eq!(json["status"], 200);
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00Z");
        assert!(report.is_success());
    }
}
