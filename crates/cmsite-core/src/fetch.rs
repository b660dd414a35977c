//! Content fetching.
//!
//! One network call per page load: `GET <base><resource-path>`. There is no
//! retry, no timeout and no cache; a failed load is retried only when the
//! user asks. [`ContentSource`] is the seam the server and tests plug into.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{ContentError, DecodeError, FetchError};
use crate::model::PageViewModel;
use crate::resolve::resolve_page;

/// Header carrying the requesting frontend's origin.
pub const FRONTEND_URL_HEADER: &str = "X-Frontend-Url";

const USER_AGENT: &str = concat!("cmsite/", env!("CARGO_PKG_VERSION"));

/// Which page to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRequest {
    Landing,
    Features { slug: String },
}

impl ContentRequest {
    /// Resource path under the API base.
    pub fn resource_path(&self) -> String {
        match self {
            Self::Landing => "/mypages/".to_owned(),
            Self::Features { slug } => {
                format!("/features-pages/?slug={}", urlencoding::encode(slug))
            }
        }
    }
}

/// Anything that can produce a raw page payload.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the raw payload for a request.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Fetch`] on transport or status failure and
    /// [`ContentError::Decode`] if the body is not JSON.
    async fn fetch(&self, request: &ContentRequest) -> Result<Value, ContentError>;
}

/// Raw HTTP response from the content API, before any status check.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// [`ContentSource`] backed by the CMS HTTP API.
#[derive(Debug, Clone)]
pub struct HttpContentFetcher {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpContentFetcher {
    /// Build a fetcher for the given API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the TLS backend cannot be initialised.
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Client {
                reason: e.to_string(),
            })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Issue a single GET for a resource path and return whatever came back.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the URL cannot be built and
    /// [`FetchError::Transport`] if no response body was received.
    pub async fn get_raw(&self, resource_path: &str) -> Result<RawResponse, FetchError> {
        let url = self.config.endpoint_url(resource_path);
        let parsed = reqwest::Url::parse(&url).map_err(|e| FetchError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(url = %url, "requesting content");

        let resp = self
            .client
            .get(parsed)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(FRONTEND_URL_HEADER, &self.config.frontend_url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| FetchError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        Ok(RawResponse { url, status, body })
    }
}

#[async_trait]
impl ContentSource for HttpContentFetcher {
    async fn fetch(&self, request: &ContentRequest) -> Result<Value, ContentError> {
        let raw = self.get_raw(&request.resource_path()).await?;

        if !(200..300).contains(&raw.status) {
            tracing::warn!(url = %raw.url, status = raw.status, "content api returned error status");
            return Err(FetchError::Status {
                url: raw.url,
                status: raw.status,
            }
            .into());
        }

        serde_json::from_str(&raw.body).map_err(|source| {
            tracing::warn!(url = %raw.url, error = %source, "content api returned invalid json");
            DecodeError {
                url: raw.url,
                source,
            }
            .into()
        })
    }
}

/// Fetch and resolve one page.
///
/// # Errors
///
/// Returns the fetch, decode, or payload-shape failure as a [`ContentError`].
pub async fn load_page(
    source: &dyn ContentSource,
    request: &ContentRequest,
) -> Result<PageViewModel, ContentError> {
    let raw = source.fetch(request).await?;
    let model = resolve_page(&raw)?;
    tracing::info!(
        resource = %request.resource_path(),
        title = %model.identity.title,
        blocks = model.dynamic_content.len(),
        "page loaded"
    );
    Ok(model)
}
