//! Error types for `cmsite-core`.
//!
//! Three failure families exist between the CMS and a rendered page: the
//! request itself failed, the body was not JSON, or the JSON was not a page.
//! All of them collapse into [`ContentError`], which the view layer shows as
//! a single "failed" state. Missing optional fields are never errors.

/// Errors from the network request to the content API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("http client could not be built: {reason}")]
    Client { reason: String },

    /// The configured base and resource path do not form a valid URL.
    #[error("invalid content url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection, TLS, or body-read failure.
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The API answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// The response body could not be decoded as JSON.
#[derive(Debug, thiserror::Error)]
#[error("response from {url} is not valid JSON: {source}")]
pub struct DecodeError {
    pub url: String,
    #[source]
    pub source: serde_json::Error,
}

/// The decoded body is not usable as a page payload.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MalformedPayloadError {
    /// The payload (or the first listing item) is not a JSON object.
    #[error("page payload must be a JSON object, found {found}")]
    NotAMapping { found: &'static str },

    /// A listing envelope was returned but it holds no pages.
    #[error("content listing contains no pages")]
    EmptyListing,
}

/// Any failure between issuing the request and holding a resolved page.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Malformed(#[from] MalformedPayloadError),
}

impl ContentError {
    /// Short machine-readable category, used in JSON error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch_error",
            Self::Decode(_) => "decode_error",
            Self::Malformed(_) => "malformed_payload",
        }
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_error_kind_matches_family() {
        let fetch = ContentError::from(FetchError::Status {
            url: "https://cms.test/mypages/".to_owned(),
            status: 503,
        });
        assert_eq!(fetch.kind(), "fetch_error");
        assert_eq!(fetch.to_string(), "https://cms.test/mypages/ returned HTTP 503");

        let malformed = ContentError::from(MalformedPayloadError::EmptyListing);
        assert_eq!(malformed.kind(), "malformed_payload");
    }

    #[test]
    fn not_a_mapping_names_found_type() {
        let err = MalformedPayloadError::NotAMapping {
            found: json_type_name(&serde_json::json!([1, 2])),
        };
        assert_eq!(err.to_string(), "page payload must be a JSON object, found array");
    }
}
