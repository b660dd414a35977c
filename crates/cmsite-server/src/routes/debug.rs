//! Debugging endpoints.
//!
//! JSON views over the content API: endpoint probes and the raw versus
//! resolved payload for a page. Nothing here runs unless requested.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use cmsite_core::probe::DEBUG_ENDPOINTS;
use cmsite_core::route::DEFAULT_FEATURES_SLUG;
use cmsite_core::{ContentError, ContentRequest, probe_all, resolve_page};

use crate::error::AppError;
use crate::state::AppState;

/// Build the debug router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api-debug/probe", get(probe))
        .route("/_debug/payload/{page}", get(payload))
        .route("/healthz", get(healthz))
}

#[derive(Debug, Deserialize)]
struct ProbeQuery {
    endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PayloadQuery {
    slug: Option<String>,
}

async fn probe(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProbeQuery>,
) -> Result<Response, AppError> {
    match query.endpoint {
        Some(endpoint) => {
            if !DEBUG_ENDPOINTS.contains(&endpoint.as_str()) {
                return Err(AppError::BadRequest(format!(
                    "unknown endpoint '{endpoint}', expected one of {}",
                    DEBUG_ENDPOINTS.join(", ")
                )));
            }
            Ok(Json(state.prober.probe(&endpoint).await).into_response())
        }
        None => Ok(Json(probe_all(&state.prober, state.probe_delay).await).into_response()),
    }
}

async fn payload(
    State(state): State<Arc<AppState>>,
    Path(page): Path<String>,
    Query(query): Query<PayloadQuery>,
) -> Result<Json<Value>, AppError> {
    let request = match page.as_str() {
        "landing" => ContentRequest::Landing,
        "features" => ContentRequest::Features {
            slug: query
                .slug
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FEATURES_SLUG.to_owned()),
        },
        other => return Err(AppError::NotFound(format!("no debug payload for page '{other}'"))),
    };

    let raw = state.content.fetch(&request).await?;
    let resolved = resolve_page(&raw).map_err(ContentError::from)?;

    Ok(Json(json!({
        "resource": request.resource_path(),
        "raw": raw,
        "normalized": resolved.to_payload(),
        "resolved": resolved,
    })))
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
