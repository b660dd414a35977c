//! Site pages.
//!
//! Every path is resolved to a view by the route resolver. Hash fragments
//! never reach the server, so the client script forwards them as `?hash=`.
//! Content views mount a fresh [`PageSession`] per request.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use cmsite_core::{
    Location, PageKind, PageSession, Plan, RouteSelector, ViewState, compose, plan, resolve_route,
};

use crate::error::AppError;
use crate::render::{self, PrefixIcons};
use crate::state::AppState;

/// Build the page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(page))
        .route("/{*path}", get(page))
        .route("/_route", get(route_info))
}

#[derive(Debug, Default, Deserialize)]
struct HashQuery {
    hash: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RouteQuery {
    path: Option<String>,
    hash: Option<String>,
}

/// Selector for a location, plus the resource it would fetch.
#[derive(Debug, Serialize)]
struct RouteInfo {
    #[serde(flatten)]
    selector: RouteSelector,
    resource: Option<String>,
}

/// Hash as the route resolver expects it: empty, or starting with `#`.
fn normalize_hash(raw: Option<String>) -> String {
    match raw {
        Some(h) if h.is_empty() || h.starts_with('#') => h,
        Some(h) => format!("#{h}"),
        None => String::new(),
    }
}

async fn page(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<HashQuery>,
) -> Response {
    let location = Location::new(uri.path(), normalize_hash(query.hash));
    let selector = resolve_route(&location);
    tracing::debug!(path = %location.path, hash = %location.hash, view = selector.name(), "route resolved");

    let request = match plan(&selector) {
        Plan::Static(view) => return Html(render::debug(view, &state.api).into_string()).into_response(),
        Plan::Content(request) => request,
    };

    let kind = PageKind::from(&request);
    let mut session = PageSession::new(request);
    match session.load(state.content.as_ref()).await {
        ViewState::Ready(model) => {
            let layout = compose(kind, model);
            let year = chrono::Utc::now().year();
            Html(render::page(&layout, &PrefixIcons, year).into_string()).into_response()
        }
        ViewState::Failed { message } => {
            let retry = uri
                .path_and_query()
                .map_or_else(|| uri.path().to_owned(), ToString::to_string);
            (
                StatusCode::BAD_GATEWAY,
                Html(render::failure(message, &retry).into_string()),
            )
                .into_response()
        }
        other => AppError::Internal(format!("page session ended in state {}", other.name()))
            .into_response(),
    }
}

async fn route_info(Query(query): Query<RouteQuery>) -> Json<RouteInfo> {
    let location = Location::new(
        query.path.unwrap_or_else(|| "/".to_owned()),
        normalize_hash(query.hash),
    );
    let selector = resolve_route(&location);
    let resource = match plan(&selector) {
        Plan::Content(request) => Some(request.resource_path()),
        Plan::Static(_) => None,
    };
    Json(RouteInfo { selector, resource })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_gets_leading_marker() {
        assert_eq!(normalize_hash(None), "");
        assert_eq!(normalize_hash(Some(String::new())), "");
        assert_eq!(normalize_hash(Some("features/hr".into())), "#features/hr");
        assert_eq!(normalize_hash(Some("#debug".into())), "#debug");
    }
}
