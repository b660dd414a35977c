//! Route resolution.
//!
//! The site has five top-level views. Which one to mount is decided purely
//! from the current path and hash fragment, using substring markers checked
//! against both sources in parallel. The first matching rule wins, so debug
//! markers always beat the features marker.

use serde::Serialize;

/// Slug used when a features route carries no usable segment.
pub const DEFAULT_FEATURES_SLUG: &str = "sales-marketing";

/// Hash fragments that can change the resolved view. A hash containing none
/// of these resolves exactly like an empty one.
pub const HASH_MARKERS: [&str; 5] = [
    "#api-debug",
    "#debug-features",
    "#debug-landing",
    "#debug",
    "#features/",
];

/// The current navigation location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Path component, e.g. `/features/pricing`.
    pub path: String,
    /// Hash fragment including the leading `#`, or empty.
    pub hash: String,
}

impl Location {
    pub fn new(path: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hash: hash.into(),
        }
    }
}

/// Which top-level view to mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum RouteSelector {
    Landing,
    Features { slug: String },
    DebugFeatures,
    DebugLanding,
    ApiDebug,
}

impl RouteSelector {
    /// Stable name of the view, as used in logs and JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Features { .. } => "features",
            Self::DebugFeatures => "debug_features",
            Self::DebugLanding => "debug_landing",
            Self::ApiDebug => "api_debug",
        }
    }
}

/// Resolve a location to exactly one selector.
pub fn resolve_route(location: &Location) -> RouteSelector {
    let marked = |path_marker: &str, hash_marker: &str| {
        location.path.contains(path_marker) || location.hash.contains(hash_marker)
    };

    if marked("/api-debug", "#api-debug") {
        return RouteSelector::ApiDebug;
    }
    if marked("/debug-features", "#debug-features") {
        return RouteSelector::DebugFeatures;
    }
    if marked("/debug-landing", "#debug-landing") {
        return RouteSelector::DebugLanding;
    }
    // Legacy debug route opens the features debugger.
    if marked("/debug", "#debug") {
        return RouteSelector::DebugFeatures;
    }

    if marked("/features/", "#features/") {
        let slug = segment_after(&location.path, "/features/")
            .or_else(|| segment_after(&location.hash, "#features/"))
            .unwrap_or(DEFAULT_FEATURES_SLUG);
        return RouteSelector::Features {
            slug: slug.to_owned(),
        };
    }

    RouteSelector::Landing
}

/// First non-empty run of non-`/` characters directly after any occurrence
/// of `marker`.
fn segment_after<'a>(haystack: &'a str, marker: &str) -> Option<&'a str> {
    haystack.match_indices(marker).find_map(|(idx, _)| {
        let rest = &haystack[idx + marker.len()..];
        let end = rest.find('/').unwrap_or(rest.len());
        let segment = &rest[..end];
        (!segment.is_empty()).then_some(segment)
    })
}

/// Source of a navigation signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Initial evaluation when the view tree mounts.
    Mount,
    /// The hash fragment changed.
    HashChange,
    /// Back/forward history navigation.
    HistoryPop,
}

/// Re-derives the selector on every navigation event, keyed on recency.
///
/// Events carry a monotonically increasing sequence number. An event whose
/// sequence is not newer than the last applied one is ignored, so a late
/// result from an earlier navigation never overwrites a later one.
///
/// The server renders each request from scratch and has no event stream, so
/// nothing in this workspace drives a tracker. It is the seam for embedders
/// that do receive hash-change and history events, such as a client shell
/// or a long-lived preview process.
#[derive(Debug, Default)]
pub struct NavigationTracker {
    latest: Option<u64>,
    current: Option<RouteSelector>,
}

impl NavigationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event. Returns the new selector, or `None` if the event was stale.
    pub fn observe(
        &mut self,
        sequence: u64,
        event: NavigationEvent,
        location: &Location,
    ) -> Option<&RouteSelector> {
        if self.latest.is_some_and(|latest| sequence <= latest) {
            tracing::debug!(sequence, ?event, "ignoring stale navigation event");
            return None;
        }
        self.latest = Some(sequence);
        let selector = resolve_route(location);
        tracing::debug!(sequence, ?event, view = selector.name(), "route resolved");
        self.current = Some(selector);
        self.current.as_ref()
    }

    /// Selector from the most recent applied event.
    pub fn current(&self) -> Option<&RouteSelector> {
        self.current.as_ref()
    }
}
