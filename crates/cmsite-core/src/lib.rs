//! Core library for `cmsite`.
//!
//! Turns a loosely-shaped CMS payload into a render-ready page. Contains the
//! content fetcher, the view-model resolver, the route resolver, the page
//! composer, and the per-mount page session. Nothing in this crate renders
//! HTML; the server crate consumes the composed sections.

pub mod compose;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod payload;
pub mod probe;
pub mod resolve;
pub mod route;
pub mod session;

pub use compose::{
    DebugView, PageKind, PageLayout, Plan, PresentationMeta, SectionKey, SectionProps,
    SectionSlot, compose, plan,
};
pub use config::{ApiConfig, ApiEnvironment};
pub use error::{ContentError, DecodeError, FetchError, MalformedPayloadError};
pub use fetch::{ContentRequest, ContentSource, HttpContentFetcher, load_page};
pub use probe::{DEBUG_ENDPOINTS, ProbeOutcome, ProbeReport, probe_all};
pub use model::PageViewModel;
pub use resolve::resolve_page;
pub use route::{Location, NavigationEvent, NavigationTracker, RouteSelector, resolve_route};
pub use session::{Completion, LoadTicket, PageSession, ViewState};
