//! Per-mount page session.
//!
//! A content view moves `Idle → Loading → Ready | Failed`. Content is
//! fetched once per mount; a failed load is retried only on request, and a
//! ready page never goes back to loading. Every load carries a
//! [`LoadTicket`]. A completion whose ticket is no longer current (because a
//! retry superseded it or the view unmounted) is discarded.

use std::sync::Arc;

use crate::error::ContentError;
use crate::fetch::{ContentRequest, ContentSource, load_page};
use crate::model::PageViewModel;

/// Observable state of a content view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Ready(Arc<PageViewModel>),
    Failed { message: String },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Proof that a load was started by this session at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Whether a completion changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Discarded,
}

/// Lifecycle of one mounted content view.
#[derive(Debug)]
pub struct PageSession {
    request: ContentRequest,
    state: ViewState,
    generation: u64,
    unmounted: bool,
}

impl PageSession {
    pub fn new(request: ContentRequest) -> Self {
        Self {
            request,
            state: ViewState::Idle,
            generation: 0,
            unmounted: false,
        }
    }

    pub fn request(&self) -> &ContentRequest {
        &self.request
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Start the initial load. Only valid from `Idle`.
    pub fn mount(&mut self) -> Option<LoadTicket> {
        if self.unmounted || self.state != ViewState::Idle {
            return None;
        }
        Some(self.begin_load())
    }

    /// Start another load after a failure. Only valid from `Failed`.
    pub fn retry(&mut self) -> Option<LoadTicket> {
        if self.unmounted || !matches!(self.state, ViewState::Failed { .. }) {
            return None;
        }
        tracing::info!(resource = %self.request.resource_path(), "retrying page load");
        Some(self.begin_load())
    }

    /// Apply a load result if `ticket` is still current.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<PageViewModel, ContentError>,
    ) -> Completion {
        if self.unmounted || ticket.generation != self.generation || self.state != ViewState::Loading
        {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                unmounted = self.unmounted,
                "discarding stale page load"
            );
            return Completion::Discarded;
        }

        self.state = match result {
            Ok(model) => ViewState::Ready(Arc::new(model)),
            Err(e) => {
                tracing::warn!(
                    resource = %self.request.resource_path(),
                    kind = e.kind(),
                    error = %e,
                    "page load failed"
                );
                ViewState::Failed {
                    message: e.to_string(),
                }
            }
        };
        Completion::Applied
    }

    /// Tear the view down. Outstanding loads will be discarded.
    pub fn unmount(&mut self) {
        self.unmounted = true;
        self.generation += 1;
    }

    /// Mount (or retry after a failure) and run the load to completion.
    ///
    /// Does nothing if the session is neither idle nor failed.
    pub async fn load(&mut self, source: &dyn ContentSource) -> &ViewState {
        if let Some(ticket) = self.mount().or_else(|| self.retry()) {
            let result = load_page(source, &self.request).await;
            self.complete(ticket, result);
        }
        &self.state
    }

    fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = ViewState::Loading;
        LoadTicket {
            generation: self.generation,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;
    use crate::error::FetchError;

    /// Fails the first `failures` calls, then serves an empty page.
    struct FlakySource {
        calls: AtomicUsize,
        failures: usize,
    }

    impl FlakySource {
        fn new(failures: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                failures,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentSource for FlakySource {
        async fn fetch(&self, _request: &ContentRequest) -> Result<Value, ContentError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                return Err(FetchError::Transport {
                    url: "http://cms.test/mypages/".to_owned(),
                    reason: "connection refused".to_owned(),
                }
                .into());
            }
            Ok(json!({ "title": "Loaded" }))
        }
    }

    fn model(title: &str) -> PageViewModel {
        crate::resolve::resolve_page(&json!({ "title": title })).unwrap()
    }

    // ── transitions ──────────────────────────────────────────────────

    #[test]
    fn mount_enters_loading_once() {
        let mut session = PageSession::new(ContentRequest::Landing);
        assert_eq!(session.state(), &ViewState::Idle);
        assert!(session.mount().is_some());
        assert_eq!(session.state(), &ViewState::Loading);
        assert!(session.mount().is_none());
    }

    #[test]
    fn ready_never_goes_back_to_loading() {
        let mut session = PageSession::new(ContentRequest::Landing);
        let ticket = session.mount().unwrap();
        assert_eq!(session.complete(ticket, Ok(model("A"))), Completion::Applied);
        assert!(session.retry().is_none());
        assert!(session.mount().is_none());
        assert_eq!(session.state().name(), "ready");
    }

    #[test]
    fn result_after_unmount_is_discarded() {
        let mut session = PageSession::new(ContentRequest::Landing);
        let ticket = session.mount().unwrap();
        session.unmount();
        assert_eq!(session.complete(ticket, Ok(model("late"))), Completion::Discarded);
        assert_eq!(session.state(), &ViewState::Loading);

        let err = ContentError::from(FetchError::Status {
            url: "u".into(),
            status: 500,
        });
        assert_eq!(session.complete(ticket, Err(err)), Completion::Discarded);
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let mut session = PageSession::new(ContentRequest::Landing);
        let first = session.mount().unwrap();
        let err = ContentError::from(FetchError::Status {
            url: "u".into(),
            status: 503,
        });
        session.complete(first, Err(err));
        let second = session.retry().unwrap();
        assert_ne!(first, second);
        assert_eq!(session.complete(first, Ok(model("old"))), Completion::Discarded);
        assert_eq!(session.complete(second, Ok(model("new"))), Completion::Applied);
        match session.state() {
            ViewState::Ready(m) => assert_eq!(m.identity.title, "new"),
            other => panic!("expected ready, got {other:?}"),
        }
    }

    // ── load ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn network_failure_then_retry_fetches_exactly_once_more() {
        let source = FlakySource::new(1);
        let mut session = PageSession::new(ContentRequest::Landing);

        let state = session.load(&source).await;
        match state {
            ViewState::Failed { message } => assert!(message.contains("connection refused")),
            other => panic!("expected failed, got {other:?}"),
        }
        assert_eq!(source.calls(), 1);

        let ticket = session.retry().unwrap();
        assert_eq!(session.state(), &ViewState::Loading);
        let result = load_page(&source, session.request()).await;
        session.complete(ticket, result);

        assert_eq!(source.calls(), 2);
        assert_eq!(session.state().name(), "ready");
    }

    #[tokio::test]
    async fn load_does_not_refetch_when_ready() {
        let source = FlakySource::new(0);
        let mut session = PageSession::new(ContentRequest::Landing);
        session.load(&source).await;
        session.load(&source).await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let source = FlakySource::new(1);
        let mut first = PageSession::new(ContentRequest::Landing);
        let mut second = PageSession::new(ContentRequest::Features {
            slug: "hr".into(),
        });
        assert_eq!(first.load(&source).await.name(), "failed");
        assert_eq!(second.load(&source).await.name(), "ready");
        assert_eq!(first.state().name(), "failed");
    }
}
