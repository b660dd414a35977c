//! `cmsite` HTTP server.
//!
//! Renders the landing and feature pages server-side from CMS content and
//! serves the debugging views. Every page request is its own mount: it gets
//! a fresh page session and a single fetch.

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;
