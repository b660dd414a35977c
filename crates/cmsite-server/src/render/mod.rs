//! HTML rendering with Maud.
//!
//! Renderers are pure: they take a composed layout (or a failure message)
//! and return markup. Everything interpolated is escaped except CMS rich
//! text and the pricing widget, which are authored as HTML.

mod dynamic;
mod footer;
pub mod icon;
mod layout;
mod sections;

use maud::{Markup, html};

use cmsite_core::probe::DEBUG_ENDPOINTS;
use cmsite_core::resolve::DEFAULT_THEME;
use cmsite_core::{ApiConfig, DebugView, PageLayout, PresentationMeta, SectionProps, SectionSlot};

pub use footer::default_copyright;
pub use icon::{IconResolver, PrefixIcons};
pub use layout::document;

/// Render a composed page.
pub fn page(layout: &PageLayout<'_>, icons: &dyn IconResolver, year: i32) -> Markup {
    let body = html! {
        main {
            @for slot in &layout.sections {
                (section(slot, icons, year))
            }
        }
    };
    document(&layout.meta, layout.theme, &body)
}

fn section(slot: &SectionSlot<'_>, icons: &dyn IconResolver, year: i32) -> Markup {
    let inner = match slot.props {
        SectionProps::Navbar { title, logo } => return sections::navbar(title, logo),
        SectionProps::Footer {
            footer: model,
            site_title,
        } => return footer::footer(model, site_title, year),
        SectionProps::Header(h) => return sections::header(h),
        SectionProps::Features(s) | SectionProps::Benefits(s) => sections::icon_grid(s, icons),
        SectionProps::HowItWorks(s) => sections::how_it_works(s),
        SectionProps::Video(s) => sections::video(s),
        SectionProps::Pricing(s) => sections::pricing(s),
        SectionProps::Cards(s) => sections::cards(s, icons),
        SectionProps::DynamicContent(blocks) => dynamic::blocks(blocks),
        SectionProps::Testimonials(s) => sections::testimonials(s),
        SectionProps::Faq(s) => sections::faq(s),
        SectionProps::Cta(s) => sections::cta(s),
    };

    html! {
        section id=(slot.key.as_str()) class=[slot.reveal] data-reveal[slot.reveal.is_some()] {
            (inner)
        }
    }
}

fn plain_meta(title: &str) -> PresentationMeta {
    PresentationMeta {
        title: title.to_owned(),
        description: None,
        og_image: None,
    }
}

/// Page shown when content could not be loaded. `retry_href` reloads the
/// same location, which mounts a fresh session.
pub fn failure(message: &str, retry_href: &str) -> Markup {
    let body = html! {
        main class="load-failed" {
            h1 { "Unable to load this page" }
            p class="error-message" { (message) }
            a class="btn btn-primary" href=(retry_href) { "Try Again" }
        }
    };
    document(&plain_meta("Error"), &DEFAULT_THEME.to_theme(), &body)
}

/// Static debugging views. Nothing here fetches; the pages link to the
/// JSON endpoints that do.
pub fn debug(view: DebugView, api: &ApiConfig) -> Markup {
    let body = match view {
        DebugView::Features => payload_debugger("Features page", "features", api),
        DebugView::Landing => payload_debugger("Landing page", "landing", api),
        DebugView::ApiProbe => html! {
            main class="debug" {
                h1 { "API endpoint probe" }
                (api_summary(api))
                p { a href="/api-debug/probe" { "Probe all endpoints" } }
                ul {
                    @for endpoint in DEBUG_ENDPOINTS {
                        li {
                            a href={ "/api-debug/probe?endpoint=" (urlencoding::encode(endpoint)) } {
                                (endpoint)
                            }
                        }
                    }
                }
            }
        },
    };
    document(&plain_meta("Debug"), &DEFAULT_THEME.to_theme(), &body)
}

fn payload_debugger(title: &str, page: &str, api: &ApiConfig) -> Markup {
    html! {
        main class="debug" {
            h1 { (title) " payload" }
            (api_summary(api))
            p {
                a href={ "/_debug/payload/" (page) } { "Fetch raw and resolved payload" }
            }
            @if page == "features" {
                form action="/_debug/payload/features" method="get" {
                    label { "Slug " input name="slug" value=(cmsite_core::route::DEFAULT_FEATURES_SLUG); }
                    button type="submit" { "Fetch" }
                }
            }
        }
    }
}

fn api_summary(api: &ApiConfig) -> Markup {
    html! {
        dl class="api-config" {
            dt { "API base" } dd { code { (api.base) } }
            dt { "Frontend URL" } dd { code { (api.frontend_url) } }
        }
    }
}
