//! Page composition.
//!
//! [`plan`] decides whether a selector needs content at all. [`compose`]
//! turns a resolved model into the ordered sections a renderer mounts, each
//! with a stable key and only the slice of the model it needs.

use serde::Serialize;

use crate::fetch::ContentRequest;
use crate::model::{
    CardsSection, ColorTheme, ContentBlock, CtaSection, FaqSection, Footer, Header,
    HowItWorksSection, ImageRef, ItemsSection, PageViewModel, PricingSection,
    TestimonialsSection, VideoSection,
};
use crate::route::RouteSelector;

/// What mounting a selector requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Fetch and resolve page content, then compose it.
    Content(ContentRequest),
    /// A static debugging view; nothing is fetched.
    Static(DebugView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugView {
    Features,
    Landing,
    ApiProbe,
}

/// Map a selector to its mount plan.
pub fn plan(selector: &RouteSelector) -> Plan {
    match selector {
        RouteSelector::Landing => Plan::Content(ContentRequest::Landing),
        RouteSelector::Features { slug } => Plan::Content(ContentRequest::Features {
            slug: slug.clone(),
        }),
        RouteSelector::DebugFeatures => Plan::Static(DebugView::Features),
        RouteSelector::DebugLanding => Plan::Static(DebugView::Landing),
        RouteSelector::ApiDebug => Plan::Static(DebugView::ApiProbe),
    }
}

/// Which content page is being composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Landing,
    Features { slug: String },
}

impl PageKind {
    fn order(&self) -> &'static [SectionKey] {
        use SectionKey as K;
        match self {
            Self::Landing => &[
                K::Navbar,
                K::Header,
                K::Features,
                K::HowItWorks,
                K::Video,
                K::Benefits,
                K::Pricing,
                K::Cards,
                K::DynamicContent,
                K::Testimonials,
                K::Faq,
                K::Cta,
                K::Footer,
            ],
            Self::Features { .. } => &[
                K::Navbar,
                K::Header,
                K::Features,
                K::Cards,
                K::HowItWorks,
                K::DynamicContent,
                K::Pricing,
                K::Faq,
                K::Cta,
                K::Footer,
            ],
        }
    }
}

impl From<&ContentRequest> for PageKind {
    fn from(request: &ContentRequest) -> Self {
        match request {
            ContentRequest::Landing => Self::Landing,
            ContentRequest::Features { slug } => Self::Features { slug: slug.clone() },
        }
    }
}

/// Stable identity of a section, used as its DOM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKey {
    Navbar,
    Header,
    Features,
    HowItWorks,
    Video,
    Benefits,
    Pricing,
    Cards,
    DynamicContent,
    Testimonials,
    Faq,
    Cta,
    Footer,
}

impl SectionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Navbar => "navbar",
            Self::Header => "header",
            Self::Features => "features",
            Self::HowItWorks => "how-it-works",
            Self::Video => "video",
            Self::Benefits => "benefits",
            Self::Pricing => "pricing",
            Self::Cards => "cards",
            Self::DynamicContent => "dynamic-content",
            Self::Testimonials => "testimonials",
            Self::Faq => "faq",
            Self::Cta => "cta",
            Self::Footer => "footer",
        }
    }

    /// Class the renderer toggles when the section scrolls into view.
    /// Chrome (navbar, footer) does not animate.
    pub fn reveal(self) -> Option<&'static str> {
        match self {
            Self::Navbar | Self::Footer => None,
            Self::Header => Some("reveal-fade"),
            Self::Cards | Self::Testimonials => Some("reveal-stagger"),
            _ => Some("reveal-up"),
        }
    }
}

/// Props for one section: the slice of the model it renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionProps<'a> {
    Navbar {
        title: &'a str,
        logo: Option<&'a ImageRef>,
    },
    Header(&'a Header),
    Features(&'a ItemsSection),
    HowItWorks(&'a HowItWorksSection),
    Video(&'a VideoSection),
    Benefits(&'a ItemsSection),
    Pricing(&'a PricingSection),
    Cards(&'a CardsSection),
    DynamicContent(&'a [ContentBlock]),
    Testimonials(&'a TestimonialsSection),
    Faq(&'a FaqSection),
    Cta(&'a CtaSection),
    Footer {
        footer: &'a Footer,
        site_title: &'a str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSlot<'a> {
    pub key: SectionKey,
    pub reveal: Option<&'static str>,
    pub props: SectionProps<'a>,
}

/// Document-level metadata, applied once the page is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationMeta {
    pub title: String,
    pub description: Option<String>,
    pub og_image: Option<String>,
}

impl PresentationMeta {
    pub fn from_model(model: &PageViewModel) -> Self {
        let identity = &model.identity;
        Self {
            title: identity
                .meta_title
                .clone()
                .unwrap_or_else(|| identity.title.clone()),
            description: identity.meta_description.clone().or_else(|| {
                model.header.description.as_ref().map(|d| d.raw.clone())
            }),
            og_image: identity.og_image.as_ref().map(|img| img.url.clone()),
        }
    }
}

/// A composed page, ready to hand to section renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout<'a> {
    pub kind: PageKind,
    pub theme: &'a ColorTheme,
    pub meta: PresentationMeta,
    pub sections: Vec<SectionSlot<'a>>,
}

/// Compose the ordered section list for a page. Absent sections are skipped.
pub fn compose(kind: PageKind, model: &PageViewModel) -> PageLayout<'_> {
    let sections = kind
        .order()
        .iter()
        .filter_map(|&key| {
            props(key, model).map(|props| SectionSlot {
                key,
                reveal: key.reveal(),
                props,
            })
        })
        .collect();

    PageLayout {
        kind,
        theme: &model.theme,
        meta: PresentationMeta::from_model(model),
        sections,
    }
}

fn props(key: SectionKey, model: &PageViewModel) -> Option<SectionProps<'_>> {
    let s = &model.sections;
    Some(match key {
        SectionKey::Navbar => SectionProps::Navbar {
            title: &model.identity.title,
            logo: model.footer.as_ref().and_then(|f| f.logo.as_ref()),
        },
        SectionKey::Header => SectionProps::Header(&model.header),
        SectionKey::Features => SectionProps::Features(s.features.as_ref()?),
        SectionKey::HowItWorks => SectionProps::HowItWorks(s.how_it_works.as_ref()?),
        SectionKey::Video => SectionProps::Video(s.video.as_ref()?),
        SectionKey::Benefits => SectionProps::Benefits(s.benefits.as_ref()?),
        SectionKey::Pricing => SectionProps::Pricing(s.pricing.as_ref()?),
        SectionKey::Cards => SectionProps::Cards(s.cards.as_ref()?),
        SectionKey::DynamicContent => {
            if model.dynamic_content.is_empty() {
                return None;
            }
            SectionProps::DynamicContent(&model.dynamic_content)
        }
        SectionKey::Testimonials => SectionProps::Testimonials(s.testimonials.as_ref()?),
        SectionKey::Faq => SectionProps::Faq(s.faq.as_ref()?),
        SectionKey::Cta => SectionProps::Cta(s.cta.as_ref()?),
        SectionKey::Footer => SectionProps::Footer {
            footer: model.footer.as_ref()?,
            site_title: &model.identity.title,
        },
    })
}
