//! The resolved, render-ready page model.
//!
//! A [`PageViewModel`] is built once per page load by
//! [`resolve_page`](crate::resolve::resolve_page) and never mutated
//! afterwards. Every colour has a value, every image URL is absolute, and
//! every optional section is either fully populated or `None`.

use serde::Serialize;

/// Complete view model for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageViewModel {
    pub identity: Identity,
    pub theme: ColorTheme,
    pub header: Header,
    pub sections: Sections,
    pub footer: Option<Footer>,
    pub dynamic_content: Vec<ContentBlock>,
}

/// Page title and social-preview metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub title: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_image: Option<ImageRef>,
}

/// Resolved colour palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorTheme {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub neutral_color: String,
    pub background_color: String,
    pub text_color: String,
}

/// An image with an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub url: String,
    pub title: Option<String>,
}

/// A labelled link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// Hero section at the top of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<Description>,
    pub primary_cta: Option<CallToAction>,
    pub secondary_cta: Option<CallToAction>,
    pub background_image: Option<ImageRef>,
    pub section_image: Option<ImageRef>,
}

/// A newline-delimited description split into a lead and body paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    /// Text before the first newline, as written.
    pub lead: String,
    /// Remaining lines, trimmed, blank lines dropped.
    pub paragraphs: Vec<String>,
    /// The unsplit source text.
    pub raw: String,
}

/// A call-to-action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: String,
    pub action: CtaAction,
}

/// What activating a call-to-action does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "url", rename_all = "snake_case")]
pub enum CtaAction {
    /// Navigate to a URL.
    Navigate(String),
    /// Handled on the page itself (e.g. opening the sign-in dialog).
    InPage,
}

/// Optional content blocks. Each is `None` unless it passed its
/// population rule during resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sections {
    pub features: Option<ItemsSection>,
    pub how_it_works: Option<HowItWorksSection>,
    pub video: Option<VideoSection>,
    pub benefits: Option<ItemsSection>,
    pub pricing: Option<PricingSection>,
    pub cards: Option<CardsSection>,
    pub testimonials: Option<TestimonialsSection>,
    pub faq: Option<FaqSection>,
    pub cta: Option<CtaSection>,
}

/// A heading plus a grid of icon items (features, benefits).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemsSection {
    pub heading: Option<String>,
    pub description: Option<String>,
    pub items: Vec<IconItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconItem {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HowItWorksSection {
    pub heading: Option<String>,
    pub description: Option<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSection {
    pub heading: Option<String>,
    pub description: Option<String>,
    pub video: Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Video {
    pub url: String,
    pub title: Option<String>,
    pub thumbnail: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingSection {
    pub heading: String,
    pub description: Option<String>,
    /// Third-party pricing widget markup, rendered verbatim.
    pub widget_code: Option<String>,
    pub cta: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardsSection {
    pub heading: Option<String>,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub image: Option<ImageRef>,
    pub icon: String,
    pub button: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestimonialsSection {
    pub heading: Option<String>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Testimonial {
    pub quote: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub avatar: Option<ImageRef>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqSection {
    pub heading: Option<String>,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Closing call-to-action band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CtaSection {
    pub head: Option<String>,
    pub introduction: Option<String>,
    pub primary: Option<Link>,
    pub secondary: Option<Link>,
}

/// Site footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub company_description: Option<String>,
    pub logo: Option<ImageRef>,
    pub social_links: Vec<SocialLink>,
    /// Visible link columns, in display order.
    pub link_groups: Vec<LinkGroup>,
    pub contact: Option<ContactBlock>,
    pub legal_links: Vec<Link>,
    pub copyright_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// One footer link column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkGroup {
    pub kind: LinkGroupKind,
    pub heading: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkGroupKind {
    QuickLinks,
    Services,
    Resources,
}

impl LinkGroupKind {
    pub const ALL: [Self; 3] = [Self::QuickLinks, Self::Services, Self::Resources];

    /// Key of this group under the footer's `sections` object.
    pub fn key(self) -> &'static str {
        match self {
            Self::QuickLinks => "quick_links",
            Self::Services => "services",
            Self::Resources => "resources",
        }
    }

    pub fn default_heading(self) -> &'static str {
        match self {
            Self::QuickLinks => "Quick Links",
            Self::Services => "Services",
            Self::Resources => "Resources",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactBlock {
    pub heading: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// One block of the dynamic content stream, keyed on its `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading {
        id: Option<String>,
        text: String,
        level: u8,
    },
    Paragraph {
        id: Option<String>,
        /// CMS rich-text markup.
        html: String,
    },
    Image {
        id: Option<String>,
        image: ImageRef,
        caption: Option<String>,
    },
    Quote {
        id: Option<String>,
        text: String,
        attribution: Option<String>,
    },
    Button {
        id: Option<String>,
        link: Link,
    },
    Embed {
        id: Option<String>,
        url: String,
    },
    /// A block whose tag this version does not know.
    Unknown { id: Option<String>, kind: String },
}

impl ContentBlock {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Heading { id, .. }
            | Self::Paragraph { id, .. }
            | Self::Image { id, .. }
            | Self::Quote { id, .. }
            | Self::Button { id, .. }
            | Self::Embed { id, .. }
            | Self::Unknown { id, .. } => id.as_deref(),
        }
    }

    /// The block's type tag.
    pub fn kind(&self) -> &str {
        match self {
            Self::Heading { .. } => "heading",
            Self::Paragraph { .. } => "paragraph",
            Self::Image { .. } => "image",
            Self::Quote { .. } => "quote",
            Self::Button { .. } => "button",
            Self::Embed { .. } => "embed",
            Self::Unknown { kind, .. } => kind,
        }
    }
}
