//! Optional page sections.
//!
//! Each section has its own population rule. A section that fails its rule
//! resolves to `None`; there are no empty placeholders.

use serde_json::Value;

use crate::model::{
    Card, CardsSection, CtaSection, FaqItem, FaqSection, HowItWorksSection, IconItem,
    ItemsSection, Link, PricingSection, Sections, Step, Testimonial, TestimonialsSection, Video,
    VideoSection,
};

use super::fields::{self, Object};

/// Icon shown on cards that have neither an image nor their own icon.
pub const DEFAULT_CARD_ICON: &str = "FiImage";

/// URL for links the CMS left without a target.
const PLACEHOLDER_URL: &str = "#";

pub(super) fn resolve(page: &Object) -> Sections {
    Sections {
        features: fields::object(page, "features_section")
            .and_then(|s| items_section(s, "features")),
        how_it_works: fields::object(page, "how_it_works_section").and_then(how_it_works),
        video: fields::object(page, "video_section").and_then(video),
        benefits: fields::object(page, "benefits_section")
            .and_then(|s| items_section(s, "benefits")),
        pricing: fields::object(page, "pricing_section").and_then(pricing),
        cards: fields::object(page, "card_sections").and_then(cards),
        testimonials: fields::object(page, "testimonials_section").and_then(testimonials),
        faq: fields::object(page, "faq_section").and_then(faq),
        cta: cta(page),
    }
}

fn items_section(section: &Object, list_key: &str) -> Option<ItemsSection> {
    let items: Vec<IconItem> = fields::objects(section, list_key)
        .filter_map(|item| {
            Some(IconItem {
                title: fields::text(item, "title")?,
                description: fields::text(item, "description"),
                icon: fields::text(item, "icon"),
            })
        })
        .collect();

    (!items.is_empty()).then(|| ItemsSection {
        heading: fields::text(section, "heading"),
        description: fields::text(section, "description"),
        items,
    })
}

fn how_it_works(section: &Object) -> Option<HowItWorksSection> {
    let steps: Vec<Step> = fields::objects(section, "steps")
        .filter_map(|step| {
            Some(Step {
                title: fields::text(step, "title")?,
                description: fields::text(step, "description"),
            })
        })
        .collect();

    (!steps.is_empty()).then(|| HowItWorksSection {
        heading: fields::text(section, "heading"),
        description: fields::text(section, "description"),
        steps,
    })
}

fn video(section: &Object) -> Option<VideoSection> {
    let video = match section.get("featured_video")? {
        Value::String(url) if !url.trim().is_empty() => Video {
            url: fields::normalize_image_url(url.trim()),
            title: None,
            thumbnail: None,
        },
        Value::Object(inner) => Video {
            url: fields::normalize_image_url(fields::text(inner, "url")?.trim()),
            title: fields::text(inner, "title"),
            thumbnail: fields::image(inner, "thumbnail"),
        },
        _ => return None,
    };

    Some(VideoSection {
        heading: fields::text(section, "heading"),
        description: fields::text(section, "description"),
        video,
    })
}

fn pricing(section: &Object) -> Option<PricingSection> {
    let heading = fields::text(section, "heading")?;
    let cta = if fields::flag(section, "show_cta") {
        fields::object(section, "cta").and_then(|cta| {
            Some(Link {
                text: fields::text(cta, "text")?,
                url: fields::text(cta, "url").unwrap_or_else(|| PLACEHOLDER_URL.to_owned()),
            })
        })
    } else {
        None
    };

    Some(PricingSection {
        heading,
        description: fields::text(section, "description"),
        widget_code: fields::text(section, "widget_code"),
        cta,
    })
}

fn cards(section: &Object) -> Option<CardsSection> {
    let cards: Vec<Card> = fields::objects(section, "cards").filter_map(card).collect();

    (!cards.is_empty()).then(|| CardsSection {
        heading: fields::text(section, "heading"),
        cards,
    })
}

/// A card's own `custom_*` fields win over its nested `card_content`. Cards
/// without nested content carry the content fields directly.
fn card(raw: &Object) -> Option<Card> {
    let content = fields::object(raw, "card_content").unwrap_or(raw);

    let title = fields::text(raw, "custom_title").or_else(|| fields::text(content, "title"))?;
    let description =
        fields::text(raw, "custom_description").or_else(|| fields::text(content, "description"));

    Some(Card {
        id: fields::id(raw),
        title,
        description,
        features: fields::strings(content, "features"),
        image: fields::image(raw, "card_image"),
        icon: fields::text(raw, "icon").unwrap_or_else(|| DEFAULT_CARD_ICON.to_owned()),
        button: fields::link(raw, "button_text", "button_url"),
    })
}

fn testimonials(section: &Object) -> Option<TestimonialsSection> {
    let testimonials: Vec<Testimonial> = fields::objects(section, "testimonials")
        .filter_map(|t| {
            Some(Testimonial {
                quote: fields::text(t, "quote")?,
                name: fields::text(t, "name"),
                role: fields::text(t, "role"),
                company: fields::text(t, "company"),
                avatar: fields::image(t, "avatar"),
                rating: fields::number(t, "rating"),
            })
        })
        .collect();

    (!testimonials.is_empty()).then(|| TestimonialsSection {
        heading: fields::text(section, "heading"),
        testimonials,
    })
}

fn faq(section: &Object) -> Option<FaqSection> {
    let list_key = if fields::array(section, "items").is_empty() {
        "faqs"
    } else {
        "items"
    };
    let items: Vec<FaqItem> = fields::objects(section, list_key)
        .filter_map(|item| {
            Some(FaqItem {
                question: fields::text(item, "question")?,
                answer: fields::text(item, "answer")?,
            })
        })
        .collect();

    (!items.is_empty()).then(|| FaqSection {
        heading: fields::text(section, "heading"),
        items,
    })
}

/// The closing CTA band lives in flat `cta_*` fields on the page.
fn cta(page: &Object) -> Option<CtaSection> {
    let head = fields::text(page, "cta_head");
    let introduction = fields::text(page, "cta_introduction");
    let primary = fields::text(page, "cta_primary_text").map(|text| Link {
        text,
        url: fields::text(page, "cta_primary_url").unwrap_or_else(|| PLACEHOLDER_URL.to_owned()),
    });

    if head.is_none() && introduction.is_none() && primary.is_none() {
        return None;
    }

    Some(CtaSection {
        head,
        introduction,
        primary,
        secondary: fields::link(page, "cta_secondary_text", "cta_secondary_url"),
    })
}
