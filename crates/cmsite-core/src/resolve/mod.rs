//! View-model resolution.
//!
//! [`resolve_page`] is a pure function from the raw CMS payload to a
//! [`PageViewModel`]. It never mutates its input and never fails for a
//! missing optional field; the only error is a payload that is not a page
//! object at all. Feeding a resolved model back in (via
//! [`PageViewModel::to_payload`]) yields the same model.

mod dynamic;
mod fields;
mod footer;
mod header;
mod sections;
mod theme;

use serde_json::Value;

use crate::error::{MalformedPayloadError, json_type_name};
use crate::model::{Identity, PageViewModel};

pub use fields::{ASSET_HOST, normalize_image_url};
pub use header::split_description;
pub use theme::{DEFAULT_THEME, SENTINEL_BACKGROUND};

use fields::Object;

/// Resolve a raw payload into a complete page model.
///
/// Accepts either a page object or a Wagtail listing envelope
/// (`{ "items": [page, …] }`), in which case the first page is used.
///
/// # Errors
///
/// Returns [`MalformedPayloadError`] if the payload (or the first listed
/// page) is not a JSON object, or if the listing is empty.
pub fn resolve_page(raw: &Value) -> Result<PageViewModel, MalformedPayloadError> {
    let page = page_object(raw)?;

    Ok(PageViewModel {
        identity: identity(page),
        theme: theme::resolve(fields::object(page, "color_theme")),
        header: header::resolve(page),
        sections: sections::resolve(page),
        footer: footer::resolve(page),
        dynamic_content: dynamic::resolve(fields::array(page, "dynamic_content")),
    })
}

/// Locate the page object inside the payload.
fn page_object(raw: &Value) -> Result<&Object, MalformedPayloadError> {
    let obj = raw.as_object().ok_or(MalformedPayloadError::NotAMapping {
        found: json_type_name(raw),
    })?;

    match obj.get("items") {
        Some(Value::Array(items)) => {
            let first = items.first().ok_or(MalformedPayloadError::EmptyListing)?;
            first.as_object().ok_or(MalformedPayloadError::NotAMapping {
                found: json_type_name(first),
            })
        }
        _ => Ok(obj),
    }
}

fn identity(page: &Object) -> Identity {
    Identity {
        title: fields::text(page, "title").unwrap_or_default(),
        meta_title: fields::text(page, "meta_title"),
        meta_description: fields::text(page, "meta_description"),
        og_image: fields::image(page, "og_image"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{CtaAction, ContentBlock};

    fn full_payload() -> Value {
        json!({
            "id": 12,
            "title": "Sign Mary",
            "meta_title": "Sign Mary | e-signatures",
            "meta_description": "Sign anything, anywhere.",
            "og_image": { "url": "/media/og.png" },
            "color_theme": {
                "primary_color": "#111111",
                "background_color": "#6b7280"
            },
            "header_title": "Close deals faster",
            "header_subtitle": "New: passkeys",
            "header_description": "Lead line\n  second  \n\nthird",
            "header_cta_primary": "Get started",
            "header_cta_secondary": "Sign in",
            "header_cta_secondary_url": "#login",
            "header_section_image": { "url": "https://cdn.test/hero.png", "title": "Hero" },
            "features_section": {
                "heading": "Features",
                "features": [{ "title": "Fast", "icon": "FiZap" }, { "description": "no title" }]
            },
            "how_it_works_section": { "heading": "How", "steps": [] },
            "pricing_section": { "heading": "Pricing", "show_cta": true, "cta": { "text": "Buy", "url": "/buy" } },
            "card_sections": {
                "heading": "Use cases",
                "cards": [{
                    "id": 3,
                    "custom_title": "Sales",
                    "card_content": { "title": "ignored", "description": "From content", "features": ["a", "", "b"] },
                    "card_image": { "url": "/media/c.png" },
                    "button_text": "More",
                    "button_url": "/features/sales"
                }]
            },
            "faq_section": { "items": [{ "question": "Q?", "answer": "A." }, { "question": "Only Q" }] },
            "cta_head": "Ready?",
            "cta_primary_text": "Start",
            "cta_primary_url": "/start",
            "dynamic_content": [
                { "id": "b1", "type": "heading", "value": "Hello" },
                { "id": "b2", "type": "carousel", "value": [] }
            ],
            "sections": [{ "type": "footer", "data": { "copyright_text": "(c) SM" } }]
        })
    }

    #[test]
    fn non_object_payload_is_malformed() {
        assert_eq!(
            resolve_page(&json!("nope")).unwrap_err(),
            MalformedPayloadError::NotAMapping { found: "string" }
        );
        assert_eq!(
            resolve_page(&json!(null)).unwrap_err(),
            MalformedPayloadError::NotAMapping { found: "null" }
        );
    }

    #[test]
    fn listing_envelope_uses_first_item() {
        let raw = json!({ "meta": { "total_count": 2 }, "items": [{ "title": "First" }, { "title": "Second" }] });
        assert_eq!(resolve_page(&raw).unwrap().identity.title, "First");
    }

    #[test]
    fn empty_listing_is_malformed() {
        let raw = json!({ "meta": { "total_count": 0 }, "items": [] });
        assert_eq!(resolve_page(&raw).unwrap_err(), MalformedPayloadError::EmptyListing);
        let raw = json!({ "items": [42] });
        assert_eq!(
            resolve_page(&raw).unwrap_err(),
            MalformedPayloadError::NotAMapping { found: "number" }
        );
    }

    #[test]
    fn empty_object_resolves_to_defaults() {
        let model = resolve_page(&json!({})).unwrap();
        assert_eq!(model.identity, Identity::default());
        assert_eq!(model.theme, DEFAULT_THEME.to_theme());
        assert!(model.header.title.is_none());
        assert!(model.sections.features.is_none());
        assert!(model.sections.cards.is_none());
        assert!(model.footer.is_none());
        assert!(model.dynamic_content.is_empty());
    }

    #[test]
    fn empty_cards_section_is_absent() {
        let model = resolve_page(&json!({ "card_sections": { "cards": [] } })).unwrap();
        assert!(model.sections.cards.is_none());
    }

    #[test]
    fn full_payload_resolves_every_part() {
        let model = resolve_page(&full_payload()).unwrap();

        assert_eq!(model.identity.title, "Sign Mary");
        assert_eq!(
            model.identity.og_image.unwrap().url,
            "https://esign-admin.signmary.com/media/og.png"
        );
        assert_eq!(model.theme.primary_color, "#111111");
        assert_eq!(model.theme.background_color, "#FFFFFF");

        let description = model.header.description.unwrap();
        assert_eq!(description.lead, "Lead line");
        assert_eq!(description.paragraphs, vec!["second", "third"]);
        assert_eq!(model.header.primary_cta.unwrap().action, CtaAction::InPage);
        assert_eq!(model.header.secondary_cta.unwrap().action, CtaAction::InPage);

        assert_eq!(model.sections.features.unwrap().items.len(), 1);
        assert!(model.sections.how_it_works.is_none());
        assert_eq!(model.sections.pricing.unwrap().cta.unwrap().text, "Buy");

        let cards = model.sections.cards.unwrap();
        assert_eq!(cards.cards[0].title, "Sales");
        assert_eq!(cards.cards[0].description.as_deref(), Some("From content"));
        assert_eq!(cards.cards[0].features, vec!["a", "b"]);

        assert_eq!(model.sections.faq.unwrap().items.len(), 1);
        assert_eq!(model.sections.cta.unwrap().head.as_deref(), Some("Ready?"));

        assert_eq!(model.footer.unwrap().copyright_text.as_deref(), Some("(c) SM"));
        assert!(matches!(model.dynamic_content[1], ContentBlock::Unknown { .. }));
    }

    #[test]
    fn resolution_does_not_mutate_input() {
        let raw = full_payload();
        let before = raw.clone();
        let _ = resolve_page(&raw).unwrap();
        assert_eq!(raw, before);
    }

    #[test]
    fn resolution_is_idempotent() {
        let first = resolve_page(&full_payload()).unwrap();
        let second = resolve_page(&first.to_payload()).unwrap();
        assert_eq!(first, second);

        let minimal = resolve_page(&json!({})).unwrap();
        assert_eq!(resolve_page(&minimal.to_payload()).unwrap(), minimal);
    }
}
