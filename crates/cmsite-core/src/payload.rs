//! Writing a resolved model back into raw CMS shape.
//!
//! The inverse of [`resolve_page`](crate::resolve::resolve_page) on its
//! image: resolving the output of [`PageViewModel::to_payload`] gives back
//! an equal model. Used by the debug payload views and the CLI to show what
//! a page looks like after defaults and normalisation.

use serde_json::{Map, Value, json};

use crate::model::{
    CallToAction, Card, ContentBlock, CtaAction, Footer, ImageRef, IconItem, Link, PageViewModel,
    Sections,
};

impl PageViewModel {
    /// Raw page object equivalent to this model.
    pub fn to_payload(&self) -> Value {
        let mut page = Map::new();

        page.insert("title".into(), json!(self.identity.title));
        page.insert("meta_title".into(), json!(self.identity.meta_title));
        page.insert("meta_description".into(), json!(self.identity.meta_description));
        page.insert("og_image".into(), image_opt(self.identity.og_image.as_ref()));
        page.insert("color_theme".into(), json!(self.theme));

        let header = &self.header;
        page.insert("header_title".into(), json!(header.title));
        page.insert("header_subtitle".into(), json!(header.subtitle));
        page.insert(
            "header_description".into(),
            json!(header.description.as_ref().map(|d| &d.raw)),
        );
        insert_cta(&mut page, "header_cta_primary", header.primary_cta.as_ref());
        insert_cta(&mut page, "header_cta_secondary", header.secondary_cta.as_ref());
        page.insert(
            "header_background_image".into(),
            image_opt(header.background_image.as_ref()),
        );
        page.insert(
            "header_section_image".into(),
            image_opt(header.section_image.as_ref()),
        );

        write_sections(&mut page, &self.sections);

        if let Some(footer) = &self.footer {
            page.insert("footer_config".into(), footer_config(footer));
        }

        page.insert(
            "dynamic_content".into(),
            Value::Array(self.dynamic_content.iter().map(block).collect()),
        );

        Value::Object(page)
    }
}

fn image(img: &ImageRef) -> Value {
    json!({ "url": img.url, "title": img.title })
}

fn image_opt(img: Option<&ImageRef>) -> Value {
    img.map_or(Value::Null, image)
}

fn link(link: &Link) -> Value {
    json!({ "text": link.text, "url": link.url })
}

/// Footer links use `name` for their label.
fn named_links(links: &[Link]) -> Value {
    links
        .iter()
        .map(|l| json!({ "name": l.text, "url": l.url }))
        .collect()
}

fn insert_cta(page: &mut Map<String, Value>, key: &str, cta: Option<&CallToAction>) {
    let Some(cta) = cta else { return };
    page.insert(key.to_owned(), json!(cta.label));
    if let CtaAction::Navigate(url) = &cta.action {
        page.insert(format!("{key}_url"), json!(url));
    }
}

fn icon_items(items: &[IconItem]) -> Value {
    items
        .iter()
        .map(|i| json!({ "title": i.title, "description": i.description, "icon": i.icon }))
        .collect()
}

fn card(card: &Card) -> Value {
    json!({
        "id": card.id,
        "custom_title": card.title,
        "custom_description": card.description,
        "card_content": { "features": card.features },
        "card_image": image_opt(card.image.as_ref()),
        "icon": card.icon,
        "button_text": card.button.as_ref().map(|b| &b.text),
        "button_url": card.button.as_ref().map(|b| &b.url),
    })
}

fn write_sections(page: &mut Map<String, Value>, sections: &Sections) {
    if let Some(s) = &sections.features {
        page.insert(
            "features_section".into(),
            json!({ "heading": s.heading, "description": s.description, "features": icon_items(&s.items) }),
        );
    }
    if let Some(s) = &sections.how_it_works {
        let steps: Vec<Value> = s
            .steps
            .iter()
            .map(|st| json!({ "title": st.title, "description": st.description }))
            .collect();
        page.insert(
            "how_it_works_section".into(),
            json!({ "heading": s.heading, "description": s.description, "steps": steps }),
        );
    }
    if let Some(s) = &sections.video {
        page.insert(
            "video_section".into(),
            json!({
                "heading": s.heading,
                "description": s.description,
                "featured_video": {
                    "url": s.video.url,
                    "title": s.video.title,
                    "thumbnail": image_opt(s.video.thumbnail.as_ref()),
                },
            }),
        );
    }
    if let Some(s) = &sections.benefits {
        page.insert(
            "benefits_section".into(),
            json!({ "heading": s.heading, "description": s.description, "benefits": icon_items(&s.items) }),
        );
    }
    if let Some(s) = &sections.pricing {
        page.insert(
            "pricing_section".into(),
            json!({
                "heading": s.heading,
                "description": s.description,
                "widget_code": s.widget_code,
                "show_cta": s.cta.is_some(),
                "cta": s.cta.as_ref().map(link),
            }),
        );
    }
    if let Some(s) = &sections.cards {
        let cards: Vec<Value> = s.cards.iter().map(card).collect();
        page.insert(
            "card_sections".into(),
            json!({ "heading": s.heading, "cards": cards }),
        );
    }
    if let Some(s) = &sections.testimonials {
        let testimonials: Vec<Value> = s
            .testimonials
            .iter()
            .map(|t| {
                json!({
                    "quote": t.quote,
                    "name": t.name,
                    "role": t.role,
                    "company": t.company,
                    "avatar": image_opt(t.avatar.as_ref()),
                    "rating": t.rating,
                })
            })
            .collect();
        page.insert(
            "testimonials_section".into(),
            json!({ "heading": s.heading, "testimonials": testimonials }),
        );
    }
    if let Some(s) = &sections.faq {
        let items: Vec<Value> = s
            .items
            .iter()
            .map(|i| json!({ "question": i.question, "answer": i.answer }))
            .collect();
        page.insert(
            "faq_section".into(),
            json!({ "heading": s.heading, "items": items }),
        );
    }
    if let Some(s) = &sections.cta {
        page.insert("cta_head".into(), json!(s.head));
        page.insert("cta_introduction".into(), json!(s.introduction));
        if let Some(primary) = &s.primary {
            page.insert("cta_primary_text".into(), json!(primary.text));
            page.insert("cta_primary_url".into(), json!(primary.url));
        }
        if let Some(secondary) = &s.secondary {
            page.insert("cta_secondary_text".into(), json!(secondary.text));
            page.insert("cta_secondary_url".into(), json!(secondary.url));
        }
    }
}

fn footer_config(footer: &Footer) -> Value {
    let mut groups = Map::new();
    for group in &footer.link_groups {
        groups.insert(
            group.kind.key().to_owned(),
            json!({ "show": true, "heading": group.heading, "links": named_links(&group.links) }),
        );
    }
    if let Some(contact) = &footer.contact {
        groups.insert(
            "contact".into(),
            json!({ "show": true, "heading": contact.heading }),
        );
    }
    groups.insert(
        "legal".into(),
        json!({ "links": named_links(&footer.legal_links) }),
    );

    let social: Vec<Value> = footer
        .social_links
        .iter()
        .map(|s| json!({ "platform": s.platform, "url": s.url }))
        .collect();

    json!({
        "company_info": {
            "description": footer.company_description,
            "logo": image_opt(footer.logo.as_ref()),
        },
        "social_links": social,
        "sections": groups,
        "contact_info": footer.contact.as_ref().map(|c| json!({
            "address": c.address,
            "phone": c.phone,
            "email": c.email,
        })),
        "copyright_text": footer.copyright_text,
    })
}

fn block(block: &ContentBlock) -> Value {
    let (kind, value) = match block {
        ContentBlock::Heading { text, level, .. } => {
            ("heading", json!({ "text": text, "level": level }))
        }
        ContentBlock::Paragraph { html, .. } => ("paragraph", json!(html)),
        ContentBlock::Image { image: img, caption, .. } => {
            ("image", json!({ "image": image(img), "caption": caption }))
        }
        ContentBlock::Quote {
            text, attribution, ..
        } => ("quote", json!({ "text": text, "attribution": attribution })),
        ContentBlock::Button { link: l, .. } => ("button", link(l)),
        ContentBlock::Embed { url, .. } => ("embed", json!({ "url": url })),
        ContentBlock::Unknown { kind, .. } => (kind.as_str(), Value::Null),
    };
    json!({ "id": block.id(), "type": kind, "value": value })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use crate::resolve::resolve_page;

    fn round_trip(raw: &serde_json::Value) {
        let model = resolve_page(raw).unwrap();
        assert_eq!(resolve_page(&model.to_payload()).unwrap(), model);
    }

    #[test]
    fn navigate_ctas_keep_their_urls() {
        let raw = json!({
            "header_cta_primary": "Start",
            "header_cta_primary_url": "/start",
            "header_cta_secondary": "Docs",
            "header_cta_secondary_url": "https://docs.test"
        });
        let payload = resolve_page(&raw).unwrap().to_payload();
        assert_eq!(payload["header_cta_primary_url"], "/start");
        assert_eq!(payload["header_cta_secondary_url"], "https://docs.test");
        round_trip(&raw);
    }

    #[test]
    fn in_page_cta_has_no_url() {
        let raw = json!({ "header_cta_secondary": "Sign in", "header_cta_secondary_url": "#login" });
        let payload = resolve_page(&raw).unwrap().to_payload();
        assert!(payload.get("header_cta_secondary_url").is_none());
        round_trip(&raw);
    }

    #[test]
    fn footer_and_blocks_round_trip() {
        round_trip(&json!({
            "footer_config": {
                "company_info": { "description": "We sign", "logo": "/media/logo.svg" },
                "social_links": [{ "platform": "X", "url": "https://x.test" }],
                "sections": {
                    "services": { "show": true, "links": [{ "name": "API" }] },
                    "contact": { "show": true, "heading": "Reach us" },
                    "legal": { "links": [{ "name": "Terms", "url": "/terms" }] }
                },
                "contact_info": { "email": "hi@sm.test" }
            },
            "dynamic_content": [
                { "id": "1", "type": "image", "value": { "url": "/media/i.png" } },
                { "id": "2", "type": "quote", "value": "Plain quote" },
                { "id": "3", "type": "button", "value": { "text": "Go", "url": "/go" } },
                { "id": "4", "type": "video", "value": { "url": "https://v.test/1" } },
                { "id": "5", "type": "paragraph", "value": "<p>Hi</p>" },
                { "id": "6", "type": "map", "value": { "lat": 1 } }
            ]
        }));
    }

    #[test]
    fn sections_round_trip() {
        round_trip(&json!({
            "video_section": { "heading": "Watch", "featured_video": "/media/v.mp4" },
            "benefits_section": { "benefits": [{ "title": "Cheap" }] },
            "how_it_works_section": { "steps": [{ "title": "Upload", "description": "PDF" }] },
            "testimonials_section": { "testimonials": [{ "quote": "Nice", "rating": 5 }] },
            "pricing_section": { "heading": "Plans", "widget_code": "<div></div>" },
            "cta_introduction": "Try",
            "cta_secondary_text": "Later",
            "cta_secondary_url": "/later"
        }));
    }
}
