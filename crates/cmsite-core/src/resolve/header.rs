use crate::model::{CallToAction, CtaAction, Description, Header};

use super::fields::{self, Object};

/// Secondary-CTA URL that opens the sign-in dialog instead of navigating.
const LOGIN_ANCHOR: &str = "#login";

pub(super) fn resolve(page: &Object) -> Header {
    let primary_cta = fields::text(page, "header_cta_primary").map(|label| CallToAction {
        label,
        action: fields::text(page, "header_cta_primary_url")
            .map_or(CtaAction::InPage, CtaAction::Navigate),
    });

    let secondary_cta = fields::text(page, "header_cta_secondary").map(|label| CallToAction {
        label,
        action: fields::text(page, "header_cta_secondary_url")
            .filter(|url| url != LOGIN_ANCHOR)
            .map_or(CtaAction::InPage, CtaAction::Navigate),
    });

    Header {
        title: fields::text(page, "header_title"),
        subtitle: fields::text(page, "header_subtitle"),
        description: fields::text(page, "header_description")
            .map(|raw| split_description(&raw)),
        primary_cta,
        secondary_cta,
        background_image: fields::image(page, "header_background_image"),
        section_image: fields::image(page, "header_section_image"),
    }
}

/// Split a newline-delimited description into a lead and body paragraphs.
///
/// The lead is the text before the first newline, untouched. Every later
/// line is trimmed and blank lines are dropped.
pub fn split_description(raw: &str) -> Description {
    let mut lines = raw.split('\n');
    let lead = lines.next().unwrap_or_default().to_owned();
    let paragraphs = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();

    Description {
        lead,
        paragraphs,
        raw: raw.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn header(value: serde_json::Value) -> Header {
        resolve(value.as_object().unwrap())
    }

    #[test]
    fn lead_is_text_before_first_newline() {
        let d = split_description("First line \nbody one\n\n   \n  body two  ");
        assert_eq!(d.lead, "First line ");
        assert_eq!(d.paragraphs, vec!["body one", "body two"]);
    }

    #[test]
    fn single_line_has_no_body() {
        let d = split_description("Only a lead");
        assert_eq!(d.lead, "Only a lead");
        assert!(d.paragraphs.is_empty());
    }

    #[test]
    fn empty_lead_is_kept_as_written() {
        let d = split_description("\nbody");
        assert_eq!(d.lead, "");
        assert_eq!(d.paragraphs, vec!["body"]);
    }

    #[test]
    fn primary_cta_without_url_is_in_page() {
        let h = header(json!({ "header_cta_primary": "Get started" }));
        assert_eq!(h.primary_cta.unwrap().action, CtaAction::InPage);
    }

    #[test]
    fn primary_cta_with_url_navigates() {
        let h = header(json!({
            "header_cta_primary": "Get started",
            "header_cta_primary_url": "https://app.test/signup"
        }));
        assert_eq!(
            h.primary_cta.unwrap().action,
            CtaAction::Navigate("https://app.test/signup".to_owned())
        );
    }

    #[test]
    fn secondary_login_anchor_is_in_page() {
        let h = header(json!({ "header_cta_secondary": "Sign in", "header_cta_secondary_url": "#login" }));
        assert_eq!(h.secondary_cta.unwrap().action, CtaAction::InPage);
    }

    #[test]
    fn cta_url_without_label_has_no_cta() {
        let h = header(json!({ "header_cta_primary_url": "/x" }));
        assert!(h.primary_cta.is_none());
    }

    #[test]
    fn header_images_are_absolute() {
        let h = header(json!({
            "header_background_image": { "url": "/media/bg.jpg" },
            "header_section_image": { "url": "https://cdn.test/s.png" }
        }));
        assert_eq!(
            h.background_image.unwrap().url,
            "https://esign-admin.signmary.com/media/bg.jpg"
        );
        assert_eq!(h.section_image.unwrap().url, "https://cdn.test/s.png");
    }
}
