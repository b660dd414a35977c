//! Dynamic content stream.
//!
//! Each raw block is `{ "id": …, "type": …, "value": … }`. Known tags map
//! to typed [`ContentBlock`]s; a known tag whose value lacks its required
//! field is dropped. Unknown tags are kept as [`ContentBlock::Unknown`] so
//! the renderer can emit a placeholder instead of failing.

use serde_json::Value;

use crate::model::{ContentBlock, Link};

use super::fields::{self, Object};

/// Heading level used when a block does not set one.
pub const DEFAULT_HEADING_LEVEL: u8 = 2;

pub(super) fn resolve(blocks: &[Value]) -> Vec<ContentBlock> {
    blocks
        .iter()
        .filter_map(Value::as_object)
        .filter_map(block)
        .collect()
}

fn block(raw: &Object) -> Option<ContentBlock> {
    let kind = fields::text(raw, "type")?;
    let id = fields::id(raw);
    let value = raw.get("value").unwrap_or(&Value::Null);

    match kind.as_str() {
        "heading" => {
            let (text, level) = match value {
                Value::Object(v) => (
                    fields::text(v, "text")?,
                    fields::number(v, "level").map_or(DEFAULT_HEADING_LEVEL, clamp_level),
                ),
                other => (plain(other)?, DEFAULT_HEADING_LEVEL),
            };
            Some(ContentBlock::Heading { id, text, level })
        }
        "paragraph" | "rich_text" => {
            let html = match value {
                Value::Object(v) => fields::text(v, "html").or_else(|| fields::text(v, "text"))?,
                other => plain(other)?,
            };
            Some(ContentBlock::Paragraph { id, html })
        }
        "image" => {
            let (image, caption) = match value.as_object() {
                Some(v) if v.contains_key("image") => {
                    (fields::image(v, "image")?, fields::text(v, "caption"))
                }
                _ => (fields::image_value(value)?, None),
            };
            Some(ContentBlock::Image { id, image, caption })
        }
        "quote" => {
            let (text, attribution) = match value {
                Value::Object(v) => (
                    fields::text(v, "text").or_else(|| fields::text(v, "quote"))?,
                    fields::text(v, "attribution"),
                ),
                other => (plain(other)?, None),
            };
            Some(ContentBlock::Quote { id, text, attribution })
        }
        "button" => {
            let v = value.as_object()?;
            let link = Link {
                text: fields::text(v, "text")?,
                url: fields::text(v, "url")?,
            };
            Some(ContentBlock::Button { id, link })
        }
        "embed" | "video" => {
            let url = match value {
                Value::Object(v) => fields::text(v, "url")?,
                other => plain(other)?,
            };
            Some(ContentBlock::Embed { id, url })
        }
        _ => Some(ContentBlock::Unknown { id, kind }),
    }
}

fn plain(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_level(level: f64) -> u8 {
    level.round().clamp(1.0, 6.0) as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;

    fn blocks(value: Value) -> Vec<ContentBlock> {
        resolve(value.as_array().unwrap())
    }

    #[test]
    fn heading_from_string_or_object() {
        let b = blocks(json!([
            { "id": "h1", "type": "heading", "value": "Plain" },
            { "id": "h2", "type": "heading", "value": { "text": "Deep", "level": 9 } }
        ]));
        assert_eq!(
            b[0],
            ContentBlock::Heading { id: Some("h1".into()), text: "Plain".into(), level: 2 }
        );
        assert_eq!(
            b[1],
            ContentBlock::Heading { id: Some("h2".into()), text: "Deep".into(), level: 6 }
        );
    }

    #[test]
    fn unknown_tag_is_kept_with_its_kind() {
        let b = blocks(json!([{ "id": 7, "type": "carousel", "value": [] }]));
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].kind(), "carousel");
        assert_eq!(b[0].id(), Some("7"));
    }

    #[test]
    fn known_tag_without_required_value_is_dropped() {
        let b = blocks(json!([
            { "type": "paragraph", "value": "  " },
            { "type": "button", "value": { "text": "Go" } },
            { "type": "image", "value": { "caption": "no image" } },
            { "value": "no type" },
            "not an object"
        ]));
        assert!(b.is_empty());
    }

    #[test]
    fn image_block_accepts_wrapped_or_bare_image() {
        let b = blocks(json!([
            { "type": "image", "value": { "image": { "url": "/media/a.png" }, "caption": "A" } },
            { "type": "image", "value": { "url": "https://cdn.test/b.png", "title": "B" } }
        ]));
        match &b[0] {
            ContentBlock::Image { image, caption, .. } => {
                assert_eq!(image.url, "https://esign-admin.signmary.com/media/a.png");
                assert_eq!(caption.as_deref(), Some("A"));
            }
            other => panic!("unexpected block {other:?}"),
        }
        assert_eq!(b[1].kind(), "image");
    }

    #[test]
    fn video_tag_becomes_embed() {
        let b = blocks(json!([{ "type": "video", "value": "https://youtu.be/x" }]));
        assert_eq!(
            b[0],
            ContentBlock::Embed { id: None, url: "https://youtu.be/x".into() }
        );
    }

    #[test]
    fn quote_accepts_either_text_key() {
        let b = blocks(json!([
            { "type": "quote", "value": { "quote": "Wow", "attribution": "Ana" } }
        ]));
        assert_eq!(
            b[0],
            ContentBlock::Quote { id: None, text: "Wow".into(), attribution: Some("Ana".into()) }
        );
    }
}
