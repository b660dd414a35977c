//! Dynamic content blocks.
//!
//! One arm per block kind. Unknown kinds render an empty placeholder that
//! keeps the block's position and tag visible in the markup.

use maud::{Markup, PreEscaped, html};

use cmsite_core::model::ContentBlock;

pub(super) fn blocks(blocks: &[ContentBlock]) -> Markup {
    html! {
        div class="dynamic-content" {
            @for b in blocks {
                (block(b))
            }
        }
    }
}

fn block(block: &ContentBlock) -> Markup {
    let id = block.id().map(|id| format!("block-{id}"));
    match block {
        ContentBlock::Heading { text, level, .. } => match level {
            1 => html! { h1 id=[id] { (text) } },
            2 => html! { h2 id=[id] { (text) } },
            3 => html! { h3 id=[id] { (text) } },
            4 => html! { h4 id=[id] { (text) } },
            5 => html! { h5 id=[id] { (text) } },
            _ => html! { h6 id=[id] { (text) } },
        },
        // Rich text is authored in the CMS and rendered as-is.
        ContentBlock::Paragraph { html: body, .. } => html! {
            div class="rich-text" id=[id] { (PreEscaped(body)) }
        },
        ContentBlock::Image { image, caption, .. } => html! {
            figure id=[id] {
                img src=(image.url) alt=(image.title.as_deref().unwrap_or("")) loading="lazy";
                @if let Some(caption) = caption {
                    figcaption { (caption) }
                }
            }
        },
        ContentBlock::Quote {
            text, attribution, ..
        } => html! {
            blockquote id=[id] {
                p { (text) }
                @if let Some(who) = attribution {
                    cite { (who) }
                }
            }
        },
        ContentBlock::Button { link, .. } => html! {
            a class="btn btn-primary" id=[id] href=(link.url) { (link.text) }
        },
        ContentBlock::Embed { url, .. } => html! {
            div class="embed" id=[id] {
                iframe src=(url) loading="lazy" allowfullscreen {}
            }
        },
        ContentBlock::Unknown { kind, .. } => {
            tracing::debug!(kind = %kind, "rendering placeholder for unknown content block");
            html! { div class="block-unknown" id=[id] data-block-type=(kind) {} }
        }
    }
}
