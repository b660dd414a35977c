use crate::model::{ContactBlock, Footer, Link, LinkGroup, LinkGroupKind, SocialLink};

use super::fields::{self, Object};

const CONTACT_HEADING: &str = "Contact";

/// Find the footer configuration and resolve it.
///
/// Precedence: the page's `footer_config`, then the `data` of the first
/// generic `sections` entry tagged `"footer"`. With neither, the page has
/// no footer.
pub(super) fn resolve(page: &Object) -> Option<Footer> {
    let config = fields::object(page, "footer_config").or_else(|| {
        fields::objects(page, "sections")
            .find(|s| fields::text(s, "type").as_deref() == Some("footer"))
            .and_then(|s| fields::object(s, "data"))
    })?;

    Some(footer(config))
}

fn footer(config: &Object) -> Footer {
    let company = fields::object(config, "company_info");
    let groups = fields::object(config, "sections");

    let link_groups = LinkGroupKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let group = groups.and_then(|g| fields::object(g, kind.key()))?;
            let links = links(group);
            (fields::flag(group, "show") && !links.is_empty()).then(|| LinkGroup {
                kind,
                heading: fields::text(group, "heading")
                    .unwrap_or_else(|| kind.default_heading().to_owned()),
                links,
            })
        })
        .collect();

    let contact = groups
        .and_then(|g| fields::object(g, "contact"))
        .filter(|c| fields::flag(c, "show"))
        .map(|c| {
            let info = fields::object(config, "contact_info");
            ContactBlock {
                heading: fields::text(c, "heading").unwrap_or_else(|| CONTACT_HEADING.to_owned()),
                address: info.and_then(|i| fields::text(i, "address")),
                phone: info.and_then(|i| fields::text(i, "phone")),
                email: info.and_then(|i| fields::text(i, "email")),
            }
        });

    let legal_links = groups
        .and_then(|g| fields::object(g, "legal"))
        .map(links)
        .unwrap_or_default();

    Footer {
        company_description: company.and_then(|c| fields::text(c, "description")),
        logo: company.and_then(|c| fields::image(c, "logo")),
        social_links: fields::objects(config, "social_links")
            .filter_map(|l| {
                Some(SocialLink {
                    platform: fields::text(l, "platform")?,
                    url: fields::text(l, "url")?,
                })
            })
            .collect(),
        link_groups,
        contact,
        legal_links,
        copyright_text: fields::text(config, "copyright_text"),
    }
}

/// Links of a footer group; entries without a name are skipped and a
/// missing URL becomes `#`.
fn links(group: &Object) -> Vec<Link> {
    fields::objects(group, "links")
        .filter_map(|l| {
            Some(Link {
                text: fields::text(l, "name")?,
                url: fields::text(l, "url").unwrap_or_else(|| "#".to_owned()),
            })
        })
        .collect()
}
