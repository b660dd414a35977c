use maud::{Markup, html};

use cmsite_core::model::Footer;

/// Copyright line used when the CMS does not supply one.
pub fn default_copyright(year: i32, site_title: &str) -> String {
    if site_title.is_empty() {
        format!("© {year}. All rights reserved.")
    } else {
        format!("© {year} {site_title}. All rights reserved.")
    }
}

pub(super) fn footer(footer: &Footer, site_title: &str, year: i32) -> Markup {
    let copyright = footer
        .copyright_text
        .clone()
        .unwrap_or_else(|| default_copyright(year, site_title));

    html! {
        footer class="site-footer" {
            div class="footer-company" {
                @if let Some(logo) = &footer.logo {
                    img class="footer-logo" src=(logo.url) alt=(logo.title.as_deref().unwrap_or(site_title));
                }
                @if let Some(description) = &footer.company_description {
                    p { (description) }
                }
                @if !footer.social_links.is_empty() {
                    ul class="social-links" {
                        @for social in &footer.social_links {
                            li {
                                a href=(social.url) rel="noopener" target="_blank"
                                    data-platform=(social.platform.to_lowercase()) { (social.platform) }
                            }
                        }
                    }
                }
            }
            @for group in &footer.link_groups {
                div class="footer-group" data-group=(group.kind.key()) {
                    h4 { (group.heading) }
                    ul {
                        @for link in &group.links {
                            li { a href=(link.url) { (link.text) } }
                        }
                    }
                }
            }
            @if let Some(contact) = &footer.contact {
                div class="footer-group footer-contact" {
                    h4 { (contact.heading) }
                    address {
                        @if let Some(address) = &contact.address {
                            p { (address) }
                        }
                        @if let Some(phone) = &contact.phone {
                            p { a href={ "tel:" (phone) } { (phone) } }
                        }
                        @if let Some(email) = &contact.email {
                            p { a href={ "mailto:" (email) } { (email) } }
                        }
                    }
                }
            }
            div class="footer-bottom" {
                p class="copyright" { (copyright) }
                @if !footer.legal_links.is_empty() {
                    ul class="legal-links" {
                        @for link in &footer.legal_links {
                            li { a href=(link.url) { (link.text) } }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_copyright_names_site_when_known() {
        assert_eq!(default_copyright(2026, "Sign Mary"), "© 2026 Sign Mary. All rights reserved.");
        assert_eq!(default_copyright(2026, ""), "© 2026. All rights reserved.");
    }
}
