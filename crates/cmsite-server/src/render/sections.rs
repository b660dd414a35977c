//! Section renderers.
//!
//! Each function renders the props of one section and nothing else.

use maud::{Markup, PreEscaped, html};

use cmsite_core::model::{
    CallToAction, CardsSection, CtaAction, CtaSection, FaqSection, Header, HowItWorksSection,
    ImageRef, ItemsSection, Link, PricingSection, Testimonial, TestimonialsSection, VideoSection,
};
use cmsite_core::route::DEFAULT_FEATURES_SLUG;

use super::icon::IconResolver;

pub(super) fn navbar(title: &str, logo: Option<&ImageRef>) -> Markup {
    html! {
        nav class="navbar" {
            a class="brand" href="/" {
                @if let Some(logo) = logo {
                    img src=(logo.url) alt=(logo.title.as_deref().unwrap_or(title));
                }
                span { (title) }
            }
            a class="nav-link" href={ "/features/" (DEFAULT_FEATURES_SLUG) } { "Features" }
            button class="nav-login" type="button" data-action="login" { "Sign in" }
        }
    }
}

fn cta_button(cta: &CallToAction, class: &str) -> Markup {
    match &cta.action {
        CtaAction::Navigate(url) => html! { a class=(class) href=(url) { (cta.label) } },
        CtaAction::InPage => html! {
            button class=(class) type="button" data-action="login" { (cta.label) }
        },
    }
}

fn link_button(link: &Link, class: &str) -> Markup {
    html! { a class=(class) href=(link.url) { (link.text) } }
}

/// Percent-encode the characters that could end a quoted CSS `url()`.
fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\'' => out.push_str("%27"),
            '"' => out.push_str("%22"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '\\' => out.push_str("%5C"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

pub(super) fn header(header: &Header) -> Markup {
    let background = header
        .background_image
        .as_ref()
        .map(|img| format!("background-image: url('{}')", css_url(&img.url)));
    html! {
        header class="hero" style=[background] {
            div class="hero-copy" {
                @if let Some(subtitle) = &header.subtitle {
                    p class="hero-subtitle" { (subtitle) }
                }
                @if let Some(title) = &header.title {
                    h1 { (title) }
                }
                @if let Some(description) = &header.description {
                    p class="hero-lead" { (description.lead) }
                    @for paragraph in &description.paragraphs {
                        p { (paragraph) }
                    }
                }
                div class="hero-actions" {
                    @if let Some(cta) = &header.primary_cta {
                        (cta_button(cta, "btn btn-primary"))
                    }
                    @if let Some(cta) = &header.secondary_cta {
                        (cta_button(cta, "btn btn-secondary"))
                    }
                }
            }
            @if let Some(img) = &header.section_image {
                img class="hero-image" src=(img.url) alt=(img.title.as_deref().unwrap_or(""));
            }
        }
    }
}

fn heading(heading: Option<&str>, description: Option<&str>) -> Markup {
    html! {
        @if let Some(h) = heading {
            h2 { (h) }
        }
        @if let Some(d) = description {
            p class="section-description" { (d) }
        }
    }
}

/// Features and benefits share the icon-grid layout.
pub(super) fn icon_grid(section: &ItemsSection, icons: &dyn IconResolver) -> Markup {
    html! {
        (heading(section.heading.as_deref(), section.description.as_deref()))
        ul class="icon-grid" {
            @for item in &section.items {
                li {
                    @if let Some(icon) = &item.icon {
                        (icons.resolve(icon))
                    }
                    h3 { (item.title) }
                    @if let Some(d) = &item.description {
                        p { (d) }
                    }
                }
            }
        }
    }
}

pub(super) fn how_it_works(section: &HowItWorksSection) -> Markup {
    html! {
        (heading(section.heading.as_deref(), section.description.as_deref()))
        ol class="steps" {
            @for (n, step) in section.steps.iter().enumerate() {
                li {
                    span class="step-number" { (n + 1) }
                    h3 { (step.title) }
                    @if let Some(d) = &step.description {
                        p { (d) }
                    }
                }
            }
        }
    }
}

pub(super) fn video(section: &VideoSection) -> Markup {
    let video = &section.video;
    html! {
        (heading(section.heading.as_deref(), section.description.as_deref()))
        video class="featured-video" controls preload="metadata"
            poster=[video.thumbnail.as_ref().map(|t| t.url.as_str())]
            title=[video.title.as_deref()] {
            source src=(video.url);
        }
    }
}

pub(super) fn pricing(section: &PricingSection) -> Markup {
    html! {
        (heading(Some(section.heading.as_str()), section.description.as_deref()))
        @if let Some(widget) = &section.widget_code {
            div class="pricing-widget" { (PreEscaped(widget)) }
        }
        @if let Some(cta) = &section.cta {
            (link_button(cta, "btn btn-primary"))
        }
    }
}

pub(super) fn cards(section: &CardsSection, icons: &dyn IconResolver) -> Markup {
    html! {
        (heading(section.heading.as_deref(), None))
        div class="cards" {
            @for card in &section.cards {
                article class="card" id=[card.id.as_ref().map(|id| format!("card-{id}"))] {
                    @if let Some(img) = &card.image {
                        img src=(img.url) alt=(img.title.as_deref().unwrap_or(&card.title)) loading="lazy";
                    } @else {
                        (icons.resolve(&card.icon))
                    }
                    h3 { (card.title) }
                    @if let Some(d) = &card.description {
                        p { (d) }
                    }
                    @if !card.features.is_empty() {
                        ul class="card-features" {
                            @for feature in &card.features {
                                li { (feature) }
                            }
                        }
                    }
                    @if let Some(button) = &card.button {
                        (link_button(button, "btn btn-outline"))
                    }
                }
            }
        }
    }
}

pub(super) fn testimonials(section: &TestimonialsSection) -> Markup {
    html! {
        (heading(section.heading.as_deref(), None))
        div class="testimonials" {
            @for t in &section.testimonials {
                figure class="testimonial" {
                    @if let Some(rating) = t.rating {
                        div class="rating" data-rating=(rating) aria-label={ (rating) " out of 5" } {}
                    }
                    blockquote { (t.quote) }
                    figcaption {
                        @if let Some(avatar) = &t.avatar {
                            img class="avatar" src=(avatar.url) alt="" loading="lazy";
                        }
                        @if let Some(name) = &t.name {
                            strong { (name) }
                        }
                        @if let Some(role) = role_line(t) {
                            span class="role" { (role) }
                        }
                    }
                }
            }
        }
    }
}

/// "Role, Company" with whichever parts are present.
fn role_line(t: &Testimonial) -> Option<String> {
    let parts: Vec<&str> = [t.role.as_deref(), t.company.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

pub(super) fn faq(section: &FaqSection) -> Markup {
    html! {
        (heading(section.heading.as_deref(), None))
        div class="faq" {
            @for item in &section.items {
                details {
                    summary { (item.question) }
                    p { (item.answer) }
                }
            }
        }
    }
}

pub(super) fn cta(section: &CtaSection) -> Markup {
    html! {
        div class="cta-band" {
            @if let Some(head) = &section.head {
                h2 { (head) }
            }
            @if let Some(intro) = &section.introduction {
                p { (intro) }
            }
            div class="cta-actions" {
                @if let Some(primary) = &section.primary {
                    (link_button(primary, "btn btn-primary"))
                }
                @if let Some(secondary) = &section.secondary {
                    (link_button(secondary, "btn btn-secondary"))
                }
            }
        }
    }
}
