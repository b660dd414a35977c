//! Icon lookup by name.
//!
//! The CMS names icons after react-icons components (`FiZap`, `FaUser`,
//! `MdEmail`, ...). The two-letter prefix picks the icon family.
//! Renderers depend on [`IconResolver`] and never inspect names themselves.

use maud::{Markup, html};

/// Turns an icon name into markup.
pub trait IconResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Markup;
}

/// Icon families recognised by prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFamily {
    Feather,
    FontAwesome,
    Material,
    Heroicons,
    Bootstrap,
}

impl IconFamily {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.get(..2)? {
            "Fi" => Some(Self::Feather),
            "Fa" => Some(Self::FontAwesome),
            "Md" => Some(Self::Material),
            "Hi" => Some(Self::Heroicons),
            "Bs" => Some(Self::Bootstrap),
            _ => None,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Feather => "icon-fi",
            Self::FontAwesome => "icon-fa",
            Self::Material => "icon-md",
            Self::Heroicons => "icon-hi",
            Self::Bootstrap => "icon-bs",
        }
    }
}

/// Renders icons as classed placeholders that a client-side icon font or
/// sprite sheet fills in. Unknown prefixes fall back to a generic glyph.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrefixIcons;

impl IconResolver for PrefixIcons {
    fn resolve(&self, name: &str) -> Markup {
        let class = IconFamily::from_name(name).map_or("icon-generic", IconFamily::class);
        html! {
            span class={ "icon " (class) } data-icon=(name) aria-hidden="true" {}
        }
    }
}
