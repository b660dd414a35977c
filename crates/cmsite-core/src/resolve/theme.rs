use crate::model::ColorTheme;

use super::fields::{self, Object};

/// Mid-gray that some CMS themes set as the page background. Text on it
/// has poor contrast, so it is remapped to white.
pub const SENTINEL_BACKGROUND: &str = "#6B7280";

const CONTRAST_BACKGROUND: &str = "#FFFFFF";

/// Palette used for any colour the CMS leaves out.
pub const DEFAULT_THEME: DefaultTheme = DefaultTheme {
    primary_color: "#6366F1",
    secondary_color: "#10B981",
    accent_color: "#8B5CF6",
    neutral_color: "#6B7280",
    background_color: "#FFFFFF",
    text_color: "#1F2937",
};

/// Static form of [`ColorTheme`] for the defaults.
#[derive(Debug, Clone, Copy)]
pub struct DefaultTheme {
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub accent_color: &'static str,
    pub neutral_color: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
}

impl DefaultTheme {
    pub fn to_theme(self) -> ColorTheme {
        ColorTheme {
            primary_color: self.primary_color.to_owned(),
            secondary_color: self.secondary_color.to_owned(),
            accent_color: self.accent_color.to_owned(),
            neutral_color: self.neutral_color.to_owned(),
            background_color: self.background_color.to_owned(),
            text_color: self.text_color.to_owned(),
        }
    }
}

pub(super) fn resolve(raw: Option<&Object>) -> ColorTheme {
    let pick = |key: &str, default: &str| {
        raw.and_then(|obj| fields::text(obj, key))
            .map_or_else(|| default.to_owned(), |c| c.trim().to_owned())
    };

    let background = pick("background_color", DEFAULT_THEME.background_color);
    let background_color = if background.eq_ignore_ascii_case(SENTINEL_BACKGROUND) {
        CONTRAST_BACKGROUND.to_owned()
    } else {
        background
    };

    ColorTheme {
        primary_color: pick("primary_color", DEFAULT_THEME.primary_color),
        secondary_color: pick("secondary_color", DEFAULT_THEME.secondary_color),
        accent_color: pick("accent_color", DEFAULT_THEME.accent_color),
        neutral_color: pick("neutral_color", DEFAULT_THEME.neutral_color),
        background_color,
        text_color: pick("text_color", DEFAULT_THEME.text_color),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn theme(value: serde_json::Value) -> ColorTheme {
        resolve(value.as_object())
    }

    #[test]
    fn missing_theme_uses_defaults() {
        assert_eq!(resolve(None), DEFAULT_THEME.to_theme());
        assert_eq!(theme(json!({})), DEFAULT_THEME.to_theme());
    }

    #[test]
    fn blank_colours_use_defaults() {
        let t = theme(json!({ "primary_color": "", "text_color": "   " }));
        assert_eq!(t.primary_color, DEFAULT_THEME.primary_color);
        assert_eq!(t.text_color, DEFAULT_THEME.text_color);
    }

    #[test]
    fn sentinel_background_becomes_white() {
        assert_eq!(theme(json!({ "background_color": "#6B7280" })).background_color, "#FFFFFF");
        assert_eq!(theme(json!({ "background_color": "#6b7280" })).background_color, "#FFFFFF");
    }

    #[test]
    fn sentinel_is_only_remapped_for_background() {
        let t = theme(json!({ "neutral_color": "#6B7280", "background_color": "#F9FAFB" }));
        assert_eq!(t.neutral_color, "#6B7280");
        assert_eq!(t.background_color, "#F9FAFB");
    }

    #[test]
    fn explicit_colours_are_kept() {
        let t = theme(json!({
            "primary_color": "#000001",
            "secondary_color": "#000002",
            "accent_color": "#000003",
            "neutral_color": "#000004",
            "background_color": "#000005",
            "text_color": "#000006"
        }));
        assert_eq!(t.primary_color, "#000001");
        assert_eq!(t.secondary_color, "#000002");
        assert_eq!(t.accent_color, "#000003");
        assert_eq!(t.neutral_color, "#000004");
        assert_eq!(t.background_color, "#000005");
        assert_eq!(t.text_color, "#000006");
    }
}
