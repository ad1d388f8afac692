//! Built-in color themes and their flattening into style variables.
//!
//! Two themes ship with the application: Mica White (light, translucent
//! surfaces) and Night OLED (pure black). A theme resolves to a fixed
//! [`ThemeColors`] palette; [`css_variables`] turns a palette into the
//! `--color-*` / `--syntax-*` variables the web view applies in bulk.

use serde::{Deserialize, Serialize};

/// Identifier of a built-in theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    MicaWhite,
    NightOled,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::MicaWhite, Theme::NightOled];

    pub fn id(self) -> &'static str {
        match self {
            Self::MicaWhite => "mica-white",
            Self::NightOled => "night-oled",
        }
    }

    /// Parses a theme identifier as stored on disk.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// The other variant: light becomes dark and vice versa.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::MicaWhite => Self::NightOled,
            Self::NightOled => Self::MicaWhite,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::NightOled
    }

    /// Class name placed on the document body, e.g. `theme-night-oled`.
    pub fn body_class(self) -> String {
        format!("theme-{}", self.id())
    }

    pub fn palette(self) -> &'static ThemeColors {
        palette(self)
    }
}

/// Colors for the ten markdown token kinds the editor highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyntaxColors {
    pub text: &'static str,
    pub comment: &'static str,
    pub keyword: &'static str,
    pub string: &'static str,
    pub number: &'static str,
    pub operator: &'static str,
    pub link: &'static str,
    pub header: &'static str,
    pub code: &'static str,
    pub quote: &'static str,
}

/// Complete palette for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub background: &'static str,
    pub background_secondary: &'static str,
    pub background_tertiary: &'static str,

    pub foreground: &'static str,
    pub foreground_secondary: &'static str,
    pub foreground_tertiary: &'static str,

    pub accent: &'static str,
    /// Low-opacity accent used for tinted backgrounds.
    pub accent_secondary: &'static str,

    pub border: &'static str,
    pub border_light: &'static str,

    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub info: &'static str,

    pub selection: &'static str,
    pub hover: &'static str,
    pub active: &'static str,
    pub shadow: &'static str,

    pub syntax: SyntaxColors,
}

pub const MICA_WHITE: ThemeColors = ThemeColors {
    background: "rgba(252, 252, 252, 0.85)",
    background_secondary: "rgba(248, 248, 248, 0.95)",
    background_tertiary: "rgba(244, 244, 244, 0.90)",

    foreground: "#1a1a1a",
    foreground_secondary: "#4a4a4a",
    foreground_tertiary: "#8a8a8a",

    accent: "#007AFF",
    accent_secondary: "rgba(0, 122, 255, 0.1)",

    border: "rgba(0, 0, 0, 0.08)",
    border_light: "rgba(0, 0, 0, 0.04)",

    success: "#34C759",
    warning: "#FF9500",
    error: "#FF3B30",
    info: "#5AC8FA",

    selection: "rgba(0, 122, 255, 0.15)",
    hover: "rgba(0, 0, 0, 0.04)",
    active: "rgba(0, 0, 0, 0.08)",
    shadow: "rgba(0, 0, 0, 0.02)",

    syntax: SyntaxColors {
        text: "#1a1a1a",
        comment: "#8e8e93",
        keyword: "#ad3da4",
        string: "#d12f1b",
        number: "#272ad8",
        operator: "#ad3da4",
        link: "#0066cc",
        header: "#1a1a1a",
        code: "#af52de",
        quote: "#8e8e93",
    },
};

pub const NIGHT_OLED: ThemeColors = ThemeColors {
    background: "#000000",
    background_secondary: "#0a0a0a",
    background_tertiary: "#141414",

    foreground: "#ffffff",
    foreground_secondary: "#e5e5e7",
    foreground_tertiary: "#8e8e93",

    accent: "#ff9f0a",
    accent_secondary: "rgba(255, 159, 10, 0.15)",

    border: "rgba(255, 255, 255, 0.12)",
    border_light: "rgba(255, 255, 255, 0.06)",

    success: "#30d158",
    warning: "#ff9f0a",
    error: "#ff453a",
    info: "#64d2ff",

    selection: "rgba(255, 159, 10, 0.20)",
    hover: "rgba(255, 255, 255, 0.06)",
    active: "rgba(255, 255, 255, 0.12)",
    shadow: "rgba(0, 0, 0, 0.5)",

    syntax: SyntaxColors {
        text: "#ffffff",
        comment: "#8e8e93",
        keyword: "#ff7ab2",
        string: "#fc6a5d",
        number: "#d0bf69",
        operator: "#ff7ab2",
        link: "#6699ff",
        header: "#ffffff",
        code: "#dabaff",
        quote: "#8e8e93",
    },
};

/// Returns the palette for `theme`. Total over the closed set of themes.
pub fn palette(theme: Theme) -> &'static ThemeColors {
    match theme {
        Theme::MicaWhite => &MICA_WHITE,
        Theme::NightOled => &NIGHT_OLED,
    }
}

/// Flattens a palette into `(variable name, color)` pairs in a stable order.
pub fn css_variables(colors: &ThemeColors) -> Vec<(&'static str, &'static str)> {
    let s = &colors.syntax;
    vec![
        ("--color-background", colors.background),
        ("--color-background-secondary", colors.background_secondary),
        ("--color-background-tertiary", colors.background_tertiary),
        ("--color-foreground", colors.foreground),
        ("--color-foreground-secondary", colors.foreground_secondary),
        ("--color-foreground-tertiary", colors.foreground_tertiary),
        ("--color-accent", colors.accent),
        ("--color-accent-secondary", colors.accent_secondary),
        ("--color-border", colors.border),
        ("--color-border-light", colors.border_light),
        ("--color-success", colors.success),
        ("--color-warning", colors.warning),
        ("--color-error", colors.error),
        ("--color-info", colors.info),
        ("--color-selection", colors.selection),
        ("--color-hover", colors.hover),
        ("--color-active", colors.active),
        ("--color-shadow", colors.shadow),
        ("--syntax-text", s.text),
        ("--syntax-comment", s.comment),
        ("--syntax-keyword", s.keyword),
        ("--syntax-string", s.string),
        ("--syntax-number", s.number),
        ("--syntax-operator", s.operator),
        ("--syntax-link", s.link),
        ("--syntax-header", s.header),
        ("--syntax-code", s.code),
        ("--syntax-quote", s.quote),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_toggle_round_trips() {
        for theme in Theme::ALL {
            assert_eq!(theme.toggle().toggle(), theme);
            assert_ne!(theme.toggle(), theme);
        }
        assert!(Theme::NightOled.is_dark());
        assert!(!Theme::MicaWhite.is_dark());
    }

    #[test]
    fn test_ids_match_serde_and_parse_back() {
        for theme in Theme::ALL {
            let json = serde_json::to_string(&theme).unwrap();
            assert_eq!(json, format!("\"{}\"", theme.id()));
            assert_eq!(Theme::from_id(theme.id()), Some(theme));
        }
        assert_eq!(Theme::from_id("solarized"), None);
        assert_eq!(Theme::NightOled.body_class(), "theme-night-oled");
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(palette(Theme::MicaWhite), palette(Theme::NightOled));
        assert_eq!(Theme::NightOled.palette().background, "#000000");
        assert_eq!(Theme::MicaWhite.palette().accent, "#007AFF");
    }

    #[test]
    fn test_css_variables_cover_every_token_once() {
        let vars = css_variables(palette(Theme::NightOled));
        assert_eq!(vars.len(), 28);
        let names: HashSet<_> = vars.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), vars.len());
        assert_eq!(vars.iter().filter(|(n, _)| n.starts_with("--syntax-")).count(), 10);
        assert!(vars.contains(&("--color-accent", "#ff9f0a")));
        assert!(vars.contains(&("--syntax-quote", "#8e8e93")));
    }
}
