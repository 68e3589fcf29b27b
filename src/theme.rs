//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! `ThemeVariant` is the binary display mode the reader toggles, and
//! `StyleMap` resolves role names to concrete styles for the active one.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;
use std::str::FromStr;

// ============================================================================
// Theme Variant
// ============================================================================

/// The two display modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    Dark,
    #[default]
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Label for the toggle control: it names the mode a press switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "☀ Light Mode",
            Self::Light => "☾ Dark Mode",
        }
    }
}

/// Parse a `#rrggbb` category color. Falls back to gray for anything else.
pub fn category_color(css: &str) -> Color {
    Color::from_str(css.trim()).unwrap_or(Color::Gray)
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Cards --
    pub card_title: Style,
    pub card_selected: Style,
    pub card_meta: Style,
    pub card_preview: Style,
    pub badge_text: Style,

    // -- Filter bar --
    pub filter_active: Style,
    pub filter_inactive: Style,

    // -- Search box --
    pub search_text: Style,
    pub search_placeholder: Style,

    // -- Detail overlay --
    pub detail_title: Style,
    pub detail_body: Style,
    pub detail_meta: Style,
    pub detail_link: Style,

    // -- Messages --
    pub placeholder: Style,
    pub error: Style,

    // -- Chrome --
    pub background: Style,
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub help_heading: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            card_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            card_meta: Style::default().fg(Color::Gray),
            card_preview: Style::default().fg(Color::Gray),
            badge_text: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            filter_active: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            filter_inactive: Style::default().fg(Color::Gray),

            search_text: Style::default().fg(Color::White),
            search_placeholder: Style::default().fg(Color::DarkGray),

            detail_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default().fg(Color::White),
            detail_meta: Style::default().fg(Color::DarkGray),
            detail_link: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),

            placeholder: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),

            background: Style::default().bg(Color::Black).fg(Color::White),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Cyan),
            help_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }

    fn light() -> Self {
        Self {
            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            card_meta: Style::default().fg(Color::DarkGray),
            card_preview: Style::default().fg(Color::DarkGray),
            badge_text: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            filter_active: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            filter_inactive: Style::default().fg(Color::DarkGray),

            search_text: Style::default().fg(Color::Black),
            search_placeholder: Style::default().fg(Color::Gray),

            detail_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default().fg(Color::Black),
            detail_meta: Style::default().fg(Color::DarkGray),
            detail_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            placeholder: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),

            background: Style::default().bg(Color::White).fg(Color::Black),
            status_bar: Style::default().bg(Color::Gray).fg(Color::Black),
            panel_border: Style::default().fg(Color::Gray),
            panel_border_focused: Style::default().fg(Color::Blue),
            help_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 20] = [
    "card_title",
    "card_selected",
    "card_meta",
    "card_preview",
    "badge_text",
    "filter_active",
    "filter_inactive",
    "search_text",
    "search_placeholder",
    "detail_title",
    "detail_body",
    "detail_meta",
    "detail_link",
    "placeholder",
    "error",
    "background",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "help_heading",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 20] = [
            p.card_title,
            p.card_selected,
            p.card_meta,
            p.card_preview,
            p.badge_text,
            p.filter_active,
            p.filter_inactive,
            p.search_text,
            p.search_placeholder,
            p.detail_title,
            p.detail_body,
            p.detail_meta,
            p.detail_link,
            p.placeholder,
            p.error,
            p.background,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.help_heading,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name. Unknown roles get `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::from_palette(&ThemeVariant::default().palette())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_twice_is_identity() {
        for v in [ThemeVariant::Dark, ThemeVariant::Light] {
            assert_eq!(v.toggled().toggled(), v);
            assert_ne!(v.toggled(), v);
        }
    }

    #[test]
    fn toggle_label_names_the_other_mode() {
        assert_eq!(ThemeVariant::Dark.toggle_label(), "☀ Light Mode");
        assert_eq!(ThemeVariant::Light.toggle_label(), "☾ Dark Mode");
    }

    #[test]
    fn dark_flag_round_trip() {
        assert_eq!(ThemeVariant::from_dark_flag(true), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::from_dark_flag(false), ThemeVariant::Light);
        assert!(ThemeVariant::Dark.is_dark());
    }

    #[test]
    fn variant_from_str_name() {
        assert_eq!(
            ThemeVariant::from_str_name("Dark"),
            Some(ThemeVariant::Dark)
        );
        assert_eq!(
            ThemeVariant::from_str_name("LIGHT"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(ThemeVariant::from_str_name("sepia"), None);
    }

    #[test]
    fn category_color_parses_hex() {
        assert_eq!(category_color("#f97316"), Color::Rgb(0xf9, 0x73, 0x16));
        assert_eq!(category_color("not-a-color-at-all"), Color::Gray);
    }

    #[test]
    fn palettes_differ() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.background, light.background);
        assert_ne!(dark.card_selected, light.card_selected);
    }

    #[test]
    fn style_map_has_all_roles() {
        let sm = StyleMap::from_palette(&ThemeVariant::Dark.palette());
        assert_eq!(sm.map.len(), ROLE_NAMES.len());
        for name in ROLE_NAMES {
            assert!(sm.map.contains_key(name), "Role '{}' missing", name);
        }
    }

    #[test]
    fn style_map_unknown_role_is_default() {
        let sm = StyleMap::default();
        assert_eq!(sm.resolve("nonexistent_role"), Style::default());
    }
}
