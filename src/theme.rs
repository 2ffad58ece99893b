//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette — semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header / nav --
    pub nav_brand: Style,
    pub nav_link: Style,

    // -- Card list --
    pub card_title: Style,
    pub card_meta: Style,
    pub card_website: Style,
    pub card_selected: Style,
    pub card_tag: Style,

    // -- Filter chips --
    pub chip_normal: Style,
    pub chip_active: Style,
    pub chip_focused: Style,
    pub show_all: Style,
    pub filter_heading: Style,

    // -- Chrome --
    pub cta_bar: Style,
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    /// Dark palette.
    fn dark() -> Self {
        Self {
            nav_brand: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            nav_link: Style::default(),

            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_meta: Style::default().fg(Color::DarkGray),
            card_website: Style::default().fg(Color::Blue),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            card_tag: Style::default().fg(Color::Green),

            chip_normal: Style::default(),
            chip_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            chip_focused: Style::default().bg(Color::DarkGray).fg(Color::White),
            show_all: Style::default().fg(Color::Yellow),
            filter_heading: Style::default().add_modifier(Modifier::BOLD),

            cta_bar: Style::default()
                .bg(Color::Green)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    /// Light palette — adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            nav_brand: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            nav_link: Style::default().fg(Color::Black),

            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_meta: Style::default().fg(Color::DarkGray),
            card_website: Style::default().fg(Color::Blue),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            card_tag: Style::default().fg(Color::Magenta),

            chip_normal: Style::default().fg(Color::Black),
            chip_active: Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            chip_focused: Style::default().bg(Color::Blue).fg(Color::White),
            show_all: Style::default().fg(Color::Magenta),
            filter_heading: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            cta_bar: Style::default()
                .bg(Color::Magenta)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map — string-keyed lookup
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"chip_active"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 16] = [
    "nav_brand",
    "nav_link",
    "card_title",
    "card_meta",
    "card_website",
    "card_selected",
    "card_tag",
    "chip_normal",
    "chip_active",
    "chip_focused",
    "show_all",
    "filter_heading",
    "cta_bar",
    "status_bar",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 16] = [
            p.nav_brand,
            p.nav_link,
            p.card_title,
            p.card_meta,
            p.card_website,
            p.card_selected,
            p.card_tag,
            p.chip_normal,
            p.chip_active,
            p.chip_focused,
            p.show_all,
            p.filter_heading,
            p.cta_bar,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_palette_chip_active_is_inverted() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(
            palette.chip_active,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        );
    }

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.card_selected, light.card_selected);
        assert_ne!(dark.chip_active, light.chip_active);
    }

    #[test]
    fn variant_from_str_name() {
        assert_eq!(
            ThemeVariant::from_str_name("dark"),
            Some(ThemeVariant::Dark)
        );
        assert_eq!(
            ThemeVariant::from_str_name("Light"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
    }

    #[test]
    fn variant_cycle_round_trips() {
        assert_eq!(ThemeVariant::Dark.next().next(), ThemeVariant::Dark);
    }

    #[test]
    fn style_map_resolves_known_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);

        assert_eq!(sm.resolve("chip_active"), palette.chip_active);
        assert_eq!(sm.resolve("status_bar"), palette.status_bar);
        assert_eq!(sm.resolve("cta_bar"), palette.cta_bar);
    }

    #[test]
    fn style_map_returns_default_for_unknown() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);
        assert_eq!(sm.resolve("nonexistent_role"), Style::default());
    }

    #[test]
    fn style_map_has_all_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);
        assert_eq!(sm.map.len(), ROLE_NAMES.len());
    }
}
