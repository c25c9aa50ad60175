//! Theme colors, with optional overrides from the `[theme]` config table

use ratatui::style::Color;

use crate::config::ThemeConfig;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,      // Active borders, key hints
    pub success: Color,     // Success feedback
    pub danger: Color,      // Error / not-found feedback
    pub warning: Color,     // Status messages
    pub highlight: Color,   // Freshly written slot
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Empty slots, hints
    pub bg_selected: Color, // Focused input background
    pub inactive: Color,    // Inactive borders
    pub header: Color,      // Section headers
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired
        Self {
            accent: Color::Rgb(137, 180, 250),
            success: Color::Rgb(166, 218, 149),
            danger: Color::Rgb(243, 139, 168),
            warning: Color::Rgb(250, 179, 135),
            highlight: Color::Rgb(249, 226, 175),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(203, 166, 247),
        }
    }
}

impl Theme {
    /// Default theme with any valid overrides applied
    pub fn load(overrides: &ThemeConfig) -> Self {
        let mut theme = Self::default();

        let slots = [
            (&overrides.accent, &mut theme.accent, "accent"),
            (&overrides.success, &mut theme.success, "success"),
            (&overrides.danger, &mut theme.danger, "danger"),
            (&overrides.highlight, &mut theme.highlight, "highlight"),
            (&overrides.text, &mut theme.text, "text"),
        ];
        for (value, target, name) in slots {
            let Some(value) = value else { continue };
            match Self::parse_hex_color(value) {
                Some(color) => *target = color,
                None => tracing::warn!("Ignoring invalid theme color {} = {:?}", name, value),
            }
        }

        theme
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');

        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#FFC107"), Some(Color::Rgb(255, 193, 7)));
        assert_eq!(Theme::parse_hex_color("f00"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(Theme::parse_hex_color("#12345"), None);
        assert_eq!(Theme::parse_hex_color("#zzzzzz"), None);
        assert_eq!(Theme::parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_overrides_apply_and_invalid_ones_are_ignored() {
        let overrides = ThemeConfig {
            accent: Some("#000000".to_string()),
            danger: Some("not a color".to_string()),
            ..Default::default()
        };
        let theme = Theme::load(&overrides);
        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        assert_eq!(theme.danger, Theme::default().danger);
    }
}
