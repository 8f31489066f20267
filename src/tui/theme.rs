use ratatui::style::Color;

use crate::model::Priority;

/// Color theme for the TUI. Two palettes, toggled at runtime with `t`;
/// the choice persists to config.toml.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub selection_bg: Color,
}

impl Theme {
    pub fn light() -> Theme {
        Theme {
            background: Color::Rgb(0xFF, 0xFF, 0xFF),
            surface: Color::Rgb(0xFA, 0xF9, 0xF8),
            text: Color::Rgb(0x32, 0x31, 0x30),
            text_secondary: Color::Rgb(0x60, 0x5E, 0x5C),
            border: Color::Rgb(0xED, 0xEB, 0xE9),
            primary: Color::Rgb(0x00, 0x78, 0xD4),
            success: Color::Rgb(0x10, 0x7C, 0x10),
            warning: Color::Rgb(0xFF, 0x8C, 0x00),
            danger: Color::Rgb(0xD1, 0x34, 0x38),
            selection_bg: Color::Rgb(0xDE, 0xEC, 0xF9),
        }
    }

    pub fn dark() -> Theme {
        Theme {
            background: Color::Rgb(0x20, 0x1F, 0x1E),
            surface: Color::Rgb(0x29, 0x28, 0x27),
            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            text_secondary: Color::Rgb(0xC8, 0xC6, 0xC4),
            border: Color::Rgb(0x48, 0x46, 0x44),
            primary: Color::Rgb(0x00, 0x78, 0xD4),
            success: Color::Rgb(0x10, 0x7C, 0x10),
            warning: Color::Rgb(0xFF, 0x8C, 0x00),
            danger: Color::Rgb(0xD1, 0x34, 0x38),
            selection_bg: Color::Rgb(0x32, 0x31, 0x30),
        }
    }

    pub fn for_dark(dark: bool) -> Theme {
        if dark { Theme::dark() } else { Theme::light() }
    }

    /// Accent color for a priority: high is loud, low is calm
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.danger,
            Priority::Medium => self.warning,
            Priority::Low => self.success,
        }
    }

    /// Color for the countdown readout
    pub fn timer_color(&self, expired: bool) -> Color {
        if expired { self.success } else { self.text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_dark_selects_palette() {
        assert_eq!(Theme::for_dark(false), Theme::light());
        assert_eq!(Theme::for_dark(true), Theme::dark());
        assert_ne!(Theme::light().background, Theme::dark().background);
    }

    #[test]
    fn test_priority_colors() {
        let theme = Theme::light();
        assert_eq!(theme.priority_color(Priority::High), theme.danger);
        assert_eq!(theme.priority_color(Priority::Medium), theme.warning);
        assert_eq!(theme.priority_color(Priority::Low), theme.success);
    }

    #[test]
    fn test_accents_shared_across_palettes() {
        // status colors stay recognizable in both themes
        assert_eq!(Theme::light().primary, Theme::dark().primary);
        assert_eq!(Theme::light().danger, Theme::dark().danger);
    }

    #[test]
    fn test_timer_color_flips_when_expired() {
        let theme = Theme::dark();
        assert_eq!(theme.timer_color(false), theme.text);
        assert_eq!(theme.timer_color(true), theme.success);
    }
}
