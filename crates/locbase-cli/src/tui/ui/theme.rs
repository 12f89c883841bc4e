//! Light and dark palettes for the TUI.
//!
//! Colors follow the Tailwind CSS palette for a consistent look.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Application theme with all UI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppTheme {
    // Primary colors
    pub primary: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Border colors
    pub border_active: Color,
    pub border_inactive: Color,

    // Background colors
    pub background: Color,
    pub bg_selected: Color,
    pub bg_header: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl AppTheme {
    /// Dark theme.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(96, 165, 250), // blue-400

            success: Color::Rgb(74, 222, 128), // green-400
            warning: Color::Rgb(251, 191, 36), // amber-400
            danger: Color::Rgb(248, 113, 113), // red-400

            text_primary: Color::Rgb(248, 250, 252),   // slate-50
            text_secondary: Color::Rgb(148, 163, 184), // slate-400
            text_muted: Color::Rgb(100, 116, 139),     // slate-500

            border_active: Color::Rgb(96, 165, 250),  // blue-400
            border_inactive: Color::Rgb(71, 85, 105), // slate-600

            background: Color::Rgb(15, 23, 42),  // slate-900
            bg_selected: Color::Rgb(51, 65, 85), // slate-700
            bg_header: Color::Rgb(30, 41, 59),   // slate-800
        }
    }

    /// Light theme.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(37, 99, 235), // blue-600

            success: Color::Rgb(22, 163, 74), // green-600
            warning: Color::Rgb(217, 119, 6), // amber-600
            danger: Color::Rgb(220, 38, 38),  // red-600

            text_primary: Color::Rgb(15, 23, 42),    // slate-900
            text_secondary: Color::Rgb(71, 85, 105), // slate-600
            text_muted: Color::Rgb(148, 163, 184),   // slate-400

            border_active: Color::Rgb(37, 99, 235),     // blue-600
            border_inactive: Color::Rgb(203, 213, 225), // slate-300

            background: Color::Rgb(255, 255, 255),  // white
            bg_selected: Color::Rgb(226, 232, 240), // slate-200
            bg_header: Color::Rgb(241, 245, 249),   // slate-100
        }
    }

    /// Style for the whole screen.
    #[inline]
    #[must_use]
    pub fn base_style(&self) -> Style {
        Style::default().bg(self.background).fg(self.text_primary)
    }

    /// Style for active/focused borders.
    #[inline]
    #[must_use]
    pub fn border_active_style(&self) -> Style {
        Style::default().fg(self.border_active)
    }

    /// Style for inactive borders.
    #[inline]
    #[must_use]
    pub fn border_inactive_style(&self) -> Style {
        Style::default().fg(self.border_inactive)
    }

    /// Style for selected items.
    #[inline]
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.bg_selected)
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for titles.
    #[inline]
    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the app bar.
    #[inline]
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default().bg(self.bg_header)
    }
}

/// Default border type for all blocks.
pub const BORDER_TYPE: BorderType = BorderType::Rounded;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ() {
        assert_ne!(AppTheme::dark(), AppTheme::light());
        assert_ne!(AppTheme::dark().background, AppTheme::light().background);
    }

    #[test]
    fn test_default_is_light() {
        assert_eq!(AppTheme::default(), AppTheme::light());
    }
}
