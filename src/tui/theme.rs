//! Centralized theme and color scheme for the TUI.
//!
//! This module provides consistent styling across the inventory browser.

use ratatui::prelude::*;
use std::sync::RwLock;

/// Color scheme for the TUI application.
/// Provides semantic colors for different UI elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    // UI element colors
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub background_alt: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    /// Foreground for text on accent-colored badges
    pub badge_fg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Dark theme (default)
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            background_alt: Color::Rgb(30, 30, 40),
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::Rgb(60, 60, 80),
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            badge_fg: Color::Black,
        }
    }

    /// Light theme
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(0, 100, 150),
            accent: Color::Rgb(180, 140, 0),
            muted: Color::Rgb(150, 150, 150),
            border: Color::Rgb(180, 180, 180),
            border_focused: Color::Rgb(0, 100, 150),
            background_alt: Color::Rgb(240, 240, 245),
            text: Color::Rgb(30, 30, 30),
            text_muted: Color::Rgb(100, 100, 100),
            selection: Color::Rgb(200, 220, 240),
            success: Color::Rgb(0, 128, 0),
            warning: Color::Rgb(180, 140, 0),
            error: Color::Rgb(200, 0, 0),
            badge_fg: Color::Rgb(30, 30, 30),
        }
    }

    /// High contrast theme (accessibility)
    pub const fn high_contrast() -> Self {
        Self {
            primary: Color::LightCyan,
            accent: Color::LightYellow,
            muted: Color::Gray,
            border: Color::White,
            border_focused: Color::LightCyan,
            background_alt: Color::Rgb(20, 20, 20),
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::Rgb(50, 50, 80),
            success: Color::LightGreen,
            warning: Color::LightYellow,
            error: Color::LightRed,
            badge_fg: Color::Black,
        }
    }

    /// Every color replaced by the terminal default, for `--no-color`.
    pub const fn monochrome() -> Self {
        Self {
            primary: Color::Reset,
            accent: Color::Reset,
            muted: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
            background_alt: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            selection: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            error: Color::Reset,
            badge_fg: Color::Reset,
        }
    }
}

/// Global theme instance (runtime switchable)
static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Theme configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            colors: ColorScheme::dark(),
            name: "dark",
        }
    }

    pub const fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    pub const fn high_contrast() -> Self {
        Self {
            colors: ColorScheme::high_contrast(),
            name: "high-contrast",
        }
    }

    pub const fn monochrome() -> Self {
        Self {
            colors: ColorScheme::monochrome(),
            name: "monochrome",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "high-contrast" | "highcontrast" | "hc" => Self::high_contrast(),
            "monochrome" | "mono" => Self::monochrome(),
            _ => Self::dark(),
        }
    }

    /// Get the next theme in the rotation. Monochrome stays monochrome.
    #[must_use]
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::high_contrast(),
            "monochrome" => Self::monochrome(),
            _ => Self::dark(),
        }
    }
}

// A poisoned lock still holds a usable theme.

/// Get the current theme name
pub fn current_theme_name() -> &'static str {
    THEME.read().map_or_else(|e| e.into_inner().name, |t| t.name)
}

/// Set the current theme
pub fn set_theme(theme: Theme) {
    match THEME.write() {
        Ok(mut guard) => *guard = theme,
        Err(e) => *e.into_inner() = theme,
    }
}

/// Toggle to the next theme in rotation (dark -> light -> high-contrast -> dark)
pub fn toggle_theme() -> &'static str {
    let next = Theme::from_name(current_theme_name()).next();
    set_theme(next);
    next.name
}

/// Convenience function to get current colors
pub fn colors() -> ColorScheme {
    THEME.read().map_or_else(|e| e.into_inner().colors, |t| t.colors)
}

// ============================================================================
// Style Helpers
// ============================================================================

/// Common style presets for consistent UI elements
pub struct Styles;

impl Styles {
    /// Header title style
    pub fn header_title() -> Style {
        Style::default().fg(colors().primary).bold()
    }

    /// Normal text style
    pub fn text() -> Style {
        Style::default().fg(colors().text)
    }

    /// Muted/secondary text style
    pub fn text_muted() -> Style {
        Style::default().fg(colors().text_muted)
    }

    /// Label text style
    pub fn label() -> Style {
        Style::default().fg(colors().muted)
    }

    /// Value text style (for data values)
    pub fn value() -> Style {
        Style::default().fg(colors().text).bold()
    }

    /// Selection style (for the cursor row)
    pub fn selected() -> Style {
        Style::default()
            .bg(colors().selection)
            .fg(colors().text)
            .bold()
    }

    /// Border style (unfocused)
    pub fn border() -> Style {
        Style::default().fg(colors().border)
    }

    /// Border style (focused)
    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    /// Status bar background style
    pub fn status_bar() -> Style {
        Style::default().bg(colors().background_alt)
    }

    /// Keyboard shortcut style
    pub fn shortcut_key() -> Style {
        Style::default().fg(colors().accent)
    }

    /// Shortcut description style
    pub fn shortcut_desc() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn success() -> Style {
        Style::default().fg(colors().success)
    }

    pub fn warning() -> Style {
        Style::default().fg(colors().warning)
    }

    pub fn error() -> Style {
        Style::default().fg(colors().error)
    }
}

/// Render a filter badge showing a category's current value
pub fn filter_badge(label: &str, value: &str, active: bool) -> Vec<Span<'static>> {
    let scheme = colors();
    let value_style = if active {
        Style::default().fg(scheme.badge_fg).bg(scheme.accent).bold()
    } else {
        Style::default().fg(scheme.text_muted)
    };
    vec![
        Span::styled(format!("{label}: "), Style::default().fg(scheme.text_muted)),
        Span::styled(format!(" {value} "), value_style),
    ]
}

/// Footer key hints of the inventory browser
pub fn footer_hints(searching: bool) -> Vec<(&'static str, &'static str)> {
    if searching {
        return vec![("Enter", "apply"), ("Esc", "clear"), ("Backspace", "delete")];
    }
    vec![
        ("↑↓/jk", "navigate"),
        ("n/p", "page"),
        ("+/-", "page size"),
        ("s/S", "sort"),
        ("/", "search"),
        ("f/F", "filters"),
        ("Space", "select"),
        ("a", "select page"),
        ("Enter", "expand"),
        ("c", "clear"),
        ("u", "url"),
        ("T", "theme"),
        ("q", "quit"),
    ]
}

/// Render footer hints as spans
pub fn render_footer_hints(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{key}]"), Styles::shortcut_key()));
        spans.push(Span::styled((*desc).to_string(), Styles::shortcut_desc()));
    }

    spans
}
