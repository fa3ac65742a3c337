//! Greyscale theme for simq

use ratatui::style::{Color, Modifier, Style};

/// The greyscale color palette
pub struct Theme;

impl Theme {
    // ─────────────────────────────────────────────────────────────────────
    // Core greyscale palette - from brightest to darkest
    // ─────────────────────────────────────────────────────────────────────

    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const GREY_50: Color = Color::Rgb(250, 250, 250);
    pub const GREY_100: Color = Color::Rgb(220, 220, 220);
    pub const GREY_300: Color = Color::Rgb(140, 140, 140);
    pub const GREY_400: Color = Color::Rgb(100, 100, 100);
    pub const GREY_500: Color = Color::Rgb(70, 70, 70);
    pub const GREY_700: Color = Color::Rgb(35, 35, 35);
    pub const GREY_800: Color = Color::Rgb(28, 28, 28);
    pub const GREY_900: Color = Color::Rgb(18, 18, 18);

    /// Background color alias
    pub const BG: Color = Self::GREY_900;

    // ─────────────────────────────────────────────────────────────────────
    // Accent colors
    // ─────────────────────────────────────────────────────────────────────

    pub const GREEN: Color = Color::Rgb(100, 200, 100);
    pub const RED: Color = Color::Rgb(200, 100, 100);

    pub const LOGO: &'static str = "s i m q";
    pub const TAGLINE: &'static str = "have I been asked before?";

    // ─────────────────────────────────────────────────────────────────────
    // Pre-built styles for common UI elements
    // ─────────────────────────────────────────────────────────────────────

    /// Primary text style
    pub fn text() -> Style {
        Style::default().fg(Self::GREY_100)
    }

    /// Secondary/muted text
    pub fn text_muted() -> Style {
        Style::default().fg(Self::GREY_300)
    }

    /// Dimmed text for less important items
    pub fn text_dim() -> Style {
        Style::default().fg(Self::GREY_400)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::GREY_500)
    }

    /// Active border (focused panel)
    pub fn border_active() -> Style {
        Style::default().fg(Self::GREY_300)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::GREY_50)
            .add_modifier(Modifier::BOLD)
    }

    /// Keybinding highlight
    pub fn key() -> Style {
        Style::default()
            .fg(Self::GREY_900)
            .bg(Self::GREY_500)
    }

    pub const BULLET_FILLED: char = '●';
    pub const BULLET_EMPTY: char = '○';
    pub const DOT_SEPARATOR: char = '·';
    pub const KEY_PROMPT: char = '▸';

    /// Spinner frames - braille pattern (smooth)
    pub const SPINNER_BRAILLE: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
}

/// Dot gauge (●●●○○) of `value` relative to `max`.
///
/// Scores have no fixed scale, so results are gauged against the best score
/// in the same result set.
pub fn dot_gauge(value: f64, max: f64, max_dots: usize) -> String {
    let fraction = if max > 0.0 && value.is_finite() {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * max_dots as f64).round() as usize;

    (0..max_dots)
        .map(|i| {
            if i < filled {
                Theme::BULLET_FILLED
            } else {
                Theme::BULLET_EMPTY
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_gauge() {
        assert_eq!(dot_gauge(10.0, 10.0, 5), "●●●●●");
        assert_eq!(dot_gauge(5.0, 10.0, 4), "●●○○");
        assert_eq!(dot_gauge(0.0, 10.0, 3), "○○○");
    }

    #[test]
    fn test_dot_gauge_degenerate_max() {
        assert_eq!(dot_gauge(3.0, 0.0, 3), "○○○");
        assert_eq!(dot_gauge(f64::NAN, 1.0, 2), "○○");
    }
}
