//! Terminal color theme
//!
//! Cells are drawn in their palette colors. Terminals without 24-bit color
//! get the nearest named color instead. Light backgrounds are detected via
//! `COLORFGBG`, or forced with `TM_LIGHT_BG=1`.

use ratatui::style::Color;
use tm_core::CellKind;

/// Color theme for the terminal front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Secondary text (key hints)
    pub text_dim: Color,
    /// Default border color
    pub border: Color,
    /// Stage names and other highlights
    pub accent: Color,
    /// Shown while playback is paused
    pub paused: Color,
    /// Draw cells with exact RGB values
    pub truecolor: bool,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            accent: Color::Cyan,
            paused: Color::Yellow,
            truecolor: true,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            accent: Color::Blue,
            paused: Color::Red,
            truecolor: true,
        }
    }

    /// Same theme limited to the 16 named terminal colors
    pub fn with_truecolor(mut self, truecolor: bool) -> Self {
        self.truecolor = truecolor;
        self
    }

    /// Pick a theme from the environment
    pub fn detect() -> Self {
        let theme = if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        };
        theme.with_truecolor(Self::supports_truecolor())
    }

    /// Color of a cell kind
    pub fn cell_color(&self, kind: CellKind) -> Color {
        if self.truecolor {
            let [r, g, b] = kind.rgb();
            return Color::Rgb(r, g, b);
        }
        match kind {
            CellKind::Out => Color::Black,
            CellKind::Wall => Color::DarkGray,
            CellKind::Box => Color::Gray,
            CellKind::Floor => Color::Gray,
            CellKind::Pillar => Color::Red,
            CellKind::Pin => Color::Green,
            CellKind::Path => Color::White,
            CellKind::RoomFloor => Color::LightGreen,
            CellKind::WallDoor => Color::Magenta,
            CellKind::WallNoDoor => Color::LightRed,
            CellKind::Door => Color::Yellow,
        }
    }

    fn is_light_background() -> bool {
        if let Ok(val) = std::env::var("TM_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // "fg;bg" color indices; light backgrounds use 7 or 9..=15
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }

    fn supports_truecolor() -> bool {
        std::env::var("COLORTERM")
            .map(|v| v.eq_ignore_ascii_case("truecolor") || v.eq_ignore_ascii_case("24bit"))
            .unwrap_or(false)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_dark_theme_text_is_white() {
        let theme = Theme::dark();
        assert_eq!(theme.text, Color::White);
        assert!(theme.truecolor);
    }

    #[test]
    fn test_light_theme_text_is_black() {
        assert_eq!(Theme::light().text, Color::Black);
    }

    #[test]
    fn test_truecolor_uses_palette() {
        let theme = Theme::dark();
        assert_eq!(theme.cell_color(CellKind::Door), Color::Rgb(0xFF, 0xFF, 0x00));
        assert_eq!(theme.cell_color(CellKind::RoomFloor), Color::Rgb(0xCC, 0xFF, 0xCC));
    }

    #[test]
    fn test_named_colors_without_truecolor() {
        let theme = Theme::dark().with_truecolor(false);
        for kind in CellKind::iter() {
            assert!(!matches!(theme.cell_color(kind), Color::Rgb(..)), "{kind}");
        }
        assert_eq!(theme.cell_color(CellKind::Pillar), Color::Red);
    }
}
