//! Terminal color theme
//!
//! Glyph colors come from the client as 24-bit RGB and are passed through
//! unchanged. The theme only covers the chrome around the map (panels,
//! status area) and fixes up glyph colors that would vanish on a light
//! background. Auto-detects via COLORFGBG, or manual override with --light
//! or NT_LIGHT_BG=1.

use nt_client::{Glyph, OverlayKind, Rgb};
use ratatui::style::{Color, Modifier, Style};

/// Channel sum above which a foreground counts as "near white".
const NEAR_WHITE: u16 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Footers and hints
    pub text_dim: Color,
    pub border: Color,
    /// Character creation, log history
    pub border_accent: Color,
    /// Menus that act on the game (vendor, inventory, rest)
    pub border_action: Color,
    /// Key labels in front of menu entries
    pub key: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub status_text: Color,
    pub light: bool,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            border_accent: Color::Cyan,
            border_action: Color::Yellow,
            key: Color::Yellow,
            cursor_fg: Color::Yellow,
            cursor_bg: Color::DarkGray,
            status_text: Color::Gray,
            light: false,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            border_accent: Color::Blue,
            border_action: Color::Magenta,
            key: Color::Blue,
            cursor_fg: Color::Black,
            cursor_bg: Color::Gray,
            status_text: Color::DarkGray,
            light: true,
        }
    }

    /// Pick a theme from the environment.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn from_flag(light: bool) -> Self {
        if light { Self::light() } else { Self::dark() }
    }

    /// Terminal color for a glyph foreground.
    pub fn fg(&self, rgb: Rgb) -> Color {
        if self.light && channel_sum(rgb) >= NEAR_WHITE {
            return Color::Black;
        }
        rgb_color(rgb)
    }

    /// Style for one map glyph.
    pub fn glyph_style(&self, glyph: Glyph) -> Style {
        let style = Style::default().fg(self.fg(glyph.fg));
        match glyph.bg {
            Some(bg) => style.bg(rgb_color(bg)),
            None => style,
        }
    }

    /// Border color for an overlay panel.
    pub fn panel_border(&self, kind: OverlayKind) -> Color {
        match kind {
            OverlayKind::CharacterCreation | OverlayKind::LogHistory => self.border_accent,
            OverlayKind::Vendor | OverlayKind::Inventory | OverlayKind::Rest => self.border_action,
            _ => self.border,
        }
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.cursor_fg)
            .bg(self.cursor_bg)
            .add_modifier(Modifier::BOLD)
    }

    fn is_light_background() -> bool {
        if let Ok(val) = std::env::var("NT_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg" with palette indices; bright backgrounds are
        // 7 and 9..=15 (8 is bright black)
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

pub fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn channel_sum(rgb: Rgb) -> u16 {
    rgb.0 as u16 + rgb.1 as u16 + rgb.2 as u16
}
