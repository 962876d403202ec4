//! Fixed color pairs used by the header, menu and pages.

use ratatui::style::{Color, Modifier, Style};

/// Named color pairs, foreground on black unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPair {
    /// Red on black.
    Red,
    /// Green on black.
    Green,
    /// Yellow on black.
    Yellow,
    /// Blue on black.
    Blue,
    /// Magenta on black.
    Magenta,
    /// Cyan on black.
    Cyan,
    /// White on red, for the privilege banner.
    Alert,
}

/// The palette handed to every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pairs: [Style; 7],
}

impl Palette {
    /// Builds the fixed palette.
    pub fn new() -> Self {
        let on_black = |fg| Style::default().fg(fg).bg(Color::Black);
        Self {
            pairs: [
                on_black(Color::Red),
                on_black(Color::Green),
                on_black(Color::Yellow),
                on_black(Color::Blue),
                on_black(Color::Magenta),
                on_black(Color::Cyan),
                Style::default().fg(Color::White).bg(Color::Red),
            ],
        }
    }

    /// Style for a color pair.
    pub fn pair(&self, pair: ColorPair) -> Style {
        let idx = match pair {
            ColorPair::Red => 0,
            ColorPair::Green => 1,
            ColorPair::Yellow => 2,
            ColorPair::Blue => 3,
            ColorPair::Magenta => 4,
            ColorPair::Cyan => 5,
            ColorPair::Alert => 6,
        };
        self.pairs[idx]
    }

    /// Bold attribute.
    pub fn bold() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Reverse-video attribute.
    pub fn reverse() -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
