//! Glyph tables for ASCII scene rendering

use super::{ArrowDirection, CharacterSet, DrawMode};

/// Characters used to draw actions
#[derive(Debug, Clone, Copy)]
pub struct LineGlyphs {
    pub horizontal: char,
    pub vertical: char,
    pub corner_top_left: char,     // ┌ (goes RIGHT and DOWN)
    pub corner_top_right: char,    // ┐ (goes LEFT and DOWN)
    pub corner_bottom_left: char,  // └ (goes RIGHT and UP)
    pub corner_bottom_right: char, // ┘ (goes LEFT and UP)
    pub curve: char,
    pub arrow_up: char,
    pub arrow_down: char,
    pub arrow_left: char,
    pub arrow_right: char,
}

impl LineGlyphs {
    /// Glyphs for the given style and draw mode
    pub fn for_style(style: CharacterSet, mode: DrawMode) -> Self {
        match (style.is_ascii(), mode.is_emphasized()) {
            (true, false) => Self::ascii(),
            (true, true) => Self::ascii_heavy(),
            (false, false) => Self::unicode(),
            (false, true) => Self::unicode_heavy(),
        }
    }

    pub fn ascii() -> Self {
        Self {
            horizontal: '-',
            vertical: '|',
            corner_top_left: '+',
            corner_top_right: '+',
            corner_bottom_left: '+',
            corner_bottom_right: '+',
            curve: '.',
            arrow_up: '^',
            arrow_down: 'v',
            arrow_left: '<',
            arrow_right: '>',
        }
    }

    pub fn ascii_heavy() -> Self {
        Self {
            horizontal: '=',
            vertical: '#',
            curve: '*',
            ..Self::ascii()
        }
    }

    pub fn unicode() -> Self {
        Self {
            horizontal: '─',
            vertical: '│',
            corner_top_left: '┌',
            corner_top_right: '┐',
            corner_bottom_left: '└',
            corner_bottom_right: '┘',
            curve: '·',
            arrow_up: '▲',
            arrow_down: '▼',
            arrow_left: '◀',
            arrow_right: '▶',
        }
    }

    pub fn unicode_heavy() -> Self {
        Self {
            horizontal: '━',
            vertical: '┃',
            corner_top_left: '┏',
            corner_top_right: '┓',
            corner_bottom_left: '┗',
            corner_bottom_right: '┛',
            curve: '•',
            ..Self::unicode()
        }
    }

    pub fn arrow(&self, direction: ArrowDirection) -> char {
        match direction {
            ArrowDirection::Up => self.arrow_up,
            ArrowDirection::Down => self.arrow_down,
            ArrowDirection::Left => self.arrow_left,
            ArrowDirection::Right => self.arrow_right,
        }
    }
}

/// Characters used to draw node boxes
#[derive(Debug, Clone, Copy)]
pub struct BoxGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BoxGlyphs {
    /// Plain boxes for screens, rounded boxes for nested graphs
    pub fn for_style(style: CharacterSet, rounded: bool) -> Self {
        if style.is_ascii() {
            return Self {
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                horizontal: '-',
                vertical: '|',
            };
        }
        if rounded {
            Self {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            }
        } else {
            Self {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            }
        }
    }
}
