//! Terminal colorization for rendered scenes
//!
//! Applies ANSI escape codes to scene glyphs using crossterm.

use crossterm::style::{Color, Stylize};
use navscene::scene::is_heavy_glyph;

/// Colorize a rendered scene using ANSI escape codes
///
/// - Box-drawing corners and edges: Cyan
/// - Arrow heads: Yellow
/// - Selected or hovered actions: Magenta
/// - Curve dots: Dark grey
/// - Labels: Default (terminal color)
pub fn colorize_output(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        for c in line.chars() {
            let colored = match c {
                c if is_heavy_glyph(c) => format!("{}", c.to_string().with(Color::Magenta)),
                '┌' | '┐' | '└' | '┘' | '─' | '│' | '╭' | '╮' | '╯' | '╰' => {
                    format!("{}", c.to_string().with(Color::Cyan))
                }
                '+' | '-' | '|' => {
                    // Hyphens inside labels stay uncolored
                    if is_box_char_context(line, c) {
                        format!("{}", c.to_string().with(Color::Cyan))
                    } else {
                        c.to_string()
                    }
                }
                '>' | 'v' | '^' | '<' | '▶' | '▼' | '▲' | '◀' => {
                    format!("{}", c.to_string().with(Color::Yellow))
                }
                '·' | '.' => format!("{}", c.to_string().with(Color::DarkGrey)),
                _ => c.to_string(),
            };
            result.push_str(&colored);
        }
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Check if a character is likely part of box drawing vs text content
fn is_box_char_context(line: &str, c: char) -> bool {
    match c {
        '+' => line.contains("--") || line.contains("+-") || line.contains("-+"),
        '-' => line.contains("---") || line.contains("+--") || line.contains("--+"),
        '|' => {
            let trimmed = line.trim_start();
            trimmed.starts_with('|') || line.contains("| ") || line.contains(" |")
        }
        _ => false,
    }
}
