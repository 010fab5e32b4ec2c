//! Character grid the ASCII renderer draws a scene onto

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Character grid for scene rendering
///
/// Cells are addressed in columns and rows; the grid grows on demand.
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<char>>,
}

impl AsciiCanvas {
    /// Create a new canvas with the specified dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let grid = vec![vec![' '; width.max(1)]; height.max(1)];
        Self {
            width,
            height,
            grid,
        }
    }

    /// Ensure the canvas is at least the specified size, expanding if needed
    pub fn ensure_size(&mut self, min_width: usize, min_height: usize) {
        if min_width > self.width {
            for row in &mut self.grid {
                row.resize(min_width, ' ');
            }
            self.width = min_width;
        }
        if min_height > self.height {
            let extra_rows = min_height - self.height;
            let width = self.width.max(1);
            self.grid.extend((0..extra_rows).map(|_| vec![' '; width]));
            self.height = min_height;
        }
    }

    /// Set a character at the specified position
    pub fn set_char(&mut self, x: usize, y: usize, c: char) {
        self.ensure_size(x + 1, y + 1);
        self.grid[y][x] = c;
    }

    /// Set a character only if the cell is still blank
    ///
    /// Returns true if the character was written.
    pub fn set_char_if_blank(&mut self, x: usize, y: usize, c: char) -> bool {
        if self.get_char(x, y) != ' ' {
            return false;
        }
        self.set_char(x, y, c);
        true
    }

    /// Get the character at the specified position
    pub fn get_char(&self, x: usize, y: usize) -> char {
        if y < self.height && x < self.width {
            self.grid[y][x]
        } else {
            ' '
        }
    }

    /// Draw text at the specified position (left-aligned)
    ///
    /// Wide characters occupy two columns; the second one is left blank.
    pub fn draw_text(&mut self, x: usize, y: usize, text: &str) {
        let mut column = x;
        for c in text.chars() {
            self.set_char(column, y, c);
            column += UnicodeWidthChar::width(c).unwrap_or(0).max(1);
        }
    }

    /// Draw text centered at the specified x position
    pub fn draw_text_centered(&mut self, center_x: usize, y: usize, text: &str) {
        let width = UnicodeWidthStr::width(text);
        let start_x = center_x.saturating_sub(width / 2);
        self.draw_text(start_x, y, text);
    }

    /// Draw a horizontal line
    pub fn draw_horizontal_line(&mut self, x: usize, y: usize, length: usize, c: char) {
        for i in 0..length {
            self.set_char(x + i, y, c);
        }
    }

    /// Draw a vertical line
    pub fn draw_vertical_line(&mut self, x: usize, y: usize, length: usize, c: char) {
        for i in 0..length {
            self.set_char(x, y + i, c);
        }
    }
}

impl std::fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rows: Vec<String> = self
            .grid
            .iter()
            .map(|row| {
                let s: String = row.iter().collect();
                s.trim_end().to_string()
            })
            .collect();

        while rows.first().is_some_and(|row| row.is_empty()) {
            rows.remove(0);
        }
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        if rows.is_empty() {
            return Ok(());
        }

        let min_indent = rows
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| row.chars().take_while(|c| *c == ' ').count())
            .min()
            .unwrap_or(0);

        if min_indent > 0 {
            for row in &mut rows {
                *row = row.chars().skip(min_indent).collect();
            }
        }

        write!(f, "{}", rows.join("\n"))
    }
}
