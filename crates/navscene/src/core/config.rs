//! Scene configuration
//!
//! One plain struct holds every knob the pipeline reads: device screen size,
//! viewport extent, zoom, ASCII resolution and character set.

use super::{CharacterSet, Size};

/// Configuration for building, laying out and drawing a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Device screen in pixels; its aspect ratio shapes destination boxes
    pub screen: Size,
    /// Visible extent in logical units, used to pad the root bounds
    pub viewport: Size,
    /// Logical to screen unit scale
    pub zoom: f64,
    /// Logical units covered by one ASCII column
    pub units_per_column: i32,
    /// Logical units covered by one ASCII row
    pub units_per_row: i32,
    /// Destinations per row for the grid fallback layout
    pub grid_columns: usize,
    /// Character set for ASCII output
    pub style: CharacterSet,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            screen: Size::new(1080, 1920),
            viewport: Size::new(1024, 768),
            zoom: 1.0,
            units_per_column: 8,
            units_per_row: 16,
            grid_columns: 4,
            style: CharacterSet::default(),
        }
    }
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: CharacterSet) -> Self {
        self.style = style;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_screen(mut self, screen: Size) -> Self {
        self.screen = screen;
        self
    }

    /// Width over height of the device screen
    pub fn screen_ratio(&self) -> f64 {
        if self.screen.height == 0 {
            return 1.0;
        }
        self.screen.width as f64 / self.screen.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.zoom, 1.0);
        assert_eq!(config.style, CharacterSet::Unicode);
        assert!(config.screen_ratio() < 1.0);
    }

    #[test]
    fn test_builders() {
        let config = SceneConfig::new()
            .with_style(CharacterSet::Ascii)
            .with_zoom(2.0)
            .with_viewport(Size::new(10, 20))
            .with_screen(Size::new(0, 0));
        assert_eq!(config.style, CharacterSet::Ascii);
        assert_eq!(config.zoom, 2.0);
        assert_eq!(config.viewport, Size::new(10, 20));
        assert_eq!(config.screen_ratio(), 1.0);
    }
}
