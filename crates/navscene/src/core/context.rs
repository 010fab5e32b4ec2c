//! Logical to screen coordinate conversion
//!
//! Layout works in logical units. Routing and hit testing work in screen
//! units, which are logical units scaled by the zoom and shifted by the
//! scroll origin.

use super::{Point, Rect};

/// Zoom and scroll state for one render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneContext {
    scale: f64,
    origin: Point,
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::identity()
    }
}

impl SceneContext {
    pub fn new(scale: f64, origin: Point) -> Self {
        Self { scale, origin }
    }

    /// Scale 1, no offset
    pub fn identity() -> Self {
        Self::new(1.0, Point::default())
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Convert a logical length to screen units, truncating
    pub fn screen_dimension(&self, logical: i32) -> i32 {
        (logical as f64 * self.scale) as i32
    }

    /// Convert a screen length back to logical units, truncating
    pub fn logical_dimension(&self, screen: i32) -> i32 {
        if self.scale == 0.0 {
            return 0;
        }
        (screen as f64 / self.scale) as i32
    }

    pub fn screen_point(&self, logical: Point) -> Point {
        Point::new(
            self.origin.x.saturating_add(self.screen_dimension(logical.x)),
            self.origin.y.saturating_add(self.screen_dimension(logical.y)),
        )
    }

    pub fn screen_rect(&self, logical: Rect) -> Rect {
        let origin = self.screen_point(logical.origin());
        Rect::new(
            origin.x,
            origin.y,
            self.screen_dimension(logical.width),
            self.screen_dimension(logical.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let ctx = SceneContext::identity();
        let r = Rect::new(3, 4, 5, 6);
        assert_eq!(ctx.screen_rect(r), r);
        assert_eq!(ctx.screen_dimension(100), 100);
    }

    #[test]
    fn test_scaled_with_origin() {
        let ctx = SceneContext::new(0.5, Point::new(10, 20));
        assert_eq!(ctx.screen_dimension(100), 50);
        assert_eq!(ctx.screen_dimension(7), 3);
        assert_eq!(ctx.logical_dimension(50), 100);
        assert_eq!(ctx.screen_point(Point::new(100, 100)), Point::new(60, 70));
        assert_eq!(
            ctx.screen_rect(Rect::new(0, 0, 40, 20)),
            Rect::new(10, 20, 20, 10)
        );
    }

    #[test]
    fn test_zero_scale() {
        let ctx = SceneContext::new(0.0, Point::default());
        assert_eq!(ctx.logical_dimension(10), 0);
        assert_eq!(ctx.screen_dimension(10), 0);
    }
}
