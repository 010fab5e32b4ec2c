//! Scene rendering
//!
//! [`emit_scene`] turns a routed scene into [`DrawCommand`]s for any
//! [`RenderTarget`]. [`AsciiRenderer`] is the built-in target that rasterises
//! those commands onto an [`AsciiCanvas`].

use tracing::{debug, trace};
use unicode_width::UnicodeWidthChar;

use super::graph::{NodeKind, PositionedNode, SceneGraph};
use super::routing::{sample_cubic, ActionGeometry, ActionPath};
use crate::core::{
    AsciiCanvas, BoxGlyphs, CharacterSet, DestinationKind, DrawCommand, DrawMode, LineGlyphs,
    Point, Rect, RenderTarget, SceneConfig, SceneContext,
};

/// Samples per curve when rasterising; dense enough to leave no gaps
const RASTER_CURVE_SAMPLES: usize = 64;

/// Largest canvas the renderer allocates; wider scenes get coarser cells
pub const MAX_CANVAS_COLUMNS: i32 = 1000;
pub const MAX_CANVAS_ROWS: i32 = 500;

/// Send every destination box and routed action to `target`
///
/// Nodes are emitted first, then each action's path followed by its arrow.
pub fn emit_scene(
    graph: &SceneGraph,
    actions: &[ActionGeometry],
    context: &SceneContext,
    target: &mut dyn RenderTarget,
) {
    for (_, node) in graph.nodes() {
        let NodeKind::Destination(kind) = node.kind else {
            continue;
        };
        target.draw(&DrawCommand::Node {
            id: node.id().to_string(),
            label: node.label.clone(),
            rect: context.screen_rect(node.rect()),
            nested: kind == DestinationKind::Navigation,
        });
    }

    for geometry in actions {
        let command = match &geometry.path {
            ActionPath::Curve(points) => DrawCommand::Curve {
                action: geometry.action.clone(),
                points: *points,
                mode: geometry.mode,
            },
            ActionPath::SelfLoop(points) => DrawCommand::Polyline {
                action: geometry.action.clone(),
                points: points.clone(),
                mode: geometry.mode,
            },
            ActionPath::Stub(points) => DrawCommand::Polyline {
                action: geometry.action.clone(),
                points: points.to_vec(),
                mode: geometry.mode,
            },
        };
        target.draw(&command);
        target.draw(&DrawCommand::Arrow {
            rect: geometry.arrow.rect,
            direction: geometry.arrow.direction,
            mode: geometry.mode,
        });
    }
}

/// Rasterises draw commands onto a character grid
///
/// Screen coordinates are mapped to cells relative to `origin`; anything
/// off the canvas is clipped.
pub struct AsciiRenderer {
    canvas: AsciiCanvas,
    style: CharacterSet,
    origin: Point,
    cell_width: i32,
    cell_height: i32,
    columns: i32,
    rows: i32,
}

impl AsciiRenderer {
    /// Create a renderer covering `bounds` (screen units)
    ///
    /// Cells grow past the configured resolution when `bounds` would need
    /// more than [`MAX_CANVAS_COLUMNS`] by [`MAX_CANVAS_ROWS`] cells.
    pub fn new(config: &SceneConfig, context: &SceneContext, bounds: Rect) -> Self {
        let base_width = context.screen_dimension(config.units_per_column).max(1);
        let base_height = context.screen_dimension(config.units_per_row).max(1);
        let (origin, cell_width, cell_height) = if bounds.is_empty() {
            (Point::default(), base_width, base_height)
        } else {
            (
                bounds.origin(),
                base_width.max(ceil_div(bounds.width, MAX_CANVAS_COLUMNS - 1)),
                base_height.max(ceil_div(bounds.height, MAX_CANVAS_ROWS - 1)),
            )
        };
        if cell_width > base_width || cell_height > base_height {
            debug!(cell_width, cell_height, "Coarsened cells for a large scene");
        }
        let (columns, rows) = if bounds.is_empty() {
            (0, 0)
        } else {
            (bounds.width / cell_width + 1, bounds.height / cell_height + 1)
        };
        Self {
            canvas: AsciiCanvas::new(columns as usize, rows as usize),
            style: config.style,
            origin,
            cell_width,
            cell_height,
            columns,
            rows,
        }
    }

    /// Cell under a screen point, if it lies on the canvas
    fn cell(&self, point: Point) -> Option<(usize, usize)> {
        let dx = point.x as i64 - self.origin.x as i64;
        let dy = point.y as i64 - self.origin.y as i64;
        if dx < 0 || dy < 0 {
            return None;
        }
        let (column, row) = (dx / self.cell_width as i64, dy / self.cell_height as i64);
        if column >= self.columns as i64 || row >= self.rows as i64 {
            return None;
        }
        Some((column as usize, row as usize))
    }

    fn draw_node(&mut self, rect: Rect, label: &str, nested: bool) {
        let Some((x, y)) = self.cell(rect.origin()) else {
            return;
        };
        let width = (rect.width / self.cell_width).clamp(3, self.columns.max(3)) as usize;
        let height = (rect.height / self.cell_height).clamp(3, self.rows.max(3)) as usize;
        let chars = BoxGlyphs::for_style(self.style, nested);

        let (right, bottom) = (x + width - 1, y + height - 1);
        self.canvas
            .draw_horizontal_line(x + 1, y, width - 2, chars.horizontal);
        self.canvas
            .draw_horizontal_line(x + 1, bottom, width - 2, chars.horizontal);
        self.canvas
            .draw_vertical_line(x, y + 1, height - 2, chars.vertical);
        self.canvas
            .draw_vertical_line(right, y + 1, height - 2, chars.vertical);

        self.canvas.set_char(x, y, chars.top_left);
        self.canvas.set_char(right, y, chars.top_right);
        self.canvas.set_char(x, bottom, chars.bottom_left);
        self.canvas.set_char(right, bottom, chars.bottom_right);

        let label = fit_label(label, width - 2);
        self.canvas.draw_text_centered(x + width / 2, y + height / 2, &label);
    }

    fn draw_curve(&mut self, points: &[Point; 4], glyphs: &LineGlyphs) {
        for point in sample_cubic(points, RASTER_CURVE_SAMPLES) {
            if let Some((x, y)) = self.cell(point) {
                self.canvas.set_char_if_blank(x, y, glyphs.curve);
            }
        }
    }

    fn draw_polyline(&mut self, points: &[Point], glyphs: &LineGlyphs) {
        let cells: Vec<(i64, i64)> = points
            .iter()
            .filter_map(|&p| self.cell(p))
            .map(|(x, y)| (x as i64, y as i64))
            .collect();
        if cells.len() != points.len() {
            trace!("Polyline clipped at canvas edge");
        }

        for segment in cells.windows(2) {
            let (from, to) = (segment[0], segment[1]);
            if from.1 == to.1 {
                let (start, end) = (from.0.min(to.0), from.0.max(to.0));
                for x in start..=end {
                    self.canvas
                        .set_char_if_blank(x as usize, from.1 as usize, glyphs.horizontal);
                }
            } else if from.0 == to.0 {
                let (start, end) = (from.1.min(to.1), from.1.max(to.1));
                for y in start..=end {
                    self.canvas
                        .set_char_if_blank(from.0 as usize, y as usize, glyphs.vertical);
                }
            } else {
                self.draw_diagonal(from, to, glyphs.curve);
            }
        }

        // Corners overwrite the straight glyphs laid down above
        for window in cells.windows(3) {
            let (prev, at, next) = (window[0], window[1], window[2]);
            if let Some(corner) = corner_glyph(glyphs, prev, at, next) {
                self.canvas.set_char(at.0 as usize, at.1 as usize, corner);
            }
        }
    }

    fn draw_diagonal(&mut self, from: (i64, i64), to: (i64, i64), c: char) {
        let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs());
        for i in 0..=steps {
            let x = from.0 + (to.0 - from.0) * i / steps;
            let y = from.1 + (to.1 - from.1) * i / steps;
            self.canvas.set_char_if_blank(x as usize, y as usize, c);
        }
    }

    /// Render the canvas to a string
    pub fn finish(self) -> String {
        self.canvas.to_string()
    }
}

impl RenderTarget for AsciiRenderer {
    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Node {
                rect,
                label,
                nested,
                ..
            } => self.draw_node(*rect, label, *nested),
            DrawCommand::Curve { points, mode, .. } => {
                let glyphs = LineGlyphs::for_style(self.style, *mode);
                self.draw_curve(points, &glyphs);
            }
            DrawCommand::Polyline { points, mode, .. } => {
                let glyphs = LineGlyphs::for_style(self.style, *mode);
                self.draw_polyline(points, &glyphs);
            }
            DrawCommand::Arrow {
                rect,
                direction,
                mode,
            } => {
                let glyphs = LineGlyphs::for_style(self.style, *mode);
                if let Some((x, y)) = self.cell(rect.center()) {
                    self.canvas.set_char(x, y, glyphs.arrow(*direction));
                }
            }
        }
    }
}

/// Render a routed scene to a string
pub fn render_ascii(
    graph: &SceneGraph,
    actions: &[ActionGeometry],
    config: &SceneConfig,
    context: &SceneContext,
    bounds: Rect,
) -> String {
    let mut renderer = AsciiRenderer::new(config, context, bounds);
    emit_scene(graph, actions, context, &mut renderer);
    let output = renderer.finish();
    debug!(lines = output.lines().count(), "Rendered scene");
    output
}

fn ceil_div(value: i32, divisor: i32) -> i32 {
    (value as i64 + divisor as i64 - 1).div_euclid(divisor as i64) as i32
}

/// Corner joining the segments `prev -> at` and `at -> next`
fn corner_glyph(
    glyphs: &LineGlyphs,
    prev: (i64, i64),
    at: (i64, i64),
    next: (i64, i64),
) -> Option<char> {
    // Horizontal and vertical neighbour of the corner cell
    let (horizontal, vertical) = if prev.1 == at.1 && next.0 == at.0 {
        (prev.0 - at.0, next.1 - at.1)
    } else if prev.0 == at.0 && next.1 == at.1 {
        (next.0 - at.0, prev.1 - at.1)
    } else {
        return None;
    };
    match (horizontal.signum(), vertical.signum()) {
        (1, 1) => Some(glyphs.corner_top_left),
        (-1, 1) => Some(glyphs.corner_top_right),
        (1, -1) => Some(glyphs.corner_bottom_left),
        (-1, -1) => Some(glyphs.corner_bottom_right),
        _ => None,
    }
}

/// Truncate `label` to at most `columns` display columns
fn fit_label(label: &str, columns: usize) -> String {
    let mut used = 0;
    let mut fitted = String::new();
    for c in label.chars() {
        let width = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + width > columns {
            break;
        }
        used += width;
        fitted.push(c);
    }
    fitted
}

/// Returns true for glyphs only drawn for selected or hovered actions
pub fn is_heavy_glyph(c: char) -> bool {
    let heavy = LineGlyphs::for_style(CharacterSet::Unicode, DrawMode::Selected);
    let ascii_heavy = LineGlyphs::for_style(CharacterSet::Ascii, DrawMode::Selected);
    [heavy, ascii_heavy].iter().any(|g| {
        [
            g.horizontal,
            g.vertical,
            g.curve,
            g.corner_top_left,
            g.corner_top_right,
            g.corner_bottom_left,
            g.corner_bottom_right,
        ]
        .contains(&c)
            && c != '+'
    })
}
