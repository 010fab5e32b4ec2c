//! Action routing
//!
//! Turns laid-out nodes into drawable action geometry in screen units.
//! Regular actions become cubic curves that always leave the source on its
//! right side and enter the destination on its left side. Self actions
//! become a five point loop under the node, and global/exit actions become
//! a short stub ending in an arrow.

use serde::Serialize;
use tracing::{debug, span, trace, warn, Level};

use super::graph::{Action, PositionedNode, SceneGraph};
use super::metrics::*;
use crate::core::{ActionKind, ArrowDirection, Direction, DrawMode, Point, Rect, SceneContext};

/// Number of straight segments used to approximate a curve for hit testing
const CURVE_SAMPLES: usize = 32;

/// Control points of a regular action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurvePoints {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    pub p4: Point,
    /// Side of the source the curve leaves through
    pub source_side: Direction,
    /// Side of the destination the curve enters through
    pub destination_side: Direction,
}

impl CurvePoints {
    pub fn points(&self) -> [Point; 4] {
        [self.p1, self.p2, self.p3, self.p4]
    }
}

/// Loop points of a self action
///
/// `x[1] == x[2]` and `x[3] == x[4]`, so the loop is made of horizontal and
/// vertical segments only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelfActionPoints {
    pub x: [i32; 5],
    pub y: [i32; 5],
}

impl SelfActionPoints {
    pub fn points(&self) -> Vec<Point> {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| Point::new(x, y))
            .collect()
    }
}

/// Arrow head placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrowGeometry {
    pub rect: Rect,
    pub direction: ArrowDirection,
}

/// Path an action is drawn along
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", content = "points", rename_all = "snake_case")]
pub enum ActionPath {
    /// Cubic curve through four control points
    Curve([Point; 4]),
    /// Orthogonal five point loop
    SelfLoop(Vec<Point>),
    /// Straight line leading into the arrow of a global or exit action
    Stub([Point; 2]),
}

impl ActionPath {
    /// Polyline that approximates the path
    pub fn polyline(&self) -> Vec<Point> {
        match self {
            ActionPath::Curve(points) => sample_cubic(points, CURVE_SAMPLES),
            ActionPath::SelfLoop(points) => points.clone(),
            ActionPath::Stub(points) => points.to_vec(),
        }
    }
}

/// Everything needed to draw and hit test one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionGeometry {
    pub action: String,
    pub kind: ActionKind,
    pub mode: DrawMode,
    pub path: ActionPath,
    pub arrow: ArrowGeometry,
}

impl ActionGeometry {
    /// Returns true if `point` lies within `tolerance` of the path or on the arrow
    pub fn hit(&self, point: Point, tolerance: i32) -> bool {
        if self.arrow.rect.grow(tolerance, tolerance).contains_point(point) {
            return true;
        }
        let tolerance = tolerance as f64;
        self.path
            .polyline()
            .windows(2)
            .any(|segment| distance_to_segment(point, segment[0], segment[1]) <= tolerance)
    }
}

/// Computes action geometry for a laid-out scene
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeRouter {
    context: SceneContext,
}

impl EdgeRouter {
    pub fn new(context: SceneContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    fn dim(&self, logical: i32) -> i32 {
        self.context.screen_dimension(logical)
    }

    /// Curve from the right of `source` to the left of `destination`
    ///
    /// Both rectangles are in screen units. The sides are fixed, so the
    /// curve shape does not depend on where the nodes are relative to each
    /// other.
    pub fn curve_points(&self, source: Rect, destination: Rect) -> CurvePoints {
        let source_side = Direction::Right;
        let destination_side = Direction::Left;
        let scale = self.dim(CURVE_CONTROL_DISTANCE);

        let p1 = source.connection_point(source_side);
        let p2 = p1.step(source_side, scale);
        let p4 = destination.connection_point(destination_side).step(
            destination_side,
            self.dim(ACTION_ARROW_PARALLEL + ACTION_HORIZONTAL_PADDING),
        );
        let p3 = p4.step(destination_side, scale);

        CurvePoints {
            p1,
            p2,
            p3,
            p4,
            source_side,
            destination_side,
        }
    }

    /// Loop leaving the right side of `rect` and returning below it
    pub fn self_action_points(&self, rect: Rect) -> SelfActionPoints {
        let x0 = rect.right();
        let y0 = rect.y.saturating_add(rect.height / 2);
        let x1 = x0.saturating_add(self.dim(SELF_ACTION_LENGTH_1));
        let y2 = y0
            .saturating_add(rect.height / 2)
            .saturating_add(self.dim(SELF_ACTION_LENGTH_2));
        let x3 = x1.saturating_sub(self.dim(SELF_ACTION_LENGTH_3));
        let y4 = y2.saturating_sub(self.dim(SELF_ACTION_LENGTH_4));

        SelfActionPoints {
            x: [x0, x1, x1, x3, x3],
            y: [y0, y0, y2, y2, y4],
        }
    }

    /// Rightward arrow at the end of a curve, centred on the destination
    pub fn curve_arrow(&self, curve: &CurvePoints, destination: Rect) -> ArrowGeometry {
        let height = self.dim(ACTION_ARROW_PERPENDICULAR);
        ArrowGeometry {
            rect: Rect::new(
                curve.p4.x,
                destination.center().y.saturating_sub(height / 2),
                self.dim(ACTION_ARROW_PARALLEL),
                height,
            ),
            direction: ArrowDirection::Right,
        }
    }

    /// Upward arrow on the last segment of a self loop, pointing at the node
    pub fn self_arrow(&self, rect: Rect) -> ArrowGeometry {
        let width = self.dim(ACTION_ARROW_PERPENDICULAR);
        let x = rect
            .right()
            .saturating_add(self.dim(SELF_ACTION_LENGTH_1 - SELF_ACTION_LENGTH_3))
            .saturating_sub(width / 2);
        let y = rect
            .connection_point(Direction::Bottom)
            .y
            .saturating_add(self.dim(ACTION_VERTICAL_PADDING));
        ArrowGeometry {
            rect: Rect::new(
                x,
                y,
                width,
                self.dim(ACTION_ARROW_PARALLEL),
            ),
            direction: ArrowDirection::Up,
        }
    }

    /// Line and arrow filling a global or exit marker rectangle
    pub fn stub(&self, marker: Rect) -> (ActionPath, ArrowGeometry) {
        let arrow_width = self.dim(ACTION_ARROW_PARALLEL);
        let mid = marker.center().y;
        let line_end = marker.right().saturating_sub(arrow_width);
        let path = ActionPath::Stub([Point::new(marker.x, mid), Point::new(line_end, mid)]);
        let arrow = ArrowGeometry {
            rect: Rect::new(line_end, marker.y, arrow_width, marker.height),
            direction: ArrowDirection::Right,
        };
        (path, arrow)
    }

    /// Geometry for a single action, or `None` if it cannot be resolved
    pub fn route_action(&self, graph: &SceneGraph, action: &Action) -> Option<ActionGeometry> {
        let (path, arrow) = match action.kind {
            ActionKind::Global | ActionKind::Exit => {
                let marker = graph.get(&action.id).filter(|n| n.kind.is_marker())?;
                self.stub(self.context.screen_rect(marker.rect()))
            }
            _ if action.is_self() || action.source == action.destination => {
                let node = self.context.screen_rect(graph.get(&action.source)?.rect());
                let points = self.self_action_points(node);
                (ActionPath::SelfLoop(points.points()), self.self_arrow(node))
            }
            _ => {
                let source = self.context.screen_rect(graph.get(&action.source)?.rect());
                let destination = self.context.screen_rect(graph.get(&action.destination)?.rect());
                let curve = self.curve_points(source, destination);
                let arrow = self.curve_arrow(&curve, destination);
                (ActionPath::Curve(curve.points()), arrow)
            }
        };

        Some(ActionGeometry {
            action: action.id.clone(),
            kind: action.kind,
            mode: action.mode,
            path,
            arrow,
        })
    }

    /// Geometry for every resolvable action, in action order
    pub fn route(&self, graph: &SceneGraph) -> Vec<ActionGeometry> {
        let route_span = span!(
            Level::INFO,
            "route",
            actions = graph.action_count(),
            scale = self.context.scale()
        );
        let _enter = route_span.enter();

        let mut routed = Vec::with_capacity(graph.action_count());
        for action in graph.actions() {
            match self.route_action(graph, action) {
                Some(geometry) => {
                    trace!(action = %action.id, kind = %action.kind, "Routed action");
                    routed.push(geometry);
                }
                None => warn!(
                    action = %action.id,
                    source = %action.source,
                    destination = %action.destination,
                    "Skipping unresolved action"
                ),
            }
        }

        debug!(routed = routed.len(), "Routing completed");
        routed
    }
}

/// Topmost action hit by `point`; later actions are drawn over earlier ones
pub fn action_at(actions: &[ActionGeometry], point: Point, tolerance: i32) -> Option<&ActionGeometry> {
    actions.iter().rev().find(|geometry| geometry.hit(point, tolerance))
}

/// Evaluate a cubic bezier at `samples + 1` evenly spaced parameters
pub fn sample_cubic(points: &[Point; 4], samples: usize) -> Vec<Point> {
    let samples = samples.max(1);
    let [p0, p1, p2, p3] = (*points).map(|p| (p.x as f64, p.y as f64));
    (0..=samples)
        .map(|i| {
            let t = i as f64 / samples as f64;
            let u = 1.0 - t;
            let a = u * u * u;
            let b = 3.0 * u * u * t;
            let c = 3.0 * u * t * t;
            let d = t * t * t;
            Point::new(
                (a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0).round() as i32,
                (a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1).round() as i32,
            )
        })
        .collect()
}

/// Euclidean distance from `point` to the segment `a`..`b`
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let (px, py) = (point.x as f64, point.y as f64);
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (dx, dy) = (b.x as f64 - ax, b.y as f64 - ay);
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}
