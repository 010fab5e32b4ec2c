//! Core type definitions for scene processing
//!
//! This module contains the fundamental types used throughout navscene:
//! points and rectangles in logical units, connection directions, action
//! kinds and draw modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character set for ASCII rendering output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterSet {
    /// Pure ASCII characters only: - | + > ^ .
    Ascii,
    /// Unicode box-drawing characters: ─ │ ┌ ▶ ▲ ·
    #[default]
    Unicode,
}

impl CharacterSet {
    /// Returns true if this character set uses only ASCII
    pub fn is_ascii(&self) -> bool {
        matches!(self, CharacterSet::Ascii)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterSet::Ascii => write!(f, "ascii"),
            CharacterSet::Unicode => write!(f, "unicode"),
        }
    }
}

/// A point in logical (or screen) units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this point by `distance` along `direction`
    pub fn step(self, direction: Direction, distance: i32) -> Self {
        Self {
            x: self
                .x
                .saturating_add(distance.saturating_mul(direction.delta_x())),
            y: self
                .y
                .saturating_add(distance.saturating_mul(direction.delta_y())),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle
///
/// A rectangle with negative width or height is empty. [`Rect::EMPTY`] is the
/// sentinel returned when there is nothing to enclose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// The "no content" sentinel
    pub const EMPTY: Rect = Rect::new(0, 0, -1, -1);

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// Returns true for negative-size rectangles
    pub fn is_empty(&self) -> bool {
        self.width < 0 || self.height < 0
    }

    /// Smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }

    /// Grow by `h` on the left and right and `v` on the top and bottom
    pub fn grow(&self, h: i32, v: i32) -> Rect {
        Rect::new(
            self.x.saturating_sub(h),
            self.y.saturating_sub(v),
            self.width.saturating_add(h.saturating_mul(2)),
            self.height.saturating_add(v.saturating_mul(2)),
        )
    }

    /// Returns true if `other` lies entirely inside `self` (edges inclusive)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !self.is_empty()
            && self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn contains_point(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.x
            && point.y >= self.y
            && point.x <= self.right()
            && point.y <= self.bottom()
    }

    /// Midpoint of the given side
    pub fn connection_point(&self, side: Direction) -> Point {
        // (1 + delta) * extent stays within i64 for any i32 extent
        let offset = |delta: i32, extent: i32| {
            let half = (1 + delta as i64) * extent as i64 / 2;
            half.clamp(i32::MIN as i64, i32::MAX as i64) as i32
        };
        Point::new(
            self.x.saturating_add(offset(side.delta_x(), self.width)),
            self.y.saturating_add(offset(side.delta_y(), self.height)),
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {} {}x{}]",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Side of a rectangle an action leaves or enters through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

/// (delta_x, delta_y, opposite), indexed by discriminant
const DIRECTION_TABLE: [(i32, i32, Direction); 4] = [
    (-1, 0, Direction::Right),
    (1, 0, Direction::Left),
    (0, -1, Direction::Bottom),
    (0, 1, Direction::Top),
];

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
    ];

    pub fn delta_x(self) -> i32 {
        DIRECTION_TABLE[self as usize].0
    }

    pub fn delta_y(self) -> i32 {
        DIRECTION_TABLE[self as usize].1
    }

    pub fn opposite(self) -> Direction {
        DIRECTION_TABLE[self as usize].2
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Top => write!(f, "top"),
            Direction::Bottom => write!(f, "bottom"),
        }
    }
}

/// Direction an arrow head points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Kind of a navigation action (edge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Destination to destination within the same graph
    #[default]
    Regular,
    /// Owned by the root navigation, reachable from anywhere
    Global,
    /// Leaves the current graph
    Exit,
    /// Source and destination are the same node
    #[serde(rename = "self")]
    SelfLoop,
}

impl ActionKind {
    /// Classify an action from its endpoints
    ///
    /// `from == None` means the action belongs to the root navigation.
    /// Exit actions cannot be inferred and must be tagged by the host.
    pub fn classify(from: Option<&str>, to: &str) -> Self {
        match from {
            None => ActionKind::Global,
            Some(from) if from == to => ActionKind::SelfLoop,
            Some(_) => ActionKind::Regular,
        }
    }

    /// Global and exit actions are drawn as stacked stubs beside a node
    pub fn is_stub(&self) -> bool {
        matches!(self, ActionKind::Global | ActionKind::Exit)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Regular => write!(f, "regular"),
            ActionKind::Global => write!(f, "global"),
            ActionKind::Exit => write!(f, "exit"),
            ActionKind::SelfLoop => write!(f, "self"),
        }
    }
}

/// Kind of a navigation destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    #[default]
    Fragment,
    Activity,
    /// A nested navigation graph, drawn collapsed
    Navigation,
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationKind::Fragment => write!(f, "fragment"),
            DestinationKind::Activity => write!(f, "activity"),
            DestinationKind::Navigation => write!(f, "navigation"),
        }
    }
}

/// Visual state an action is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    #[default]
    Normal,
    Hover,
    Selected,
}

impl DrawMode {
    pub fn from_flags(selected: bool, highlighted: bool) -> Self {
        if selected {
            DrawMode::Selected
        } else if highlighted {
            DrawMode::Hover
        } else {
            DrawMode::Normal
        }
    }

    /// Returns true if the action is drawn emphasised
    pub fn is_emphasized(&self) -> bool {
        !matches!(self, DrawMode::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposites() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Top.opposite(), Direction::Bottom);
        assert_eq!(Direction::Bottom.opposite(), Direction::Top);
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_direction_deltas() {
        assert_eq!((Direction::Left.delta_x(), Direction::Left.delta_y()), (-1, 0));
        assert_eq!((Direction::Right.delta_x(), Direction::Right.delta_y()), (1, 0));
        assert_eq!((Direction::Top.delta_x(), Direction::Top.delta_y()), (0, -1));
        assert_eq!(
            (Direction::Bottom.delta_x(), Direction::Bottom.delta_y()),
            (0, 1)
        );
    }

    #[test]
    fn test_point_step() {
        let p = Point::new(10, 10);
        assert_eq!(p.step(Direction::Right, 5), Point::new(15, 10));
        assert_eq!(p.step(Direction::Top, 5), Point::new(10, 5));
    }

    #[test]
    fn test_rect_union_and_grow() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 5, 10, 20);
        assert_eq!(a.union(&b), Rect::new(0, 0, 30, 25));
        assert_eq!(a.grow(5, 2), Rect::new(-5, -2, 20, 14));
    }

    #[test]
    fn test_rect_connection_points() {
        let r = Rect::new(0, 0, 100, 50);
        assert_eq!(r.connection_point(Direction::Right), Point::new(100, 25));
        assert_eq!(r.connection_point(Direction::Left), Point::new(0, 25));
        assert_eq!(r.connection_point(Direction::Top), Point::new(50, 0));
        assert_eq!(r.connection_point(Direction::Bottom), Point::new(50, 50));
    }

    #[test]
    fn test_rect_saturates_near_limits() {
        let r = Rect::new(i32::MAX - 10, i32::MIN + 10, 256, 144);
        assert_eq!(r.right(), i32::MAX);
        assert_eq!(r.grow(100, 100).y, i32::MIN);
        assert_eq!(r.connection_point(Direction::Right).x, i32::MAX);
        assert_eq!(
            Point::new(i32::MAX, 0).step(Direction::Right, 100),
            Point::new(i32::MAX, 0)
        );
        let union = r.union(&Rect::new(i32::MIN, 0, 10, 10));
        assert_eq!(union.width, i32::MAX);
    }

    #[test]
    fn test_rect_empty_sentinel() {
        assert!(Rect::EMPTY.is_empty());
        assert!(!Rect::new(0, 0, 0, 0).is_empty());
        assert!(!Rect::EMPTY.contains_point(Point::new(0, 0)));
    }

    #[test]
    fn test_action_kind_classify() {
        assert_eq!(ActionKind::classify(None, "a"), ActionKind::Global);
        assert_eq!(ActionKind::classify(Some("a"), "a"), ActionKind::SelfLoop);
        assert_eq!(ActionKind::classify(Some("a"), "b"), ActionKind::Regular);
        assert!(ActionKind::Global.is_stub());
        assert!(ActionKind::Exit.is_stub());
        assert!(!ActionKind::Regular.is_stub());
    }

    #[test]
    fn test_draw_mode_flags() {
        assert_eq!(DrawMode::from_flags(true, true), DrawMode::Selected);
        assert_eq!(DrawMode::from_flags(false, true), DrawMode::Hover);
        assert_eq!(DrawMode::from_flags(false, false), DrawMode::Normal);
    }

    #[test]
    fn test_display() {
        assert_eq!(ActionKind::SelfLoop.to_string(), "self");
        assert_eq!(DestinationKind::Navigation.to_string(), "navigation");
        assert_eq!(CharacterSet::Ascii.to_string(), "ascii");
        assert_eq!(Rect::new(1, 2, 3, 4).to_string(), "[1, 2 3x4]");
    }
}
