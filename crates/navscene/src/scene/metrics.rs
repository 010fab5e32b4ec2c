//! Fixed dimensions of the navigation scene, in logical units

/// Long side of a screen destination before aspect correction
pub const SCREEN_LONG: i32 = 256;

/// Collapsed nested navigation box
pub const SUBNAV_WIDTH: i32 = 140;
pub const SUBNAV_HEIGHT: i32 = 38;

/// Largest stored coordinate magnitude a destination may have
pub const MAX_COORDINATE: i32 = 1 << 28;

/// Screen-unit distance the root bounds stop short of the viewport
pub const PAN_LIMIT: i32 = 150;
/// Padding added around the bounding box of all destinations
pub const BOUNDING_BOX_PADDING: i32 = 100;

/// Arrow head length along the action
pub const ACTION_ARROW_PARALLEL: i32 = 10;
/// Arrow head width across the action
pub const ACTION_ARROW_PERPENDICULAR: i32 = 12;

/// Height of one stacked global or exit stub
pub const ACTION_HEIGHT: i32 = ACTION_ARROW_PERPENDICULAR;
/// Gap between stacked stubs
pub const STACK_VERTICAL_PADDING: i32 = 6;

pub const GLOBAL_ACTION_LINE_LENGTH: i32 = 8;
pub const GLOBAL_ACTION_WIDTH: i32 = ACTION_ARROW_PARALLEL + GLOBAL_ACTION_LINE_LENGTH;
pub const GLOBAL_ACTION_HORIZONTAL_PADDING: i32 = 8;

pub const EXIT_ACTION_LINE_LENGTH: i32 = 14;
pub const EXIT_ACTION_WIDTH: i32 = ACTION_ARROW_PARALLEL + EXIT_ACTION_LINE_LENGTH;
pub const EXIT_ACTION_HORIZONTAL_PADDING: i32 = 2;

/// Self loop: right, down, left, up segment lengths
pub const SELF_ACTION_LENGTH_1: i32 = 28;
pub const SELF_ACTION_LENGTH_2: i32 = 26;
pub const SELF_ACTION_LENGTH_3: i32 = 60;
pub const SELF_ACTION_LENGTH_4: i32 = 8;

/// Gap between an arrow tip and the node it enters
pub const ACTION_HORIZONTAL_PADDING: i32 = 8;
pub const ACTION_VERTICAL_PADDING: i32 = 8;

/// Distance from an endpoint to its curve control point
pub const CURVE_CONTROL_DISTANCE: i32 = 100;

/// Screen-unit tolerance for hitting an action
pub const HIT_TOLERANCE: i32 = 5;
