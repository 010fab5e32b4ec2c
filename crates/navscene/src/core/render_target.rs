//! Render target abstraction
//!
//! Routing produces geometry; a [`RenderTarget`] consumes it as a stream of
//! [`DrawCommand`]s. The crate ships two targets: [`DisplayList`], which
//! records commands, and the ASCII renderer in `scene::renderer`.

use serde::Serialize;

use super::{ArrowDirection, DrawMode, Point, Rect};

/// Draw level for node boxes
pub const DRAW_NODE_LEVEL: u8 = 0;
/// Draw level for action lines and curves
pub const DRAW_ACTION_LEVEL: u8 = 1;
/// Draw level for arrow heads
pub const DRAW_ARROW_LEVEL: u8 = 2;

/// A single drawing instruction in screen units
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    /// A destination box
    Node {
        id: String,
        label: String,
        rect: Rect,
        nested: bool,
    },
    /// Cubic curve through four control points
    Curve {
        action: String,
        points: [Point; 4],
        mode: DrawMode,
    },
    /// Orthogonal polyline
    Polyline {
        action: String,
        points: Vec<Point>,
        mode: DrawMode,
    },
    /// Arrow head filling `rect`
    Arrow {
        rect: Rect,
        direction: ArrowDirection,
        mode: DrawMode,
    },
}

impl DrawCommand {
    pub fn level(&self) -> u8 {
        match self {
            DrawCommand::Node { .. } => DRAW_NODE_LEVEL,
            DrawCommand::Curve { .. } | DrawCommand::Polyline { .. } => DRAW_ACTION_LEVEL,
            DrawCommand::Arrow { .. } => DRAW_ARROW_LEVEL,
        }
    }
}

/// Anything that can consume draw commands
pub trait RenderTarget {
    fn draw(&mut self, command: &DrawCommand);
}

/// Records draw commands for later replay
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay into another target, lowest level first
    ///
    /// Commands on the same level keep their recording order.
    pub fn replay(&self, target: &mut dyn RenderTarget) {
        let mut ordered: Vec<&DrawCommand> = self.commands.iter().collect();
        ordered.sort_by_key(|command| command.level());
        for command in ordered {
            target.draw(command);
        }
    }
}

impl RenderTarget for DisplayList {
    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(command.clone());
    }
}
