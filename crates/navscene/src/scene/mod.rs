//! Navigation scene pipeline
//!
//! Builds a scene graph from a [`NavDocument`], lays it out, routes its
//! actions and draws the result.
//!
//! Example document:
//! ```json
//! {
//!   "id": "main",
//!   "destinations": [
//!     { "id": "home", "x": 0, "y": 0 },
//!     { "id": "detail", "x": 300, "y": 0 }
//!   ],
//!   "actions": [
//!     { "id": "open", "from": "home", "to": "detail" },
//!     { "id": "refresh", "from": "detail", "to": "detail" }
//!   ]
//! }
//! ```

mod builder;
mod document;
mod graph;
mod layout;
pub mod metrics;
mod renderer;
mod routing;

pub use builder::{destination_size, marker_size, BuildReport, DroppedAction, SceneBuilder};
pub use document::{ActionDoc, DestinationDoc, NavDocument};
pub use graph::{Action, NodeId, NodeKind, PositionedNode, SceneGraph, SceneNode};
pub use layout::{
    bounding_box, layout, stack_positions, stack_slots, GridLayoutAlgorithm, LayoutAlgorithm,
    LayoutEngine, ManualLayoutAlgorithm,
};
pub use renderer::{
    emit_scene, is_heavy_glyph, render_ascii, AsciiRenderer, MAX_CANVAS_COLUMNS, MAX_CANVAS_ROWS,
};
pub use routing::{
    action_at, distance_to_segment, sample_cubic, ActionGeometry, ActionPath, ArrowGeometry,
    CurvePoints, EdgeRouter, SelfActionPoints,
};

use serde::Serialize;
use tracing::{debug, info, span, Level};

use crate::core::{DisplayList, Point, Rect, SceneConfig, SceneContext, SceneError};

/// Screen geometry of one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeGeometry {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub rect: Rect,
}

/// Everything a host needs to draw a laid-out scene, in screen units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneGeometry {
    /// Root bounds including the scrollable margin
    pub root: Rect,
    /// Padded box around every node; [`Rect::EMPTY`] for an empty scene
    pub bounding_box: Rect,
    pub nodes: Vec<NodeGeometry>,
    pub actions: Vec<ActionGeometry>,
}

/// A navigation graph turned into a drawable scene
pub struct NavScene {
    config: SceneConfig,
    graph: SceneGraph,
    report: BuildReport,
    engine: LayoutEngine,
    actions: Vec<ActionGeometry>,
    root_bounds: Rect,
}

impl NavScene {
    /// Build a scene; stored positions win, the rest go on a grid
    pub fn from_document(document: &NavDocument, config: SceneConfig) -> Result<Self, SceneError> {
        let (graph, report) = SceneBuilder::new(config.clone()).build(document)?;
        let algorithm = ManualLayoutAlgorithm::from_document(
            document,
            Box::new(GridLayoutAlgorithm::new(config.grid_columns)),
        );
        Ok(Self {
            config,
            graph,
            report,
            engine: LayoutEngine::new(Box::new(algorithm)),
            actions: Vec::new(),
            root_bounds: Rect::EMPTY,
        })
    }

    /// Replace the layout algorithm used by [`NavScene::layout`]
    pub fn with_algorithm(mut self, algorithm: Box<dyn LayoutAlgorithm>) -> Self {
        self.engine = LayoutEngine::new(algorithm);
        self
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn context(&self) -> SceneContext {
        SceneContext::new(self.config.zoom, Point::default())
    }

    /// Run a full pass: position nodes, fit the root, route actions
    pub fn layout(&mut self) -> Result<(), SceneError> {
        let scene_span = span!(Level::INFO, "scene_layout", zoom = self.config.zoom);
        let _enter = scene_span.enter();

        let context = self.context();
        self.engine.layout_all(&mut self.graph)?;
        self.root_bounds = self
            .engine
            .root_bounds(&mut self.graph, self.config.viewport, &context)?;
        self.actions = EdgeRouter::new(context).route(&self.graph);

        info!(
            nodes = self.graph.node_count(),
            actions = self.actions.len(),
            "Scene laid out"
        );
        Ok(())
    }

    /// Routed actions from the last [`NavScene::layout`] pass
    pub fn actions(&self) -> &[ActionGeometry] {
        &self.actions
    }

    /// Padded box around every node below the root, in logical units
    pub fn bounding_box(&self) -> Rect {
        bounding_box(
            self.graph
                .nodes()
                .filter(|(_, node)| node.kind != NodeKind::Root)
                .map(|(_, node)| node),
        )
    }

    pub fn geometry(&self) -> SceneGeometry {
        let context = self.context();
        let bounds = self.bounding_box();
        let nodes = self
            .graph
            .nodes()
            .filter(|(_, node)| node.kind != NodeKind::Root)
            .map(|(_, node)| NodeGeometry {
                id: node.id().to_string(),
                label: node.label.clone(),
                kind: node.kind,
                rect: context.screen_rect(node.rect()),
            })
            .collect();

        SceneGeometry {
            root: screen_or_empty(&context, self.root_bounds),
            bounding_box: screen_or_empty(&context, bounds),
            nodes,
            actions: self.actions.clone(),
        }
    }

    /// Record the scene as draw commands
    pub fn display_list(&self) -> DisplayList {
        let mut list = DisplayList::new();
        emit_scene(&self.graph, &self.actions, &self.context(), &mut list);
        list
    }

    /// Draw the scene as text
    pub fn render_ascii(&self) -> String {
        let context = self.context();
        let bounds = self.bounding_box();
        if bounds.is_empty() {
            debug!("Nothing to render");
            return String::new();
        }
        render_ascii(
            &self.graph,
            &self.actions,
            &self.config,
            &context,
            context.screen_rect(bounds),
        )
    }

    /// Id of the topmost action under a screen point
    pub fn action_at(&self, point: Point) -> Option<&str> {
        action_at(&self.actions, point, metrics::HIT_TOLERANCE).map(|g| g.action.as_str())
    }
}

fn screen_or_empty(context: &SceneContext, rect: Rect) -> Rect {
    if rect.is_empty() {
        Rect::EMPTY
    } else {
        context.screen_rect(rect)
    }
}
