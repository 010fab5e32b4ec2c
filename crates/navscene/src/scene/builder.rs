//! Builds a scene graph from a navigation document
//!
//! Destinations become children of the root. Global actions get a marker
//! node under their destination and exit actions get one under their source,
//! so the layout pass can stack them beside that node.

use tracing::{debug, info, span, warn, Level};

use super::document::{ActionDoc, NavDocument};
use super::graph::{NodeKind, SceneGraph};
use super::metrics::*;
use crate::core::{ActionKind, DestinationKind, SceneConfig, SceneError, Size};

/// An action left out of the scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedAction {
    pub id: String,
    pub reason: String,
}

/// Outcome of building a scene
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub dropped: Vec<DroppedAction>,
}

impl BuildReport {
    fn drop_action(&mut self, action: &ActionDoc, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(action = %action.id, reason = %reason, "Dropping action");
        self.dropped.push(DroppedAction {
            id: action.id.clone(),
            reason,
        });
    }

    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Size of a destination box for the configured device
pub fn destination_size(kind: DestinationKind, config: &SceneConfig) -> Size {
    match kind {
        DestinationKind::Navigation => Size::new(SUBNAV_WIDTH, SUBNAV_HEIGHT),
        DestinationKind::Fragment | DestinationKind::Activity => {
            let ratio = config.screen_ratio();
            let mut width = SCREEN_LONG as f64;
            let mut height = SCREEN_LONG as f64;
            if ratio > 1.0 {
                height = (height / ratio).trunc();
            } else {
                width = (width * ratio).trunc();
            }
            // Nearly square screens would take up too much room at full size
            if ratio < 1.1 && ratio > 0.9 {
                width = (width * 0.5).trunc();
                height = (height * 0.5).trunc();
            }
            Size::new(width as i32, height as i32)
        }
    }
}

/// Size of the stub drawn for a global or exit action
pub fn marker_size(kind: ActionKind) -> Size {
    match kind {
        ActionKind::Exit => Size::new(EXIT_ACTION_WIDTH, ACTION_HEIGHT),
        _ => Size::new(GLOBAL_ACTION_WIDTH, ACTION_HEIGHT),
    }
}

/// Turns [`NavDocument`]s into [`SceneGraph`]s
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    config: SceneConfig,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, document: &NavDocument) -> Result<(SceneGraph, BuildReport), SceneError> {
        let build_span = span!(
            Level::INFO,
            "build_scene",
            destinations = document.destinations.len(),
            actions = document.actions.len()
        );
        let _enter = build_span.enter();

        let mut graph = SceneGraph::new();
        let mut report = BuildReport::default();
        let root_label = document.label.as_deref().unwrap_or(&document.id);
        let root = graph.set_root(document.id.as_str(), root_label)?;

        for destination in &document.destinations {
            if let Some(position) = destination.position() {
                if position.x.unsigned_abs() > MAX_COORDINATE as u32
                    || position.y.unsigned_abs() > MAX_COORDINATE as u32
                {
                    return Err(SceneError::InvalidPosition {
                        id: destination.id.clone(),
                        x: position.x,
                        y: position.y,
                    });
                }
            }
            let size = destination_size(destination.kind, &self.config);
            graph.add_node(
                destination.id.as_str(),
                destination.display_label(),
                NodeKind::Destination(destination.kind),
                size,
                root,
            )?;
        }
        debug!(node_count = graph.node_count(), "Added destinations");

        for action in &document.actions {
            let kind = action.effective_kind();
            let source = action.from.as_deref().unwrap_or(&document.id);
            graph.add_action(
                action.id.as_str(),
                source,
                action.to.as_str(),
                kind,
                action.mode(),
            );

            match kind {
                ActionKind::Global | ActionKind::Exit => {
                    // Global stubs sit beside their destination, exit stubs beside their source
                    let owner = if kind == ActionKind::Global {
                        action.to.as_str()
                    } else {
                        source
                    };
                    let Some(parent) = graph.lookup(owner).filter(|&node| {
                        graph.node(node).is_some_and(|n| n.kind.is_destination())
                    }) else {
                        report.drop_action(action, format!("unresolved {} owner '{}'", kind, owner));
                        continue;
                    };
                    if let Err(e) = graph.add_node(
                        action.id.as_str(),
                        "",
                        NodeKind::ActionMarker(kind),
                        marker_size(kind),
                        parent,
                    ) {
                        report.drop_action(action, e.to_string());
                    }
                }
                ActionKind::Regular | ActionKind::SelfLoop => {
                    if !graph.has_node(source) {
                        report.drop_action(action, format!("unresolved source '{}'", source));
                    } else if !graph.has_node(&action.to) {
                        report.drop_action(action, format!("unresolved destination '{}'", action.to));
                    }
                }
            }
        }

        info!(
            nodes = graph.node_count(),
            actions = graph.action_count(),
            dropped = report.dropped.len(),
            "Scene built"
        );
        Ok((graph, report))
    }
}
