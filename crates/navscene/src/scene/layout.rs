//! Scene layout
//!
//! A layout pass resets every node below the root to the origin, asks a
//! [`LayoutAlgorithm`] where each destination goes, then stacks global and
//! exit stubs beside the destinations that own them.

use std::collections::{HashMap, HashSet};
use tracing::{debug, span, trace, Level};

use super::document::NavDocument;
use super::graph::{NodeId, NodeKind, PositionedNode, SceneGraph};
use super::metrics::*;
use crate::core::{ActionKind, Point, Rect, SceneContext, SceneError, Size};

/// Strategy that picks a position for one node
pub trait LayoutAlgorithm: Send + Sync {
    /// Position for `node`, or `None` to leave it at the origin
    fn layout(&self, graph: &SceneGraph, node: NodeId) -> Option<Point>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;
}

/// Row-major grid of destinations
///
/// Cells are as large as the largest sibling plus a gap, so nodes never
/// overlap regardless of their individual sizes.
#[derive(Debug, Clone)]
pub struct GridLayoutAlgorithm {
    columns: usize,
    h_gap: i32,
    v_gap: i32,
}

impl Default for GridLayoutAlgorithm {
    fn default() -> Self {
        Self::new(4)
    }
}

impl GridLayoutAlgorithm {
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            h_gap: 2 * BOUNDING_BOX_PADDING,
            v_gap: BOUNDING_BOX_PADDING,
        }
    }

    pub fn with_gaps(mut self, h_gap: i32, v_gap: i32) -> Self {
        self.h_gap = h_gap;
        self.v_gap = v_gap;
        self
    }
}

impl LayoutAlgorithm for GridLayoutAlgorithm {
    fn layout(&self, graph: &SceneGraph, node: NodeId) -> Option<Point> {
        let parent = graph.node(node)?.parent()?;
        let siblings: Vec<NodeId> = graph
            .children(parent)
            .iter()
            .copied()
            .filter(|&child| graph.node(child).is_some_and(|n| n.kind.is_destination()))
            .collect();
        let index = siblings.iter().position(|&s| s == node)?;

        let (cell_width, cell_height) = siblings
            .iter()
            .filter_map(|&s| graph.node(s))
            .fold((0, 0), |(w, h), n| (w.max(n.size.width), h.max(n.size.height)));

        let column = (index % self.columns) as i32;
        let row = (index / self.columns) as i32;
        Some(Point::new(
            column.saturating_mul(cell_width.saturating_add(self.h_gap)),
            row.saturating_mul(cell_height.saturating_add(self.v_gap)),
        ))
    }

    fn name(&self) -> &'static str {
        "grid"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

/// Stored per-destination positions with a fallback for new destinations
///
/// Fallback positions are pushed below the lowest stored node so new
/// destinations never land on top of placed ones.
pub struct ManualLayoutAlgorithm {
    positions: HashMap<String, Point>,
    fallback: Box<dyn LayoutAlgorithm>,
}

impl ManualLayoutAlgorithm {
    pub fn new(fallback: Box<dyn LayoutAlgorithm>) -> Self {
        Self {
            positions: HashMap::new(),
            fallback,
        }
    }

    /// Collect the stored positions of a document
    pub fn from_document(document: &NavDocument, fallback: Box<dyn LayoutAlgorithm>) -> Self {
        let mut algorithm = Self::new(fallback);
        for destination in &document.destinations {
            if let Some(position) = destination.position() {
                algorithm.set_position(destination.id.as_str(), position);
            }
        }
        algorithm
    }

    pub fn set_position(&mut self, id: impl Into<String>, position: Point) {
        self.positions.insert(id.into(), position);
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    fn stored_bottom(&self, graph: &SceneGraph) -> Option<i32> {
        self.positions
            .iter()
            .filter_map(|(id, p)| graph.get(id).map(|n| p.y.saturating_add(n.size.height)))
            .max()
    }
}

impl LayoutAlgorithm for ManualLayoutAlgorithm {
    fn layout(&self, graph: &SceneGraph, node: NodeId) -> Option<Point> {
        let id = graph.node(node)?.id();
        if let Some(position) = self.position(id) {
            return Some(position);
        }
        let fallback = self.fallback.layout(graph, node)?;
        match self.stored_bottom(graph) {
            Some(bottom) => Some(Point::new(
                fallback.x,
                fallback
                    .y
                    .saturating_add(bottom)
                    .saturating_add(BOUNDING_BOX_PADDING),
            )),
            None => Some(fallback),
        }
    }

    fn name(&self) -> &'static str {
        "manual"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

/// Position every node below `root` with `algorithm`
///
/// All positions are reset to the origin first so repeated passes never
/// drift. The root itself and action stubs are left to other passes.
pub fn layout(graph: &mut SceneGraph, root: NodeId, algorithm: &dyn LayoutAlgorithm) {
    let nodes = graph.descendants(root);
    for &node in &nodes {
        graph.set_position(node, Point::default());
    }

    for &node in &nodes {
        let is_marker = graph.node(node).is_some_and(|n| n.kind.is_marker());
        if is_marker {
            continue;
        }
        if let Some(position) = algorithm.layout(graph, node) {
            trace!(node = node.index(), %position, "Positioned node");
            graph.set_position(node, position);
        }
    }
}

/// Union of every node rectangle, padded by [`BOUNDING_BOX_PADDING`]
///
/// Returns [`Rect::EMPTY`] when there are no nodes.
pub fn bounding_box<'a, N, I>(nodes: I) -> Rect
where
    N: PositionedNode + 'a,
    I: IntoIterator<Item = &'a N>,
{
    nodes
        .into_iter()
        .map(|node| node.rect())
        .reduce(|acc, rect| acc.union(&rect))
        .map(|rect| rect.grow(BOUNDING_BOX_PADDING, BOUNDING_BOX_PADDING))
        .unwrap_or(Rect::EMPTY)
}

/// Slot order for stacked stubs
///
/// With `skip` set, an empty slot is inserted at index `(count + 1) / 2` to
/// leave room for the regular actions that share the side.
pub fn stack_slots<T: Clone>(items: &[T], skip: bool) -> Vec<Option<T>> {
    let mut slots: Vec<Option<T>> = items.iter().cloned().map(Some).collect();
    if skip && !items.is_empty() {
        slots.insert((items.len() + 1) / 2, None);
    }
    slots
}

/// Vertical positions of stacked slots beside `anchor`
///
/// Occupied slots are paired with their y coordinate; empty slots still
/// advance the cursor.
pub fn stack_positions<T: Clone>(anchor: Rect, slots: &[Option<T>]) -> Vec<(T, i32)> {
    let count = slots.len() as i32;
    let step = ACTION_HEIGHT + STACK_VERTICAL_PADDING;
    let mut y = anchor
        .center()
        .y
        .saturating_sub(ACTION_HEIGHT / 2)
        .saturating_sub((count / 2).saturating_mul(step));

    let mut placed = Vec::new();
    for slot in slots {
        if let Some(item) = slot {
            placed.push((item.clone(), y));
        }
        y = y.saturating_add(step);
    }
    placed
}

/// Runs layout passes over a whole scene
pub struct LayoutEngine {
    algorithm: Box<dyn LayoutAlgorithm>,
}

impl LayoutEngine {
    pub fn new(algorithm: Box<dyn LayoutAlgorithm>) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> &dyn LayoutAlgorithm {
        self.algorithm.as_ref()
    }

    /// Position destinations, then stack global and exit stubs
    pub fn layout_all(&self, graph: &mut SceneGraph) -> Result<(), SceneError> {
        let root = graph
            .root()
            .ok_or_else(|| SceneError::layout_error("scene has no root".to_string()))?;

        let layout_span = span!(
            Level::INFO,
            "layout_all",
            algorithm = self.algorithm.name(),
            nodes = graph.node_count()
        );
        let _enter = layout_span.enter();

        layout(graph, root, self.algorithm.as_ref());

        let (sources, destinations) = regular_action_endpoints(graph);
        debug!(
            sources = sources.len(),
            destinations = destinations.len(),
            "Collected regular action endpoints"
        );

        let owners: Vec<NodeId> = graph
            .children(root)
            .iter()
            .copied()
            .filter(|&child| graph.node(child).is_some_and(|n| n.kind.is_destination()))
            .collect();

        for owner in owners {
            let Some(node) = graph.node(owner) else {
                continue;
            };
            let id = node.id().to_string();
            let rect = node.rect();

            let globals = markers_of(graph, owner, ActionKind::Global);
            let exits = markers_of(graph, owner, ActionKind::Exit);

            stack_markers(
                graph,
                rect,
                &globals,
                destinations.contains(&id),
                rect.x
                    .saturating_sub(GLOBAL_ACTION_WIDTH + GLOBAL_ACTION_HORIZONTAL_PADDING),
            );
            stack_markers(
                graph,
                rect,
                &exits,
                sources.contains(&id),
                rect.right().saturating_add(EXIT_ACTION_HORIZONTAL_PADDING),
            );
        }

        debug!("Layout completed");
        Ok(())
    }

    /// Fit the root around its children plus the scrollable margin
    ///
    /// The padded bounding box grows by the viewport extent minus the pan
    /// limit, and the result becomes the root's position and size.
    pub fn root_bounds(
        &self,
        graph: &mut SceneGraph,
        viewport: Size,
        context: &SceneContext,
    ) -> Result<Rect, SceneError> {
        let root = graph
            .root()
            .ok_or_else(|| SceneError::layout_error("scene has no root".to_string()))?;

        let children: Vec<_> = graph
            .children(root)
            .iter()
            .filter_map(|&child| graph.node(child))
            .collect();
        let mut bounds = bounding_box(children);
        if bounds.is_empty() {
            bounds = Rect::new(0, 0, 0, 0);
        }

        let pan_limit = context.logical_dimension(PAN_LIMIT);
        let bounds = bounds.grow(
            viewport.width.saturating_sub(pan_limit).max(0),
            viewport.height.saturating_sub(pan_limit).max(0),
        );

        graph.set_position(root, bounds.origin());
        graph.set_size(root, bounds.size());
        debug!(%bounds, "Updated root bounds");
        Ok(bounds)
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(Box::new(GridLayoutAlgorithm::default()))
    }
}

/// Node ids that send and receive regular actions
fn regular_action_endpoints(graph: &SceneGraph) -> (HashSet<String>, HashSet<String>) {
    let mut sources = HashSet::new();
    let mut destinations = HashSet::new();
    for action in graph.actions() {
        if action.kind != ActionKind::Regular || graph.resolve(action).is_none() {
            continue;
        }
        sources.insert(action.source.clone());
        destinations.insert(action.destination.clone());
    }
    (sources, destinations)
}

/// Marker children of `owner` of one kind, in action order
fn markers_of(graph: &SceneGraph, owner: NodeId, kind: ActionKind) -> Vec<NodeId> {
    let mut markers: Vec<(usize, NodeId)> = graph
        .children(owner)
        .iter()
        .filter_map(|&child| {
            let node = graph.node(child)?;
            if node.kind != NodeKind::ActionMarker(kind) {
                return None;
            }
            let ordinal = graph.action(node.id()).map(|a| a.ordinal).unwrap_or(usize::MAX);
            Some((ordinal, child))
        })
        .collect();
    markers.sort_by_key(|(ordinal, _)| *ordinal);
    markers.into_iter().map(|(_, node)| node).collect()
}

fn stack_markers(graph: &mut SceneGraph, anchor: Rect, markers: &[NodeId], skip: bool, x: i32) {
    if markers.is_empty() {
        return;
    }
    let slots = stack_slots(markers, skip);
    for (marker, y) in stack_positions(anchor, &slots) {
        trace!(marker = marker.index(), x, y, "Stacked action");
        graph.set_position(marker, Point::new(x, y));
    }
}
