//! Scene graph storage
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Parent and
//! child links are ids, so the tree carries no shared ownership. Actions are
//! kept in a separate list and reference nodes by their string id.

use serde::Serialize;
use std::collections::HashMap;
use tracing::trace;

use crate::core::{
    ActionKind, DestinationKind, DrawMode, Point, Rect, SceneError, Size,
};

/// Index of a node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What a scene node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// The navigation graph being edited
    Root,
    /// A screen or nested graph inside the root
    Destination(DestinationKind),
    /// A stacked stub drawn for a global or exit action
    ActionMarker(ActionKind),
}

impl NodeKind {
    pub fn is_destination(&self) -> bool {
        matches!(self, NodeKind::Destination(_))
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, NodeKind::ActionMarker(_))
    }
}

/// Read access to a positioned node
///
/// Layout and routing only need these four facts about a node.
pub trait PositionedNode {
    fn id(&self) -> &str;
    fn rect(&self) -> Rect;
    fn parent(&self) -> Option<NodeId>;
    fn children(&self) -> &[NodeId];
}

/// A node in the scene tree
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    id: String,
    pub label: String,
    pub kind: NodeKind,
    pub position: Point,
    pub size: Size,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl PositionedNode for SceneNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A directed action between two nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub id: String,
    pub source: String,
    pub destination: String,
    pub kind: ActionKind,
    /// Position in insertion order, used to order stacked stubs
    pub ordinal: usize,
    pub mode: DrawMode,
}

impl Action {
    pub fn is_self(&self) -> bool {
        self.kind == ActionKind::SelfLoop
    }
}

/// Arena-backed scene tree plus its actions
#[derive(Debug, Default, Clone)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    index: HashMap<String, NodeId>,
    root: Option<NodeId>,
    actions: Vec<Action>,
    action_index: HashMap<String, usize>,
}

impl SceneGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the root node
    pub fn set_root(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<NodeId, SceneError> {
        let id = id.into();
        if self.root.is_some() {
            return Err(SceneError::invalid_parent(id, "graph already has a root"));
        }
        let node = self.insert(id, label.into(), NodeKind::Root, Size::default(), None)?;
        self.root = Some(node);
        Ok(node)
    }

    /// Add a node under `parent`
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        kind: NodeKind,
        size: Size,
        parent: NodeId,
    ) -> Result<NodeId, SceneError> {
        let id = id.into();
        if parent.0 >= self.nodes.len() {
            return Err(SceneError::invalid_parent(id, "parent is not in this graph"));
        }
        if kind == NodeKind::Root {
            return Err(SceneError::invalid_parent(id, "root cannot have a parent"));
        }
        let node = self.insert(id, label.into(), kind, size, Some(parent))?;
        self.nodes[parent.0].children.push(node);
        Ok(node)
    }

    fn insert(
        &mut self,
        id: String,
        label: String,
        kind: NodeKind,
        size: Size,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        if self.index.contains_key(&id) {
            return Err(SceneError::duplicate_node(id));
        }
        if size.width < 0 || size.height < 0 {
            return Err(SceneError::InvalidDimension {
                id,
                width: size.width,
                height: size.height,
            });
        }
        let node = NodeId(self.nodes.len());
        trace!(id = %id, ?kind, "Adding node");
        self.index.insert(id.clone(), node);
        self.nodes.push(SceneNode {
            id,
            label,
            kind,
            position: Point::default(),
            size,
            parent,
            children: Vec::new(),
        });
        Ok(node)
    }

    /// Move `node` under `new_parent`
    ///
    /// The root cannot be moved and a node cannot become its own ancestor.
    pub fn set_parent(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        let id = self.try_node(node)?.id.clone();
        self.try_node(new_parent)?;
        if Some(node) == self.root {
            return Err(SceneError::invalid_parent(id, "root cannot have a parent"));
        }

        let mut cursor = Some(new_parent);
        while let Some(current) = cursor {
            if current == node {
                return Err(SceneError::invalid_parent(id, "would create a cycle"));
            }
            cursor = self.nodes[current.0].parent;
        }

        if let Some(old) = self.nodes[node.0].parent {
            self.nodes[old.0].children.retain(|child| *child != node);
        }
        self.nodes[node.0].parent = Some(new_parent);
        self.nodes[new_parent.0].children.push(node);
        Ok(())
    }

    /// Append an action; returns its ordinal
    pub fn add_action(
        &mut self,
        id: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        kind: ActionKind,
        mode: DrawMode,
    ) -> usize {
        let ordinal = self.actions.len();
        let id = id.into();
        self.action_index.insert(id.clone(), ordinal);
        self.actions.push(Action {
            id,
            source: source.into(),
            destination: destination.into(),
            kind,
            ordinal,
            mode,
        });
        ordinal
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, node: NodeId) -> Option<&SceneNode> {
        self.nodes.get(node.0)
    }

    fn try_node(&self, node: NodeId) -> Result<&SceneNode, SceneError> {
        self.nodes
            .get(node.0)
            .ok_or_else(|| SceneError::unknown_node(format!("#{}", node.0)))
    }

    /// Look up a node id by name
    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Look up a node by name
    pub fn get(&self, id: &str) -> Option<&SceneNode> {
        self.lookup(id).and_then(|node| self.node(node))
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children()).unwrap_or(&[])
    }

    /// All nodes below `node` in pre-order, excluding `node` itself
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    pub fn set_position(&mut self, node: NodeId, position: Point) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.position = position;
        }
    }

    pub fn set_size(&mut self, node: NodeId, size: Size) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.size = size;
        }
    }

    /// Rectangle of the node, or the empty sentinel for unknown ids
    pub fn rect(&self, node: NodeId) -> Rect {
        self.node(node).map(|n| n.rect()).unwrap_or(Rect::EMPTY)
    }

    /// Iterate over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action(&self, id: &str) -> Option<&Action> {
        self.action_index.get(id).map(|&i| &self.actions[i])
    }

    /// Source and destination nodes of an action, if both exist
    pub fn resolve(&self, action: &Action) -> Option<(NodeId, NodeId)> {
        Some((self.lookup(&action.source)?, self.lookup(&action.destination)?))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Clear all data from the graph
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.root = None;
        self.actions.clear();
        self.action_index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment() -> NodeKind {
        NodeKind::Destination(DestinationKind::Fragment)
    }

    #[test]
    fn test_build_tree() {
        let mut graph = SceneGraph::new();
        let root = graph.set_root("nav", "nav").unwrap();
        let a = graph
            .add_node("a", "A", fragment(), Size::new(10, 20), root)
            .unwrap();
        let b = graph
            .add_node("b", "B", fragment(), Size::new(10, 20), root)
            .unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.children(root), &[a, b]);
        assert_eq!(graph.get("a").unwrap().parent(), Some(root));
        assert_eq!(graph.rect(a), Rect::new(0, 0, 10, 20));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut graph = SceneGraph::new();
        let root = graph.set_root("nav", "nav").unwrap();
        graph.add_node("a", "A", fragment(), Size::default(), root).unwrap();
        let err = graph
            .add_node("a", "A", fragment(), Size::default(), root)
            .unwrap_err();
        assert!(matches!(err, SceneError::DuplicateNode { .. }));
    }

    #[test]
    fn test_negative_size_rejected() {
        let mut graph = SceneGraph::new();
        let root = graph.set_root("nav", "nav").unwrap();
        let err = graph
            .add_node("a", "A", fragment(), Size::new(-1, 5), root)
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidDimension { .. }));
    }

    #[test]
    fn test_second_root_rejected() {
        let mut graph = SceneGraph::new();
        graph.set_root("nav", "nav").unwrap();
        assert!(graph.set_root("other", "other").is_err());
    }

    #[test]
    fn test_reparent_and_cycle_detection() {
        let mut graph = SceneGraph::new();
        let root = graph.set_root("nav", "nav").unwrap();
        let a = graph.add_node("a", "A", fragment(), Size::default(), root).unwrap();
        let b = graph.add_node("b", "B", fragment(), Size::default(), root).unwrap();

        graph.set_parent(b, a).unwrap();
        assert_eq!(graph.children(root), &[a]);
        assert_eq!(graph.children(a), &[b]);

        assert!(graph.set_parent(a, b).is_err());
        assert!(graph.set_parent(a, a).is_err());
        assert!(graph.set_parent(root, a).is_err());
    }

    #[test]
    fn test_descendants_preorder() {
        let mut graph = SceneGraph::new();
        let root = graph.set_root("nav", "nav").unwrap();
        let a = graph.add_node("a", "A", fragment(), Size::default(), root).unwrap();
        let a1 = graph
            .add_node("a1", "", NodeKind::ActionMarker(ActionKind::Global), Size::default(), a)
            .unwrap();
        let b = graph.add_node("b", "B", fragment(), Size::default(), root).unwrap();
        assert_eq!(graph.descendants(root), vec![a, a1, b]);
        assert!(graph.descendants(b).is_empty());
    }

    #[test]
    fn test_actions_and_resolve() {
        let mut graph = SceneGraph::new();
        let root = graph.set_root("nav", "nav").unwrap();
        let a = graph.add_node("a", "A", fragment(), Size::default(), root).unwrap();
        assert_eq!(
            graph.add_action("go", "a", "a", ActionKind::SelfLoop, DrawMode::Normal),
            0
        );
        assert_eq!(
            graph.add_action("lost", "a", "missing", ActionKind::Regular, DrawMode::Normal),
            1
        );

        let go = graph.action("go").unwrap();
        assert!(go.is_self());
        assert_eq!(graph.resolve(go), Some((a, a)));
        assert_eq!(graph.resolve(graph.action("lost").unwrap()), None);
        assert_eq!(graph.action_count(), 2);

        graph.clear();
        assert_eq!(graph.node_count(), 0);
        assert!(graph.root().is_none());
    }
}
