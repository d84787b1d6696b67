// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure owning every node.

use crate::node::{Node, NodeId};
use egui::Pos2;
use indexmap::IndexMap;

/// A directed graph of nodes
///
/// Nodes are kept in insertion order, which is also the order events are
/// offered to them and the order they are drawn in.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
        }
    }

    /// Create a node centered on `position` and add it to the graph
    pub fn add_node(&mut self, name: impl Into<String>, position: Pos2) -> NodeId {
        let node = Node::new(name, position);
        let id = node.id();
        tracing::debug!("Added node {:?} '{}' at {:?}", id, node.name(), position);
        self.nodes.insert(id, node);
        id
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Find a node by its display name
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name() == name)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// First node (in insertion order) whose bounds contain `point`
    pub fn node_at(&self, point: Pos2) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|n| n.contains_point(point))
            .map(Node::id)
    }

    /// Add an edge from `from` to `to`.
    ///
    /// Returns `Ok(false)` when the edge already exists.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<bool, GraphError> {
        if !self.nodes.contains_key(&to) {
            return Err(GraphError::NodeNotFound(to));
        }
        let source = self.nodes.get_mut(&from).ok_or(GraphError::NodeNotFound(from))?;

        let added = source.connect_to(to);
        if added {
            tracing::debug!("Connected {:?} -> {:?}", from, to);
        }
        Ok(added)
    }

    /// All edges as `(from, to)` pairs
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .values()
            .flat_map(|n| n.targets().iter().map(move |t| (n.id(), *t)))
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.targets().len()).sum()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when editing the graph by ID
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_twice_yields_one_edge() {
        let mut graph = Graph::new("Test");
        let a = graph.add_node("A", Pos2::new(0.0, 0.0));
        let b = graph.add_node("B", Pos2::new(100.0, 0.0));

        assert!(graph.connect(a, b).unwrap());
        assert!(!graph.connect(a, b).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(a, b)]);
    }

    #[test]
    fn test_connect_unknown_node() {
        let mut graph = Graph::new("Test");
        let a = graph.add_node("A", Pos2::ZERO);
        let missing = NodeId::new();

        assert!(matches!(
            graph.connect(a, missing),
            Err(GraphError::NodeNotFound(id)) if id == missing
        ));
        assert!(matches!(
            graph.connect(missing, a),
            Err(GraphError::NodeNotFound(id)) if id == missing
        ));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_cycles_are_allowed() {
        let mut graph = Graph::new("Test");
        let a = graph.add_node("A", Pos2::ZERO);
        let b = graph.add_node("B", Pos2::new(100.0, 0.0));

        graph.connect(a, b).unwrap();
        graph.connect(b, a).unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_node_at_first_hit_wins() {
        let mut graph = Graph::new("Test");
        let a = graph.add_node("A", Pos2::new(0.0, 0.0));
        let _b = graph.add_node("B", Pos2::new(20.0, 0.0));

        assert_eq!(graph.node_at(Pos2::new(10.0, 0.0)), Some(a));
        assert_eq!(graph.node_at(Pos2::new(500.0, 0.0)), None);
        assert_eq!(graph.node_by_name("B").map(Node::name), Some("B"));
    }
}
