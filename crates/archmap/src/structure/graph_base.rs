//! Low-level ordered graph storage.
//!
//! This module provides the directed multigraph underneath every diagram
//! view. Unlike a general-purpose graph it remembers insertion order for both
//! nodes and edges, because script output must list them in the order their
//! source entities appear in the schema.
//!
//! Capabilities:
//! - Node storage keyed by [`Id`], first insertion wins
//! - Edge storage in insertion order, parallel edges and self-loops allowed
//!
//! This is an internal module; [`DiagramGraph`](super::DiagramGraph) wraps it.

use std::fmt;

use indexmap::IndexMap;

use archmap_core::identifier::Id;

/// A directed edge carrying a value of type `E`.
#[derive(Debug)]
struct Edge<E> {
    source: Id,
    target: Id,
    value: E,
}

/// Insertion-ordered directed multigraph.
///
/// Type parameters:
/// - `N`: Node data type (must be Copy and Debug)
/// - `E`: Edge data type (must be Copy and Debug)
#[derive(Debug)]
pub(super) struct GraphInternal<N, E>
where
    N: Copy + fmt::Debug,
    E: Copy + fmt::Debug,
{
    nodes: IndexMap<Id, N>,
    edges: Vec<Edge<E>>,
}

impl<N, E> GraphInternal<N, E>
where
    N: Copy + fmt::Debug,
    E: Copy + fmt::Debug,
{
    pub(super) fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Returns the node data for the given ID, if it exists.
    pub(super) fn node(&self, id: Id) -> Option<N> {
        self.nodes.get(&id).copied()
    }

    /// Returns all node data in insertion order.
    pub(super) fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.nodes.values().copied()
    }

    pub(super) fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub(super) fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns `(source, target, value)` for every edge in insertion order.
    pub(super) fn edges(&self) -> impl Iterator<Item = (Id, Id, E)> + '_ {
        self.edges
            .iter()
            .map(|edge| (edge.source, edge.target, edge.value))
    }

    pub(super) fn edges_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds a node unless one with the same ID already exists.
    ///
    /// Returns `true` when the node was inserted. An existing node keeps its
    /// data and its position.
    pub(super) fn add_node(&mut self, id: Id, node: N) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, node);
        true
    }

    /// Appends a directed edge between two existing nodes.
    ///
    /// # Panics
    /// Panics in debug builds if either endpoint is missing.
    pub(super) fn add_edge(&mut self, source: Id, target: Id, value: E) {
        debug_assert!(
            self.contains_node(source),
            "Adding edge: Source node {source:?} does not exist for {value:?}",
        );
        debug_assert!(
            self.contains_node(target),
            "Adding edge: Target node {target:?} does not exist for {value:?}",
        );

        self.edges.push(Edge {
            source,
            target,
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use archmap_core::identifier::Names;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct TestNode {
        value: u32,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct TestEdge {
        weight: i32,
    }

    type TestGraph = GraphInternal<TestNode, TestEdge>;

    #[test]
    fn test_graph_new() {
        let graph = TestGraph::new();

        assert_eq!(graph.nodes_count(), 0);
        assert_eq!(graph.edges_count(), 0);
        assert_eq!(graph.nodes().count(), 0);
    }

    #[test]
    fn test_nodes_keep_insertion_order() {
        let mut names = Names::new();
        let mut graph = TestGraph::new();
        for (idx, name) in ["zulu", "alpha", "mike"].into_iter().enumerate() {
            graph.add_node(names.intern(name), TestNode { value: idx as u32 });
        }

        let values: Vec<u32> = graph.nodes().map(|node| node.value).collect();
        assert_eq!(values, vec![0, 1, 2]);
    }

    #[test]
    fn test_first_insertion_wins() {
        let mut graph = TestGraph::new();
        let id = Names::new().intern("node");

        assert!(graph.add_node(id, TestNode { value: 10 }));
        assert!(!graph.add_node(id, TestNode { value: 20 }));

        assert_eq!(graph.node(id), Some(TestNode { value: 10 }));
        assert_eq!(graph.nodes_count(), 1);
    }

    #[test]
    fn test_node_returns_none_for_missing() {
        let graph = TestGraph::new();
        let missing = Names::new().intern("missing");
        assert_eq!(graph.node(missing), None);
        assert!(!graph.contains_node(missing));
    }

    #[test]
    fn test_parallel_edges_and_self_loops_are_kept() {
        let mut names = Names::new();
        let mut graph = TestGraph::new();
        let a = names.intern("a");
        let b = names.intern("b");
        graph.add_node(a, TestNode { value: 1 });
        graph.add_node(b, TestNode { value: 2 });

        graph.add_edge(a, b, TestEdge { weight: 1 });
        graph.add_edge(a, b, TestEdge { weight: 2 });
        graph.add_edge(b, a, TestEdge { weight: 3 });
        graph.add_edge(a, a, TestEdge { weight: 4 });

        let edges: Vec<(Id, Id, i32)> = graph
            .edges()
            .map(|(source, target, edge)| (source, target, edge.weight))
            .collect();
        assert_eq!(
            edges,
            vec![(a, b, 1), (a, b, 2), (b, a, 3), (a, a, 4)],
            "edges should come back in insertion order"
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not exist")]
    fn test_edge_to_missing_node_panics_in_debug() {
        let mut names = Names::new();
        let only = names.intern("only");
        let ghost = names.intern("ghost");
        let mut graph = TestGraph::new();
        graph.add_node(only, TestNode { value: 1 });
        graph.add_edge(only, ghost, TestEdge { weight: 1 });
    }
}
