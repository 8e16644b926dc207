//! Overview view: every service, grouped by owning system.

use log::debug;

use archmap_core::schema::{AsyncEdge, Schema};

use super::{DiagramGraph, Node, NodeKind, View};

/// Title used when the caller supplies a blank label.
pub(crate) const DEFAULT_TITLE: &str = "Architecture Overview";

/// Builds the overview graph.
///
/// Services come first, in schema order, each inside the cluster of its
/// system (ungrouped services stay top-level). Relationship participants and
/// async endpoints that are not services are added as external nodes as they
/// are first referenced. Every relationship and every async edge yields its
/// own edge.
pub(crate) fn build<E: AsyncEdge>(schema: &Schema, edges: &[E], label: &str) -> DiagramGraph {
    let title = if label.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        label
    };
    let mut graph = DiagramGraph::new(View::Overview, title);

    for service in schema.services() {
        let cluster = service.info().system().map(|system| graph.intern(system));
        let id = graph.intern(service.name());
        graph.add_node(Node::new(id, NodeKind::Service).in_cluster(cluster));
    }

    for service in schema.services() {
        let source = graph.intern(service.name());
        for relationship in service.relationships() {
            let target = graph.intern(relationship.participant());
            graph.add_node(Node::new(target, NodeKind::External));
            graph.add_sync(source, target, relationship);
        }
    }

    for edge in edges {
        let source = graph.intern(edge.source());
        let target = graph.intern(edge.destination());
        graph.add_node(Node::new(source, NodeKind::External));
        graph.add_node(Node::new(target, NodeKind::External));
        graph.add_async(source, target, &edge.label());
    }

    debug!(
        nodes = graph.nodes_count(),
        edges = graph.edges_count();
        "Overview graph built"
    );
    graph
}
