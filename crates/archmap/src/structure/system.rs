//! System view: one system's services plus the neighbors they touch.

use std::collections::HashSet;

use log::debug;

use archmap_core::{
    identifier::Id,
    schema::{AsyncEdge, Schema},
};

use super::{DiagramGraph, Node, NodeKind, View};

/// Builds the graph for the system named `system`.
///
/// Members are services whose system equals `system` exactly; they sit
/// inside the system's cluster, which is declared even when empty. Any
/// relationship or async edge with at least one member endpoint is kept, and
/// its other endpoint becomes a boundary node (a known service of another
/// system) or an external node outside the cluster.
pub(crate) fn build<E: AsyncEdge>(schema: &Schema, system: &str, edges: &[E]) -> DiagramGraph {
    let mut graph = DiagramGraph::new(View::System, system);
    let cluster = graph.intern(system);
    let known: HashSet<Id> = schema
        .services()
        .iter()
        .map(|s| graph.intern(s.name()))
        .collect();
    let members: HashSet<Id> = schema
        .services()
        .iter()
        .filter(|s| s.info().system() == Some(system))
        .map(|s| graph.intern(s.name()))
        .collect();
    let outsider = |id: Id| {
        let kind = if known.contains(&id) {
            NodeKind::Boundary
        } else {
            NodeKind::External
        };
        Node::new(id, kind)
    };

    graph.add_cluster(cluster);

    for service in schema.services() {
        let id = graph.intern(service.name());
        if members.contains(&id) {
            graph.add_node(Node::new(id, NodeKind::Service).in_cluster(Some(cluster)));
        }
    }

    for service in schema.services() {
        let source = graph.intern(service.name());
        for relationship in service.relationships() {
            let target = graph.intern(relationship.participant());
            if !members.contains(&source) && !members.contains(&target) {
                continue;
            }
            graph.add_node(outsider(source));
            graph.add_node(outsider(target));
            graph.add_sync(source, target, relationship);
        }
    }

    for edge in edges {
        let source = graph.intern(edge.source());
        let target = graph.intern(edge.destination());
        if !members.contains(&source) && !members.contains(&target) {
            continue;
        }
        graph.add_node(outsider(source));
        graph.add_node(outsider(target));
        graph.add_async(source, target, &edge.label());
    }

    debug!(
        system = system,
        members = members.len(),
        nodes = graph.nodes_count(),
        edges = graph.edges_count();
        "System graph built"
    );
    graph
}
