//! Service-relationships view: the one-hop neighborhood of a focal service.

use std::collections::HashSet;

use log::debug;

use archmap_core::{
    identifier::Id,
    schema::{AsyncEdge, Service},
};

use super::{DiagramGraph, Node, NodeKind, View};

/// Builds the relationships graph centered on `focus`.
///
/// Nodes are the focal service, each distinct participant of its
/// relationships and each service it exchanges async edges with. `services`
/// only decides whether a neighbor is drawn as a known service or as an
/// external participant. Edges not touching the focal service are ignored.
pub(crate) fn build<E: AsyncEdge>(focus: &Service, services: &[Service], edges: &[E]) -> DiagramGraph {
    let mut graph = DiagramGraph::new(
        View::ServiceRelationships,
        format!("{} relationships", focus.name()),
    );
    let focus_id = graph.intern(focus.name());
    let known: HashSet<Id> = services.iter().map(|s| graph.intern(s.name())).collect();
    let kind_of = |id: Id| {
        if known.contains(&id) {
            NodeKind::Service
        } else {
            NodeKind::External
        }
    };

    graph.add_node(Node::new(focus_id, NodeKind::Focus));

    for relationship in focus.relationships() {
        let target = graph.intern(relationship.participant());
        graph.add_node(Node::new(target, kind_of(target)));
        graph.add_sync(focus_id, target, relationship);
    }

    for edge in edges {
        let source = graph.intern(edge.source());
        let target = graph.intern(edge.destination());
        if source != focus_id && target != focus_id {
            continue;
        }
        graph.add_node(Node::new(source, kind_of(source)));
        graph.add_node(Node::new(target, kind_of(target)));
        graph.add_async(source, target, &edge.label());
    }

    debug!(
        service = focus.name(),
        nodes = graph.nodes_count(),
        edges = graph.edges_count();
        "Service relationships graph built"
    );
    graph
}

#[cfg(test)]
mod tests {
    use archmap_core::schema::{Action, ChannelEdge, Info, Relationship};

    use super::*;

    fn services() -> Vec<Service> {
        vec![
            Service::new(Info::new("Orders"))
                .with_relationship(Relationship::new("Payments", Action::Requests))
                .with_relationship(Relationship::new("Redis", Action::Reads).with_technology("RESP"))
                .with_relationship(Relationship::new("Payments", Action::Writes)),
            Service::new(Info::new("Payments"))
                .with_relationship(Relationship::new("Ledger", Action::Writes)),
            Service::new(Info::new("Mailer")),
            Service::new(Info::new("Search")),
        ]
    }

    #[test]
    fn test_focus_and_distinct_participants() {
        let all = services();
        let graph = build::<ChannelEdge>(&all[0], &all, &[]);

        assert_eq!(graph.view(), View::ServiceRelationships);
        assert_eq!(graph.title(), "Orders relationships");

        let expected: Vec<(String, NodeKind, Option<String>)> = vec![
            ("Orders".to_string(), NodeKind::Focus, None),
            ("Payments".to_string(), NodeKind::Service, None),
            ("Redis".to_string(), NodeKind::External, None),
        ];
        assert_eq!(graph.describe_nodes(), expected);
        assert_eq!(
            graph.describe_edges(),
            vec![
                "Orders -> Payments: requests",
                "Orders -> Redis: reads (RESP)",
                "Orders -> Payments: writes",
            ]
        );
    }

    #[test]
    fn test_async_edges_in_both_directions() {
        let all = services();
        let edges = vec![
            ChannelEdge::new("Orders", "Mailer", "order.placed"),
            ChannelEdge::new("Search", "Orders", "index.rebuilt"),
            ChannelEdge::new("Payments", "Mailer", "payment.settled"),
        ];

        let graph = build(&all[0], &all, &edges);

        assert_eq!(
            graph.describe_edges(),
            vec![
                "Orders -> Payments: requests",
                "Orders -> Redis: reads (RESP)",
                "Orders -> Payments: writes",
                "Orders ~> Mailer: order.placed",
                "Search ~> Orders: index.rebuilt",
            ]
        );
        assert!(graph.contains_named("Search"));
    }

    #[test]
    fn test_no_transitive_neighbors() {
        let all = services();
        let graph = build::<ChannelEdge>(&all[0], &all, &[]);

        assert!(!graph.contains_named("Ledger"));
    }

    #[test]
    fn test_isolated_service() {
        let all = services();
        let graph = build::<ChannelEdge>(&all[2], &all, &[]);

        assert_eq!(graph.nodes_count(), 1);
        assert_eq!(graph.edges_count(), 0);
        assert_eq!(graph.clusters().count(), 0);
    }

    #[test]
    fn test_self_relationship_keeps_focus_kind() {
        let focus = Service::new(Info::new("Cron"))
            .with_relationship(Relationship::new("Cron", Action::Sends));
        let graph = build::<ChannelEdge>(&focus, std::slice::from_ref(&focus), &[]);

        assert_eq!(graph.nodes_count(), 1);
        assert_eq!(
            graph.node_named("Cron").map(|node| node.kind()),
            Some(NodeKind::Focus)
        );
        assert_eq!(graph.describe_edges(), vec!["Cron -> Cron: sends"]);
    }
}
