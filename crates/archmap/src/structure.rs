//! Abstract diagram graphs, one per view.
//!
//! A [`DiagramGraph`] is the renderer-agnostic model sitting between the
//! schema and the script emitter. It records which nodes exist, which system
//! cluster each one belongs to, and the ordered list of labeled edges. All
//! graph decisions (membership, direction, labels, clustering) are made
//! here so that emission is pure serialization.
//!
//! The builders live in one submodule per [`View`]:
//! - [`overview`]: every service grouped by system
//! - [`service`]: the one-hop neighborhood of a focal service
//! - [`system`]: one system's services plus their boundary neighbors

pub(crate) mod overview;
pub(crate) mod service;
pub(crate) mod system;

mod graph_base;

use std::{fmt, str::FromStr};

use indexmap::IndexSet;

use archmap_core::{
    identifier::{Id, Names},
    schema::Relationship,
};

use graph_base::GraphInternal;

/// The diagram shapes Archmap produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Every service, grouped by owning system.
    Overview,
    /// One service and its direct neighbors.
    ServiceRelationships,
    /// One system and everything it touches.
    System,
}

impl View {
    /// All views, in the order they are usually generated.
    pub const ALL: [View; 3] = [View::Overview, View::ServiceRelationships, View::System];
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overview" => Ok(View::Overview),
            "service" | "service-relationships" => Ok(View::ServiceRelationships),
            "system" => Ok(View::System),
            _ => Err(format!("unknown view `{s}`")),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Overview => write!(f, "overview"),
            View::ServiceRelationships => write!(f, "service-relationships"),
            View::System => write!(f, "system"),
        }
    }
}

/// How a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    /// A service from the schema.
    Service,
    /// The service a service-relationships view is centered on.
    Focus,
    /// A participant that is not a known service.
    External,
    /// A known service outside the system being diagrammed.
    Boundary,
}

/// A node of a diagram graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    id: Id,
    kind: NodeKind,
    cluster: Option<Id>,
}

impl Node {
    pub(crate) fn new(id: Id, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            cluster: None,
        }
    }

    /// Places the node inside a system cluster.
    pub(crate) fn in_cluster(mut self, cluster: Option<Id>) -> Self {
        self.cluster = cluster;
        self
    }

    pub(crate) fn id(&self) -> Id {
        self.id
    }

    pub(crate) fn kind(&self) -> NodeKind {
        self.kind
    }

    pub(crate) fn cluster(&self) -> Option<Id> {
        self.cluster
    }
}

/// Whether an edge is a synchronous dependency or a message flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeStyle {
    Sync,
    Async,
}

/// The value carried by a diagram edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Relation {
    label: Id,
    style: EdgeStyle,
}

impl Relation {
    pub(crate) fn label(&self) -> Id {
        self.label
    }

    pub(crate) fn style(&self) -> EdgeStyle {
        self.style
    }
}

/// The label of a synchronous edge: `action` or `action (technology)`.
fn sync_label(relationship: &Relationship) -> String {
    match relationship.technology() {
        Some(technology) => format!("{} ({technology})", relationship.action()),
        None => relationship.action().to_string(),
    }
}

/// The abstract graph for one view, built fresh for each request.
///
/// The graph owns the table its [`Id`]s are interned in, so every name it
/// mentions is released together with it.
#[derive(Debug)]
pub(crate) struct DiagramGraph {
    view: View,
    title: String,
    names: Names,
    clusters: IndexSet<Id>,
    graph: GraphInternal<Node, Relation>,
}

impl DiagramGraph {
    pub(crate) fn new(view: View, title: impl Into<String>) -> Self {
        Self {
            view,
            title: title.into(),
            names: Names::new(),
            clusters: IndexSet::new(),
            graph: GraphInternal::new(),
        }
    }

    pub(crate) fn view(&self) -> View {
        self.view
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    /// Interns `name` in this graph's table.
    pub(crate) fn intern(&mut self, name: &str) -> Id {
        self.names.intern(name)
    }

    /// Returns the name behind an id produced by [`intern`](Self::intern).
    ///
    /// # Panics
    ///
    /// Panics if `id` was interned by another graph.
    pub(crate) fn name(&self, id: Id) -> &str {
        self.names
            .resolve(id)
            .expect("Id should be interned by this graph")
    }

    /// Declared system clusters in first-declaration order.
    pub(crate) fn clusters(&self) -> impl Iterator<Item = Id> + '_ {
        self.clusters.iter().copied()
    }

    pub(crate) fn node(&self, id: Id) -> Option<Node> {
        self.graph.node(id)
    }

    pub(crate) fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.graph.nodes()
    }

    pub(crate) fn nodes_count(&self) -> usize {
        self.graph.nodes_count()
    }

    /// Edges as `(source, target, relation)` in insertion order.
    pub(crate) fn edges(&self) -> impl Iterator<Item = (Id, Id, Relation)> + '_ {
        self.graph.edges()
    }

    pub(crate) fn edges_count(&self) -> usize {
        self.graph.edges_count()
    }

    pub(crate) fn add_cluster(&mut self, cluster: Id) {
        self.clusters.insert(cluster);
    }

    /// Adds a node; a node already present keeps its kind and cluster.
    pub(crate) fn add_node(&mut self, node: Node) {
        if let Some(cluster) = node.cluster() {
            self.add_cluster(cluster);
        }
        self.graph.add_node(node.id(), node);
    }

    /// Adds a synchronous edge for `relationship`.
    pub(crate) fn add_sync(&mut self, source: Id, target: Id, relationship: &Relationship) {
        let label = self.intern(&sync_label(relationship));
        self.add_relation(source, target, label, EdgeStyle::Sync);
    }

    /// Adds an asynchronous edge labeled with a message flow's display label.
    pub(crate) fn add_async(&mut self, source: Id, target: Id, label: &str) {
        let label = self.intern(label);
        self.add_relation(source, target, label, EdgeStyle::Async);
    }

    fn add_relation(&mut self, source: Id, target: Id, label: Id, style: EdgeStyle) {
        self.graph
            .add_edge(source, target, Relation { label, style });
    }
}

#[cfg(test)]
impl DiagramGraph {
    /// The node named `name`, without interning it.
    pub(crate) fn node_named(&self, name: &str) -> Option<Node> {
        self.names.get(name).and_then(|id| self.node(id))
    }

    pub(crate) fn contains_named(&self, name: &str) -> bool {
        self.node_named(name).is_some()
    }

    pub(crate) fn cluster_names(&self) -> Vec<String> {
        self.clusters().map(|id| self.name(id).to_string()).collect()
    }

    /// Nodes as `(name, kind, cluster name)` in insertion order.
    pub(crate) fn describe_nodes(&self) -> Vec<(String, NodeKind, Option<String>)> {
        self.nodes()
            .map(|node| {
                (
                    self.name(node.id()).to_string(),
                    node.kind(),
                    node.cluster().map(|id| self.name(id).to_string()),
                )
            })
            .collect()
    }

    /// Edges rendered as `source -> target: label` (async edges use `~>`).
    pub(crate) fn describe_edges(&self) -> Vec<String> {
        self.edges()
            .map(|(source, target, relation)| {
                let arrow = match relation.style() {
                    EdgeStyle::Sync => "->",
                    EdgeStyle::Async => "~>",
                };
                format!(
                    "{} {arrow} {}: {}",
                    self.name(source),
                    self.name(target),
                    self.name(relation.label())
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use archmap_core::schema::Action;

    use super::*;

    #[test]
    fn test_view_round_trips_through_str() {
        for view in View::ALL {
            assert_eq!(view.to_string().parse(), Ok(view));
        }
        assert_eq!("service".parse(), Ok(View::ServiceRelationships));
        assert!("context".parse::<View>().is_err());
    }

    #[test]
    fn test_sync_label_with_and_without_technology() {
        let mut graph = DiagramGraph::new(View::Overview, "t");
        let app = graph.intern("app");
        let db = graph.intern("db");
        graph.add_node(Node::new(app, NodeKind::Service));
        graph.add_node(Node::new(db, NodeKind::External));

        graph.add_sync(app, db, &Relationship::new("db", Action::Reads));
        graph.add_sync(app, db, &Relationship::new("db", Action::Reads).with_technology("SQL"));

        assert_eq!(
            graph.describe_edges(),
            vec!["app -> db: reads", "app -> db: reads (SQL)"]
        );
        assert!(graph.edges().all(|(_, _, r)| r.style() == EdgeStyle::Sync));
    }

    #[test]
    fn test_async_label() {
        let mut graph = DiagramGraph::new(View::Overview, "t");
        let orders = graph.intern("orders");
        graph.add_node(Node::new(orders, NodeKind::Service));

        graph.add_async(orders, orders, "orders.created");

        assert_eq!(graph.describe_edges(), vec!["orders ~> orders: orders.created"]);
    }

    #[test]
    fn test_node_cluster_is_declared() {
        let mut graph = DiagramGraph::new(View::Overview, "t");
        let core = graph.intern("Core");
        let api = graph.intern("api");

        graph.add_node(Node::new(api, NodeKind::Service).in_cluster(Some(core)));
        graph.add_node(Node::new(api, NodeKind::External));

        assert_eq!(graph.cluster_names(), vec!["Core"]);
        assert_eq!(graph.nodes_count(), 1);
        assert_eq!(
            graph.node_named("api").map(|node| node.kind()),
            Some(NodeKind::Service)
        );
    }

    #[test]
    fn test_names_are_scoped_to_the_graph() {
        let mut first = DiagramGraph::new(View::Overview, "t");
        for idx in 0..50 {
            first.intern(&format!("service-{idx}"));
        }

        let mut second = DiagramGraph::new(View::Overview, "t");
        let only = second.intern("only");

        assert_eq!(second.name(only), "only");
        assert!(second.node_named("service-0").is_none());
        assert_eq!(second.names.len(), 1);
    }
}
