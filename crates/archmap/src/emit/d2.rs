//! D2 lexical helpers.
//!
//! Every key and label is written as a double-quoted D2 string. Inside
//! double quotes only a handful of characters are significant; those are
//! escaped rather than dropped, so ordinary names appear in the script
//! verbatim.
//!
//! Keys the emitter adds itself (the title and the system containers) live
//! under a reserved prefix that no node name in the graph starts with, so
//! they never merge with a service or participant of the same name.

use std::collections::HashMap;

use archmap_core::identifier::Id;

use crate::structure::{DiagramGraph, Node};

/// Preferred prefix for emitter-owned keys.
const RESERVED_PREFIX: &str = "archmap-";

/// Quotes `text` as a D2 double-quoted string.
pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            // `${var}` is substitution syntax inside double quotes.
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// The emitter-owned keys of one script.
#[derive(Debug)]
pub(crate) struct Keys {
    prefix: String,
    clusters: HashMap<Id, String>,
}

impl Keys {
    /// Picks a reserved prefix for `graph` and assigns each cluster its key.
    ///
    /// D2 compares keys case-insensitively, so the prefix is checked against
    /// lowercased node names. Clusters are numbered in declaration order.
    pub(crate) fn new(graph: &DiagramGraph) -> Self {
        let names: Vec<String> = graph
            .nodes()
            .map(|node| graph.name(node.id()).to_lowercase())
            .collect();
        let mut prefix = RESERVED_PREFIX.to_string();
        while names.iter().any(|name| name.starts_with(&prefix)) {
            prefix.push('_');
        }

        let clusters = graph
            .clusters()
            .enumerate()
            .map(|(idx, cluster)| (cluster, quote(&format!("{prefix}cluster-{idx}"))))
            .collect();
        Self { prefix, clusters }
    }

    /// Drops the cluster keys so every node is addressed at the top level.
    pub(crate) fn without_clusters(mut self) -> Self {
        self.clusters.clear();
        self
    }

    /// The quoted key of the title text shape.
    pub(crate) fn title(&self) -> String {
        quote(&format!("{}title", self.prefix))
    }

    /// The quoted key of a cluster container.
    ///
    /// # Panics
    ///
    /// Panics if `cluster` was not declared in the graph these keys were
    /// built for.
    pub(crate) fn cluster(&self, cluster: Id) -> &str {
        self.clusters
            .get(&cluster)
            .expect("Cluster should be declared in the graph")
    }

    /// The D2 reference for a node: `<cluster key>."Node"` or `"Node"`.
    pub(crate) fn node_path(&self, graph: &DiagramGraph, node: Node) -> String {
        let key = quote(graph.name(node.id()));
        match node.cluster().and_then(|cluster| self.clusters.get(&cluster)) {
            Some(cluster) => format!("{cluster}.{key}"),
            None => key,
        }
    }
}
