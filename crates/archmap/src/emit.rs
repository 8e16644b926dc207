//! D2 script emission.
//!
//! The [`ScriptEmitter`] owns one precompiled [`ViewTemplate`] per
//! [`View`]. Emission walks a [`DiagramGraph`] in order and expands fragment
//! templates for clusters, nodes and edges, then frames them with the
//! view's document template. It never decides what is in the graph.

mod d2;
mod sources;
mod template;

pub use template::TemplateError;

use log::{debug, trace};

use archmap_core::identifier::Id;

use crate::structure::{DiagramGraph, EdgeStyle, NodeKind, View};

use d2::Keys;
use sources::ViewSources;
use template::{Bindings, Template};

/// The compiled templates for one view.
#[derive(Debug, Clone)]
struct ViewTemplate {
    view: View,
    document: Template,
    cluster: Option<Template>,
    service: Template,
    focus: Template,
    external: Template,
    boundary: Template,
    sync_edge: Template,
    async_edge: Template,
}

impl ViewTemplate {
    fn compile(view: View, sources: &ViewSources) -> Result<Self, TemplateError> {
        const DOCUMENT: &[&str] = &["title_key", "title", "clusters", "nodes", "edges"];
        const CLUSTER: &[&str] = &["key", "label"];
        const NODE: &[&str] = &["path"];
        const EDGE: &[&str] = &["source", "target", "label"];

        let cluster = sources
            .cluster
            .map(|source| compile_checked("cluster", source, CLUSTER))
            .transpose()?;

        Ok(Self {
            view,
            document: compile_checked("document", sources.document, DOCUMENT)?,
            cluster,
            service: compile_checked("service", sources.service, NODE)?,
            focus: compile_checked("focus", sources.focus, NODE)?,
            external: compile_checked("external", sources.external, NODE)?,
            boundary: compile_checked("boundary", sources.boundary, NODE)?,
            sync_edge: compile_checked("sync_edge", sources.sync_edge, EDGE)?,
            async_edge: compile_checked("async_edge", sources.async_edge, EDGE)?,
        })
    }

    fn node_template(&self, kind: NodeKind) -> &Template {
        match kind {
            NodeKind::Service => &self.service,
            NodeKind::Focus => &self.focus,
            NodeKind::External => &self.external,
            NodeKind::Boundary => &self.boundary,
        }
    }

    fn render(&self, graph: &DiagramGraph) -> Result<String, TemplateError> {
        let keys = match self.cluster {
            Some(_) => Keys::new(graph),
            None => Keys::new(graph).without_clusters(),
        };

        let mut clusters = String::new();
        if let Some(template) = &self.cluster {
            for cluster in graph.clusters() {
                let label = d2::quote(graph.name(cluster));
                let bindings = Bindings::new()
                    .bind("key", keys.cluster(cluster))
                    .bind("label", &label);
                template.render_into(&mut clusters, &bindings)?;
            }
        }

        let mut nodes = String::new();
        for node in graph.nodes() {
            let path = keys.node_path(graph, node);
            self.node_template(node.kind())
                .render_into(&mut nodes, &Bindings::new().bind("path", &path))?;
        }

        let mut edges = String::new();
        for (source, target, relation) in graph.edges() {
            let source = endpoint(graph, &keys, source);
            let target = endpoint(graph, &keys, target);
            let label = d2::quote(graph.name(relation.label()));
            let template = match relation.style() {
                EdgeStyle::Sync => &self.sync_edge,
                EdgeStyle::Async => &self.async_edge,
            };
            let bindings = Bindings::new()
                .bind("source", &source)
                .bind("target", &target)
                .bind("label", &label);
            template.render_into(&mut edges, &bindings)?;
        }

        let title_key = keys.title();
        let title = d2::quote(graph.title());
        let bindings = Bindings::new()
            .bind("title_key", &title_key)
            .bind("title", &title)
            .bind("clusters", &clusters)
            .bind("nodes", &nodes)
            .bind("edges", &edges);
        self.document.render(&bindings)
    }
}

fn endpoint(graph: &DiagramGraph, keys: &Keys, id: Id) -> String {
    graph
        .node(id)
        .map_or_else(|| d2::quote(graph.name(id)), |node| keys.node_path(graph, node))
}

/// Compiles a template and rejects slots the emitter never binds, so that a
/// broken template fails at construction instead of at emission.
fn compile_checked(
    name: &'static str,
    source: &str,
    provided: &[&str],
) -> Result<Template, TemplateError> {
    let template = Template::compile(name, source)?;
    if let Some(slot) = template.slots().find(|slot| !provided.contains(slot)) {
        return Err(TemplateError::MissingBinding {
            template: template.name(),
            slot: slot.to_string(),
        });
    }
    Ok(template)
}

/// Serializes diagram graphs into D2 scripts.
#[derive(Debug, Clone)]
pub(crate) struct ScriptEmitter {
    overview: ViewTemplate,
    service_relationships: ViewTemplate,
    system: ViewTemplate,
}

impl ScriptEmitter {
    /// Compiles the templates of every view.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Syntax`] if a built-in template is malformed.
    pub(crate) fn new() -> Result<Self, TemplateError> {
        Ok(Self {
            overview: ViewTemplate::compile(View::Overview, &sources::OVERVIEW)?,
            service_relationships: ViewTemplate::compile(
                View::ServiceRelationships,
                &sources::SERVICE_RELATIONSHIPS,
            )?,
            system: ViewTemplate::compile(View::System, &sources::SYSTEM)?,
        })
    }

    fn template(&self, view: View) -> &ViewTemplate {
        match view {
            View::Overview => &self.overview,
            View::ServiceRelationships => &self.service_relationships,
            View::System => &self.system,
        }
    }

    /// Emits the D2 script for `graph` using its view's templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingBinding`] if a template references a
    /// slot the emitter does not provide.
    pub(crate) fn emit(&self, graph: &DiagramGraph) -> Result<Vec<u8>, TemplateError> {
        let template = self.template(graph.view());
        debug_assert_eq!(template.view, graph.view());

        let script = template.render(graph)?;
        debug!(view:? = graph.view(), bytes = script.len(); "Script emitted");
        trace!(script = script.as_str(); "Emitted script");

        Ok(script.into_bytes())
    }
}
