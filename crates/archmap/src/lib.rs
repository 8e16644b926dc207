//! Archmap - Architecture diagrams from a normalized service schema.
//!
//! Builds overview, service-relationship and system diagrams as D2 scripts
//! and renders them to SVG through the external `d2` compiler. Script
//! generation is pure and deterministic; rendering is the only operation
//! that performs I/O.

pub mod config;
pub mod render;

mod context;
mod emit;
mod error;
mod structure;

pub use archmap_core::{format, identifier, layout, schema};

pub use context::RenderContext;
pub use emit::TemplateError;
pub use error::ArchmapError;
pub use render::{Compiler, D2Cli, RenderError};
pub use structure::View;

use log::{debug, info};

use archmap_core::{
    format::{Capabilities, FormatOptions, FormatType, FormattedSchema},
    schema::{AsyncEdge, Schema, Service},
};

use config::AppConfig;
use emit::ScriptEmitter;
use render::RenderGateway;
use structure::DiagramGraph;

/// The D2 documentation target.
///
/// Holds the compiled templates for every [`View`], the render configuration
/// and the [`Compiler`] used for rendering. A target is immutable once built
/// and can be shared between threads.
///
/// # Examples
///
/// ```rust,no_run
/// use archmap::{
///     D2Target, RenderContext,
///     config::AppConfig,
///     schema::{ChannelEdge, Info, Schema, Service},
/// };
///
/// let target = D2Target::new(AppConfig::default()).expect("valid config");
///
/// let schema = Schema::new(vec![Service::new(Info::new("Billing").with_system("Payments"))]);
/// let edges: Vec<ChannelEdge> = Vec::new();
///
/// // Script only, no compiler involved
/// let script = target
///     .generate_overview_diagram_script(&schema, &edges, "Platform")
///     .expect("Failed to generate");
///
/// // Script rendered to SVG by `d2`
/// let ctx = RenderContext::background();
/// let svg = target
///     .generate_overview_diagram(Some(&ctx), &schema, &edges, "Platform")
///     .expect("Failed to render");
/// ```
pub struct D2Target {
    config: AppConfig,
    emitter: ScriptEmitter,
    gateway: RenderGateway,
}

impl D2Target {
    /// Create a target that renders with the `d2` executable.
    ///
    /// # Arguments
    ///
    /// * `config` - Render options forwarded to the compiler
    ///
    /// # Errors
    ///
    /// Returns [`ArchmapError::Config`] for malformed options.
    pub fn new(config: AppConfig) -> Result<Self, ArchmapError> {
        let compiler = D2Cli::new(config.render());
        Self::with_compiler(config, compiler)
    }

    /// Create a target that renders with a custom [`Compiler`].
    ///
    /// # Errors
    ///
    /// Returns [`ArchmapError::Config`] for malformed options, or
    /// [`ArchmapError::Template`] if a built-in template fails to compile.
    pub fn with_compiler(
        config: AppConfig,
        compiler: impl Compiler + 'static,
    ) -> Result<Self, ArchmapError> {
        config.validate().map_err(ArchmapError::Config)?;
        let emitter = ScriptEmitter::new()?;
        let gateway = RenderGateway::new(FormatType::d2(), Box::new(compiler));

        debug!(
            layout:? = config.render().layout(),
            theme = config.render().theme();
            "D2 target ready"
        );

        Ok(Self {
            config,
            emitter,
            gateway,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The script format this target produces and renders.
    pub fn format_type(&self) -> &FormatType {
        self.gateway.format_type()
    }

    /// Reports which documentation operations this target takes part in.
    ///
    /// `format` is advertised although [`format_schema`](Self::format_schema)
    /// is not implemented; use the view-specific generators instead.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            format: true,
            render: true,
        }
    }

    /// Generic whole-schema formatting. Not supported by this target.
    ///
    /// # Errors
    ///
    /// Always returns [`ArchmapError::FormatSchemaNotSupported`], whatever
    /// the inputs.
    pub fn format_schema(
        &self,
        _ctx: Option<&RenderContext>,
        _schema: &Schema,
        _options: &FormatOptions,
    ) -> Result<FormattedSchema, ArchmapError> {
        Err(ArchmapError::FormatSchemaNotSupported)
    }

    /// Render a D2 script to SVG.
    ///
    /// # Errors
    ///
    /// - [`ArchmapError::ContextRequired`] if `ctx` is `None`.
    /// - [`ArchmapError::UnsupportedFormatType`] if `formatted` is not D2.
    /// - [`ArchmapError::Cancelled`] or [`ArchmapError::DeadlineExceeded`]
    ///   when the context ends first.
    /// - [`ArchmapError::CompileFailure`] with the compiler diagnostic when
    ///   the script is rejected.
    /// - [`ArchmapError::Io`] if the compiler cannot be run.
    pub fn render_schema(
        &self,
        ctx: Option<&RenderContext>,
        formatted: &FormattedSchema,
    ) -> Result<Vec<u8>, ArchmapError> {
        self.gateway.render(ctx, formatted)
    }

    /// Generate the D2 script of every service grouped by system.
    ///
    /// # Arguments
    ///
    /// * `schema` - Services to draw
    /// * `edges` - Asynchronous message flows
    /// * `label` - Diagram title; blank falls back to "Architecture Overview"
    ///
    /// # Errors
    ///
    /// Returns [`ArchmapError::Template`] if template expansion fails.
    pub fn generate_overview_diagram_script<E: AsyncEdge>(
        &self,
        schema: &Schema,
        edges: &[E],
        label: &str,
    ) -> Result<Vec<u8>, ArchmapError> {
        let graph = structure::overview::build(schema, edges, label);
        self.emit(&graph)
    }

    /// Generate the D2 script of `service` and its direct neighbors.
    ///
    /// `services` resolves relationship participants; anything not found
    /// there is drawn as external.
    ///
    /// # Errors
    ///
    /// Returns [`ArchmapError::Template`] if template expansion fails.
    pub fn generate_service_relationships_diagram_script<E: AsyncEdge>(
        &self,
        service: &Service,
        services: &[Service],
        edges: &[E],
    ) -> Result<Vec<u8>, ArchmapError> {
        let graph = structure::service::build(service, services, edges);
        self.emit(&graph)
    }

    /// Generate the D2 script of one system and everything it touches.
    ///
    /// An unknown system yields a diagram holding only its empty cluster.
    ///
    /// # Errors
    ///
    /// Returns [`ArchmapError::Template`] if template expansion fails.
    pub fn generate_system_diagram_script<E: AsyncEdge>(
        &self,
        schema: &Schema,
        system: &str,
        edges: &[E],
    ) -> Result<Vec<u8>, ArchmapError> {
        let graph = structure::system::build(schema, system, edges);
        self.emit(&graph)
    }

    /// Generate and render the overview diagram.
    ///
    /// # Errors
    ///
    /// See [`generate_overview_diagram_script`](Self::generate_overview_diagram_script)
    /// and [`render_schema`](Self::render_schema).
    pub fn generate_overview_diagram<E: AsyncEdge>(
        &self,
        ctx: Option<&RenderContext>,
        schema: &Schema,
        edges: &[E],
        label: &str,
    ) -> Result<Vec<u8>, ArchmapError> {
        let script = self.generate_overview_diagram_script(schema, edges, label)?;
        self.render_script(ctx, script)
    }

    /// Generate and render the service-relationships diagram.
    ///
    /// # Errors
    ///
    /// See [`generate_service_relationships_diagram_script`](Self::generate_service_relationships_diagram_script)
    /// and [`render_schema`](Self::render_schema).
    pub fn generate_service_relationships_diagram<E: AsyncEdge>(
        &self,
        ctx: Option<&RenderContext>,
        service: &Service,
        services: &[Service],
        edges: &[E],
    ) -> Result<Vec<u8>, ArchmapError> {
        let script = self.generate_service_relationships_diagram_script(service, services, edges)?;
        self.render_script(ctx, script)
    }

    /// Generate and render the system diagram.
    ///
    /// # Errors
    ///
    /// See [`generate_system_diagram_script`](Self::generate_system_diagram_script)
    /// and [`render_schema`](Self::render_schema).
    pub fn generate_system_diagram<E: AsyncEdge>(
        &self,
        ctx: Option<&RenderContext>,
        schema: &Schema,
        system: &str,
        edges: &[E],
    ) -> Result<Vec<u8>, ArchmapError> {
        let script = self.generate_system_diagram_script(schema, system, edges)?;
        self.render_script(ctx, script)
    }

    fn emit(&self, graph: &DiagramGraph) -> Result<Vec<u8>, ArchmapError> {
        info!(
            view:? = graph.view(),
            nodes = graph.nodes_count(),
            edges = graph.edges_count();
            "Generating script"
        );
        Ok(self.emitter.emit(graph)?)
    }

    fn render_script(
        &self,
        ctx: Option<&RenderContext>,
        script: Vec<u8>,
    ) -> Result<Vec<u8>, ArchmapError> {
        let formatted = FormattedSchema::new(self.format_type().clone(), script);
        self.render_schema(ctx, &formatted)
    }
}
