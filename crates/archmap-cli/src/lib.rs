//! CLI logic for the Archmap diagram tool.
//!
//! This module contains the core CLI logic: reading a schema document,
//! generating the selected views and writing their D2 scripts and SVG
//! renderings.

pub mod error_adapter;

mod args;
mod config;
mod document;
mod error;

pub use args::{Args, ViewSelection};
pub use config::ConfigError;
pub use error::CliError;

use std::{fs, path::Path, time::Duration};

use log::{debug, info};

use archmap::{
    D2Target, RenderContext, View,
    format::FormattedSchema,
    schema::{Schema, Service},
};

use document::SchemaDocument;

/// One diagram to produce.
#[derive(Debug, Clone, Copy)]
enum Job<'a> {
    Overview,
    Service(&'a Service),
    System(&'a str),
}

impl Job<'_> {
    fn view(&self) -> View {
        match self {
            Job::Overview => View::Overview,
            Job::Service(_) => View::ServiceRelationships,
            Job::System(_) => View::System,
        }
    }

    /// Output file name without extension.
    fn file_stem(&self) -> String {
        match self {
            Job::Overview => "overview".to_string(),
            Job::Service(service) => format!("service-{}", slug(service.name())),
            Job::System(system) => format!("system-{}", slug(system)),
        }
    }
}

/// Lowercases `name` and collapses every run of other characters into `-`.
fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "unnamed".to_string()
    } else {
        slug.to_string()
    }
}

/// Expands the view selection into the list of diagrams to produce.
fn plan<'a>(args: &Args, schema: &'a Schema) -> Result<Vec<Job<'a>>, CliError> {
    let mut jobs = Vec::new();

    if matches!(args.view, ViewSelection::Overview | ViewSelection::All) {
        jobs.push(Job::Overview);
    }

    if matches!(args.view, ViewSelection::Service | ViewSelection::All) {
        match &args.service {
            Some(name) => {
                let service = schema
                    .service(name)
                    .ok_or_else(|| CliError::UnknownService(name.clone()))?;
                jobs.push(Job::Service(service));
            }
            None => jobs.extend(schema.services().iter().map(Job::Service)),
        }
    }

    if matches!(args.view, ViewSelection::System | ViewSelection::All) {
        let systems = schema.systems();
        match &args.system {
            Some(name) => {
                let system = systems
                    .into_iter()
                    .find(|system| *system == name.as_str())
                    .ok_or_else(|| CliError::UnknownSystem(name.clone()))?;
                jobs.push(Job::System(system));
            }
            None => jobs.extend(systems.into_iter().map(Job::System)),
        }
    }

    Ok(jobs)
}

/// Run the Archmap CLI application
///
/// This function reads the schema document, generates every selected view
/// and writes `<name>.d2` scripts, plus `<name>.svg` renderings unless
/// `--script-only` is set, into the output directory.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Schema document errors
/// - Unknown `--service` or `--system` names
/// - Script generation and rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_dir = args.output_dir,
        view:? = args.view;
        "Processing schema"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let target = D2Target::new(app_config)?;

    let document = SchemaDocument::load(&args.input)?;
    let title = document.title().to_string();
    let (schema, edges) = document.into_schema();

    let jobs = plan(args, &schema)?;
    debug!(jobs = jobs.len(); "Diagrams planned");

    let ctx = match args.timeout {
        Some(seconds) => RenderContext::background().with_timeout(Duration::from_secs(seconds)),
        None => RenderContext::background(),
    };

    let output_dir = Path::new(&args.output_dir);
    fs::create_dir_all(output_dir)?;

    for job in &jobs {
        let script = match job {
            Job::Overview => target.generate_overview_diagram_script(&schema, &edges, &title)?,
            Job::Service(service) => target.generate_service_relationships_diagram_script(
                service,
                schema.services(),
                &edges,
            )?,
            Job::System(system) => target.generate_system_diagram_script(&schema, system, &edges)?,
        };

        let stem = job.file_stem();
        let script_path = output_dir.join(format!("{stem}.d2"));
        fs::write(&script_path, &script)?;
        info!(view:? = job.view(), output_file = script_path.display().to_string(); "Script written");

        if args.script_only {
            continue;
        }

        let formatted = FormattedSchema::new(target.format_type().clone(), script);
        let svg = target.render_schema(Some(&ctx), &formatted)?;
        let svg_path = output_dir.join(format!("{stem}.svg"));
        fs::write(&svg_path, svg)?;
        info!(view:? = job.view(), output_file = svg_path.display().to_string(); "SVG exported successfully");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use archmap::schema::Info;

    use super::*;

    fn args(view: ViewSelection) -> Args {
        Args {
            input: "schema.toml".to_string(),
            view,
            service: None,
            system: None,
            output_dir: ".".to_string(),
            script_only: true,
            timeout: None,
            config: None,
            log_level: "off".to_string(),
        }
    }

    fn schema() -> Schema {
        Schema::new(vec![
            Service::new(Info::new("Orders").with_system("Commerce")),
            Service::new(Info::new("Payments").with_system("Finance")),
            Service::new(Info::new("Shipping").with_system("Commerce")),
        ])
    }

    fn stems(jobs: &[Job<'_>]) -> Vec<String> {
        jobs.iter().map(Job::file_stem).collect()
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Orders"), "orders");
        assert_eq!(slug("Order  Service (v2)"), "order-service-v2");
        assert_eq!(slug("--"), "unnamed");
    }

    #[test]
    fn test_plan_all() {
        let schema = schema();

        let jobs = plan(&args(ViewSelection::All), &schema).unwrap();

        assert_eq!(
            stems(&jobs),
            vec![
                "overview",
                "service-orders",
                "service-payments",
                "service-shipping",
                "system-commerce",
                "system-finance",
            ]
        );
    }

    #[test]
    fn test_plan_single_service() {
        let schema = schema();
        let mut args = args(ViewSelection::Service);
        args.service = Some("Payments".to_string());

        let jobs = plan(&args, &schema).unwrap();

        assert_eq!(stems(&jobs), vec!["service-payments"]);
    }

    #[test]
    fn test_plan_unknown_names() {
        let schema = schema();

        let mut service_args = args(ViewSelection::Service);
        service_args.service = Some("Ledger".to_string());
        assert!(matches!(
            plan(&service_args, &schema),
            Err(CliError::UnknownService(name)) if name == "Ledger"
        ));

        let mut system_args = args(ViewSelection::System);
        system_args.system = Some("Marketing".to_string());
        assert!(matches!(
            plan(&system_args, &schema),
            Err(CliError::UnknownSystem(name)) if name == "Marketing"
        ));
    }
}
