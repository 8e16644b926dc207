//! Command-line argument definitions for the Archmap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input schema document, which views
//! to generate, where to write them, configuration file selection, and
//! logging verbosity.

use clap::{Parser, ValueEnum};

/// Which diagrams to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewSelection {
    /// The architecture overview
    Overview,
    /// One relationships diagram per service, or only `--service`
    Service,
    /// One diagram per system, or only `--system`
    System,
    /// All of the above
    All,
}

/// Command-line arguments for the Archmap diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input schema document (TOML)
    #[arg(help = "Path to the schema document")]
    pub input: String,

    /// Diagrams to generate
    #[arg(long, value_enum, default_value_t = ViewSelection::All)]
    pub view: ViewSelection,

    /// Restrict service diagrams to this service
    #[arg(long)]
    pub service: Option<String>,

    /// Restrict system diagrams to this system
    #[arg(long)]
    pub system: Option<String>,

    /// Directory receiving the generated files
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Write D2 scripts only, without rendering SVG
    #[arg(long)]
    pub script_only: bool,

    /// Give up rendering after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["archmap", "schema.toml"]);

        assert_eq!(args.input, "schema.toml");
        assert_eq!(args.view, ViewSelection::All);
        assert_eq!(args.output_dir, ".");
        assert!(!args.script_only);
        assert!(args.timeout.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_single_service() {
        let args = Args::parse_from([
            "archmap",
            "schema.toml",
            "--view",
            "service",
            "--service",
            "Orders",
            "--script-only",
        ]);

        assert_eq!(args.view, ViewSelection::Service);
        assert_eq!(args.service.as_deref(), Some("Orders"));
        assert!(args.script_only);
    }

    #[test]
    fn test_unknown_view_rejected() {
        assert!(Args::try_parse_from(["archmap", "schema.toml", "--view", "sequence"]).is_err());
    }
}
