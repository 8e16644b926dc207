//! Error adapter for converting CliError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every error gets a
//! stable code; errors with an obvious remedy also get help text.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use archmap::ArchmapError;

use crate::error::CliError;

/// Adapter rendering a [`CliError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl ErrorAdapter<'_> {
    fn code_str(&self) -> &'static str {
        match self.0 {
            CliError::Archmap(err) => match err {
                ArchmapError::ContextRequired => "archmap::render",
                ArchmapError::UnsupportedFormatType { .. }
                | ArchmapError::FormatSchemaNotSupported => "archmap::format",
                ArchmapError::CompileFailure { .. } => "archmap::compile",
                ArchmapError::Cancelled => "archmap::cancelled",
                ArchmapError::DeadlineExceeded => "archmap::deadline",
                ArchmapError::Template(_) => "archmap::template",
                ArchmapError::Config(_) => "archmap::config",
                ArchmapError::Io(_) => "archmap::compiler",
            },
            CliError::Config(_) => "archmap::config",
            CliError::Schema(_) => "archmap::schema",
            CliError::UnknownService(_) | CliError::UnknownSystem(_) => "archmap::selection",
            CliError::Io(_) => "archmap::io",
        }
    }

    fn help_str(&self) -> Option<&'static str> {
        match self.0 {
            CliError::Archmap(ArchmapError::CompileFailure { .. }) => {
                Some("rerun with --script-only to inspect the generated D2 script")
            }
            CliError::Archmap(ArchmapError::DeadlineExceeded) => {
                Some("raise --timeout or simplify the diagram")
            }
            CliError::Archmap(ArchmapError::Io(_)) => Some(
                "check that the d2 executable is installed, or set render.compiler in the configuration",
            ),
            CliError::Archmap(ArchmapError::Config(_)) | CliError::Config(_) => {
                Some("see the [render] table of archmap/config.toml")
            }
            CliError::UnknownService(_) | CliError::UnknownSystem(_) => {
                Some("names are case-sensitive and must appear in the schema document")
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_str()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
