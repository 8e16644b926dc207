//! The render gateway: the single I/O boundary to the diagram compiler.
//!
//! The gateway checks preconditions (a context is present, the script is
//! written in the supported format) and hands the script to a [`Compiler`].
//! [`D2Cli`] drives the `d2` executable; tests substitute their own
//! [`Compiler`] so the rest of the engine never needs `d2` installed.

mod cli;

pub use cli::D2Cli;

use std::io;

use log::{debug, info, warn};
use thiserror::Error;

use archmap_core::format::{FormatType, FormattedSchema};

use crate::{context::RenderContext, error::ArchmapError};

/// Errors a [`Compiler`] can report.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The compiler rejected the script; holds its diagnostic output.
    #[error("compile failure: {diagnostic}")]
    Compile { diagnostic: String },

    #[error("render cancelled")]
    Cancelled,

    #[error("render deadline exceeded")]
    DeadlineExceeded,

    /// The compiler could not be run or its output could not be read.
    #[error("compiler I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Turns a diagram script into image bytes.
///
/// Implementations must honor `ctx`: stop work and return
/// [`RenderError::Cancelled`] or [`RenderError::DeadlineExceeded`] once the
/// context says so. The target may be shared between threads, hence the
/// `Send + Sync` bound.
pub trait Compiler: Send + Sync {
    /// Compiles `script` and returns the rendered image.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Compile`] when the script is invalid, a
    /// context error when interrupted, and [`RenderError::Io`] when the
    /// compiler itself cannot be run.
    fn compile(&self, ctx: &RenderContext, script: &[u8]) -> Result<Vec<u8>, RenderError>;
}

/// Checks render preconditions and forwards scripts to a [`Compiler`].
pub(crate) struct RenderGateway {
    format_type: FormatType,
    compiler: Box<dyn Compiler>,
}

impl RenderGateway {
    pub(crate) fn new(format_type: FormatType, compiler: Box<dyn Compiler>) -> Self {
        Self {
            format_type,
            compiler,
        }
    }

    pub(crate) fn format_type(&self) -> &FormatType {
        &self.format_type
    }

    /// Renders `formatted` and returns the compiler's bytes untouched.
    ///
    /// # Errors
    ///
    /// See [`D2Target::render_schema`](crate::D2Target::render_schema).
    pub(crate) fn render(
        &self,
        ctx: Option<&RenderContext>,
        formatted: &FormattedSchema,
    ) -> Result<Vec<u8>, ArchmapError> {
        let ctx = ctx.ok_or(ArchmapError::ContextRequired)?;

        if formatted.format_type() != &self.format_type {
            warn!(
                received = formatted.format_type().as_str(),
                expected = self.format_type.as_str();
                "Rejecting script in unsupported format"
            );
            return Err(ArchmapError::UnsupportedFormatType {
                received: formatted.format_type().clone(),
                expected: self.format_type.clone(),
            });
        }

        ctx.check()?;

        debug!(bytes = formatted.data().len(); "Compiling script");
        let image = self.compiler.compile(ctx, formatted.data())?;
        info!(bytes = image.len(); "Script rendered");

        Ok(image)
    }
}
