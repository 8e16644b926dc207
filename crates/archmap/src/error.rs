//! Error types for Archmap operations.
//!
//! This module provides the main error type [`ArchmapError`] returned by
//! every [`D2Target`](crate::D2Target) operation.

use std::io;

use thiserror::Error;

use archmap_core::format::FormatType;

use crate::{emit::TemplateError, render::RenderError};

/// The main error type for Archmap operations.
///
/// Script generation only ever fails with [`ArchmapError::Template`]. The
/// remaining variants come from rendering: precondition failures
/// (`ContextRequired`, `UnsupportedFormatType`), context effects
/// (`Cancelled`, `DeadlineExceeded`), and the compiler's own verdict
/// (`CompileFailure`).
#[derive(Debug, Error)]
pub enum ArchmapError {
    #[error("Render context required")]
    ContextRequired,

    #[error("Unsupported format type `{received}`, expected `{expected}`")]
    UnsupportedFormatType {
        received: FormatType,
        expected: FormatType,
    },

    #[error(
        "FormatSchema is not supported by the d2 target; use the view-specific diagram generators"
    )]
    FormatSchemaNotSupported,

    #[error("Compile failure: {diagnostic}")]
    CompileFailure { diagnostic: String },

    #[error("Render cancelled")]
    Cancelled,

    #[error("Render deadline exceeded")]
    DeadlineExceeded,

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<RenderError> for ArchmapError {
    fn from(error: RenderError) -> Self {
        match error {
            RenderError::Compile { diagnostic } => Self::CompileFailure { diagnostic },
            RenderError::Cancelled => Self::Cancelled,
            RenderError::DeadlineExceeded => Self::DeadlineExceeded,
            RenderError::Io(err) => Self::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_type_names_both_types() {
        let err = ArchmapError::UnsupportedFormatType {
            received: FormatType::from("mermaid"),
            expected: FormatType::d2(),
        };

        let message = err.to_string();
        assert!(message.contains("mermaid"));
        assert!(message.contains("d2"));
    }

    #[test]
    fn test_render_error_conversion_keeps_diagnostic() {
        let err = ArchmapError::from(RenderError::Compile {
            diagnostic: "script.d2:1:4: unexpected text".to_string(),
        });

        match &err {
            ArchmapError::CompileFailure { diagnostic } => {
                assert_eq!(diagnostic, "script.d2:1:4: unexpected text");
            }
            other => panic!("Expected CompileFailure, got {other:?}"),
        }
        assert!(err.to_string().starts_with("Compile failure"));
    }

    #[test]
    fn test_context_effects_stay_distinct() {
        assert!(matches!(
            ArchmapError::from(RenderError::Cancelled),
            ArchmapError::Cancelled
        ));
        assert!(matches!(
            ArchmapError::from(RenderError::DeadlineExceeded),
            ArchmapError::DeadlineExceeded
        ));
    }
}
