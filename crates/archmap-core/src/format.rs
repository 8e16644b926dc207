//! Formatted diagram scripts and target capabilities.
//!
//! A [`FormattedSchema`] is what script generation produces and what
//! rendering consumes. Its [`FormatType`] tag names the diagram language the
//! bytes are written in and is the only thing checked before rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag naming the diagram language of a [`FormattedSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FormatType(String);

impl FormatType {
    /// The tag for D2 diagram scripts.
    pub const D2: &'static str = "d2";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the D2 format tag.
    pub fn d2() -> Self {
        Self::new(Self::D2)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormatType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A diagram script paired with the language it is written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedSchema {
    format_type: FormatType,
    data: Vec<u8>,
}

impl FormattedSchema {
    pub fn new(format_type: FormatType, data: impl Into<Vec<u8>>) -> Self {
        Self {
            format_type,
            data: data.into(),
        }
    }

    pub fn format_type(&self) -> &FormatType {
        &self.format_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Options accepted by the generic single-shot formatting entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    title: Option<String>,
}

impl FormatOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// The high-level operations a target participates in.
///
/// The flags describe protocol participation, not that every generic entry
/// point is implemented: a target may advertise `format` and still require
/// callers to use its view-specific generators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub format: bool,
    pub render: bool,
}
