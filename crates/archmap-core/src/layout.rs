//! Layout engine selection.
//!
//! Archmap never positions nodes itself. The selected [`LayoutEngine`] is
//! forwarded to the external diagram compiler, which owns layout.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layout algorithms understood by the D2 compiler.
///
/// The names match external configuration strings (lowercase).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEngine {
    /// Layered layout, bundled with every D2 installation (default)
    #[default]
    Dagre,
    /// ELK layered layout with orthogonal edge routing
    Elk,
}

/// Returned when a layout engine name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported layout engine `{0}` (expected `dagre` or `elk`)")]
pub struct UnknownLayoutEngine(pub String);

impl FromStr for LayoutEngine {
    type Err = UnknownLayoutEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dagre" => Ok(Self::Dagre),
            "elk" => Ok(Self::Elk),
            _ => Err(UnknownLayoutEngine(s.to_string())),
        }
    }
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Dagre => "dagre",
            LayoutEngine::Elk => "elk",
        }
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}
