//! The schema document read by the CLI.
//!
//! A schema document is a TOML file holding the diagram title, the services
//! and the asynchronous message flows:
//!
//! ```toml
//! title = "Shop"
//!
//! [[services]]
//! info = { name = "Orders", system = "Commerce" }
//!
//! [[services.relationships]]
//! participant = "Payments"
//! action = "requests"
//! technology = "gRPC"
//!
//! [[async_edges]]
//! producer = "Orders"
//! consumer = "Shipping"
//! channel = "orders"
//! message = "OrderPlaced"
//! ```

use std::{fs, path::Path};

use log::debug;
use serde::Deserialize;

use archmap::schema::{ChannelEdge, Schema, Service};

use crate::error::CliError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SchemaDocument {
    #[serde(default)]
    title: String,
    #[serde(default)]
    services: Vec<Service>,
    #[serde(default)]
    async_edges: Vec<ChannelEdge>,
}

impl SchemaDocument {
    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub(crate) fn parse(content: &str) -> Result<Self, CliError> {
        let document: Self =
            toml::from_str(content).map_err(|e| CliError::Schema(e.to_string()))?;
        debug!(
            services = document.services.len(),
            async_edges = document.async_edges.len();
            "Schema document loaded"
        );
        Ok(document)
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn into_schema(self) -> (Schema, Vec<ChannelEdge>) {
        (Schema::new(self.services), self.async_edges)
    }
}
