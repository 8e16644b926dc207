//! The normalized service schema consumed by the diagram engine.
//!
//! Schema values are produced by upstream collaborators (AsyncAPI ingestion,
//! service manifests, ...) and are read-only as far as Archmap is concerned.
//! Every type here implements [`serde::Deserialize`] so a normalized schema
//! can also be loaded from a document.
//!
//! # Example
//!
//! ```
//! use archmap_core::schema::{Action, Info, Relationship, Schema, Service};
//!
//! let api = Service::new(Info::new("API").with_system("Storefront"))
//!     .with_relationship(Relationship::new("Postgres", Action::Reads).with_technology("SQL"));
//! let schema = Schema::new(vec![api]);
//!
//! assert_eq!(schema.services().len(), 1);
//! assert_eq!(schema.services()[0].info().system(), Some("Storefront"));
//! ```

use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of a synchronous dependency.
///
/// This is a closed set: documents naming any other action are rejected when
/// they are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Uses,
    Requests,
    Reads,
    Writes,
    Sends,
    Publishes,
    Subscribes,
    DependsOn,
}

/// Returned when an action name is not part of the closed [`Action`] set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized relationship action `{0}`")]
pub struct UnknownAction(pub String);

impl Action {
    /// Returns the lowercase name used in documents and diagram labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Uses => "uses",
            Action::Requests => "requests",
            Action::Reads => "reads",
            Action::Writes => "writes",
            Action::Sends => "sends",
            Action::Publishes => "publishes",
            Action::Subscribes => "subscribes",
            Action::DependsOn => "depends-on",
        }
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uses" => Ok(Action::Uses),
            "requests" => Ok(Action::Requests),
            "reads" => Ok(Action::Reads),
            "writes" => Ok(Action::Writes),
            "sends" => Ok(Action::Sends),
            "publishes" => Ok(Action::Publishes),
            "subscribes" => Ok(Action::Subscribes),
            "depends-on" => Ok(Action::DependsOn),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and metadata of a service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Info {
    name: String,
    #[serde(default)]
    system: Option<String>,
}

impl Info {
    /// Creates the info block for a service that belongs to no system.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system: None,
        }
    }

    /// Sets the owning system.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Returns the service name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning system name.
    ///
    /// An empty system name is reported as `None`; both mean the service is
    /// ungrouped.
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref().filter(|system| !system.is_empty())
    }
}

/// A synchronous dependency of a service on a participant.
///
/// The participant is either the name of another service in the schema or
/// an external dependency (a database, a SaaS API, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Relationship {
    participant: String,
    action: Action,
    #[serde(default)]
    technology: Option<String>,
}

impl Relationship {
    pub fn new(participant: impl Into<String>, action: Action) -> Self {
        Self {
            participant: participant.into(),
            action,
            technology: None,
        }
    }

    /// Sets the technology label, e.g. a protocol or product name.
    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = Some(technology.into());
        self
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Returns the technology label; empty labels are reported as `None`.
    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref().filter(|tech| !tech.is_empty())
    }
}

/// A service together with its outgoing synchronous relationships.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Service {
    info: Info,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

impl Service {
    pub fn new(info: Info) -> Self {
        Self {
            info,
            relationships: Vec::new(),
        }
    }

    /// Appends a relationship, keeping declaration order.
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Shorthand for `self.info().name()`.
    pub fn name(&self) -> &str {
        self.info.name()
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }
}

/// The top-level aggregate: an ordered collection of services.
///
/// Service order is significant for output determinism only; diagrams list
/// nodes in the order services appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Schema {
    #[serde(default)]
    services: Vec<Service>,
}

impl Schema {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Looks up a service by exact name.
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.name() == name)
    }

    /// Returns the distinct system names in first-appearance order.
    pub fn systems(&self) -> Vec<&str> {
        let mut systems: Vec<&str> = Vec::new();
        for system in self.services.iter().filter_map(|s| s.info().system()) {
            if !systems.contains(&system) {
                systems.push(system);
            }
        }
        systems
    }
}

/// An asynchronous message flow between a producing and a consuming service.
///
/// The concrete attributes of a message flow (channels, operations, message
/// schemas) belong to whoever built the schema. The engine only needs to
/// resolve both endpoints and display a label.
pub trait AsyncEdge {
    /// Name of the producing service.
    fn source(&self) -> &str;

    /// Name of the consuming service.
    fn destination(&self) -> &str;

    /// Text shown on the diagram edge.
    fn label(&self) -> Cow<'_, str>;
}

impl<T: AsyncEdge + ?Sized> AsyncEdge for &T {
    fn source(&self) -> &str {
        (**self).source()
    }

    fn destination(&self) -> &str {
        (**self).destination()
    }

    fn label(&self) -> Cow<'_, str> {
        (**self).label()
    }
}

/// A message flow through a named channel or topic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChannelEdge {
    producer: String,
    consumer: String,
    channel: String,
    #[serde(default)]
    message: Option<String>,
}

impl ChannelEdge {
    pub fn new(
        producer: impl Into<String>,
        consumer: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            producer: producer.into(),
            consumer: consumer.into(),
            channel: channel.into(),
            message: None,
        }
    }

    /// Sets the name of the message carried over the channel.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }
}

impl AsyncEdge for ChannelEdge {
    fn source(&self) -> &str {
        &self.producer
    }

    fn destination(&self) -> &str {
        &self.consumer
    }

    /// `channel`, or `channel: message` when a message name is known.
    fn label(&self) -> Cow<'_, str> {
        match self.message() {
            Some(message) => Cow::Owned(format!("{}: {message}", self.channel)),
            None => Cow::Borrowed(&self.channel),
        }
    }
}
