//! Archmap Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Archmap diagram
//! engine and its command-line harness. It includes:
//!
//! - **Identifiers**: Per-graph interned names ([`identifier::Names`], [`identifier::Id`])
//! - **Schema**: The normalized service model consumed by the engine ([`schema`] module)
//! - **Format**: The formatted-script envelope and target capabilities ([`format`] module)
//! - **Layout**: Layout engine selection forwarded to the diagram compiler ([`layout`] module)

pub mod format;
pub mod identifier;
pub mod layout;
pub mod schema;
