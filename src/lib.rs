//! addproject Core Library
//!
//! This library provides the core functionality for the addproject tool,
//! which turns a product name and a project URL into a normalized JSON
//! record in a per-product catalog directory.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - URL classification and identifier extraction
//! - [`metadata`] - GitHub, Medium and Open Graph lookups behind an async trait
//! - [`store`] - Template loading and merge-on-write JSON records
//! - [`author`] - Author records referenced by projects
//! - [`record`] - Layered assembly of a project record
//! - [`ingest`] - The three ingestion routines and their dispatcher
//! - [`config`] - Flag, environment and config file resolution

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod author;
pub mod config;
pub mod ingest;
pub mod metadata;
pub mod parser;
pub mod record;
pub mod store;
mod user_agent;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use author::{AuthorRegistry, normalize_author_id};
pub use ingest::{IngestError, IngestOutcome, Ingestor};
pub use metadata::{HttpMetadataSource, MetadataEndpoints, MetadataError, MetadataSource};
pub use parser::{ParseError, SourceKind, classify_url};
pub use record::ProjectRecord;
pub use store::{Collection, ConfigStore, JsonObject, StoreError};
