//! # CIM `LinkML` Service
//!
//! Generates `LinkML` schemas from the UML model of the Common Information
//! Model (CIM), one schema per UML package.
//!
//! ## Overview
//!
//! The pipeline has four stages:
//!
//! - **Loading**: a [`loader::RecordSource`] yields the flat package,
//!   class-attribute and relation records of the modeling tool's export, and
//!   an [`loader::ExtractionFilter`] drops non-normative content.
//! - **Model building**: [`parser::parse_uml_project`] turns the records into
//!   typed UML values indexed in a [`project::Project`].
//! - **Generation**: [`generator::LinkMLGenerator`] walks the dependency
//!   closure of a package's classes and produces a self-contained
//!   [`SchemaDefinition`].
//! - **Writing**: [`writer::SchemaWriter`] renders each schema as YAML.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cim_linkml_service::generator::LinkMLGenerator;
//! use cim_linkml_service::loader::{CsvRecordSource, ExtractionFilter, load_project};
//! use cim_linkml_service::writer::SchemaWriter;
//!
//! fn main() -> cim_linkml_core::Result<()> {
//!     let source = CsvRecordSource::new(
//!         "data/packages.csv",
//!         "data/classes.csv",
//!         "data/relations.csv",
//!     );
//!     let project = load_project(&source, &ExtractionFilter::default())?;
//!
//!     let schema = LinkMLGenerator::new(&project).generate(12)?;
//!     SchemaWriter::new("schemas", "yaml").write(&schema)?;
//!     Ok(())
//! }
//! ```
//!
//! The generator only reads the project, so packages can be generated in any
//! order and from several threads at once.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod generator;
pub mod loader;
pub mod parser;
pub mod project;
pub mod writer;

pub use cim_linkml_core::types::SchemaDefinition;
pub use generator::LinkMLGenerator;
pub use project::Project;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::generator::{GeneratedSchema, LinkMLGenerator};
    pub use crate::loader::{ExtractionFilter, RecordSource, load_project};
    pub use crate::parser::parse_uml_project;
    pub use crate::project::Project;
    pub use crate::writer::SchemaWriter;
    pub use cim_linkml_core::prelude::*;
}
