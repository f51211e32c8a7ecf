//! Record sources for the modeling tool's export
//!
//! A [`RecordSource`] yields the three flat record streams (from CSV, TSV or
//! JSON files, or straight from the repository database), an
//! [`ExtractionFilter`] drops excluded content and restores the ordering the
//! model builder relies on, and [`load_project`] ties both to
//! [`crate::parser::parse_uml_project`].

pub mod csv;
pub mod filter;
pub mod json;
pub mod sqlite;
pub mod traits;

pub use self::csv::{CsvOptions, CsvRecordSource};
pub use filter::ExtractionFilter;
pub use json::JsonRecordSource;
pub use sqlite::SqliteRecordSource;
pub use traits::{InMemoryRecordSource, RecordSet, RecordSource};

use crate::parser::parse_uml_project;
use crate::project::Project;
use cim_linkml_core::config::{InputConfig, RecordFormat};
use cim_linkml_core::error::Result;
use tracing::info;

/// Create the record source described by an input configuration
#[must_use]
pub fn source_from_config(input: &InputConfig) -> Box<dyn RecordSource> {
    match input.format {
        RecordFormat::Csv => Box::new(CsvRecordSource::new(
            &input.packages,
            &input.classes,
            &input.relations,
        )),
        RecordFormat::Tsv => Box::new(
            CsvRecordSource::new(&input.packages, &input.classes, &input.relations)
                .with_options(CsvOptions::tsv()),
        ),
        RecordFormat::Json => Box::new(JsonRecordSource::new(
            &input.packages,
            &input.classes,
            &input.relations,
        )),
        RecordFormat::Sqlite => Box::new(SqliteRecordSource::new(&input.database)),
    }
}

/// Read, filter and build a project
///
/// # Errors
///
/// Returns the first read failure or model builder error.
pub fn load_project(source: &dyn RecordSource, filter: &ExtractionFilter) -> Result<Project> {
    let records = filter.apply(source.read_all()?);
    info!(
        source = source.name(),
        packages = records.packages.len(),
        class_records = records.classes.len(),
        relations = records.relations.len(),
        "Loaded export records"
    );
    parse_uml_project(records.packages, records.classes, records.relations)
}
