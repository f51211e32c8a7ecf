//! CSV record source
//!
//! Each record stream lives in its own file with a header row naming the
//! export columns. Empty cells are read as absent values.

use super::traits::RecordSource;
use crate::parser::{ClassRecord, PackageRecord, RelationRecord};
use cim_linkml_core::error::{CimLinkMLError, Result};
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options for reading CSV exports
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,

    /// Quote character (default: '"')
    pub quote: u8,

    /// Whether to trim whitespace from fields
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: true,
        }
    }
}

impl CsvOptions {
    /// Create options for TSV format
    #[must_use]
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }
}

/// Record source reading three CSV files
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    packages: PathBuf,
    classes: PathBuf,
    relations: PathBuf,
    options: CsvOptions,
}

impl CsvRecordSource {
    #[must_use]
    pub fn new(
        packages: impl Into<PathBuf>,
        classes: impl Into<PathBuf>,
        relations: impl Into<PathBuf>,
    ) -> Self {
        Self {
            packages: packages.into(),
            classes: classes.into(),
            relations: relations.into(),
            options: CsvOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    fn read_records<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .trim(if self.options.trim { Trim::All } else { Trim::None })
            .has_headers(true)
            .from_path(path)
            .map_err(|e| CimLinkMLError::from(e).at(path.display().to_string()))?;

        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<T>, _>>()
            .map_err(|e| {
                let location = match e.position() {
                    Some(pos) => format!("{} line {}", path.display(), pos.line()),
                    None => path.display().to_string(),
                };
                CimLinkMLError::from(e).at(location)
            })?;

        debug!(path = %path.display(), records = records.len(), "Read CSV records");
        Ok(records)
    }
}

impl RecordSource for CsvRecordSource {
    fn name(&self) -> &str {
        if self.options.delimiter == b'\t' {
            "tsv"
        } else {
            "csv"
        }
    }

    fn read_packages(&self) -> Result<Vec<PackageRecord>> {
        self.read_records(&self.packages)
    }

    fn read_classes(&self) -> Result<Vec<ClassRecord>> {
        self.read_records(&self.classes)
    }

    fn read_relations(&self) -> Result<Vec<RelationRecord>> {
        self.read_records(&self.relations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_empty_cells_are_absent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let packages = dir.path().join("packages.csv");
        fs::write(
            &packages,
            "id,name,author,parent_id,created_date,modified_date,note\n\
             2,Model,,0,,,\n\
             3,TC57CIM,someone,2,2010-01-01 00:00:00,,Root of the CIM\n",
        )
        .expect("write packages");

        let source = CsvRecordSource::new(&packages, dir.path().join("c"), dir.path().join("r"));
        let records = source.read_packages().expect("read packages");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].author, None);
        assert_eq!(records[0].parent_id, Some(0));
        assert_eq!(records[1].author.as_deref(), Some("someone"));
        assert_eq!(records[1].note.as_deref(), Some("Root of the CIM"));
    }

    #[test]
    fn test_tab_separated_records() {
        let dir = tempfile::tempdir().expect("temp dir");
        let relations = dir.path().join("relations.tsv");
        fs::write(
            &relations,
            "id\ttype\tstart_object_id\tend_object_id\tsource_card\tdest_role\n\
             4\tAssociation\t10\t11\t0..1\tOwner, primary\n",
        )
        .expect("write relations");

        let source = CsvRecordSource::new(dir.path().join("p"), dir.path().join("c"), &relations)
            .with_options(CsvOptions::tsv());
        let records = source.read_relations().expect("read relations");

        assert_eq!(source.name(), "tsv");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_card.as_deref(), Some("0..1"));
        assert_eq!(records[0].dest_role.as_deref(), Some("Owner, primary"));
        assert_eq!(records[0].direction, None);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = CsvRecordSource::new(
            dir.path().join("missing.csv"),
            dir.path().join("c"),
            dir.path().join("r"),
        );
        assert!(source.read_packages().is_err());
    }
}
