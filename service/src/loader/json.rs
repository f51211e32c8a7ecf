//! JSON record source
//!
//! Each record stream is a JSON array of objects keyed by the export column
//! names. Missing keys and `null` values are read as absent.

use super::traits::RecordSource;
use crate::parser::{ClassRecord, PackageRecord, RelationRecord};
use cim_linkml_core::error::{CimLinkMLError, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Record source reading three JSON files
#[derive(Debug, Clone)]
pub struct JsonRecordSource {
    packages: PathBuf,
    classes: PathBuf,
    relations: PathBuf,
}

impl JsonRecordSource {
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
        }
    }

    fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        let file = File::open(path)?;
        let records: Vec<T> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CimLinkMLError::parse_at(e.to_string(), path.display().to_string()))?;

        debug!(path = %path.display(), records = records.len(), "Read JSON records");
        Ok(records)
    }
}

impl RecordSource for JsonRecordSource {
    fn name(&self) -> &str {
        "json"
    }

    fn read_packages(&self) -> Result<Vec<PackageRecord>> {
        Self::read_records(&self.packages)
    }

    fn read_classes(&self) -> Result<Vec<ClassRecord>> {
        Self::read_records(&self.classes)
    }

    fn read_relations(&self) -> Result<Vec<RelationRecord>> {
        Self::read_records(&self.relations)
    }
}
