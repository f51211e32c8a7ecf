//! Common traits and types for record sources

use crate::parser::{ClassRecord, PackageRecord, RelationRecord};
use cim_linkml_core::error::Result;

/// The three record streams of one export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub packages: Vec<PackageRecord>,
    pub classes: Vec<ClassRecord>,
    pub relations: Vec<RelationRecord>,
}

impl RecordSet {
    #[must_use]
    pub fn new(
        packages: Vec<PackageRecord>,
        classes: Vec<ClassRecord>,
        relations: Vec<RelationRecord>,
    ) -> Self {
        Self {
            packages,
            classes,
            relations,
        }
    }
}

/// Producer of export records
pub trait RecordSource {
    /// Human-readable name for diagnostics
    fn name(&self) -> &str;

    /// Read all package records
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read or decoded.
    fn read_packages(&self) -> Result<Vec<PackageRecord>>;

    /// Read all class-attribute records
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read or decoded.
    fn read_classes(&self) -> Result<Vec<ClassRecord>>;

    /// Read all relation records
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read or decoded.
    fn read_relations(&self) -> Result<Vec<RelationRecord>>;

    /// Read all three record streams
    ///
    /// # Errors
    ///
    /// Returns the first read failure.
    fn read_all(&self) -> Result<RecordSet> {
        Ok(RecordSet {
            packages: self.read_packages()?,
            classes: self.read_classes()?,
            relations: self.read_relations()?,
        })
    }
}

/// Record source over records already in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSource {
    records: RecordSet,
}

impl InMemoryRecordSource {
    #[must_use]
    pub fn new(records: RecordSet) -> Self {
        Self { records }
    }
}

impl RecordSource for InMemoryRecordSource {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn read_packages(&self) -> Result<Vec<PackageRecord>> {
        Ok(self.records.packages.clone())
    }

    fn read_classes(&self) -> Result<Vec<ClassRecord>> {
        Ok(self.records.classes.clone())
    }

    fn read_relations(&self) -> Result<Vec<RelationRecord>> {
        Ok(self.records.relations.clone())
    }
}
