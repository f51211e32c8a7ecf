//! YAML rendering of generated schemas

use cim_linkml_core::config::OutputConfig;
use cim_linkml_core::error::{CimLinkMLError, Result};
use cim_linkml_core::types::SchemaDefinition;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes one YAML document per schema into an output directory
#[derive(Debug, Clone)]
pub struct SchemaWriter {
    directory: PathBuf,
    extension: String,
}

impl Default for SchemaWriter {
    fn default() -> Self {
        Self::from_config(&OutputConfig::default())
    }
}

impl SchemaWriter {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
        }
    }

    #[must_use]
    pub fn from_config(output: &OutputConfig) -> Self {
        Self::new(&output.directory, &output.extension)
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Render a schema as a YAML document
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the schema cannot be rendered.
    pub fn to_yaml(schema: &SchemaDefinition) -> Result<String> {
        serde_yaml::to_string(schema).map_err(CimLinkMLError::from)
    }

    /// File name of a schema: its qualified name, else its title, else its id.
    ///
    /// Path separators and `:` in the stem become `_`, so the file always
    /// lands directly in the output directory.
    #[must_use]
    pub fn file_name(&self, schema: &SchemaDefinition) -> String {
        let stem = [Some(schema.name.as_str()), schema.title.as_deref()]
            .into_iter()
            .flatten()
            .find(|stem| !stem.is_empty())
            .unwrap_or(schema.id.as_str())
            .replace(['/', '\\', ':'], "_");
        format!("{stem}.{}", self.extension)
    }

    /// Write a schema into the output directory, creating it when missing,
    /// and return the path written.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the directory or file cannot be written.
    pub fn write(&self, schema: &SchemaDefinition) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(self.file_name(schema));
        fs::write(&path, Self::to_yaml(schema)?)?;
        debug!(path = %path.display(), "Wrote schema");
        Ok(path)
    }
}
