//! Configuration types for the CIM to `LinkML` converter

use crate::error::{CimLinkMLError, Result, ValueKind};
use crate::uml::ObjectId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Packages of the CIM 100 export that hold informative, non-normative content
pub const NON_NORMATIVE_PACKAGE_IDS: &[ObjectId] = &[
    5, 27, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 52,
    53, 54, 55, 56, 57, 58, 80, 81, 82, 85, 88, 89, 90, 91, 92, 94, 96, 98, 99, 100, 101, 105,
    106, 107, 110, 112, 113, 114, 116, 117, 118, 121, 122, 124, 125, 129, 130, 131, 138, 139, 144,
    150, 151, 155, 157, 158, 160, 162, 164, 167, 168, 171,
];

/// Main configuration for the converter
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CimLinkMLConfig {
    /// Record input configuration
    pub input: InputConfig,

    /// Schema output configuration
    pub output: OutputConfig,

    /// Generation configuration
    pub generation: GenerationConfig,
}

impl CimLinkMLConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML or
    /// fails [`CimLinkMLConfig::validate`].
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML or fails validation.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| CimLinkMLError::config(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot reject on its own
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.output.extension.trim().is_empty() {
            return Err(CimLinkMLError::config("output.extension must not be empty"));
        }
        if self.output.extension.starts_with('.') {
            return Err(CimLinkMLError::config(
                "output.extension must be given without a leading dot",
            ));
        }
        Ok(())
    }
}

/// Format of the record files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// Comma separated values with a header row
    #[default]
    Csv,
    /// Tab separated values with a header row
    Tsv,
    /// JSON array of objects
    Json,
    /// The modeling tool's SQLite repository file (`.qea`)
    Sqlite,
}

impl FromStr for RecordFormat {
    type Err = CimLinkMLError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "sqlite" | "qea" => Ok(Self::Sqlite),
            _ => Err(CimLinkMLError::invalid_value(ValueKind::RecordFormat, s)),
        }
    }
}

/// Record input configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Package records
    pub packages: PathBuf,

    /// Class and attribute records
    pub classes: PathBuf,

    /// Relation records
    pub relations: PathBuf,

    /// Repository database, read when the format is `sqlite`
    pub database: PathBuf,

    /// Format of the records
    pub format: RecordFormat,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            packages: PathBuf::from("data/packages.csv"),
            classes: PathBuf::from("data/classes.csv"),
            relations: PathBuf::from("data/relations.csv"),
            database: PathBuf::from("data/cim.qea"),
            format: RecordFormat::Csv,
        }
    }
}

/// Schema output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving one schema file per package
    pub directory: PathBuf,

    /// File extension of schema files, without the dot
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("schemas"),
            extension: "yaml".to_string(),
        }
    }
}

/// Generation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Packages dropped from the input before the project is built
    pub excluded_package_ids: Vec<ObjectId>,

    /// Skip roots of the package forest (the `Model` base package)
    pub skip_root_packages: bool,

    /// Generate only these packages; all packages when absent
    pub packages: Option<Vec<ObjectId>>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            excluded_package_ids: NON_NORMATIVE_PACKAGE_IDS.to_vec(),
            skip_root_packages: true,
            packages: None,
        }
    }
}
