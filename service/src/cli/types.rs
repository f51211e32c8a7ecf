//! CLI type definitions

use cim_linkml_core::config::{CimLinkMLConfig, RecordFormat};
use cim_linkml_core::uml::ObjectId;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Generate `LinkML` schemas from a CIM UML model export
#[derive(Parser, Debug)]
#[command(name = "cim2linkml", version, about = "CIM UML to LinkML schema generator")]
pub struct Cim2LinkMLCli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Cim2LinkMLCommand,
}

/// Record file formats accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Comma separated values with a header row
    Csv,
    /// Tab separated values with a header row
    Tsv,
    /// JSON array of objects
    Json,
    /// Repository database (`.qea`)
    Sqlite,
}

impl From<InputFormat> for RecordFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Csv => Self::Csv,
            InputFormat::Tsv => Self::Tsv,
            InputFormat::Json => Self::Json,
            InputFormat::Sqlite => Self::Sqlite,
        }
    }
}

/// Record input overrides shared by all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Package records file
    #[arg(long)]
    pub packages: Option<PathBuf>,

    /// Class and attribute records file
    #[arg(long)]
    pub classes: Option<PathBuf>,

    /// Relation records file
    #[arg(long)]
    pub relations: Option<PathBuf>,

    /// Repository database, read with `--format sqlite`
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Format of the records
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<InputFormat>,
}

impl InputArgs {
    /// Override configuration values given on the command line
    pub fn apply(&self, config: &mut CimLinkMLConfig) {
        if let Some(packages) = &self.packages {
            config.input.packages.clone_from(packages);
        }
        if let Some(classes) = &self.classes {
            config.input.classes.clone_from(classes);
        }
        if let Some(relations) = &self.relations {
            config.input.relations.clone_from(relations);
        }
        if let Some(database) = &self.database {
            config.input.database.clone_from(database);
        }
        if let Some(format) = self.format {
            config.input.format = format.into();
        }
    }
}

/// `cim2linkml` subcommands
#[derive(Subcommand, Debug)]
pub enum Cim2LinkMLCommand {
    /// Generate one schema file per package
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Package to generate (repeatable); all packages when omitted
        #[arg(short = 'p', long = "package", value_name = "ID")]
        package_ids: Vec<ObjectId>,
    },

    /// List packages with their qualified names and class counts
    ListPackages {
        #[command(flatten)]
        input: InputArgs,
    },
}
