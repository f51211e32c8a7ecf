//! `cim2linkml` CLI application

use super::types::{Cim2LinkMLCli, Cim2LinkMLCommand, InputArgs};
use crate::generator::LinkMLGenerator;
use crate::loader::{ExtractionFilter, load_project, source_from_config};
use crate::project::Project;
use crate::writer::SchemaWriter;
use cim_linkml_core::config::{CimLinkMLConfig, GenerationConfig};
use cim_linkml_core::error::{CimLinkMLError, Result};
use cim_linkml_core::uml::ObjectId;
use clap::Parser;
use std::io::{self, Write};
use tracing::{error, info, warn};

/// Packages to generate, in ascending id order.
///
/// An explicit allow-list wins; otherwise every package that is neither
/// excluded nor (when configured) a root of the package forest.
#[must_use]
pub fn selected_packages(project: &Project, generation: &GenerationConfig) -> Vec<ObjectId> {
    let mut ids: Vec<ObjectId> = match &generation.packages {
        Some(ids) => ids.clone(),
        None => project
            .packages
            .iter()
            .filter(|package| !(generation.skip_root_packages && package.is_root()))
            .filter(|package| !generation.excluded_package_ids.contains(&package.id))
            .map(|package| package.id)
            .collect(),
    };
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Outcome of a `generate` run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub written: usize,
    pub failed: Vec<ObjectId>,
}

/// Main `cim2linkml` application
pub struct Cim2LinkMLApp {
    cli: Cim2LinkMLCli,
}

impl Cim2LinkMLApp {
    /// Create the application from the process arguments
    #[must_use]
    pub fn from_args() -> Self {
        Self::new(Cim2LinkMLCli::parse())
    }

    #[must_use]
    pub fn new(cli: Cim2LinkMLCli) -> Self {
        Self { cli }
    }

    /// Run the application
    ///
    /// # Errors
    ///
    /// Returns error if the configuration or the records cannot be loaded, or
    /// if every selected package failed to generate.
    pub fn run(self) -> Result<()> {
        self.init_logging();

        match self.execute_command() {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("Command failed: {}", err);
                if !self.cli.quiet {
                    eprintln!("Error: {err}");
                }
                Err(err)
            }
        }
    }

    /// Configure tracing subscriber based on CLI flags
    fn init_logging(&self) {
        let level = if self.cli.quiet {
            tracing::Level::ERROR
        } else if self.cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    fn load_config(&self, input: &InputArgs) -> Result<CimLinkMLConfig> {
        let mut config = match &self.cli.config {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration");
                CimLinkMLConfig::from_yaml_file(path)?
            }
            None => CimLinkMLConfig::default(),
        };
        input.apply(&mut config);
        Ok(config)
    }

    fn execute_command(&self) -> Result<()> {
        match &self.cli.command {
            Cim2LinkMLCommand::Generate {
                input,
                output_dir,
                package_ids,
            } => {
                let mut config = self.load_config(input)?;
                if let Some(directory) = output_dir {
                    config.output.directory.clone_from(directory);
                }
                if !package_ids.is_empty() {
                    config.generation.packages = Some(package_ids.clone());
                }
                generate_command(&config).map(|_| ())
            }
            Cim2LinkMLCommand::ListPackages { input } => {
                let config = self.load_config(input)?;
                list_packages_command(&config, &mut io::stdout().lock())
            }
        }
    }
}

fn build_project(config: &CimLinkMLConfig) -> Result<Project> {
    let source = source_from_config(&config.input);
    let filter = ExtractionFilter::from_config(&config.generation);
    load_project(source.as_ref(), &filter)
}

/// Generate and write every selected package, skipping failed ones
///
/// # Errors
///
/// Returns error if the project cannot be loaded or if every selected
/// package failed.
pub fn generate_command(config: &CimLinkMLConfig) -> Result<GenerateSummary> {
    let project = build_project(config)?;
    let generator = LinkMLGenerator::new(&project);
    let writer = SchemaWriter::from_config(&config.output);
    let package_ids = selected_packages(&project, &config.generation);

    if package_ids.is_empty() {
        warn!("No packages selected for generation");
    }

    let mut summary = GenerateSummary::default();
    for package_id in package_ids {
        let written = generator
            .generate_with_report(package_id)
            .and_then(|generated| writer.write(&generated.schema));
        match written {
            Ok(path) => {
                info!(package = package_id, path = %path.display(), "Generated schema");
                summary.written += 1;
            }
            Err(err) => {
                error!(package = package_id, "Skipping package: {}", err);
                summary.failed.push(package_id);
            }
        }
    }

    if summary.written == 0 && !summary.failed.is_empty() {
        return Err(CimLinkMLError::GenerationFailed {
            failed: summary.failed.len(),
        });
    }

    info!(
        written = summary.written,
        failed = summary.failed.len(),
        directory = %writer.directory().display(),
        "Generation finished"
    );
    Ok(summary)
}

/// Print `id<TAB>qualified name<TAB>class count` for every package
///
/// # Errors
///
/// Returns error if the project cannot be loaded or the output cannot be
/// written.
pub fn list_packages_command(config: &CimLinkMLConfig, out: &mut impl Write) -> Result<()> {
    let project = build_project(config)?;
    write_package_list(&project, out)
}

/// Write the package listing of a project
///
/// # Errors
///
/// Returns error if the output cannot be written.
pub fn write_package_list(project: &Project, out: &mut impl Write) -> Result<()> {
    for package in project.packages.iter() {
        let qualified_name = match project.qualified_name(package.id) {
            Ok(name) => name,
            Err(err) => {
                warn!(package = package.id, "{}", err);
                continue;
            }
        };
        let class_count = project.classes.ids_by_package(package.id).len();
        writeln!(out, "{}\t{qualified_name}\t{class_count}", package.id)?;
    }
    Ok(())
}
