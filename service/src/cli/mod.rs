//! Command-line interface of the `cim2linkml` binary

mod app;
mod types;

pub use app::{
    Cim2LinkMLApp, GenerateSummary, generate_command, list_packages_command, selected_packages,
    write_package_list,
};
pub use types::{Cim2LinkMLCli, Cim2LinkMLCommand, InputArgs, InputFormat};

/// Main entry point for the CLI
///
/// # Errors
///
/// Returns error if command execution fails.
pub fn run() -> cim_linkml_core::error::Result<()> {
    Cim2LinkMLApp::from_args().run()
}
