//! `cim2linkml` command-line interface
//!
//! Reads the package, class and relation records of a CIM UML model export
//! and writes one `LinkML` schema per package.

use cim_linkml_core::error::Result;
use cim_linkml_service::cli;

fn main() -> Result<()> {
    cli::run()
}
