//! # CIM `LinkML` Core
//!
//! Core types for converting the UML model of the Common Information Model
//! (CIM) into `LinkML` schemas.
//!
//! The crate holds plain data only: the UML source model, the `LinkML`
//! target model, configuration and the error type. Behavior lives in the
//! service crate.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)] // Documentation is covered by module-level docs

/// Core error types for conversion operations
pub mod error;

/// UML source model
pub mod uml;

/// `LinkML` target model
pub mod types;

/// Converter configuration
pub mod config;

// Re-export commonly used types
pub use config::CimLinkMLConfig;
pub use error::{CimLinkMLError, Result};
pub use types::{ClassDefinition, EnumDefinition, SchemaDefinition, SlotDefinition};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{CimLinkMLError, Result, ValueKind};
    pub use crate::types::*;
    pub use crate::uml::*;
}
