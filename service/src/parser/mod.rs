//! Model builder for the exported UML model
//!
//! Turns the flat package, class-attribute and relation records of the
//! modeling tool's export into an indexed [`crate::project::Project`].
//! Parsing is pure; invalid closed-vocabulary values fail here rather than
//! during generation.

pub mod builder;
pub mod records;
pub mod values;

pub use builder::{parse_uml_class, parse_uml_package, parse_uml_project, parse_uml_relation};
pub use records::{ClassRecord, PackageRecord, RelationRecord};
pub use values::{parse_cardinality, parse_cardinality_value, parse_datetime};
