//! `LinkML` schema generation from the indexed UML project
//!
//! One schema per UML package, containing the package's classes and the
//! complete closure of classes and enumerations they depend on.

pub mod curie;
pub mod primitives;
pub mod schema;
pub mod slots;

pub use curie::gen_curie;
pub use primitives::PrimitiveMapper;
pub use schema::{
    DefinitionKind, DuplicateDefinition, GeneratedSchema, GenerationState, LinkMLGenerator,
};
pub use slots::{TraversalDirection, slot_from_attribute, slot_from_relation};
