//! Slot generation from UML attributes and relation ends

use super::curie::gen_curie;
use super::primitives::PrimitiveMapper;
use crate::project::Project;
use cim_linkml_core::error::{CimLinkMLError, Result, ValueKind};
use cim_linkml_core::types::{CIM_PREFIX, DEFAULT_RANGE, SlotDefinition};
use cim_linkml_core::uml::{Attribute, CardinalityValue, Class, Relation};
use std::fmt;
use std::str::FromStr;

/// Side of a relation a slot is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalDirection {
    /// Slot on the source class pointing at the destination class
    SourceToDest,
    /// Slot on the destination class pointing at the source class
    DestToSource,
}

impl FromStr for TraversalDirection {
    type Err = CimLinkMLError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "source->dest" => Ok(Self::SourceToDest),
            "dest->source" => Ok(Self::DestToSource),
            _ => Err(CimLinkMLError::invalid_value(
                ValueKind::TraversalDirection,
                s,
            )),
        }
    }
}

impl fmt::Display for TraversalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceToDest => f.write_str("source->dest"),
            Self::DestToSource => f.write_str("dest->source"),
        }
    }
}

#[must_use]
pub fn slot_required(lower_bound: CardinalityValue) -> bool {
    lower_bound.is_required()
}

#[must_use]
pub fn slot_multivalued(upper_bound: CardinalityValue) -> bool {
    upper_bound.is_multivalued()
}

/// Range of an attribute: the mapped builtin for a primitive type class,
/// the type name otherwise.
///
/// When several classes share the type name the one with the lowest id
/// decides whether the type is primitive.
///
/// # Errors
///
/// Returns [`CimLinkMLError::ClassNameNotFound`] if no class carries the type
/// name and [`CimLinkMLError::InvalidValue`] for a primitive class outside the
/// CIM primitive vocabulary.
pub fn attribute_range(project: &Project, attribute: &Attribute) -> Result<String> {
    let Some(type_name) = attribute.type_.as_deref() else {
        return Ok(DEFAULT_RANGE.to_string());
    };

    let type_class = project
        .classes
        .by_name(type_name)
        .next()
        .ok_or_else(|| CimLinkMLError::class_name_not_found(type_name))?;

    if type_class.is_primitive() {
        Ok(PrimitiveMapper::to_linkml(type_name)?.to_string())
    } else {
        Ok(type_class.name.clone())
    }
}

/// Generate the inline slot for an attribute of `class`
///
/// # Errors
///
/// See [`attribute_range`].
pub fn slot_from_attribute(
    project: &Project,
    attribute: &Attribute,
    class: &Class,
) -> Result<SlotDefinition> {
    Ok(SlotDefinition {
        name: attribute.name.clone(),
        slot_uri: gen_curie(&format!("{}.{}", class.name, attribute.name), CIM_PREFIX),
        range: attribute_range(project, attribute)?,
        required: slot_required(attribute.lower_bound),
        multivalued: slot_multivalued(attribute.upper_bound),
        description: attribute.notes.clone(),
    })
}

/// Generate the slot one end of a relation contributes to the class at the
/// other end.
///
/// The slot is named after the far role, falling back to the far class name,
/// and takes its multiplicity from the far end.
///
/// # Errors
///
/// Returns [`CimLinkMLError::NotFound`] if either endpoint does not resolve.
pub fn slot_from_relation(
    project: &Project,
    relation: &Relation,
    direction: TraversalDirection,
) -> Result<SlotDefinition> {
    let source_class = project.classes.get(relation.source_class)?;
    let dest_class = project.classes.get(relation.dest_class)?;

    let (near, far, far_role, far_note, far_card) = match direction {
        TraversalDirection::SourceToDest => (
            source_class,
            dest_class,
            relation.dest_role.as_deref(),
            relation.dest_role_note.as_ref(),
            &relation.dest_card,
        ),
        TraversalDirection::DestToSource => (
            dest_class,
            source_class,
            relation.source_role.as_deref(),
            relation.source_role_note.as_ref(),
            &relation.source_card,
        ),
    };

    let name = far_role
        .filter(|role| !role.is_empty())
        .unwrap_or(far.name.as_str());

    Ok(SlotDefinition {
        name: name.to_string(),
        slot_uri: gen_curie(&format!("{}.{name}", near.name), CIM_PREFIX),
        range: far.name.clone(),
        required: slot_required(far_card.lower_bound),
        multivalued: slot_multivalued(far_card.upper_bound),
        description: far_note.cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traversal_direction_vocabulary() {
        assert_eq!(
            "source->dest".parse::<TraversalDirection>().ok(),
            Some(TraversalDirection::SourceToDest)
        );
        assert_eq!(
            "dest->source".parse::<TraversalDirection>().ok(),
            Some(TraversalDirection::DestToSource)
        );
        assert!(matches!(
            "up->down".parse::<TraversalDirection>(),
            Err(CimLinkMLError::InvalidValue {
                kind: ValueKind::TraversalDirection,
                ..
            })
        ));
        assert_eq!(TraversalDirection::DestToSource.to_string(), "dest->source");
    }

    #[test]
    fn test_cardinality_flags() {
        assert!(!slot_required(CardinalityValue::Bounded(0)));
        assert!(slot_required(CardinalityValue::Bounded(1)));
        assert!(!slot_multivalued(CardinalityValue::Bounded(1)));
        assert!(slot_multivalued(CardinalityValue::Unbounded));
    }
}
