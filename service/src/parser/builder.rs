//! Model builder: folds flat export records into a [`Project`]

use super::records::{ClassRecord, PackageRecord, RelationRecord};
use super::values::{parse_cardinality, parse_cardinality_value, parse_datetime};
use crate::project::Project;
use cim_linkml_core::error::{CimLinkMLError, Result, ValueKind};
use cim_linkml_core::uml::{
    Attribute, AttributeStereotype, Class, ClassStereotype, ObjectId, Package, Relation,
    RelationDirection, RelationType,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Build a project from the three record streams.
///
/// Class records must arrive grouped by class id, and within a class by
/// attribute name; out-of-order input is grouped incorrectly, not rejected.
///
/// # Errors
///
/// Fails on the first record with an invalid relation type, multiplicity or
/// timestamp. No partial project is returned.
pub fn parse_uml_project<P, C, R>(packages: P, classes: C, relations: R) -> Result<Project>
where
    P: IntoIterator<Item = PackageRecord>,
    C: IntoIterator<Item = ClassRecord>,
    R: IntoIterator<Item = RelationRecord>,
{
    let packages = packages
        .into_iter()
        .map(|record| parse_uml_package(&record))
        .collect::<Result<Vec<_>>>()?;

    let class_records: Vec<ClassRecord> = classes.into_iter().collect();
    let classes = class_records
        .chunk_by(|a, b| a.class_id == b.class_id)
        .map(parse_uml_class)
        .collect::<Result<Vec<_>>>()?;

    let relations = relations
        .into_iter()
        .map(|record| parse_uml_relation(&record))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        packages = packages.len(),
        classes = classes.len(),
        relations = relations.len(),
        "Parsed UML project"
    );

    Ok(Project::new(packages, classes, relations))
}

/// Parse one package record
///
/// # Errors
///
/// Returns a parse error for a malformed timestamp.
pub fn parse_uml_package(record: &PackageRecord) -> Result<Package> {
    let location = || format!("package {}", record.id);

    Ok(Package {
        id: record.id,
        name: record.name.clone(),
        author: record.author.clone(),
        parent: record.parent_id,
        created_date: parse_datetime(record.created_date.as_deref())
            .map_err(|e| e.at(location()))?,
        modified_date: parse_datetime(record.modified_date.as_deref())
            .map_err(|e| e.at(location()))?,
        notes: record.note.clone(),
    })
}

/// Fold the records of one class into a [`Class`].
///
/// Records are grouped by attribute name and only the first record of each
/// group becomes an attribute, provided it carries an attribute id. A class
/// whose only record has no attribute id has no attributes.
///
/// # Errors
///
/// Returns a parse error for an empty group, a malformed timestamp or an
/// invalid attribute bound.
pub fn parse_uml_class(records: &[ClassRecord]) -> Result<Class> {
    let first = records
        .first()
        .ok_or_else(|| CimLinkMLError::parse("class record group is empty"))?;
    let location = || format!("class {}", first.class_id);

    let mut seen = HashSet::new();
    let mut attributes = Vec::new();
    for group in records.chunk_by(|a, b| a.attr_name == b.attr_name) {
        let record = &group[0];
        let Some(attr_id) = record.attr_id else {
            continue;
        };
        let Some(name) = record.attr_name.as_deref() else {
            return Err(CimLinkMLError::parse_at(
                format!("attribute {attr_id} has no name"),
                location(),
            ));
        };
        if !seen.insert(name.to_string()) {
            warn!(
                class = %first.class_name,
                attribute = name,
                "Dropping duplicate attribute"
            );
            continue;
        }
        let attribute = parse_uml_attribute(record, attr_id, name).map_err(|e| e.at(location()))?;
        attributes.push(attribute);
    }

    let stereotype = first
        .class_stereotype
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ClassStereotype::parse);

    Ok(Class {
        id: first.class_id,
        name: first.class_name.clone(),
        author: first.class_author.clone(),
        package: first.class_package_id,
        created_date: parse_datetime(first.class_created_date.as_deref())
            .map_err(|e| e.at(location()))?,
        modified_date: parse_datetime(first.class_modified_date.as_deref())
            .map_err(|e| e.at(location()))?,
        note: first.class_note.clone(),
        stereotype,
        attributes,
    })
}

fn parse_uml_attribute(record: &ClassRecord, id: ObjectId, name: &str) -> Result<Attribute> {
    Ok(Attribute {
        id,
        class_: record.class_id,
        name: name.to_string(),
        lower_bound: parse_cardinality_value(record.attr_lower_bound.as_deref())?,
        upper_bound: parse_cardinality_value(record.attr_upper_bound.as_deref())?,
        type_: record.attr_type.clone().filter(|t| !t.trim().is_empty()),
        default: record.attr_default.clone(),
        notes: record.attr_notes.clone(),
        stereotype: record
            .attr_stereotype
            .as_deref()
            .and_then(AttributeStereotype::parse),
    })
}

/// Parse one relation record.
///
/// A direction outside the known vocabulary is coerced to `None`.
///
/// # Errors
///
/// Returns [`CimLinkMLError::InvalidValue`] for an unknown relation type or a
/// malformed multiplicity.
pub fn parse_uml_relation(record: &RelationRecord) -> Result<Relation> {
    let type_ = RelationType::parse(&record.type_).ok_or_else(|| {
        CimLinkMLError::invalid_value(ValueKind::RelationType, record.type_.clone())
    })?;

    let direction = record.direction.as_deref().and_then(|value| {
        let direction = RelationDirection::parse(value);
        if direction.is_none() {
            debug!(relation = record.id, value, "Ignoring unknown relation direction");
        }
        direction
    });

    Ok(Relation {
        id: record.id,
        type_,
        source_class: record.start_object_id,
        dest_class: record.end_object_id,
        direction,
        source_card: parse_cardinality(record.source_card.as_deref())?,
        source_role: record.source_role.clone(),
        source_role_note: record.source_role_note.clone(),
        dest_card: parse_cardinality(record.dest_card.as_deref())?,
        dest_role: record.dest_role.clone(),
        dest_role_note: record.dest_role_note.clone(),
    })
}
