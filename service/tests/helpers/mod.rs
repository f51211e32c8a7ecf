//! Shared fixtures for integration tests
//!
//! [`ExportBuilder`] assembles export records the way the modeling tool
//! writes them, and [`cim_fixture`] is a small CIM-like model used across
//! test files.

#![allow(dead_code)]

use cim_linkml_core::uml::ObjectId;
use cim_linkml_service::loader::{ExtractionFilter, RecordSet};
use cim_linkml_service::parser::{ClassRecord, PackageRecord, RelationRecord, parse_uml_project};
use cim_linkml_service::project::Project;

pub const MODEL: ObjectId = 10;
pub const TC57CIM: ObjectId = 11;
pub const CORE: ObjectId = 12;
pub const WIRES: ObjectId = 13;
pub const DOMAIN: ObjectId = 14;

/// Builder for the three record streams of an export
#[derive(Debug, Clone, Default)]
pub struct ExportBuilder {
    packages: Vec<PackageRecord>,
    classes: Vec<ClassRecord>,
    attributes: Vec<ClassRecord>,
    relations: Vec<RelationRecord>,
}

impl ExportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(mut self, id: ObjectId, name: &str, parent: Option<ObjectId>) -> Self {
        self.packages.push(PackageRecord {
            id,
            name: name.to_string(),
            parent_id: parent,
            created_date: Some("2020-01-01 00:00:00".to_string()),
            modified_date: Some("2021-06-30 12:00:00".to_string()),
            ..Default::default()
        });
        self
    }

    pub fn class(
        mut self,
        id: ObjectId,
        name: &str,
        package: ObjectId,
        stereotype: Option<&str>,
    ) -> Self {
        self.classes.push(ClassRecord {
            class_id: id,
            class_name: name.to_string(),
            class_package_id: package,
            class_stereotype: stereotype.map(str::to_string),
            class_created_date: Some("2020-01-01 00:00:00".to_string()),
            class_modified_date: Some("2020-01-01 00:00:00".to_string()),
            class_note: Some(format!("{name} note")),
            ..Default::default()
        });
        self
    }

    /// Attribute of a class added before with [`ExportBuilder::class`]
    pub fn attribute(
        mut self,
        class_id: ObjectId,
        attr_id: ObjectId,
        name: &str,
        type_: Option<&str>,
        bounds: (&str, &str),
    ) -> Self {
        let class = self
            .classes
            .iter()
            .find(|record| record.class_id == class_id)
            .cloned()
            .expect("attribute added before its class");
        self.attributes.push(ClassRecord {
            attr_id: Some(attr_id),
            attr_name: Some(name.to_string()),
            attr_type: type_.map(str::to_string),
            attr_lower_bound: Some(bounds.0.to_string()),
            attr_upper_bound: Some(bounds.1.to_string()),
            attr_notes: Some(format!("{name} notes")),
            ..class
        });
        self
    }

    /// Enumeration literal; literals carry no type and no bounds
    pub fn literal(mut self, class_id: ObjectId, attr_id: ObjectId, name: &str) -> Self {
        self = self.attribute(class_id, attr_id, name, None, ("", ""));
        if let Some(literal) = self.attributes.last_mut() {
            literal.attr_lower_bound = None;
            literal.attr_upper_bound = None;
            literal.attr_stereotype = Some("enum".to_string());
        }
        self
    }

    pub fn relation(mut self, record: RelationRecord) -> Self {
        self.relations.push(record);
        self
    }

    pub fn generalization(self, id: ObjectId, subclass: ObjectId, superclass: ObjectId) -> Self {
        self.relation(relation_record(id, "Generalization", subclass, superclass))
    }

    /// Association with roles and multiplicities on both ends
    pub fn association(
        self,
        id: ObjectId,
        (source, source_role, source_card): (ObjectId, &str, &str),
        (dest, dest_role, dest_card): (ObjectId, &str, &str),
    ) -> Self {
        let mut record = relation_record(id, "Association", source, dest);
        record.source_role = Some(source_role.to_string()).filter(|r| !r.is_empty());
        record.source_card = Some(source_card.to_string());
        record.dest_role = Some(dest_role.to_string()).filter(|r| !r.is_empty());
        record.dest_card = Some(dest_card.to_string());
        record.dest_role_note = Some(format!("{dest_role} role"));
        record.source_role_note = Some(format!("{source_role} role"));
        record.direction = Some("Source -> Destination".to_string());
        self.relation(record)
    }

    /// Records in builder order; classes without attributes contribute one
    /// record with all attribute columns absent.
    pub fn records(&self) -> RecordSet {
        let mut classes = Vec::new();
        for class in &self.classes {
            let attributes: Vec<_> = self
                .attributes
                .iter()
                .filter(|record| record.class_id == class.class_id)
                .cloned()
                .collect();
            if attributes.is_empty() {
                classes.push(class.clone());
            } else {
                classes.extend(attributes);
            }
        }
        RecordSet::new(self.packages.clone(), classes, self.relations.clone())
    }

    /// Filtered and sorted records, then the built project
    pub fn project(&self) -> Project {
        build(self.records())
    }
}

pub fn relation_record(
    id: ObjectId,
    type_: &str,
    source: ObjectId,
    dest: ObjectId,
) -> RelationRecord {
    RelationRecord {
        id,
        type_: type_.to_string(),
        start_object_id: source,
        end_object_id: dest,
        ..Default::default()
    }
}

pub fn build(records: RecordSet) -> Project {
    let records = ExtractionFilter::keep_all().apply(records);
    parse_uml_project(records.packages, records.classes, records.relations)
        .expect("fixture records are valid")
}

/// A small slice of the CIM: an inheritance chain from `IdentifiedObject`
/// down to `Breaker`, a terminal association, a data type with a unit
/// multiplier enumeration and the primitives they use.
pub fn cim_fixture() -> ExportBuilder {
    ExportBuilder::new()
        .package(MODEL, "Model", Some(0))
        .package(TC57CIM, "TC57CIM", Some(MODEL))
        .package(CORE, "Core", Some(TC57CIM))
        .package(WIRES, "Wires", Some(TC57CIM))
        .package(DOMAIN, "Domain", Some(TC57CIM))
        .class(100, "Float", DOMAIN, Some("Primitive"))
        .class(101, "String", DOMAIN, Some("Primitive"))
        .class(102, "Boolean", DOMAIN, Some("Primitive"))
        .class(103, "ActivePower", DOMAIN, Some("CIMDatatype"))
        .attribute(103, 1030, "value", Some("Float"), ("0", "1"))
        .attribute(103, 1031, "multiplier", Some("UnitMultiplier"), ("0", "1"))
        .class(104, "UnitMultiplier", DOMAIN, Some("enumeration"))
        .literal(104, 1040, "k")
        .literal(104, 1041, "M")
        .class(110, "IdentifiedObject", CORE, None)
        .attribute(110, 1100, "mRID", Some("String"), ("0", "1"))
        .attribute(110, 1101, "name", Some("String"), ("1", "1"))
        .class(111, "PowerSystemResource", CORE, None)
        .class(112, "Terminal", CORE, None)
        .class(113, "ConductingEquipment", CORE, None)
        .class(120, "Switch", WIRES, None)
        .attribute(120, 1200, "normalOpen", Some("Boolean"), ("1", "1"))
        .attribute(120, 1201, "ratedPower", Some("ActivePower"), ("0", "1"))
        .class(121, "Breaker", WIRES, None)
        .generalization(1, 111, 110)
        .generalization(2, 112, 110)
        .generalization(3, 113, 111)
        .generalization(4, 120, 113)
        .generalization(5, 121, 120)
        .association(
            6,
            (112, "Terminals", "0..*"),
            (113, "ConductingEquipment", "0..1"),
        )
        .relation(relation_record(7, "Dependency", 120, 104))
}
