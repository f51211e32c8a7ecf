//! Tests for building the indexed project from export records

mod helpers;

use cim_linkml_core::error::{CimLinkMLError, ValueKind};
use cim_linkml_core::uml::{
    CardinalityValue, ClassStereotype, EntityKind, RelationDirection, RelationType,
};
use cim_linkml_service::parser::{
    ClassRecord, PackageRecord, RelationRecord, parse_uml_class, parse_uml_project,
};
use helpers::{CORE, DOMAIN, ExportBuilder, WIRES, cim_fixture, relation_record};
use pretty_assertions::assert_eq;

fn no_packages() -> Vec<PackageRecord> {
    Vec::new()
}

fn no_classes() -> Vec<ClassRecord> {
    Vec::new()
}

#[test]
fn test_fixture_indices() {
    let project = cim_fixture().project();

    assert_eq!(project.packages.len(), 5);
    assert_eq!(project.classes.len(), 11);
    // The dependency is dropped by the extraction filter
    assert_eq!(project.relations.len(), 6);

    let wires: Vec<_> = project
        .classes
        .by_package(WIRES)
        .map(|class| class.name.as_str())
        .collect();
    assert_eq!(wires, vec!["Switch", "Breaker"]);

    let core_ids: Vec<_> = project.classes.ids_by_package(CORE).iter().copied().collect();
    assert_eq!(core_ids, vec![110, 111, 112, 113]);

    assert_eq!(project.classes.ids_by_name("Terminal").len(), 1);
    assert!(project.classes.ids_by_name("Nothing").is_empty());
    assert_eq!(project.classes.by_package(999).count(), 0);
}

#[test]
fn test_class_fields_and_attributes() {
    let project = cim_fixture().project();

    let identified = project.classes.get(110).expect("IdentifiedObject");
    assert_eq!(identified.package, CORE);
    assert_eq!(identified.stereotype, None);
    assert_eq!(identified.note.as_deref(), Some("IdentifiedObject note"));

    let names: Vec<_> = identified.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["mRID", "name"]);

    let name = &identified.attributes[1];
    assert_eq!(name.class_, 110);
    assert_eq!(name.lower_bound, CardinalityValue::Bounded(1));
    assert_eq!(name.upper_bound, CardinalityValue::Bounded(1));
    assert_eq!(name.type_.as_deref(), Some("String"));

    let multiplier = project.classes.get(104).expect("UnitMultiplier");
    assert_eq!(multiplier.stereotype, Some(ClassStereotype::Enumeration));
    assert_eq!(multiplier.attributes.len(), 2);

    let float = project.classes.get(100).expect("Float");
    assert!(float.is_primitive());
    assert!(float.attributes.is_empty());
    assert_eq!(
        project.classes.get(103).expect("ActivePower").stereotype,
        Some(ClassStereotype::CimDatatype)
    );
    assert_eq!(project.classes.get(103).expect("ActivePower").package, DOMAIN);
}

#[test]
fn test_relation_fields() {
    let project = cim_fixture().project();

    let association = project.relations.get(6).expect("association");
    assert_eq!(association.type_, RelationType::Association);
    assert_eq!(association.source_class, 112);
    assert_eq!(association.dest_class, 113);
    assert_eq!(association.direction, Some(RelationDirection::SourceToDestination));
    assert_eq!(association.source_card.lower_bound, CardinalityValue::Bounded(0));
    assert_eq!(association.source_card.upper_bound, CardinalityValue::Unbounded);
    assert_eq!(association.dest_role.as_deref(), Some("ConductingEquipment"));

    let outgoing: Vec<_> = project.relations.by_source(112).map(|r| r.id).collect();
    assert_eq!(outgoing, vec![2, 6]);
    let incoming: Vec<_> = project.relations.by_dest(110).map(|r| r.id).collect();
    assert_eq!(incoming, vec![1, 2]);
}

#[test]
fn test_lookup_miss_is_not_found() {
    let project = cim_fixture().project();

    assert!(matches!(
        project.classes.get(4242),
        Err(CimLinkMLError::NotFound {
            entity: EntityKind::Class,
            id: 4242
        })
    ));
    assert!(project.packages.get(4242).is_err());
    assert!(project.relations.get(4242).is_err());
}

#[test]
fn test_qualified_names() {
    let project = cim_fixture().project();

    assert_eq!(project.qualified_name(WIRES).expect("path"), "TC57CIM.Wires");
    assert_eq!(project.qualified_name(helpers::TC57CIM).expect("path"), "TC57CIM");
    assert_eq!(project.qualified_name(helpers::MODEL).expect("path"), "");
}

#[test]
fn test_first_record_per_attribute_name_wins() {
    let base = ClassRecord {
        class_id: 7,
        class_name: "Meter".to_string(),
        class_package_id: 1,
        ..Default::default()
    };
    let records = vec![
        ClassRecord {
            attr_id: Some(70),
            attr_name: Some("reading".to_string()),
            attr_type: Some("Float".to_string()),
            ..base.clone()
        },
        ClassRecord {
            attr_id: Some(71),
            attr_name: Some("reading".to_string()),
            attr_type: Some("Integer".to_string()),
            ..base.clone()
        },
        ClassRecord {
            attr_id: Some(72),
            attr_name: Some("serial".to_string()),
            ..base
        },
    ];

    let class = parse_uml_class(&records).expect("valid class");
    assert_eq!(class.attributes.len(), 2);
    assert_eq!(class.attributes[0].id, 70);
    assert_eq!(class.attributes[0].type_.as_deref(), Some("Float"));
    assert_eq!(class.attributes[1].type_, None);
}

#[test]
fn test_class_without_attributes_has_none() {
    let project = ExportBuilder::new()
        .package(1, "Model", None)
        .class(2, "Empty", 1, None)
        .project();

    assert!(project.classes.get(2).expect("Empty").attributes.is_empty());
}

#[test]
fn test_unknown_relation_type_rejected() {
    let result = parse_uml_project(
        no_packages(),
        no_classes(),
        vec![relation_record(1, "Friendship", 2, 3)],
    );

    assert!(matches!(
        result,
        Err(CimLinkMLError::InvalidValue {
            kind: ValueKind::RelationType,
            ..
        })
    ));
}

#[test]
fn test_malformed_multiplicity_rejected() {
    let mut record = relation_record(1, "Association", 2, 3);
    record.dest_card = Some("one..many".to_string());

    let result = parse_uml_project(no_packages(), no_classes(), vec![record]);
    assert!(matches!(
        result,
        Err(CimLinkMLError::InvalidValue {
            kind: ValueKind::Cardinality,
            ..
        })
    ));
}

#[test]
fn test_unknown_direction_coerced_to_none() {
    let mut record = relation_record(1, "Association", 2, 3);
    record.direction = Some("Sideways".to_string());

    let project =
        parse_uml_project(no_packages(), no_classes(), vec![record]).expect("valid project");
    assert_eq!(project.relations.get(1).expect("relation").direction, None);
}

#[test]
fn test_malformed_timestamp_rejected() {
    let records = ExportBuilder::new().package(1, "Model", None).records();
    let mut packages = records.packages;
    packages[0].created_date = Some("yesterday".to_string());

    let result = parse_uml_project(packages, no_classes(), Vec::<RelationRecord>::new());
    assert!(matches!(result, Err(CimLinkMLError::ParseError { .. })));
}

#[test]
fn test_duplicate_ids_keep_first() {
    let project = ExportBuilder::new()
        .package(1, "Model", None)
        .package(1, "Shadow", None)
        .project();

    assert_eq!(project.packages.len(), 1);
    assert_eq!(project.packages.get(1).expect("package").name, "Model");
}
