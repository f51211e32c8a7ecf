//! Record filtering applied between a record source and the model builder

use super::traits::RecordSet;
use crate::parser::ClassRecord;
use cim_linkml_core::config::{GenerationConfig, NON_NORMATIVE_PACKAGE_IDS};
use cim_linkml_core::uml::{ObjectId, RelationType};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Connector types that never contribute to a schema
const SKIPPED_RELATION_TYPES: &[RelationType] = &[RelationType::Dependency, RelationType::NoteLink];

/// Drops excluded packages and their content, and orders the remaining
/// records the way the model builder expects them.
#[derive(Debug, Clone)]
pub struct ExtractionFilter {
    excluded_package_ids: HashSet<ObjectId>,
}

impl Default for ExtractionFilter {
    fn default() -> Self {
        Self::new(NON_NORMATIVE_PACKAGE_IDS.iter().copied())
    }
}

impl ExtractionFilter {
    #[must_use]
    pub fn new(excluded_package_ids: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            excluded_package_ids: excluded_package_ids.into_iter().collect(),
        }
    }

    /// Filter that keeps every package
    #[must_use]
    pub fn keep_all() -> Self {
        Self::new([])
    }

    #[must_use]
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.excluded_package_ids.iter().copied())
    }

    #[must_use]
    pub fn is_excluded(&self, package_id: ObjectId) -> bool {
        self.excluded_package_ids.contains(&package_id)
    }

    /// Whether every class named `type_name` lives in an excluded package.
    ///
    /// Names no class carries are not excluded; they are left for the
    /// generator to report.
    fn is_excluded_type(
        &self,
        type_name: &str,
        type_packages: &HashMap<String, HashSet<ObjectId>>,
    ) -> bool {
        type_packages
            .get(type_name)
            .is_some_and(|packages| packages.iter().all(|id| self.is_excluded(*id)))
    }

    /// Drop class rows of excluded packages and attribute rows typed by
    /// classes that only live in excluded packages.
    ///
    /// A class whose every attribute row is dropped keeps one row with the
    /// attribute columns cleared.
    fn retain_classes(&self, classes: Vec<ClassRecord>) -> Vec<ClassRecord> {
        let mut type_packages: HashMap<String, HashSet<ObjectId>> = HashMap::new();
        for record in &classes {
            type_packages
                .entry(record.class_name.clone())
                .or_default()
                .insert(record.class_package_id);
        }

        let mut kept = Vec::with_capacity(classes.len());
        let mut stripped: HashMap<ObjectId, ClassRecord> = HashMap::new();
        for record in classes {
            if self.is_excluded(record.class_package_id) {
                continue;
            }
            let excluded_type = record
                .attr_type
                .as_deref()
                .is_some_and(|type_name| self.is_excluded_type(type_name, &type_packages));
            if excluded_type {
                debug!(
                    class = %record.class_name,
                    attribute = record.attr_name.as_deref().unwrap_or_default(),
                    "Dropping attribute typed by an excluded class"
                );
                stripped
                    .entry(record.class_id)
                    .or_insert_with(|| record.without_attribute());
                continue;
            }
            kept.push(record);
        }

        let kept_ids: HashSet<ObjectId> = kept.iter().map(|record| record.class_id).collect();
        kept.extend(
            stripped
                .into_values()
                .filter(|record| !kept_ids.contains(&record.class_id)),
        );
        kept
    }

    /// Apply the filter and sort the surviving records.
    ///
    /// Packages and relations are sorted by id, class records by class id
    /// then attribute name. Sorting is stable, so records sharing a key keep
    /// their input order.
    #[must_use]
    pub fn apply(&self, records: RecordSet) -> RecordSet {
        let RecordSet {
            mut packages,
            classes,
            mut relations,
        } = records;

        let class_packages: HashMap<ObjectId, ObjectId> = classes
            .iter()
            .map(|record| (record.class_id, record.class_package_id))
            .collect();

        let before = (packages.len(), classes.len(), relations.len());

        packages.retain(|record| !self.is_excluded(record.id));
        let mut classes = self.retain_classes(classes);
        relations.retain(|record| {
            let skipped_type = RelationType::parse(&record.type_)
                .is_some_and(|type_| SKIPPED_RELATION_TYPES.contains(&type_));
            let excluded_end = [record.start_object_id, record.end_object_id]
                .iter()
                .filter_map(|class_id| class_packages.get(class_id))
                .any(|package_id| self.is_excluded(*package_id));
            !skipped_type && !excluded_end
        });

        packages.sort_by_key(|record| record.id);
        classes.sort_by(|a, b| {
            a.class_id
                .cmp(&b.class_id)
                .then_with(|| a.attr_name.cmp(&b.attr_name))
        });
        relations.sort_by_key(|record| record.id);

        debug!(
            packages_dropped = before.0 - packages.len(),
            class_records_dropped = before.1.saturating_sub(classes.len()),
            relations_dropped = before.2 - relations.len(),
            "Filtered export records"
        );

        RecordSet {
            packages,
            classes,
            relations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{PackageRecord, RelationRecord};
    use pretty_assertions::assert_eq;

    fn package(id: ObjectId) -> PackageRecord {
        PackageRecord {
            id,
            name: format!("P{id}"),
            ..Default::default()
        }
    }

    fn class(id: ObjectId, package_id: ObjectId, attr: Option<&str>) -> ClassRecord {
        ClassRecord {
            class_id: id,
            class_name: format!("C{id}"),
            class_package_id: package_id,
            attr_name: attr.map(str::to_string),
            ..Default::default()
        }
    }

    fn relation(id: ObjectId, type_: &str, start: ObjectId, end: ObjectId) -> RelationRecord {
        RelationRecord {
            id,
            type_: type_.to_string(),
            start_object_id: start,
            end_object_id: end,
            ..Default::default()
        }
    }

    #[test]
    fn test_excluded_package_content_dropped() {
        let filter = ExtractionFilter::new([9]);
        let records = RecordSet::new(
            vec![package(9), package(3), package(1)],
            vec![class(20, 9, None), class(10, 3, None)],
            vec![
                relation(2, "Association", 10, 20),
                relation(1, "Association", 10, 10),
            ],
        );

        let filtered = filter.apply(records);

        let package_ids: Vec<_> = filtered.packages.iter().map(|p| p.id).collect();
        assert_eq!(package_ids, vec![1, 3]);
        assert_eq!(filtered.classes.len(), 1);
        assert_eq!(filtered.classes[0].class_id, 10);
        let relation_ids: Vec<_> = filtered.relations.iter().map(|r| r.id).collect();
        assert_eq!(relation_ids, vec![1]);
    }

    #[test]
    fn test_attributes_typed_by_excluded_classes_dropped() {
        let filter = ExtractionFilter::new([9]);
        let typed = |class_id, package_id, attr: &str, type_: &str| {
            let mut record = class(class_id, package_id, Some(attr));
            record.attr_type = Some(type_.to_string());
            record
        };
        let mut shared_name = class(22, 2, None);
        shared_name.class_name = "C21".to_string();
        let records = RecordSet::new(
            vec![package(2), package(9)],
            vec![
                typed(10, 2, "extra", "C20"),
                typed(10, 2, "value", "C11"),
                typed(11, 2, "other", "C20"),
                typed(12, 2, "shared", "C21"),
                typed(13, 2, "unknown", "Missing"),
                class(20, 9, None),
                class(21, 9, None),
                shared_name,
            ],
            vec![],
        );

        let filtered = filter.apply(records);
        let rows: Vec<_> = filtered
            .classes
            .iter()
            .map(|r| (r.class_id, r.attr_name.as_deref()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (10, Some("value")),
                (11, None),
                (12, Some("shared")),
                (13, Some("unknown")),
                (22, None),
            ]
        );
    }

    #[test]
    fn test_dependency_and_note_links_dropped() {
        let filter = ExtractionFilter::keep_all();
        let records = RecordSet::new(
            vec![],
            vec![],
            vec![
                relation(3, "NoteLink", 1, 2),
                relation(2, "Dependency", 1, 2),
                relation(1, "Generalization", 1, 2),
            ],
        );

        let filtered = filter.apply(records);
        assert_eq!(filtered.relations.len(), 1);
        assert_eq!(filtered.relations[0].type_, "Generalization");
    }

    #[test]
    fn test_class_records_sorted_stably() {
        let filter = ExtractionFilter::keep_all();
        let mut first = class(5, 1, Some("b"));
        first.attr_type = Some("Float".to_string());
        let mut second = class(5, 1, Some("b"));
        second.attr_type = Some("String".to_string());
        let records = RecordSet::new(
            vec![],
            vec![first, class(4, 1, Some("z")), second, class(5, 1, Some("a"))],
            vec![],
        );

        let filtered = filter.apply(records);
        let keys: Vec<_> = filtered
            .classes
            .iter()
            .map(|r| (r.class_id, r.attr_name.clone(), r.attr_type.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (4, Some("z".to_string()), None),
                (5, Some("a".to_string()), None),
                (5, Some("b".to_string()), Some("Float".to_string())),
                (5, Some("b".to_string()), Some("String".to_string())),
            ]
        );
    }

    #[test]
    fn test_default_excludes_non_normative_packages() {
        let filter = ExtractionFilter::default();
        assert!(filter.is_excluded(5));
        assert!(!filter.is_excluded(6));
    }
}
