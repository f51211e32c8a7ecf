//! Indexed in-memory UML project
//!
//! The [`Project`] exclusively owns all packages, classes and relations.
//! Entities point at each other by id only, so dangling ids in the source
//! data surface as lookup failures rather than broken references.

pub mod indices;

pub use indices::{Classes, Packages, Relations};

use cim_linkml_core::error::{CimLinkMLError, Result};
use cim_linkml_core::uml::{Class, ObjectId, Package, Relation};

/// Root aggregate of the UML model
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub packages: Packages,
    pub classes: Classes,
    pub relations: Relations,
}

impl Project {
    /// Build the project and all of its indices
    #[must_use]
    pub fn new(packages: Vec<Package>, classes: Vec<Class>, relations: Vec<Relation>) -> Self {
        Self {
            packages: Packages::new(packages),
            classes: Classes::new(classes),
            relations: Relations::new(relations),
        }
    }

    /// Names of the packages from below the forest root down to `package_id`.
    ///
    /// The root itself (parent absent or `0`) does not contribute its name.
    ///
    /// # Errors
    ///
    /// Returns [`CimLinkMLError::NotFound`] if a parent id does not resolve and
    /// [`CimLinkMLError::PackageCycle`] if the walk never reaches a root.
    pub fn package_path(&self, package_id: ObjectId) -> Result<Vec<&str>> {
        let mut path = Vec::new();
        let mut package = self.packages.get(package_id)?;

        while !package.is_root() {
            if path.len() > self.packages.len() {
                return Err(CimLinkMLError::PackageCycle { id: package_id });
            }
            path.push(package.name.as_str());
            let Some(parent) = package.parent else {
                break;
            };
            package = self.packages.get(parent)?;
        }

        path.reverse();
        Ok(path)
    }

    /// Dotted qualified name of a package, e.g. `TC57CIM.IEC61970.Wires`
    ///
    /// # Errors
    ///
    /// See [`Project::package_path`].
    pub fn qualified_name(&self, package_id: ObjectId) -> Result<String> {
        Ok(self.package_path(package_id)?.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn package(id: ObjectId, name: &str, parent: Option<ObjectId>) -> Package {
        Package {
            id,
            name: name.to_string(),
            author: None,
            parent,
            created_date: NaiveDateTime::default(),
            modified_date: NaiveDateTime::default(),
            notes: None,
        }
    }

    #[test]
    fn test_qualified_name_excludes_root() {
        let project = Project::new(
            vec![
                package(2, "Model", Some(0)),
                package(3, "TC57CIM", Some(2)),
                package(4, "IEC61970", Some(3)),
                package(5, "Wires", Some(4)),
            ],
            vec![],
            vec![],
        );

        assert_eq!(
            project.qualified_name(5).expect("resolvable path"),
            "TC57CIM.IEC61970.Wires"
        );
        assert_eq!(project.qualified_name(2).expect("root"), "");
    }

    #[test]
    fn test_dangling_parent_is_lookup_failure() {
        let project = Project::new(vec![package(5, "Wires", Some(99))], vec![], vec![]);
        let err = project.qualified_name(5).unwrap_err();
        assert!(err.is_not_found());
        assert!(project.qualified_name(1234).unwrap_err().is_not_found());
    }

    #[test]
    fn test_parent_cycle_is_detected() {
        let project = Project::new(
            vec![package(5, "A", Some(6)), package(6, "B", Some(5))],
            vec![],
            vec![],
        );
        assert!(matches!(
            project.qualified_name(5),
            Err(CimLinkMLError::PackageCycle { id: 5 })
        ));
    }
}
