//! Entity collections with their secondary lookup maps
//!
//! Built once from parsed entities and read-only afterwards. A by-id miss is
//! a [`CimLinkMLError::NotFound`]; secondary lookups with no entries yield an
//! empty iterator.

use cim_linkml_core::error::{CimLinkMLError, Result};
use cim_linkml_core::uml::{Class, EntityKind, ObjectId, Package, Relation};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

static NO_IDS: BTreeSet<ObjectId> = BTreeSet::new();

fn insert_unique<T>(
    by_id: &mut IndexMap<ObjectId, T>,
    entity: EntityKind,
    id: ObjectId,
    value: T,
) -> bool {
    if by_id.contains_key(&id) {
        warn!(%entity, id, "Ignoring entity with duplicate object ID");
        return false;
    }
    by_id.insert(id, value);
    true
}

/// Packages by id
#[derive(Debug, Clone, Default)]
pub struct Packages {
    by_id: IndexMap<ObjectId, Package>,
}

impl Packages {
    /// Index packages; the first package with a given id wins
    #[must_use]
    pub fn new(packages: impl IntoIterator<Item = Package>) -> Self {
        let mut by_id = IndexMap::new();
        for package in packages {
            insert_unique(&mut by_id, EntityKind::Package, package.id, package);
        }
        Self { by_id }
    }

    /// Package by id
    ///
    /// # Errors
    ///
    /// Returns [`CimLinkMLError::NotFound`] for an unknown id.
    pub fn get(&self, id: ObjectId) -> Result<&Package> {
        self.by_id
            .get(&id)
            .ok_or_else(|| CimLinkMLError::not_found(EntityKind::Package, id))
    }

    /// All packages in input order
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.by_id.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Classes by id, by name and by owning package
#[derive(Debug, Clone, Default)]
pub struct Classes {
    by_id: IndexMap<ObjectId, Class>,
    /// Class names are not unique across the model
    by_name: HashMap<String, BTreeSet<ObjectId>>,
    by_package_id: HashMap<ObjectId, BTreeSet<ObjectId>>,
}

impl Classes {
    /// Index classes; the first class with a given id wins
    #[must_use]
    pub fn new(classes: impl IntoIterator<Item = Class>) -> Self {
        let mut index = Self::default();
        for class in classes {
            let (id, name, package) = (class.id, class.name.clone(), class.package);
            if insert_unique(&mut index.by_id, EntityKind::Class, id, class) {
                index.by_name.entry(name).or_default().insert(id);
                index.by_package_id.entry(package).or_default().insert(id);
            }
        }
        index
    }

    /// Class by id
    ///
    /// # Errors
    ///
    /// Returns [`CimLinkMLError::NotFound`] for an unknown id.
    pub fn get(&self, id: ObjectId) -> Result<&Class> {
        self.by_id
            .get(&id)
            .ok_or_else(|| CimLinkMLError::not_found(EntityKind::Class, id))
    }

    /// Ids of all classes with the given name, ascending
    #[must_use]
    pub fn ids_by_name(&self, name: &str) -> &BTreeSet<ObjectId> {
        self.by_name.get(name).unwrap_or(&NO_IDS)
    }

    /// All classes with the given name, in ascending id order
    pub fn by_name<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Class> + use<'a> {
        self.ids_by_name(name)
            .iter()
            .filter_map(move |id| self.by_id.get(id))
    }

    /// Ids of the classes declared directly in a package, ascending
    #[must_use]
    pub fn ids_by_package(&self, package_id: ObjectId) -> &BTreeSet<ObjectId> {
        self.by_package_id.get(&package_id).unwrap_or(&NO_IDS)
    }

    /// Classes declared directly in a package, in ascending id order
    pub fn by_package(&self, package_id: ObjectId) -> impl Iterator<Item = &Class> {
        self.ids_by_package(package_id)
            .iter()
            .filter_map(move |id| self.by_id.get(id))
    }

    /// All classes in input order
    pub fn iter(&self) -> impl Iterator<Item = &Class> {
        self.by_id.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Relations by id and by endpoint
#[derive(Debug, Clone, Default)]
pub struct Relations {
    by_id: IndexMap<ObjectId, Relation>,
    by_source_id: HashMap<ObjectId, BTreeSet<ObjectId>>,
    by_dest_id: HashMap<ObjectId, BTreeSet<ObjectId>>,
}

impl Relations {
    /// Index relations; the first relation with a given id wins
    #[must_use]
    pub fn new(relations: impl IntoIterator<Item = Relation>) -> Self {
        let mut index = Self::default();
        for relation in relations {
            let (id, source, dest) = (relation.id, relation.source_class, relation.dest_class);
            if insert_unique(&mut index.by_id, EntityKind::Relation, id, relation) {
                index.by_source_id.entry(source).or_default().insert(id);
                index.by_dest_id.entry(dest).or_default().insert(id);
            }
        }
        index
    }

    /// Relation by id
    ///
    /// # Errors
    ///
    /// Returns [`CimLinkMLError::NotFound`] for an unknown id.
    pub fn get(&self, id: ObjectId) -> Result<&Relation> {
        self.by_id
            .get(&id)
            .ok_or_else(|| CimLinkMLError::not_found(EntityKind::Relation, id))
    }

    /// Relations whose source is the given class, in ascending id order
    pub fn by_source(&self, class_id: ObjectId) -> impl Iterator<Item = &Relation> {
        self.by_source_id
            .get(&class_id)
            .unwrap_or(&NO_IDS)
            .iter()
            .filter_map(move |id| self.by_id.get(id))
    }

    /// Relations whose destination is the given class, in ascending id order
    pub fn by_dest(&self, class_id: ObjectId) -> impl Iterator<Item = &Relation> {
        self.by_dest_id
            .get(&class_id)
            .unwrap_or(&NO_IDS)
            .iter()
            .filter_map(move |id| self.by_id.get(id))
    }

    /// All relations in input order
    pub fn iter(&self) -> impl Iterator<Item = &Relation> {
        self.by_id.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
