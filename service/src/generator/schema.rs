//! Per-package `LinkML` schema generation
//!
//! Generating a package emits every class declared in it together with the
//! transitive closure of what those classes depend on: superclasses,
//! attribute type classes and the far ends of non-generalization relations.
//! The per-invocation [`GenerationState`] is both the memo and the cycle
//! breaker, so cyclic class graphs terminate and every definition is emitted
//! once.

use super::curie::gen_curie;
use super::slots::{TraversalDirection, slot_from_attribute, slot_from_relation};
use crate::project::Project;
use cim_linkml_core::error::Result;
use cim_linkml_core::types::{
    CIM_PREFIX, ClassDefinition, EnumDefinition, PermissibleValue, SchemaDefinition,
    SlotDefinition,
};
use cim_linkml_core::uml::{Class, ClassStereotype, ObjectId};
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Kind of definition a duplicate name was found for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Class,
    Enum,
}

/// A class skipped because a definition with its name was already generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateDefinition {
    pub kind: DefinitionKind,
    pub name: String,
    /// Id of the skipped UML class
    pub skipped: ObjectId,
}

/// Memo of one package's generation run
#[derive(Debug, Default)]
pub struct GenerationState {
    classes: IndexMap<String, ClassDefinition>,
    enums: IndexMap<String, EnumDefinition>,
    visited: HashSet<ObjectId>,
    duplicates: Vec<DuplicateDefinition>,
}

impl GenerationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the UML class has already been processed in this run
    #[must_use]
    pub fn is_visited(&self, class_id: ObjectId) -> bool {
        self.visited.contains(&class_id)
    }

    /// Generated classes in generation order
    #[must_use]
    pub fn classes(&self) -> &IndexMap<String, ClassDefinition> {
        &self.classes
    }

    /// Generated enums in generation order
    #[must_use]
    pub fn enums(&self) -> &IndexMap<String, EnumDefinition> {
        &self.enums
    }

    /// Classes skipped for reusing an already generated name
    #[must_use]
    pub fn duplicates(&self) -> &[DuplicateDefinition] {
        &self.duplicates
    }

    fn record_duplicate(&mut self, kind: DefinitionKind, class: &Class) {
        warn!(
            name = %class.name,
            id = class.id,
            ?kind,
            "Definition with this name is already generated, skipping this one"
        );
        self.duplicates.push(DuplicateDefinition {
            kind,
            name: class.name.clone(),
            skipped: class.id,
        });
    }
}

/// Schema of one package plus the duplicates skipped while building it
#[derive(Debug, Clone)]
pub struct GeneratedSchema {
    pub schema: SchemaDefinition,
    pub duplicates: Vec<DuplicateDefinition>,
}

/// `LinkML` schema generator over a read-only [`Project`].
///
/// The generator holds no mutable state; every call to
/// [`LinkMLGenerator::generate`] works on a fresh [`GenerationState`], so one
/// generator can serve several packages, also from several threads.
#[derive(Debug, Clone, Copy)]
pub struct LinkMLGenerator<'a> {
    project: &'a Project,
}

impl<'a> LinkMLGenerator<'a> {
    #[must_use]
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Generate the schema of a package
    ///
    /// # Errors
    ///
    /// Returns an error if the package is unknown, if an id in the dependency
    /// closure does not resolve, or if a closed-vocabulary value is invalid.
    pub fn generate(&self, package_id: ObjectId) -> Result<SchemaDefinition> {
        Ok(self.generate_with_report(package_id)?.schema)
    }

    /// Generate the schema of a package and report skipped duplicates
    ///
    /// # Errors
    ///
    /// See [`LinkMLGenerator::generate`].
    pub fn generate_with_report(&self, package_id: ObjectId) -> Result<GeneratedSchema> {
        let package = self.project.packages.get(package_id)?;
        let mut state = GenerationState::new();

        for class in self.project.classes.by_package(package_id) {
            self.generate_with_dependencies(&mut state, class)?;
        }

        let qualified_name = self.project.qualified_name(package_id)?;
        debug!(
            package = %qualified_name,
            classes = state.classes.len(),
            enums = state.enums.len(),
            "Generated package schema"
        );

        let mut schema =
            SchemaDefinition::cim(gen_curie(&package.name, CIM_PREFIX), qualified_name);
        schema.title = Some(package.name.clone());
        schema.description.clone_from(&package.notes);
        schema.classes = (!state.classes.is_empty()).then_some(state.classes);
        schema.enums = (!state.enums.is_empty()).then_some(state.enums);

        Ok(GeneratedSchema {
            schema,
            duplicates: state.duplicates,
        })
    }

    /// Generate `class` and, depth first, everything it depends on.
    ///
    /// Classes already visited in `state` are not traversed again, which
    /// bounds the walk on cyclic graphs. Dependencies are visited in
    /// ascending id order.
    ///
    /// # Errors
    ///
    /// Propagates the first lookup or vocabulary failure in the closure.
    pub fn generate_with_dependencies(
        &self,
        state: &mut GenerationState,
        class: &'a Class,
    ) -> Result<()> {
        let mut stack = vec![class];

        while let Some(current) = stack.pop() {
            if !self.generate_definition(state, current)? {
                continue;
            }

            let dependencies = self.dependency_classes(current)?;
            stack.extend(
                dependencies
                    .into_iter()
                    .rev()
                    .filter(|dep| !dep.is_primitive() && !state.is_visited(dep.id)),
            );
        }

        Ok(())
    }

    /// Generate the definition of a single class into `state`.
    ///
    /// Returns `false` when nothing was generated: the class was visited
    /// before, is a primitive, or its name is taken.
    fn generate_definition(&self, state: &mut GenerationState, class: &Class) -> Result<bool> {
        if !state.visited.insert(class.id) {
            return Ok(false);
        }

        match &class.stereotype {
            Some(ClassStereotype::Primitive) => {
                debug!(class = %class.name, "Primitive class, not emitted");
                Ok(false)
            }
            Some(ClassStereotype::Enumeration) => {
                if state.enums.contains_key(&class.name) {
                    state.record_duplicate(DefinitionKind::Enum, class);
                    return Ok(false);
                }
                let enum_def = self.gen_enum(class);
                state.enums.insert(class.name.clone(), enum_def);
                Ok(true)
            }
            Some(ClassStereotype::CimDatatype | ClassStereotype::Unrecognized(_)) | None => {
                if state.classes.contains_key(&class.name) {
                    state.record_duplicate(DefinitionKind::Class, class);
                    return Ok(false);
                }
                let class_def = self.gen_class(class)?;
                debug!(class = %class.name, id = class.id, "Generated class");
                state.classes.insert(class.name.clone(), class_def);
                Ok(true)
            }
        }
    }

    /// Superclass of `class` via its first generalization.
    ///
    /// A generalization whose source id does not resolve is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`cim_linkml_core::CimLinkMLError::NotFound`] if the superclass
    /// id does not resolve.
    pub fn get_superclass(&self, class: &Class) -> Result<Option<&'a Class>> {
        let generalizations = self
            .project
            .relations
            .by_source(class.id)
            .filter(|relation| relation.is_generalization());

        for relation in generalizations {
            match self.project.classes.get(relation.source_class) {
                Ok(source) if source.id == class.id => {
                    return self.project.classes.get(relation.dest_class).map(Some);
                }
                _ => {
                    debug!(relation = relation.id, "Generalization source does not resolve");
                }
            }
        }

        Ok(None)
    }

    /// Non-primitive classes named by attribute types.
    ///
    /// Every class carrying a type name is included, whatever its package.
    #[must_use]
    pub fn attribute_type_classes(&self, class: &Class) -> Vec<&'a Class> {
        let classes = &self.project.classes;
        class
            .attributes
            .iter()
            .filter_map(|attribute| attribute.type_.as_deref())
            .flat_map(|type_name| classes.by_name(type_name))
            .filter(|type_class| !type_class.is_primitive())
            .collect()
    }

    /// Classes at the far end of non-generalization relations, both ways
    ///
    /// # Errors
    ///
    /// Returns [`cim_linkml_core::CimLinkMLError::NotFound`] for a dangling
    /// relation endpoint.
    pub fn relation_type_classes(&self, class: &Class) -> Result<Vec<&'a Class>> {
        let relations = &self.project.relations;
        let classes = &self.project.classes;

        let to_classes = relations
            .by_source(class.id)
            .filter(|relation| !relation.is_generalization())
            .map(|relation| classes.get(relation.dest_class));
        let from_classes = relations
            .by_dest(class.id)
            .filter(|relation| !relation.is_generalization())
            .map(|relation| classes.get(relation.source_class));

        to_classes.chain(from_classes).collect()
    }

    /// Direct dependencies of `class`, deduplicated, in ascending id order
    ///
    /// # Errors
    ///
    /// Propagates lookup failures from superclass and relation resolution.
    pub fn dependency_classes(&self, class: &Class) -> Result<Vec<&'a Class>> {
        let mut dependencies: BTreeMap<ObjectId, &'a Class> = BTreeMap::new();

        if let Some(superclass) = self.get_superclass(class)? {
            dependencies.insert(superclass.id, superclass);
        }
        for dependency in self
            .attribute_type_classes(class)
            .into_iter()
            .chain(self.relation_type_classes(class)?)
        {
            dependencies.insert(dependency.id, dependency);
        }

        Ok(dependencies.into_values().collect())
    }

    /// Enum for an enumeration class, one permissible value per literal
    #[must_use]
    pub fn gen_enum(&self, class: &Class) -> EnumDefinition {
        let permissible_values = class
            .attributes
            .iter()
            .map(|literal| {
                let value = PermissibleValue {
                    meaning: Some(gen_curie(
                        &format!("{}.{}", class.name, literal.name),
                        CIM_PREFIX,
                    )),
                    description: literal.notes.clone(),
                };
                (literal.name.clone(), value)
            })
            .collect();

        EnumDefinition {
            name: class.name.clone(),
            enum_uri: gen_curie(&class.name, CIM_PREFIX),
            permissible_values,
            description: class.note.clone(),
        }
    }

    /// Class definition with attribute slots followed by outgoing and then
    /// incoming relation slots.
    ///
    /// On a slot name collision the earlier slot is kept.
    ///
    /// # Errors
    ///
    /// Propagates slot generation failures.
    pub fn gen_class(&self, class: &Class) -> Result<ClassDefinition> {
        let project = self.project;
        let superclass = self.get_superclass(class)?;

        let attribute_slots = class
            .attributes
            .iter()
            .map(|attribute| slot_from_attribute(project, attribute, class));
        let outgoing_slots = project
            .relations
            .by_source(class.id)
            .filter(|relation| !relation.is_generalization())
            .map(|relation| {
                slot_from_relation(project, relation, TraversalDirection::SourceToDest)
            });
        let incoming_slots = project
            .relations
            .by_dest(class.id)
            .filter(|relation| !relation.is_generalization())
            .map(|relation| {
                slot_from_relation(project, relation, TraversalDirection::DestToSource)
            });

        let mut attributes: IndexMap<String, SlotDefinition> = IndexMap::new();
        for slot in attribute_slots.chain(outgoing_slots).chain(incoming_slots) {
            let slot = slot?;
            match attributes.entry(slot.name.clone()) {
                Entry::Occupied(_) => {
                    warn!(
                        class = %class.name,
                        slot = %slot.name,
                        "Slot name already used in this class, dropping the later slot"
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(slot);
                }
            }
        }

        let mut class_def = ClassDefinition::new(&class.name, gen_curie(&class.name, CIM_PREFIX));
        class_def.is_a = superclass.map(|superclass| superclass.name.clone());
        class_def.description.clone_from(&class.note);
        class_def.attributes = (!attributes.is_empty()).then_some(attributes);

        Ok(class_def)
    }
}
