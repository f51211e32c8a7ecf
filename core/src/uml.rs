//! UML object model of the CIM as exported by the modeling tool
//!
//! Entities reference each other only by [`ObjectId`]. Identifiers are
//! assigned by the modeling tool and carry no meaning beyond one export.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the modeling tool
pub type ObjectId = i64;

/// Kinds of entities held by a project, used in lookup failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// UML package
    Package,
    /// UML class
    Class,
    /// UML connector
    Relation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Package => "Package",
            Self::Class => "Class",
            Self::Relation => "Relation",
        };
        f.write_str(name)
    }
}

/// UML package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: ObjectId,
    pub name: String,
    pub author: Option<String>,
    /// Enclosing package; `None` for a root of the package forest
    pub parent: Option<ObjectId>,
    pub created_date: NaiveDateTime,
    pub modified_date: NaiveDateTime,
    pub notes: Option<String>,
}

impl Package {
    /// Whether this package is a root of the package forest.
    ///
    /// The modeling tool stores `0` as the parent of top-level packages.
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self.parent, None | Some(0))
    }
}

/// One end of a multiplicity range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalityValue {
    /// A fixed count
    Bounded(u32),
    /// `*` or `n`
    Unbounded,
}

impl Default for CardinalityValue {
    fn default() -> Self {
        Self::Bounded(0)
    }
}

impl CardinalityValue {
    /// Whether this bound makes a slot required when used as a lower bound
    #[must_use]
    pub fn is_required(self) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Bounded(n) => n > 0,
        }
    }

    /// Whether this bound makes a slot multivalued when used as an upper bound
    #[must_use]
    pub fn is_multivalued(self) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Bounded(n) => n > 1,
        }
    }
}

impl fmt::Display for CardinalityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("*"),
        }
    }
}

/// Multiplicity of a relation end.
///
/// The lower bound is never [`CardinalityValue::Unbounded`]; the parser
/// rejects such input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cardinality {
    pub lower_bound: CardinalityValue,
    pub upper_bound: CardinalityValue,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lower_bound, self.upper_bound)
    }
}

/// Stereotype of a UML class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassStereotype {
    /// CIM primitive type, mapped onto a `LinkML` builtin type
    Primitive,
    /// Enumeration whose attributes are the literals
    Enumeration,
    /// Structured data type (value with unit and multiplier)
    CimDatatype,
    /// Stereotype the converter does not know; handled like a plain class
    Unrecognized(String),
}

impl ClassStereotype {
    /// Classify a stereotype value from the modeling tool
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "primitive" => Self::Primitive,
            "enumeration" => Self::Enumeration,
            "cimdatatype" => Self::CimDatatype,
            _ => Self::Unrecognized(value.to_string()),
        }
    }
}

/// Stereotype of a UML attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeStereotype {
    /// Enumeration literal
    Enum,
}

impl AttributeStereotype {
    /// Classify a stereotype value; unknown values yield `None`
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }
}

/// UML attribute, owned by exactly one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: ObjectId,
    /// Owning class
    pub class_: ObjectId,
    pub name: String,
    pub lower_bound: CardinalityValue,
    pub upper_bound: CardinalityValue,
    /// Name of the type class, primitive or complex
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub default: Option<String>,
    pub notes: Option<String>,
    pub stereotype: Option<AttributeStereotype>,
}

/// UML class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ObjectId,
    pub name: String,
    pub author: Option<String>,
    /// Owning package
    pub package: ObjectId,
    pub created_date: NaiveDateTime,
    pub modified_date: NaiveDateTime,
    pub note: Option<String>,
    pub stereotype: Option<ClassStereotype>,
    /// Attributes in source order, unique by name
    pub attributes: Vec<Attribute>,
}

impl Class {
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self.stereotype, Some(ClassStereotype::Primitive))
    }

    #[must_use]
    pub fn is_enumeration(&self) -> bool {
        matches!(self.stereotype, Some(ClassStereotype::Enumeration))
    }
}

/// UML connector type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    Abstraction,
    Aggregation,
    Assembly,
    Association,
    Composition,
    Dependency,
    Generalization,
    Nesting,
    NoteLink,
    Realisation,
    Usage,
}

impl RelationType {
    /// Parse a connector type; `None` if the value is outside the vocabulary
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let relation_type = match value {
            "Abstraction" => Self::Abstraction,
            "Aggregation" => Self::Aggregation,
            "Assembly" => Self::Assembly,
            "Association" => Self::Association,
            "Composition" => Self::Composition,
            "Dependency" => Self::Dependency,
            "Generalization" => Self::Generalization,
            "Nesting" => Self::Nesting,
            "NoteLink" => Self::NoteLink,
            "Realisation" | "Realization" => Self::Realisation,
            "Usage" => Self::Usage,
            _ => return None,
        };
        Some(relation_type)
    }
}

/// Navigability recorded on a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationDirection {
    SourceToDestination,
    DestinationToSource,
    BiDirectional,
    Unspecified,
}

impl RelationDirection {
    /// Parse a direction value; unknown values yield `None`
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Source -> Destination" => Some(Self::SourceToDestination),
            "Destination -> Source" => Some(Self::DestinationToSource),
            "Bi-Directional" => Some(Self::BiDirectional),
            "Unspecified" => Some(Self::Unspecified),
            _ => None,
        }
    }
}

/// UML connector between two classes.
///
/// For [`RelationType::Generalization`] the source is the subclass and the
/// destination is the superclass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub type_: RelationType,
    pub source_class: ObjectId,
    pub dest_class: ObjectId,
    pub direction: Option<RelationDirection>,
    pub source_card: Cardinality,
    pub source_role: Option<String>,
    pub source_role_note: Option<String>,
    pub dest_card: Cardinality,
    pub dest_role: Option<String>,
    pub dest_role_note: Option<String>,
}

impl Relation {
    #[must_use]
    pub fn is_generalization(&self) -> bool {
        self.type_ == RelationType::Generalization
    }
}
