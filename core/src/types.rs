//! `LinkML` schema types produced by the generator
//!
//! Generated values are built once per package and never mutated afterwards.
//! Classes refer to their superclass and slot ranges by name only, so cyclic
//! source graphs never turn into cyclic ownership here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix of the CIM vocabulary
pub const CIM_PREFIX: &str = "cim";

/// Base URI of the CIM vocabulary
pub const CIM_BASE_URI: &str = "https://cim.ucaiug.io/ns#";

/// Prefix of the `LinkML` metamodel
pub const LINKML_PREFIX: &str = "linkml";

/// Base URI of the `LinkML` metamodel
pub const LINKML_BASE_URI: &str = "https://w3id.org/linkml/";

/// Standard types vocabulary imported by every generated schema
pub const LINKML_TYPES_IMPORT: &str = "linkml:types";

/// Standard CURIE map referenced by every generated schema
pub const SEMWEB_CURIE_MAP: &str = "semweb_context";

/// Range used when a slot does not state one
pub const DEFAULT_RANGE: &str = "string";

/// Schema definition - the root of a generated `LinkML` document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaDefinition {
    /// CURIE identifying the schema
    pub id: String,

    /// Dotted qualified package path
    pub name: String,

    /// Human-readable title (the package name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Description of the schema (the package notes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Import statements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,

    /// Prefix declarations
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub prefixes: IndexMap<String, String>,

    /// Named CURIE maps
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_curi_maps: Vec<String>,

    /// Default prefix for the schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_prefix: Option<String>,

    /// Default range for slots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_range: Option<String>,

    /// Class definitions; `None` rather than empty when there are none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<IndexMap<String, ClassDefinition>>,

    /// Enum definitions; `None` rather than empty when there are none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enums: Option<IndexMap<String, EnumDefinition>>,
}

impl SchemaDefinition {
    /// Create a schema with the fixed CIM imports, prefixes and defaults
    #[must_use]
    pub fn cim(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut prefixes = IndexMap::new();
        prefixes.insert(LINKML_PREFIX.to_string(), LINKML_BASE_URI.to_string());
        prefixes.insert(CIM_PREFIX.to_string(), CIM_BASE_URI.to_string());

        Self {
            id: id.into(),
            name: name.into(),
            imports: vec![LINKML_TYPES_IMPORT.to_string()],
            prefixes,
            default_curi_maps: vec![SEMWEB_CURIE_MAP.to_string()],
            default_prefix: Some(CIM_PREFIX.to_string()),
            default_range: Some(DEFAULT_RANGE.to_string()),
            ..Default::default()
        }
    }

    /// Generated class by name
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.as_ref().and_then(|classes| classes.get(name))
    }

    /// Generated enum by name
    #[must_use]
    pub fn enumeration(&self, name: &str) -> Option<&EnumDefinition> {
        self.enums.as_ref().and_then(|enums| enums.get(name))
    }

    /// Names of all generated classes, in generation order
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes
            .iter()
            .flat_map(|classes| classes.keys().map(String::as_str))
    }

    /// Names of all generated enums, in generation order
    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.enums
            .iter()
            .flat_map(|enums| enums.keys().map(String::as_str))
    }
}

/// Class definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassDefinition {
    /// Name of the class
    pub name: String,

    /// Class URI
    pub class_uri: String,

    /// Parent class (single inheritance)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Attributes (inline slots), keyed by slot name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<IndexMap<String, SlotDefinition>>,
}

impl ClassDefinition {
    /// Create a new class definition
    #[must_use]
    pub fn new(name: impl Into<String>, class_uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_uri: class_uri.into(),
            ..Default::default()
        }
    }

    /// Inline slot by name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&SlotDefinition> {
        self.attributes.as_ref().and_then(|attrs| attrs.get(name))
    }
}

/// Slot definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SlotDefinition {
    /// Name of the slot
    pub name: String,

    /// Slot URI
    pub slot_uri: String,

    /// Range (type) of the slot: a `LinkML` builtin or a class/enum name
    pub range: String,

    /// Is this slot required?
    pub required: bool,

    /// Is this slot multivalued?
    pub multivalued: bool,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Enum definition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnumDefinition {
    /// Name of the enum
    pub name: String,

    /// Enum URI
    pub enum_uri: String,

    /// Permissible values keyed by literal name
    #[serde(default)]
    pub permissible_values: IndexMap<String, PermissibleValue>,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Permissible value of an enum
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissibleValue {
    /// Meaning CURIE
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
