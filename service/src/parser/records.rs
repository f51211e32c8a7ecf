//! Flat records as exported by the modeling tool
//!
//! Field names follow the column aliases of the export query, so CSV headers
//! and JSON keys map onto these structs directly.

use cim_linkml_core::uml::ObjectId;
use serde::{Deserialize, Serialize};

/// One row of the package table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub parent_id: Option<ObjectId>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// One row of the class table left-joined with its attributes.
///
/// A class without attributes appears once with all `attr_*` fields absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub class_id: ObjectId,
    pub class_name: String,
    #[serde(default)]
    pub class_author: Option<String>,
    pub class_package_id: ObjectId,
    #[serde(default)]
    pub class_created_date: Option<String>,
    #[serde(default)]
    pub class_modified_date: Option<String>,
    #[serde(default)]
    pub class_stereotype: Option<String>,
    #[serde(default)]
    pub class_note: Option<String>,
    #[serde(default)]
    pub attr_id: Option<ObjectId>,
    #[serde(default)]
    pub attr_name: Option<String>,
    #[serde(default)]
    pub attr_lower_bound: Option<String>,
    #[serde(default)]
    pub attr_upper_bound: Option<String>,
    #[serde(default)]
    pub attr_type: Option<String>,
    #[serde(default)]
    pub attr_notes: Option<String>,
    #[serde(default)]
    pub attr_stereotype: Option<String>,
    #[serde(default)]
    pub attr_default: Option<String>,
}

impl ClassRecord {
    /// The class columns of this row with every attribute column cleared
    #[must_use]
    pub fn without_attribute(self) -> Self {
        Self {
            attr_id: None,
            attr_name: None,
            attr_lower_bound: None,
            attr_upper_bound: None,
            attr_type: None,
            attr_notes: None,
            attr_stereotype: None,
            attr_default: None,
            ..self
        }
    }
}

/// One row of the connector table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub type_: String,
    pub start_object_id: ObjectId,
    pub end_object_id: ObjectId,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub source_card: Option<String>,
    #[serde(default)]
    pub source_role: Option<String>,
    #[serde(default)]
    pub source_role_note: Option<String>,
    #[serde(default)]
    pub dest_card: Option<String>,
    #[serde(default)]
    pub dest_role: Option<String>,
    #[serde(default)]
    pub dest_role_note: Option<String>,
}
