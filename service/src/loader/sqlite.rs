//! SQLite record source
//!
//! Reads the three record streams straight from the modeling tool's
//! repository file (`.qea`), which is a SQLite database. The queries select
//! the same columns, joins and ordering as the CSV and JSON exports; package
//! exclusion is left to the [`super::ExtractionFilter`].

use super::traits::RecordSource;
use crate::parser::{ClassRecord, PackageRecord, RelationRecord};
use cim_linkml_core::error::{CimLinkMLError, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};
use std::path::PathBuf;
use tracing::debug;

const PACKAGES_QUERY: &str = "
    SELECT
        Package.Package_ID AS id,
        Package.Name AS name,
        Package.Parent_ID AS parent_id,
        Package.CreatedDate AS created_date,
        Package.ModifiedDate AS modified_date,
        Object.Author AS author,
        Object.Note AS note
    FROM t_package AS Package
    LEFT JOIN t_object AS Object
    ON Package.Package_ID = Object.Object_ID
    ORDER BY id";

const CLASSES_QUERY: &str = "
    SELECT
        Class.Object_ID AS class_id,
        Class.Name AS class_name,
        Class.Author AS class_author,
        Class.Package_ID AS class_package_id,
        Class.CreatedDate AS class_created_date,
        Class.ModifiedDate AS class_modified_date,
        Class.Stereotype AS class_stereotype,
        Class.Note AS class_note,
        Attribute.ID AS attr_id,
        Attribute.Name AS attr_name,
        Attribute.LowerBound AS attr_lower_bound,
        Attribute.UpperBound AS attr_upper_bound,
        Attribute.Type AS attr_type,
        Attribute.Notes AS attr_notes,
        Attribute.Stereotype AS attr_stereotype,
        Attribute.\"Default\" AS attr_default
    FROM t_object AS Class
    LEFT JOIN t_attribute AS Attribute
    ON Class.Object_ID = Attribute.Object_ID
    WHERE Class.Object_Type = 'Class'
    ORDER BY Class.Object_ID, Attribute.Name";

const RELATIONS_QUERY: &str = "
    SELECT
        Relation.Connector_ID AS id,
        Relation.Connector_Type AS type,
        Relation.Start_Object_ID AS start_object_id,
        Relation.End_Object_ID AS end_object_id,
        Relation.Direction AS direction,
        Relation.SubType AS sub_type,
        Relation.SourceCard AS source_card,
        Relation.SourceRole AS source_role,
        Relation.SourceRoleNote AS source_role_note,
        Relation.DestCard AS dest_card,
        Relation.DestRole AS dest_role,
        Relation.DestRoleNote AS dest_role_note
    FROM t_connector AS Relation
    INNER JOIN t_object AS FromClass
    ON Relation.Start_Object_ID = FromClass.Object_ID
    INNER JOIN t_object AS ToClass
    ON Relation.End_Object_ID = ToClass.Object_ID
    ORDER BY id";

/// Record source reading a repository database
#[derive(Debug, Clone)]
pub struct SqliteRecordSource {
    database: PathBuf,
}

impl SqliteRecordSource {
    #[must_use]
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
        }
    }

    fn error(&self, err: &rusqlite::Error) -> CimLinkMLError {
        CimLinkMLError::parse_at(err.to_string(), self.database.display().to_string())
    }

    /// Run one query read-only and map every row
    fn query<T>(
        &self,
        sql: &str,
        map_row: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let connection = Connection::open_with_flags(
            &self.database,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.error(&e))?;

        let mut statement = connection.prepare(sql).map_err(|e| self.error(&e))?;
        let records = statement
            .query_map([], map_row)
            .map_err(|e| self.error(&e))?
            .collect::<rusqlite::Result<Vec<T>>>()
            .map_err(|e| self.error(&e))?;

        debug!(
            path = %self.database.display(),
            records = records.len(),
            "Read SQLite records"
        );
        Ok(records)
    }
}

/// Column value as text; empty text and NULL are absent.
///
/// The repository stores some text columns (bounds, dates) with numeric
/// affinity, so numbers are rendered back to text.
fn text(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<String>> {
    let value = match row.get_ref(column)? {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    };
    Ok(value.filter(|value| !value.is_empty()))
}

fn package_record(row: &Row<'_>) -> rusqlite::Result<PackageRecord> {
    Ok(PackageRecord {
        id: row.get("id")?,
        name: text(row, "name")?.unwrap_or_default(),
        author: text(row, "author")?,
        parent_id: row.get("parent_id")?,
        created_date: text(row, "created_date")?,
        modified_date: text(row, "modified_date")?,
        note: text(row, "note")?,
    })
}

fn class_record(row: &Row<'_>) -> rusqlite::Result<ClassRecord> {
    Ok(ClassRecord {
        class_id: row.get("class_id")?,
        class_name: text(row, "class_name")?.unwrap_or_default(),
        class_author: text(row, "class_author")?,
        class_package_id: row.get("class_package_id")?,
        class_created_date: text(row, "class_created_date")?,
        class_modified_date: text(row, "class_modified_date")?,
        class_stereotype: text(row, "class_stereotype")?,
        class_note: text(row, "class_note")?,
        attr_id: row.get("attr_id")?,
        attr_name: text(row, "attr_name")?,
        attr_lower_bound: text(row, "attr_lower_bound")?,
        attr_upper_bound: text(row, "attr_upper_bound")?,
        attr_type: text(row, "attr_type")?,
        attr_notes: text(row, "attr_notes")?,
        attr_stereotype: text(row, "attr_stereotype")?,
        attr_default: text(row, "attr_default")?,
    })
}

fn relation_record(row: &Row<'_>) -> rusqlite::Result<RelationRecord> {
    Ok(RelationRecord {
        id: row.get("id")?,
        type_: text(row, "type")?.unwrap_or_default(),
        start_object_id: row.get("start_object_id")?,
        end_object_id: row.get("end_object_id")?,
        direction: text(row, "direction")?,
        sub_type: text(row, "sub_type")?,
        source_card: text(row, "source_card")?,
        source_role: text(row, "source_role")?,
        source_role_note: text(row, "source_role_note")?,
        dest_card: text(row, "dest_card")?,
        dest_role: text(row, "dest_role")?,
        dest_role_note: text(row, "dest_role_note")?,
    })
}

impl RecordSource for SqliteRecordSource {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn read_packages(&self) -> Result<Vec<PackageRecord>> {
        self.query(PACKAGES_QUERY, package_record)
    }

    fn read_classes(&self) -> Result<Vec<ClassRecord>> {
        self.query(CLASSES_QUERY, class_record)
    }

    fn read_relations(&self) -> Result<Vec<RelationRecord>> {
        self.query(RELATIONS_QUERY, relation_record)
    }
}
