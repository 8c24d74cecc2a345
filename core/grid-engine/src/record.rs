//! FILENAME: core/grid-engine/src/record.rs
//! PURPOSE: Content records and grouping of container children by column.
//! CONTEXT: Records are read-only snapshots fetched once per render from the
//! record store. Grid placement only needs `uid`, `pid` and the column
//! position; everything else is carried opaquely for the template.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Table holding content elements (containers and their children).
pub const CONTENT_TABLE: &str = "tt_content";

/// Field on a child naming the column position it is placed in.
pub const COLUMN_FIELD: &str = "tx_gridelements_columns";

/// Field on a child naming its parent container.
pub const CONTAINER_FIELD: &str = "tx_gridelements_container";

/// Field on a container naming its layout.
pub const LAYOUT_FIELD: &str = "tx_gridelements_backend_layout";

/// Field on a workspace version pointing at the live record.
pub const VERSION_ORIGIN_FIELD: &str = "t3ver_oid";

/// Record identifier.
pub type RecordId = i64;

/// Integer tag linking a child record to a layout column.
pub type ColumnPosition = i32;

// ============================================================================
// CONTENT RECORD
// ============================================================================

/// A single content element row.
///
/// `uid` and `pid` are lifted out of the row; all other fields, including the
/// column position, stay in `fields` so that the record serializes back to
/// the exact shape it was fetched in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub uid: RecordId,
    pub pid: RecordId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Children of a container are plain content records.
pub type ChildRecord = ContentRecord;

impl ContentRecord {
    pub fn new(uid: RecordId, pid: RecordId) -> Self {
        ContentRecord {
            uid,
            pid,
            fields: Map::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Reads a field as an integer. Numeric strings are accepted since
    /// rows often arrive with every column stringly typed.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.fields.get(name)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Reads a field as a string; numbers are rendered in decimal.
    pub fn get_string(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The column position this record declares, if any.
    pub fn column_position(&self) -> Option<ColumnPosition> {
        self.get_int(COLUMN_FIELD)
            .and_then(|p| ColumnPosition::try_from(p).ok())
    }

    /// Builder-style setter for the column position.
    pub fn with_column_position(self, position: ColumnPosition) -> Self {
        self.with_field(COLUMN_FIELD, position)
    }

    /// Whether this row is a workspace version rather than a live record.
    pub fn is_workspace_version(&self) -> bool {
        self.pid < 0
    }

    /// The live record this version was derived from.
    pub fn version_origin(&self) -> Option<RecordId> {
        self.get_int(VERSION_ORIGIN_FIELD)
    }
}

// ============================================================================
// GROUPING
// ============================================================================

/// Children bucketed by declared column position.
#[derive(Debug, Clone, Default)]
pub struct GroupedChildren {
    groups: FxHashMap<ColumnPosition, Vec<ChildRecord>>,
}

impl GroupedChildren {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to the bucket for `position`.
    pub fn push(&mut self, position: ColumnPosition, record: ChildRecord) {
        self.groups.entry(position).or_default().push(record);
    }

    pub fn get(&self, position: ColumnPosition) -> Option<&[ChildRecord]> {
        self.groups.get(&position).map(Vec::as_slice)
    }

    pub fn contains(&self, position: ColumnPosition) -> bool {
        self.groups.contains_key(&position)
    }

    /// Number of distinct positions with at least one record.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Positions present, in ascending order.
    pub fn positions(&self) -> Vec<ColumnPosition> {
        let mut positions: Vec<_> = self.groups.keys().copied().collect();
        positions.sort_unstable();
        positions
    }
}

/// Groups records by their declared column position.
///
/// Input order is preserved inside each group. Records without a column
/// position are left out; they stay in the caller's list but never reach
/// the grid.
pub fn group_by_column<'a, I>(records: I) -> GroupedChildren
where
    I: IntoIterator<Item = &'a ChildRecord>,
{
    let mut grouped = GroupedChildren::new();
    for record in records {
        if let Some(position) = record.column_position() {
            grouped.push(position, record.clone());
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(uid: RecordId, position: Option<ColumnPosition>) -> ChildRecord {
        let record = ContentRecord::new(uid, 1);
        match position {
            Some(p) => record.with_column_position(p),
            None => record,
        }
    }

    #[test]
    fn test_group_preserves_order_per_position() {
        let records = vec![
            child(1, Some(2)),
            child(2, Some(1)),
            child(3, Some(2)),
            child(4, Some(2)),
        ];
        let grouped = group_by_column(&records);

        let uids: Vec<_> = grouped.get(2).unwrap().iter().map(|r| r.uid).collect();
        assert_eq!(uids, vec![1, 3, 4]);
        assert_eq!(grouped.get(1).unwrap().len(), 1);
        assert_eq!(grouped.positions(), vec![1, 2]);
    }

    #[test]
    fn test_group_drops_records_without_position() {
        let records = vec![child(1, None), child(2, Some(0)), child(3, None)];
        let grouped = group_by_column(&records);

        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.get(0).unwrap()[0].uid, 2);
        // Caller's list is untouched
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_group_empty_input() {
        let records: Vec<ChildRecord> = Vec::new();
        let grouped = group_by_column(&records);
        assert!(grouped.is_empty());
        assert!(grouped.get(0).is_none());
    }

    #[test]
    fn test_column_position_from_string_field() {
        let record = ContentRecord::new(5, 1).with_field(COLUMN_FIELD, " 12 ");
        assert_eq!(record.column_position(), Some(12));

        let record = ContentRecord::new(5, 1).with_field(COLUMN_FIELD, "abc");
        assert_eq!(record.column_position(), None);
    }

    #[test]
    fn test_record_roundtrips_flat_json() {
        let json = r#"{"uid":7,"pid":3,"tx_gridelements_columns":2,"header":"Hi"}"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.uid, 7);
        assert_eq!(record.pid, 3);
        assert_eq!(record.column_position(), Some(2));
        assert_eq!(record.get_string("header").as_deref(), Some("Hi"));
        assert!(!record.fields.contains_key("uid"));
    }

    #[test]
    fn test_workspace_version_origin() {
        let record = ContentRecord::new(9, -1).with_field(VERSION_ORIGIN_FIELD, 4);
        assert!(record.is_workspace_version());
        assert_eq!(record.version_origin(), Some(4));
    }
}
