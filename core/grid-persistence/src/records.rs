//! FILENAME: core/grid-persistence/src/records.rs
//! PURPOSE: Content record store backed by a JSON array of rows.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use grid_engine::{ContentRecord, RecordId, CONTAINER_FIELD, CONTENT_TABLE};
use serde_json::Value;

use crate::error::PersistenceError;

/// Field selector meaning "every field".
pub const ALL_FIELDS: &str = "*";

/// All `tt_content` rows of a site, held in memory.
#[derive(Debug, Clone, Default)]
pub struct JsonRecordStore {
    records: Vec<ContentRecord>,
}

impl JsonRecordStore {
    pub fn new(records: Vec<ContentRecord>) -> Self {
        JsonRecordStore { records }
    }

    /// Loads rows from a JSON file holding an array of objects.
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_array() {
            return Err(PersistenceError::InvalidFormat(
                "record file must contain an array of rows".to_string(),
            ));
        }
        let records: Vec<ContentRecord> = serde_json::from_value(value)?;
        Ok(JsonRecordStore { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn insert(&mut self, record: ContentRecord) {
        self.records.push(record);
    }

    /// Fetches the children of a container.
    ///
    /// Matches rows whose container field equals `parent_id` and whose `pid`
    /// equals `page_id`. Rows are sorted ascending by `order_field` (stable,
    /// rows lacking the field sort first), then `offset` rows are skipped and
    /// each row is projected through `fields`.
    pub fn fetch_children(
        &self,
        parent_table: &str,
        parent_id: RecordId,
        page_id: RecordId,
        order_field: &str,
        offset: usize,
        fields: &str,
    ) -> Vec<ContentRecord> {
        if parent_table != CONTENT_TABLE {
            return Vec::new();
        }

        let mut children: Vec<&ContentRecord> = self
            .records
            .iter()
            .filter(|r| r.pid == page_id && r.get_int(CONTAINER_FIELD) == Some(parent_id))
            .collect();
        children.sort_by(|a, b| compare_field(a, b, order_field));

        children
            .into_iter()
            .skip(offset)
            .map(|r| project(r, fields))
            .collect()
    }

    pub fn fetch_record(&self, table: &str, id: RecordId) -> Option<ContentRecord> {
        if table != CONTENT_TABLE {
            return None;
        }
        self.records.iter().find(|r| r.uid == id).cloned()
    }
}

fn compare_field(a: &ContentRecord, b: &ContentRecord, field: &str) -> Ordering {
    match field {
        "uid" => a.uid.cmp(&b.uid),
        "pid" => a.pid.cmp(&b.pid),
        _ => match (a.get_int(field), b.get_int(field)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => a
                .get_string(field)
                .unwrap_or_default()
                .cmp(&b.get_string(field).unwrap_or_default()),
        },
    }
}

/// Keeps only the selected fields; `uid` and `pid` always survive.
fn project(record: &ContentRecord, fields: &str) -> ContentRecord {
    if fields.trim() == ALL_FIELDS {
        return record.clone();
    }
    let wanted: Vec<&str> = fields.split(',').map(str::trim).collect();
    let mut projected = ContentRecord::new(record.uid, record.pid);
    for (key, value) in &record.fields {
        if wanted.contains(&key.as_str()) {
            projected.fields.insert(key.clone(), value.clone());
        }
    }
    projected
}
