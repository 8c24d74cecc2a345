//! FILENAME: core/grid-engine/src/collapsed.rs
//! PURPOSE: Per-user collapsed state of grid container columns.
//! CONTEXT: The state lives inside the user's UC (user configuration)
//! document under `moduleData.page.gridelementsCollapsedColumns`, keyed
//! `"<containerId>_<columnPosition>"`. It is loaded and pruned once when the
//! renderer is constructed; renders only read it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::{ColumnPosition, RecordId};

/// Location of the collapsed-state mapping inside the UC document.
pub const UC_COLLAPSED_PATH: [&str; 3] = ["moduleData", "page", "gridelementsCollapsedColumns"];

/// Builds the map key for a container column.
pub fn collapsed_key(container_id: RecordId, position: ColumnPosition) -> String {
    format!("{}_{}", container_id, position)
}

/// Loose truthiness of a stored UC value.
/// `null`, `false`, `0`, `""`, `"0"`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

// ============================================================================
// COLLAPSED STATE MAP
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollapsedStateMap(BTreeMap<String, bool>);

impl CollapsedStateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the mapping out of a UC document.
    ///
    /// Returns `None` when the path is absent, empty, or not a mapping; such
    /// a document has nothing to clean up.
    pub fn stored_in(uc: &Value) -> Option<Self> {
        let mut node = uc;
        for key in UC_COLLAPSED_PATH {
            node = node.get(key)?;
        }
        let entries = node.as_object().filter(|m| !m.is_empty())?;
        Some(CollapsedStateMap(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), is_truthy(v)))
                .collect(),
        ))
    }

    /// Reads the mapping out of a UC document, defaulting to empty.
    pub fn load(uc: &Value) -> Self {
        Self::stored_in(uc).unwrap_or_default()
    }

    /// Drops every entry that is not collapsed.
    pub fn prune(mut self) -> Self {
        self.0.retain(|_, collapsed| *collapsed);
        self
    }

    pub fn is_collapsed(&self, container_id: RecordId, position: ColumnPosition) -> bool {
        self.0
            .get(&collapsed_key(container_id, position))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, container_id: RecordId, position: ColumnPosition, collapsed: bool) {
        self.0.insert(collapsed_key(container_id, position), collapsed);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Writes this mapping into a UC document, creating intermediate
    /// objects as needed. Non-object nodes on the path are replaced.
    pub fn write_into(&self, uc: &mut Value) {
        let mut node = uc;
        for key in &UC_COLLAPSED_PATH[..UC_COLLAPSED_PATH.len() - 1] {
            node = child_object(node, key);
        }
        let entries: Map<String, Value> = self
            .0
            .iter()
            .map(|(k, v)| (k.clone(), Value::Bool(*v)))
            .collect();
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        if let Value::Object(map) = node {
            map.insert(
                UC_COLLAPSED_PATH[UC_COLLAPSED_PATH.len() - 1].to_string(),
                Value::Object(entries),
            );
        }
    }
}

fn child_object<'a>(node: &'a mut Value, key: &str) -> &'a mut Value {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new())),
        _ => unreachable!("node was just made an object"),
    }
}
