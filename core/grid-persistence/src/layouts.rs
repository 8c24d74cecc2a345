//! FILENAME: core/grid-persistence/src/layouts.rs
//! PURPOSE: Grid layout configuration read from a JSON file.
//! CONTEXT: The file lists every layout of the installation. A layout may be
//! limited to some pages; `init` resolves the set visible on one page and
//! validates it into typed definitions.
//!
//! File shape:
//! ```json
//! {"layouts": [
//!     {"id": "2col", "title": "Two columns", "csv": "10,11", "pages": [1, 4],
//!      "rows": [{"columns": [{"colPos": 10, "name": "Left"}]}]}
//! ]}
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use grid_engine::{LayoutColumns, LayoutDefinition, LayoutId, RecordId};
use serde::Deserialize;
use serde_json::Value;

use crate::error::PersistenceError;

#[derive(Debug, Deserialize)]
struct LayoutFile {
    #[serde(default)]
    layouts: Vec<LayoutEntry>,
}

#[derive(Debug, Deserialize)]
struct LayoutEntry {
    id: LayoutId,
    /// Explicit restriction CSV; derived from the rows when absent.
    #[serde(default)]
    csv: Option<String>,
    /// Pages the layout is offered on; all pages when absent.
    #[serde(default)]
    pages: Option<Vec<RecordId>>,
    #[serde(flatten)]
    config: serde_json::Map<String, Value>,
}

// ============================================================================
// STORE
// ============================================================================

/// Handle to the layout configuration file.
#[derive(Debug, Clone)]
pub struct JsonLayoutStore {
    path: PathBuf,
}

impl JsonLayoutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonLayoutStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and validates the layouts visible on `page_id`.
    pub fn init(&self, page_id: RecordId) -> Result<PageLayouts, PersistenceError> {
        let text = fs::read_to_string(&self.path)?;
        PageLayouts::from_json(&text, page_id)
    }
}

// ============================================================================
// PAGE LAYOUTS
// ============================================================================

/// Validated layouts for one page.
#[derive(Debug, Clone, Default)]
pub struct PageLayouts {
    page_id: RecordId,
    layouts: BTreeMap<LayoutId, (LayoutDefinition, LayoutColumns)>,
}

impl PageLayouts {
    pub fn from_json(json: &str, page_id: RecordId) -> Result<Self, PersistenceError> {
        let file: LayoutFile = serde_json::from_str(json)?;

        let mut layouts = BTreeMap::new();
        for entry in file.layouts {
            if let Some(pages) = &entry.pages {
                if !pages.contains(&page_id) {
                    continue;
                }
            }
            let config = Value::Object(entry.config);
            let definition = LayoutDefinition::from_config(entry.id.clone(), &config)
                .map_err(PersistenceError::InvalidFormat)?;
            let columns = match entry.csv {
                Some(csv) => LayoutColumns::new(csv),
                None => definition.derived_columns(),
            };
            layouts.insert(entry.id, (definition, columns));
        }

        Ok(PageLayouts { page_id, layouts })
    }

    pub fn page_id(&self) -> RecordId {
        self.page_id
    }

    pub fn layout_ids(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    /// The definition for `layout_id`; empty when unknown.
    pub fn layout_setup(&self, layout_id: &str) -> LayoutDefinition {
        self.layouts
            .get(layout_id)
            .map(|(def, _)| def.clone())
            .unwrap_or_else(|| LayoutDefinition::empty(layout_id))
    }

    /// Restriction metadata for `layout_id`; empty CSV when unknown.
    pub fn layout_columns(&self, layout_id: &str) -> LayoutColumns {
        self.layouts
            .get(layout_id)
            .map(|(_, cols)| cols.clone())
            .unwrap_or_default()
    }
}
