//! FILENAME: core/grid-preview/src/adapters.rs
//! PURPOSE: Collaborator implementations over the JSON file stores.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use grid_engine::{ContentRecord, LayoutColumns, LayoutDefinition, RecordId, CONTENT_TABLE};
use grid_persistence::{
    ExtensionConfiguration, FileUserSession, JsonLayoutStore, JsonRecordStore, PageConfigFile,
    PageLayoutConfig, PageLayouts,
};
use serde_json::Value;

use crate::error::PreviewError;
use crate::services::{
    BackendUser, ConfigurationSource, LanguageService, LayoutConfigStore, LayoutSetup,
    PageConfigStore, RecordStore,
};

// ============================================================================
// RECORDS
// ============================================================================

impl RecordStore for JsonRecordStore {
    fn fetch_children(
        &self,
        parent_table: &str,
        parent_id: RecordId,
        page_id: RecordId,
        order_field: &str,
        offset: usize,
        fields: &str,
    ) -> Vec<ContentRecord> {
        JsonRecordStore::fetch_children(
            self,
            parent_table,
            parent_id,
            page_id,
            order_field,
            offset,
            fields,
        )
    }

    fn fetch_record(&self, table: &str, id: RecordId) -> Option<ContentRecord> {
        JsonRecordStore::fetch_record(self, table, id)
    }
}

// ============================================================================
// LAYOUTS
// ============================================================================

/// Layout configuration file plus the record store used to read containers.
pub struct JsonLayoutConfig {
    store: JsonLayoutStore,
    records: Rc<dyn RecordStore>,
}

impl JsonLayoutConfig {
    pub fn new(store: JsonLayoutStore, records: Rc<dyn RecordStore>) -> Self {
        JsonLayoutConfig { store, records }
    }
}

impl LayoutConfigStore for JsonLayoutConfig {
    fn init(&self, page_id: RecordId) -> Result<Box<dyn LayoutSetup>, PreviewError> {
        let layouts = self.store.init(page_id)?;
        Ok(Box::new(JsonLayoutSetup {
            layouts,
            records: Rc::clone(&self.records),
        }))
    }
}

struct JsonLayoutSetup {
    layouts: PageLayouts,
    records: Rc<dyn RecordStore>,
}

impl LayoutSetup for JsonLayoutSetup {
    fn current_parent(&self, container_id: RecordId) -> Option<ContentRecord> {
        self.records.fetch_record(CONTENT_TABLE, container_id)
    }

    fn layout_setup(&self, layout_id: &str) -> LayoutDefinition {
        self.layouts.layout_setup(layout_id)
    }

    fn layout_columns(&self, layout_id: &str) -> LayoutColumns {
        self.layouts.layout_columns(layout_id)
    }
}

// ============================================================================
// USER / LANGUAGE / PAGE
// ============================================================================

impl BackendUser for FileUserSession {
    fn uc(&self) -> Value {
        FileUserSession::uc(self)
    }

    fn write_uc(&self, uc: Value) -> Result<(), PreviewError> {
        Ok(FileUserSession::write_uc(self, uc)?)
    }

    fn has_permission(&self, action: &str, table: &str) -> bool {
        FileUserSession::has_permission(self, action, table)
    }
}

/// Labels from a fixed table; unknown keys translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticLanguageService {
    labels: BTreeMap<String, String>,
}

impl StaticLanguageService {
    pub fn new(labels: BTreeMap<String, String>) -> Self {
        StaticLanguageService { labels }
    }

    pub fn with_label(mut self, key: &str, label: &str) -> Self {
        self.labels.insert(key.to_string(), label.to_string());
        self
    }
}

impl LanguageService for StaticLanguageService {
    fn translate(&self, key: &str) -> String {
        self.labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

impl PageConfigStore for PageConfigFile {
    fn page_config(&self, page_id: RecordId) -> PageLayoutConfig {
        self.for_page(page_id)
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Extension configuration read from disk when the renderer is built.
#[derive(Debug, Clone)]
pub struct ExtensionConfigFile {
    pub path: PathBuf,
}

impl ExtensionConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ExtensionConfigFile { path: path.into() }
    }
}

impl ConfigurationSource for ExtensionConfigFile {
    fn extension_configuration(&self) -> Result<ExtensionConfiguration, PreviewError> {
        ExtensionConfiguration::open(&self.path).map_err(|e| {
            PreviewError::Config(format!("cannot load {}: {}", self.path.display(), e))
        })
    }
}
