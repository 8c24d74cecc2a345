//! FILENAME: core/grid-preview/tests/common/mod.rs
//! Test harness and fixtures for grid preview integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::fs;
use std::rc::Rc;

use grid_engine::{ContentRecord, RecordId};
use grid_persistence::{
    ExtensionConfiguration, JsonLayoutStore, JsonRecordStore, PageConfigFile, PageLayoutConfig,
};
use grid_preview::{
    BackendUser, EventDispatcher, GridPreviewRenderer, JsonLayoutConfig, JsonViewRenderer,
    PreviewError, PreviewServices, RecordStore, RequestContext, StaticLanguageService,
};
use serde_json::{json, Value};
use tempfile::TempDir;

pub const LAYOUTS: &str = r#"{"layouts": [
    {"id": "2col", "title": "Two columns", "csv": "10",
     "rows": [
        {"columns": [{"colPos": 10, "name": "Left"}, {"colPos": 11, "name": "Right"}]},
        {"columns": [{"name": "Spacer"}]}
     ]},
    {"id": "dup",
     "rows": [{"columns": [{"colPos": 2}]}, {"columns": [{"colPos": 2}]}]},
    {"id": "open", "title": "Unrestricted", "csv": "",
     "rows": [{"columns": [{"colPos": 5}, {"colPos": 6}]}]}
]}"#;

pub const RECORDS: &str = r#"[
    {"uid": 100, "pid": 1, "CType": "gridelements_pi1", "tx_gridelements_backend_layout": "2col"},
    {"uid": 101, "pid": 1,
     "tx_gridelements_container": 100, "tx_gridelements_columns": 10, "sorting": 2},
    {"uid": 102, "pid": 1,
     "tx_gridelements_container": 100, "tx_gridelements_columns": 10, "sorting": 1},
    {"uid": 103, "pid": 1,
     "tx_gridelements_container": 100, "tx_gridelements_columns": 11, "sorting": 1},
    {"uid": 104, "pid": 1, "tx_gridelements_container": 100, "sorting": 3},
    {"uid": 200, "pid": 1, "CType": "gridelements_pi1", "tx_gridelements_backend_layout": "dup"},
    {"uid": 201, "pid": 1,
     "tx_gridelements_container": 200, "tx_gridelements_columns": 2, "sorting": 1},
    {"uid": 202, "pid": 1,
     "tx_gridelements_container": 200, "tx_gridelements_columns": 2, "sorting": 2},
    {"uid": 300, "pid": 1,
     "CType": "gridelements_pi1", "tx_gridelements_backend_layout": "missing"},
    {"uid": 400, "pid": -1, "t3ver_oid": 100, "tx_gridelements_backend_layout": "2col"},
    {"uid": 401, "pid": -1,
     "tx_gridelements_container": 400, "tx_gridelements_columns": 10, "sorting": 1},
    {"uid": 500, "pid": -1, "t3ver_oid": 999, "tx_gridelements_backend_layout": "2col"},
    {"uid": 600, "pid": 1, "CType": "gridelements_pi1", "tx_gridelements_backend_layout": "open"},
    {"uid": 601, "pid": 1,
     "tx_gridelements_container": 600, "tx_gridelements_columns": 6, "sorting": 1}
]"#;

// ============================================================================
// TEST DOUBLES
// ============================================================================

/// Backend user held in memory, counting UC writes.
pub struct MemoryUser {
    pub uc: RefCell<Value>,
    pub writes: Cell<usize>,
    pub can_edit: bool,
}

impl MemoryUser {
    pub fn new(uc: Value) -> Self {
        MemoryUser {
            uc: RefCell::new(uc),
            writes: Cell::new(0),
            can_edit: true,
        }
    }

    pub fn with_collapsed(entries: Value) -> Self {
        Self::new(json!({"moduleData": {"page": {"gridelementsCollapsedColumns": entries}}}))
    }

    pub fn collapsed_entries(&self) -> Value {
        self.uc.borrow()["moduleData"]["page"]["gridelementsCollapsedColumns"].clone()
    }
}

impl BackendUser for MemoryUser {
    fn uc(&self) -> Value {
        self.uc.borrow().clone()
    }

    fn write_uc(&self, uc: Value) -> Result<(), PreviewError> {
        *self.uc.borrow_mut() = uc;
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn has_permission(&self, action: &str, table: &str) -> bool {
        self.can_edit && action == "tables_modify" && table == "tt_content"
    }
}

/// Record store counting child listings, to tell whether a grid was assembled.
pub struct CountingRecords {
    pub inner: JsonRecordStore,
    pub child_fetches: Cell<usize>,
}

impl RecordStore for CountingRecords {
    fn fetch_children(
        &self,
        parent_table: &str,
        parent_id: RecordId,
        page_id: RecordId,
        order_field: &str,
        offset: usize,
        fields: &str,
    ) -> Vec<ContentRecord> {
        self.child_fetches.set(self.child_fetches.get() + 1);
        self.inner
            .fetch_children(parent_table, parent_id, page_id, order_field, offset, fields)
    }

    fn fetch_record(&self, table: &str, id: RecordId) -> Option<ContentRecord> {
        self.inner.fetch_record(table, id)
    }
}

// ============================================================================
// HARNESS
// ============================================================================

pub struct TestHarness {
    pub dir: TempDir,
    pub records: Rc<CountingRecords>,
    pub user: MemoryUser,
    pub language: StaticLanguageService,
    pub pages: PageConfigFile,
    pub configuration: ExtensionConfiguration,
}

impl TestHarness {
    /// Harness over the default fixtures with a user without stored state.
    pub fn new() -> Self {
        Self::with_user(MemoryUser::new(json!({})))
    }

    pub fn with_user(user: MemoryUser) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("layouts.json"), LAYOUTS).unwrap();

        let mut pages = PageConfigFile::default();
        pages.pages.insert(7, PageLayoutConfig { hide_restricted_columns: true });

        let configuration: ExtensionConfiguration = serde_json::from_value(json!({
            "backendContainer": {"view": {
                "defaultTemplate": "GridContainer",
                "templateRootPaths": [dir.path().display().to_string()]
            }}
        }))
        .unwrap();

        TestHarness {
            dir,
            records: Rc::new(CountingRecords {
                inner: JsonRecordStore::from_json(RECORDS).unwrap(),
                child_fetches: Cell::new(0),
            }),
            user,
            language: StaticLanguageService::default()
                .with_label("newContentElement", "Create new content element")
                .with_label("content", "Content"),
            pages,
            configuration,
        }
    }

    pub fn record(&self, uid: RecordId) -> ContentRecord {
        self.records.inner.fetch_record("tt_content", uid).unwrap()
    }

    pub fn context(&self, page_id: RecordId) -> RequestContext<'_> {
        RequestContext::new(&self.user, &self.language, page_id)
    }

    pub fn services(&self) -> PreviewServices {
        self.services_with_layouts(self.dir.path().join("layouts.json"))
    }

    pub fn services_with_layouts(&self, layouts_path: std::path::PathBuf) -> PreviewServices {
        let records: Rc<dyn RecordStore> = self.records.clone();
        PreviewServices {
            records: Rc::clone(&records),
            layouts: Rc::new(JsonLayoutConfig::new(JsonLayoutStore::new(layouts_path), records)),
            page_config: Rc::new(self.pages.clone()),
            templates: Box::new(JsonViewRenderer::new()),
            fallback: None,
            events: EventDispatcher::new(),
        }
    }

    pub fn renderer(&self) -> GridPreviewRenderer {
        self.renderer_with(self.services())
    }

    pub fn renderer_with(&self, services: PreviewServices) -> GridPreviewRenderer {
        GridPreviewRenderer::new(&self.configuration, services, &self.user).unwrap()
    }

    /// Renders the preview of `uid` and parses the JSON view.
    pub fn render_json(
        &self,
        renderer: &GridPreviewRenderer,
        uid: RecordId,
        page_id: RecordId,
    ) -> Value {
        let out = renderer
            .render_preview(&self.record(uid), &self.context(page_id))
            .unwrap();
        serde_json::from_str(&out).unwrap()
    }
}

/// Item uids of each column, row-major.
pub fn column_uids(view: &Value) -> Vec<Vec<i64>> {
    let mut result = Vec::new();
    for row in view["variables"]["gridElementsContainer"]["rows"].as_array().unwrap() {
        for column in row["columns"].as_array().unwrap() {
            result.push(
                column["items"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|item| item["record"]["uid"].as_i64().unwrap())
                    .collect(),
            );
        }
    }
    result
}
