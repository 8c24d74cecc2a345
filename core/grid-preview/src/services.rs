//! FILENAME: core/grid-preview/src/services.rs
//! PURPOSE: Interfaces of the collaborators the preview renderer consumes.
//! CONTEXT: Record storage, layout configuration, the backend user,
//! localisation and page configuration are owned by the host. The renderer
//! only sees these traits; `adapters` provides the JSON-file backed versions.

use grid_engine::{ContentRecord, LayoutColumns, LayoutDefinition, RecordId};
use grid_persistence::{ExtensionConfiguration, PageLayoutConfig};
use serde_json::Value;

use crate::context::RequestContext;
use crate::error::PreviewError;

// ============================================================================
// RECORDS
// ============================================================================

pub trait RecordStore {
    /// Children of `parent_id` on `page_id`, ordered by `order_field`.
    fn fetch_children(
        &self,
        parent_table: &str,
        parent_id: RecordId,
        page_id: RecordId,
        order_field: &str,
        offset: usize,
        fields: &str,
    ) -> Vec<ContentRecord>;

    fn fetch_record(&self, table: &str, id: RecordId) -> Option<ContentRecord>;
}

// ============================================================================
// LAYOUT CONFIGURATION
// ============================================================================

/// Layout configuration as seen from one page.
pub trait LayoutSetup {
    /// The container record, freshly read.
    fn current_parent(&self, container_id: RecordId) -> Option<ContentRecord>;

    /// Definition for `layout_id`; empty when unknown.
    fn layout_setup(&self, layout_id: &str) -> LayoutDefinition;

    /// Restriction metadata for `layout_id`; empty CSV when unknown.
    fn layout_columns(&self, layout_id: &str) -> LayoutColumns;
}

pub trait LayoutConfigStore {
    fn init(&self, page_id: RecordId) -> Result<Box<dyn LayoutSetup>, PreviewError>;
}

// ============================================================================
// USER / LOCALISATION / PAGE
// ============================================================================

pub trait BackendUser {
    /// Snapshot of the user's UC document.
    fn uc(&self) -> Value;

    fn write_uc(&self, uc: Value) -> Result<(), PreviewError>;

    fn has_permission(&self, action: &str, table: &str) -> bool;
}

pub trait LanguageService {
    fn translate(&self, key: &str) -> String;
}

pub trait PageConfigStore {
    fn page_config(&self, page_id: RecordId) -> PageLayoutConfig;
}

// ============================================================================
// RENDERING COLLABORATORS
// ============================================================================

/// Supplies the extension configuration when the renderer is built.
pub trait ConfigurationSource {
    fn extension_configuration(&self) -> Result<ExtensionConfiguration, PreviewError>;
}

impl ConfigurationSource for ExtensionConfiguration {
    fn extension_configuration(&self) -> Result<ExtensionConfiguration, PreviewError> {
        Ok(self.clone())
    }
}

/// Per-record preview templates tried before the grid view.
pub trait SimpleTemplateFallback {
    /// `None` when no template applies to the record.
    fn render_from_template(
        &self,
        record: &ContentRecord,
        context: &RequestContext<'_>,
    ) -> Option<String>;
}
