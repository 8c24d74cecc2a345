//! FILENAME: core/grid-engine/src/lib.rs
//! Grid container model for the page-module preview.
//!
//! Layers:
//! - `record`: Content records and grouping by column position
//! - `definition`: Layout configuration (what the grid IS)
//! - `collapsed`: Per-user collapsed column state
//! - `view`: Renderable output for the template (WHAT we display)
//! - `engine`: Grid assembly (HOW we build it)

pub mod collapsed;
pub mod definition;
pub mod engine;
pub mod record;
pub mod view;

pub use collapsed::{collapsed_key, is_truthy, CollapsedStateMap, UC_COLLAPSED_PATH};
pub use definition::{
    ActiveColumnSet, ColumnDef, LayoutColumns, LayoutDefinition, LayoutId, LayoutRow,
};
pub use engine::assemble;
pub use record::{
    group_by_column, ChildRecord, ColumnPosition, ContentRecord, GroupedChildren, RecordId,
    COLUMN_FIELD, CONTAINER_FIELD, CONTENT_TABLE, LAYOUT_FIELD, VERSION_ORIGIN_FIELD,
};
pub use view::{Grid, GridColumn, GridItem, GridRow};
