//! FILENAME: core/grid-engine/src/view.rs
//! Grid View - Renderable output handed to the template boundary.
//!
//! A grid is built once per render, row-major, and owned by whoever renders
//! it. Every type here serializes in camelCase so templates and frontends
//! see the same names they would for the layout configuration.

use serde::{Deserialize, Serialize};

use crate::definition::{ActiveColumnSet, ColumnDef};
use crate::record::{ChildRecord, ColumnPosition, RecordId};

// ============================================================================
// ITEM
// ============================================================================

/// A child record placed in a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    pub record: ChildRecord,

    /// Container the item was rendered under.
    pub container_id: RecordId,

    /// Position of the column holding this item.
    pub column_position: ColumnPosition,

    /// Restriction context of the layout.
    pub restrictions: ActiveColumnSet,
}

impl GridItem {
    pub fn uid(&self) -> RecordId {
        self.record.uid
    }
}

// ============================================================================
// COLUMN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridColumn {
    /// Column configuration as declared by the layout.
    pub definition: ColumnDef,

    pub container_id: RecordId,

    /// Position is listed in the restriction set.
    pub active: bool,

    /// Content may be placed here: active, or no restriction metadata.
    pub allowed: bool,

    /// The current user collapsed this column.
    pub collapsed: bool,

    pub restrictions: ActiveColumnSet,

    pub items: Vec<GridItem>,
}

impl GridColumn {
    pub fn new(
        definition: ColumnDef,
        container_id: RecordId,
        restrictions: ActiveColumnSet,
    ) -> Self {
        GridColumn {
            definition,
            container_id,
            active: false,
            allowed: restrictions.is_empty(),
            collapsed: false,
            restrictions,
            items: Vec::new(),
        }
    }

    pub fn position(&self) -> Option<ColumnPosition> {
        self.definition.position
    }

    pub fn set_active(&mut self) {
        self.active = true;
        self.allowed = true;
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub fn add_item(&mut self, item: GridItem) {
        self.items.push(item);
    }

    /// Whether content may be placed in this column.
    /// Without restriction metadata every column is allowed.
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Whether `hideRestrictedColumns` would hide this column.
    pub fn is_restricted(&self) -> bool {
        !self.is_allowed()
    }

    pub fn title(&self) -> Option<&str> {
        self.definition.name()
    }

    pub fn colspan(&self) -> u32 {
        self.definition.colspan()
    }

    pub fn rowspan(&self) -> u32 {
        self.definition.rowspan()
    }
}

// ============================================================================
// ROW / GRID
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub columns: Vec<GridColumn>,
}

impl GridRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, column: GridColumn) {
        self.columns.push(column);
    }
}

/// Root of the assembled output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub container_id: RecordId,
    pub page_id: RecordId,
    pub rows: Vec<GridRow>,
}

impl Grid {
    pub fn new(container_id: RecordId, page_id: RecordId) -> Self {
        Grid {
            container_id,
            page_id,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: GridRow) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All columns in row-major order.
    pub fn columns(&self) -> impl Iterator<Item = &GridColumn> {
        self.rows.iter().flat_map(|row| row.columns.iter())
    }

    /// Total number of placed items, counting duplicates across columns.
    pub fn item_count(&self) -> usize {
        self.columns().map(|c| c.items.len()).sum()
    }
}
