//! FILENAME: core/grid-engine/src/engine.rs
//! Grid Engine - Joins layout, children and collapsed state into a grid.
//!
//! Takes a LayoutDefinition (configuration), the container's children
//! grouped by column position (data) and the user's collapsed state, and
//! produces a Grid (rows of columns of items, ready for the template).
//!
//! Columns bind to children by key: two columns declaring the same position
//! both receive the full item list for that position.

use crate::collapsed::CollapsedStateMap;
use crate::definition::{ActiveColumnSet, ColumnDef, LayoutDefinition};
use crate::record::{GroupedChildren, RecordId};
use crate::view::{Grid, GridColumn, GridItem, GridRow};

/// Builds the grid for one container.
///
/// A layout without rows gives an empty grid. Columns without a declared
/// position get no items and are never active.
pub fn assemble(
    container_id: RecordId,
    page_id: RecordId,
    layout: &LayoutDefinition,
    active_positions: &ActiveColumnSet,
    grouped: &GroupedChildren,
    collapsed: &CollapsedStateMap,
) -> Grid {
    let mut grid = Grid::new(container_id, page_id);

    for row in &layout.rows {
        let mut grid_row = GridRow::new();
        for column in &row.columns {
            grid_row.add_column(build_column(
                container_id,
                column,
                active_positions,
                grouped,
                collapsed,
            ));
        }
        grid.add_row(grid_row);
    }

    grid
}

fn build_column(
    container_id: RecordId,
    column: &ColumnDef,
    active_positions: &ActiveColumnSet,
    grouped: &GroupedChildren,
    collapsed: &CollapsedStateMap,
) -> GridColumn {
    let mut grid_column = GridColumn::new(column.clone(), container_id, active_positions.clone());

    let Some(position) = column.position else {
        return grid_column;
    };

    if active_positions.contains(position) {
        grid_column.set_active();
    }

    if let Some(children) = grouped.get(position) {
        grid_column.set_collapsed(collapsed.is_collapsed(container_id, position));
        for child in children {
            grid_column.add_item(GridItem {
                record: child.clone(),
                container_id,
                column_position: position,
                restrictions: active_positions.clone(),
            });
        }
    }

    grid_column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::LayoutRow;
    use crate::record::{group_by_column, ChildRecord, ContentRecord};
    use serde_json::json;

    fn child(uid: RecordId, position: i32) -> ChildRecord {
        ContentRecord::new(uid, 1).with_column_position(position)
    }

    fn single_column_layout(position: Option<i32>) -> LayoutDefinition {
        LayoutDefinition::new("test", vec![LayoutRow::new(vec![ColumnDef::new(position)])])
    }

    fn uids(column: &GridColumn) -> Vec<RecordId> {
        column.items.iter().map(|i| i.uid()).collect()
    }

    #[test]
    fn test_empty_layout_gives_empty_grid() {
        let grouped = group_by_column(&[child(1, 2)]);
        let grid = assemble(
            5,
            1,
            &LayoutDefinition::empty("missing"),
            &ActiveColumnSet::from_csv("2"),
            &grouped,
            &CollapsedStateMap::new(),
        );
        assert!(grid.is_empty());
        assert_eq!(grid.item_count(), 0);
    }

    #[test]
    fn test_single_active_column_keeps_item_order() {
        let grouped = group_by_column(&[child(7, 2), child(9, 2)]);
        let grid = assemble(
            5,
            1,
            &single_column_layout(Some(2)),
            &ActiveColumnSet::from_csv("2"),
            &grouped,
            &CollapsedStateMap::new(),
        );

        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].columns.len(), 1);
        let column = &grid.rows[0].columns[0];
        assert!(column.active);
        assert!(!column.collapsed);
        assert_eq!(uids(column), vec![7, 9]);
        assert!(column.items.iter().all(|i| i.column_position == 2 && i.container_id == 5));
    }

    #[test]
    fn test_column_without_position_gets_nothing() {
        let grouped = group_by_column(&[child(7, 2), child(9, 0)]);
        let grid = assemble(
            5,
            1,
            &single_column_layout(None),
            &ActiveColumnSet::from_csv("0,2"),
            &grouped,
            &CollapsedStateMap::new(),
        );

        let column = &grid.rows[0].columns[0];
        assert!(column.items.is_empty());
        assert!(!column.active);
        assert!(!column.collapsed);
    }

    #[test]
    fn test_collapsed_only_for_matching_container_and_position() {
        let uc = json!({"moduleData": {"page": {"gridelementsCollapsedColumns": {"5_2": true}}}});
        let collapsed = CollapsedStateMap::load(&uc).prune();
        let grouped = group_by_column(&[child(1, 2), child(2, 3)]);
        let layout = LayoutDefinition::new(
            "test",
            vec![LayoutRow::new(vec![ColumnDef::new(Some(2)), ColumnDef::new(Some(3))])],
        );

        let grid = assemble(5, 1, &layout, &ActiveColumnSet::new(), &grouped, &collapsed);
        assert!(grid.rows[0].columns[0].collapsed);
        assert!(!grid.rows[0].columns[1].collapsed);

        let other = assemble(6, 1, &layout, &ActiveColumnSet::new(), &grouped, &collapsed);
        assert!(!other.rows[0].columns[0].collapsed);
    }

    #[test]
    fn test_collapsed_ignored_for_empty_column() {
        let mut collapsed = CollapsedStateMap::new();
        collapsed.set(5, 4, true);
        let grouped = group_by_column(&[child(1, 2)]);

        let grid = assemble(
            5,
            1,
            &single_column_layout(Some(4)),
            &ActiveColumnSet::new(),
            &grouped,
            &collapsed,
        );
        let column = &grid.rows[0].columns[0];
        assert!(column.items.is_empty());
        assert!(!column.collapsed);
    }

    #[test]
    fn test_shared_position_duplicates_items() {
        let grouped = group_by_column(&[child(1, 2), child(2, 2)]);
        let layout = LayoutDefinition::new(
            "test",
            vec![
                LayoutRow::new(vec![ColumnDef::new(Some(2))]),
                LayoutRow::new(vec![ColumnDef::new(Some(2))]),
            ],
        );

        let none = ActiveColumnSet::new();
        let grid = assemble(5, 1, &layout, &none, &grouped, &CollapsedStateMap::new());
        assert_eq!(uids(&grid.rows[0].columns[0]), vec![1, 2]);
        assert_eq!(uids(&grid.rows[1].columns[0]), vec![1, 2]);
        assert_eq!(grid.item_count(), 4);
    }

    #[test]
    fn test_active_requires_membership() {
        let layout = LayoutDefinition::new(
            "test",
            vec![LayoutRow::new(vec![ColumnDef::new(Some(1)), ColumnDef::new(Some(2))])],
        );
        let grouped = GroupedChildren::new();
        let collapsed = CollapsedStateMap::new();

        let grid = assemble(5, 1, &layout, &ActiveColumnSet::from_csv("1"), &grouped, &collapsed);
        let cols = &grid.rows[0].columns;
        assert!(cols[0].active);
        assert!(!cols[1].active);
        assert!(cols[1].is_restricted());
        assert_eq!(cols[0].restrictions, ActiveColumnSet::from_csv("1"));

        // No restriction metadata: nothing is marked active, everything is allowed
        let open = assemble(5, 1, &layout, &ActiveColumnSet::new(), &grouped, &collapsed);
        assert!(open.columns().all(|c| !c.active && c.is_allowed()));
    }

    #[test]
    fn test_rows_and_columns_keep_declaration_order() {
        let layout = LayoutDefinition::new(
            "test",
            vec![
                LayoutRow::new(vec![ColumnDef::new(Some(3)), ColumnDef::new(Some(1))]),
                LayoutRow::new(vec![]),
                LayoutRow::new(vec![ColumnDef::new(Some(2))]),
            ],
        );
        let grid = assemble(
            5,
            1,
            &layout,
            &ActiveColumnSet::new(),
            &GroupedChildren::new(),
            &CollapsedStateMap::new(),
        );

        assert_eq!(grid.rows.len(), 3);
        assert!(grid.rows[1].columns.is_empty());
        let positions: Vec<_> = grid.columns().map(|c| c.position()).collect();
        assert_eq!(positions, vec![Some(3), Some(1), Some(2)]);
    }
}
