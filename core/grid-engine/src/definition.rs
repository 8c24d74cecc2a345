//! FILENAME: core/grid-engine/src/definition.rs
//! Layout Definition - The configured shape of a grid container.
//!
//! This module contains the types that DESCRIBE a grid layout:
//! rows of columns, each column optionally bound to a column position.
//! Layout configuration arrives as loosely-typed JSON and is validated once
//! here, at the configuration boundary, so the assembler never has to probe
//! optional keys.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::ColumnPosition;

/// Identifier naming a configured layout.
pub type LayoutId = String;

/// Config key carrying a column's position.
pub const POSITION_KEY: &str = "colPos";

// ============================================================================
// COLUMN DEFINITION
// ============================================================================

/// One column of a layout row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Declared column position. Columns without one never receive items.
    pub position: Option<ColumnPosition>,

    /// Remaining free-form configuration (name, colspan, rowspan, ...).
    pub raw: BTreeMap<String, String>,
}

impl ColumnDef {
    pub fn new(position: Option<ColumnPosition>) -> Self {
        ColumnDef {
            position,
            raw: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.raw.insert(key.to_string(), value.into());
        self
    }

    /// Display name of the column.
    pub fn name(&self) -> Option<&str> {
        self.raw.get("name").map(String::as_str)
    }

    pub fn colspan(&self) -> u32 {
        self.span("colspan")
    }

    pub fn rowspan(&self) -> u32 {
        self.span("rowspan")
    }

    fn span(&self, key: &str) -> u32 {
        self.raw
            .get(key)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(1)
    }

    /// Builds a column from its config object.
    ///
    /// A `colPos` that is not an integer is treated as undeclared. Scalar
    /// extras are stringified; nested values are dropped.
    fn from_config(value: &Value) -> Result<Self, String> {
        let obj = value
            .as_object()
            .ok_or_else(|| format!("column config must be an object, got {}", value))?;

        let mut column = ColumnDef::default();
        for (key, v) in obj {
            if key == POSITION_KEY {
                column.position = scalar_to_int(v);
                continue;
            }
            if let Some(s) = scalar_to_string(v) {
                column.raw.insert(key.clone(), s);
            }
        }
        Ok(column)
    }
}

// ============================================================================
// ROW / DEFINITION
// ============================================================================

/// One row of a layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRow {
    pub columns: Vec<ColumnDef>,
}

impl LayoutRow {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        LayoutRow { columns }
    }
}

/// The complete, resolved definition of a layout.
/// Immutable for the duration of a render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    pub id: LayoutId,

    #[serde(default)]
    pub title: Option<String>,

    pub rows: Vec<LayoutRow>,
}

impl LayoutDefinition {
    pub fn new(id: impl Into<LayoutId>, rows: Vec<LayoutRow>) -> Self {
        LayoutDefinition {
            id: id.into(),
            title: None,
            rows,
        }
    }

    /// The definition returned for unknown identifiers.
    pub fn empty(id: impl Into<LayoutId>) -> Self {
        Self::new(id, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All columns in row-major declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.rows.iter().flat_map(|row| row.columns.iter())
    }

    /// Declared positions in declaration order, each listed once.
    pub fn declared_positions(&self) -> Vec<ColumnPosition> {
        let mut seen = BTreeSet::new();
        self.columns()
            .filter_map(|c| c.position)
            .filter(|p| seen.insert(*p))
            .collect()
    }

    /// Restriction metadata derived from the declared positions.
    pub fn derived_columns(&self) -> LayoutColumns {
        let csv = self
            .declared_positions()
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",");
        LayoutColumns { csv }
    }

    /// Validates a layout config object into a definition.
    ///
    /// Accepted shape: `{"title"?, "rows": [{"columns": [{"colPos"?, ...}]}]}`.
    /// `rows` and `columns` may also be objects keyed by numeric index; they
    /// are then ordered by that index. A missing `rows` key gives an empty
    /// definition.
    pub fn from_config(id: impl Into<LayoutId>, config: &Value) -> Result<Self, String> {
        let id = id.into();
        let obj = config
            .as_object()
            .ok_or_else(|| format!("layout '{}' must be an object", id))?;

        let title = obj.get("title").and_then(scalar_to_string);

        let mut rows = Vec::new();
        if let Some(rows_cfg) = obj.get("rows") {
            for row_cfg in ordered_entries(rows_cfg)
                .ok_or_else(|| format!("layout '{}': rows must be a list", id))?
            {
                let mut columns = Vec::new();
                if let Some(cols_cfg) = row_cfg.get("columns") {
                    for col_cfg in ordered_entries(cols_cfg)
                        .ok_or_else(|| format!("layout '{}': columns must be a list", id))?
                    {
                        columns.push(
                            ColumnDef::from_config(col_cfg)
                                .map_err(|e| format!("layout '{}': {}", id, e))?,
                        );
                    }
                }
                rows.push(LayoutRow::new(columns));
            }
        }

        Ok(LayoutDefinition { id, title, rows })
    }
}

// ============================================================================
// RESTRICTIONS
// ============================================================================

/// Column positions explicitly enabled by a CSV restriction string.
/// Empty means "no restriction metadata", not "nothing is enabled".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveColumnSet(BTreeSet<ColumnPosition>);

impl ActiveColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma separated list of integers.
    ///
    /// Each part is trimmed and its leading integer taken; parts without one
    /// count as 0. Blank input yields the empty set.
    pub fn from_csv(csv: &str) -> Self {
        if csv.trim().is_empty() {
            return Self::default();
        }
        ActiveColumnSet(csv.split(',').map(leading_int).collect())
    }

    pub fn contains(&self, position: ColumnPosition) -> bool {
        self.0.contains(&position)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ColumnPosition> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ColumnPosition> for ActiveColumnSet {
    fn from_iter<T: IntoIterator<Item = ColumnPosition>>(iter: T) -> Self {
        ActiveColumnSet(iter.into_iter().collect())
    }
}

/// Restriction metadata for a layout, as returned by the configuration store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutColumns {
    #[serde(default)]
    pub csv: String,
}

impl LayoutColumns {
    pub fn new(csv: impl Into<String>) -> Self {
        LayoutColumns { csv: csv.into() }
    }

    pub fn active_positions(&self) -> ActiveColumnSet {
        ActiveColumnSet::from_csv(&self.csv)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn leading_int(part: &str) -> ColumnPosition {
    let s = part.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<ColumnPosition>()
        .map(|n| sign * n)
        .unwrap_or(0)
}

fn scalar_to_int(v: &Value) -> Option<ColumnPosition> {
    match v {
        Value::Number(n) => n.as_i64().and_then(|n| ColumnPosition::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        _ => None,
    }
}

/// Entries of a list, or of an object keyed by numeric index.
fn ordered_entries(v: &Value) -> Option<Vec<&Value>> {
    match v {
        Value::Array(items) => Some(items.iter().collect()),
        Value::Object(map) => {
            let mut entries: Vec<(Option<i64>, &String, &Value)> = map
                .iter()
                .map(|(k, v)| (k.trim_end_matches('.').parse().ok(), k, v))
                .collect();
            // Numeric keys first in numeric order, the rest by name
            entries.sort_by(|a, b| match (a.0, b.0) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.1.cmp(b.1),
            });
            Some(entries.into_iter().map(|(_, _, v)| v).collect())
        }
        _ => None,
    }
}
