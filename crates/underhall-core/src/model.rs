use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Kind of node in a recognition result.
///
/// Only the four kinds the table engine walks are named; anything else the
/// service emits (PAGE, KEY_VALUE_SET, SELECTION_ELEMENT, ...) is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Table,
    Cell,
    Line,
    Word,
    #[serde(other)]
    Other,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Table => write!(f, "TABLE"),
            BlockType::Cell => write!(f, "CELL"),
            BlockType::Line => write!(f, "LINE"),
            BlockType::Word => write!(f, "WORD"),
            BlockType::Other => write!(f, "OTHER"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Child,
    #[serde(other)]
    Other,
}

/// A typed edge from a block to an ordered list of other block identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    #[serde(rename = "Type")]
    pub kind: RelationshipType,
    #[serde(default)]
    pub ids: Vec<String>,
}

/// A single recognition node, deserialized from the service's PascalCase JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    pub id: String,
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// 1-based, CELL only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,
    /// 1-based, CELL only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

impl Block {
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            text: None,
            row_index: None,
            column_index: None,
            row_span: None,
            column_span: None,
            relationships: Vec::new(),
        }
    }

    pub fn table(id: impl Into<String>) -> Self {
        Self::new(id, BlockType::Table)
    }

    /// A CELL block at the given 1-based position.
    pub fn cell(id: impl Into<String>, row: u32, column: u32) -> Self {
        Self {
            row_index: Some(row),
            column_index: Some(column),
            ..Self::new(id, BlockType::Cell)
        }
    }

    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(id, BlockType::Word)
        }
    }

    pub fn line(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(id, BlockType::Line)
        }
    }

    /// Append a CHILD edge and return self.
    pub fn with_children<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.relationships.push(Relationship {
            kind: RelationshipType::Child,
            ids: ids.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Set row and column span and return self.
    pub fn with_span(mut self, rows: u32, columns: u32) -> Self {
        self.row_span = Some(rows);
        self.column_span = Some(columns);
        self
    }

    /// Row span, treating a missing or zero span as 1.
    pub fn rows_spanned(&self) -> u32 {
        self.row_span.unwrap_or(1).max(1)
    }

    /// Column span, treating a missing or zero span as 1.
    pub fn columns_spanned(&self) -> u32 {
        self.column_span.unwrap_or(1).max(1)
    }

    /// Identifiers of all edges of the given type, concatenated in edge order.
    pub fn related_ids(&self, kind: RelationshipType) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(move |r| r.kind == kind)
            .flat_map(|r| r.ids.iter().map(|s| s.as_str()))
    }
}

/// One recognition result: a synchronous page analysis, or one result page
/// of an asynchronous job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcrResponse {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl OcrResponse {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

/// A reconstructed table: rectangular rows of cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// A grid of the given size with every cell empty.
    pub fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            rows: vec![vec![String::new(); column_count]; row_count],
        }
    }

    /// Build a grid from rows, padding short rows with empty cells.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cell text at a 0-based position.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Overwrite a cell. Positions outside the grid are ignored.
    pub fn set(&mut self, row: usize, column: usize, value: &str) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            value.clone_into(cell);
        }
    }

    /// Rewrite every cell in place.
    pub fn map_cells(&mut self, mut f: impl FnMut(&str) -> String) {
        for cell in self.rows.iter_mut().flatten() {
            *cell = f(cell);
        }
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

/// Semantic meaning assigned to a grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Year,
    Category,
    Action,
    Cost,
    Unknown,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Year => write!(f, "year"),
            ColumnRole::Category => write!(f, "category"),
            ColumnRole::Action => write!(f, "action"),
            ColumnRole::Cost => write!(f, "cost"),
            ColumnRole::Unknown => write!(f, "unknown"),
        }
    }
}

/// A grid column index tagged with its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedColumn {
    pub index: usize,
    pub role: ColumnRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceItem {
    pub category: String,
    pub action: String,
    /// `None` when the cost cell was missing or unparseable; distinct from zero.
    pub cost: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub yearly: BTreeMap<String, Vec<MaintenanceItem>>,
    pub categories: BTreeSet<String>,
    pub total_cost: Decimal,
}

impl MaintenanceRecord {
    pub fn item_count(&self) -> usize {
        self.yearly.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.yearly.is_empty()
    }

    /// Sum of known costs for one year bucket, saturating at `Decimal::MAX`.
    pub fn cost_for_year(&self, year: &str) -> Decimal {
        self.yearly
            .get(year)
            .map(|items| {
                items.iter().filter_map(|i| i.cost).fold(Decimal::ZERO, |acc, c| {
                    acc.checked_add(c).unwrap_or(Decimal::MAX)
                })
            })
            .unwrap_or_default()
    }
}

/// A data row the aggregator could not bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub table_index: usize,
    pub row_index: usize,
    pub reason: String,
}

/// Everything derived from one document's recognition results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub page_count: usize,
    pub text: String,
    pub tables: Vec<Grid>,
    pub maintenance: MaintenanceRecord,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rows: Vec<SkippedRow>,
}
