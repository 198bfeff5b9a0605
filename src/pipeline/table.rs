//! Column-oriented stat table shared by every pipeline stage.
//!
//! A [`StatTable`] is the in-memory shape of a query result: identity columns
//! (player, team, league, season labels) next to numeric stat columns, keyed
//! by column name. Every column is optional. Derivation steps check for the
//! columns they need and skip silently when one is absent, so the same
//! pipeline runs over player tables, team rollups, and hand-built test
//! fixtures alike.
//!
//! Tables are immutable from the pipeline's point of view: every transform
//! takes `&StatTable` and returns a new table, so cached snapshots can be
//! shared safely.

use std::collections::BTreeMap;

/// A single untyped cell as read from an external source (database, CSV).
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Num(f64),
    Text(String),
}

impl Cell {
    /// Numeric value of the cell; unparseable or missing values are 0.0.
    pub fn as_f64(&self) -> f64 {
        match self {
            Cell::Null => 0.0,
            Cell::Num(v) => *v,
            Cell::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

/// One named column of a [`StatTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Identity values: names, season labels, positions.
    Labels(Vec<String>),
    /// Fully numeric values.
    Numbers(Vec<f64>),
    /// Untyped values awaiting normalization.
    Cells(Vec<Cell>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Labels(v) => v.len(),
            Column::Numbers(v) => v.len(),
            Column::Cells(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A table of rows keyed by named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTable {
    len: usize,
    columns: BTreeMap<String, Column>,
}

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a label column, consuming and returning the table.
    ///
    /// The first column inserted fixes the row count; later inserts must
    /// match it.
    pub fn with_labels(mut self, name: &str, values: Vec<String>) -> Self {
        self.insert(name, Column::Labels(values));
        self
    }

    /// Insert a numeric column, consuming and returning the table.
    pub fn with_numbers(mut self, name: &str, values: Vec<f64>) -> Self {
        self.insert(name, Column::Numbers(values));
        self
    }

    /// Insert an untyped column, consuming and returning the table.
    pub fn with_cells(mut self, name: &str, values: Vec<Cell>) -> Self {
        self.insert(name, Column::Cells(values));
        self
    }

    /// Insert or overwrite a numeric column in place.
    pub fn set_numbers(&mut self, name: &str, values: Vec<f64>) {
        self.insert(name, Column::Numbers(values));
    }

    fn insert(&mut self, name: &str, column: Column) {
        if self.columns.is_empty() {
            self.len = column.len();
        } else {
            assert_eq!(
                column.len(),
                self.len,
                "column '{}' length does not match table",
                name
            );
        }
        self.columns.insert(name.to_string(), column);
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// True when every named column is present.
    pub fn has_all(&self, names: &[&str]) -> bool {
        names.iter().all(|n| self.columns.contains_key(*n))
    }

    /// Numeric column view, only for columns already normalized.
    pub fn numbers(&self, name: &str) -> Option<&[f64]> {
        match self.columns.get(name) {
            Some(Column::Numbers(v)) => Some(v),
            _ => None,
        }
    }

    /// Label column view.
    pub fn labels(&self, name: &str) -> Option<&[String]> {
        match self.columns.get(name) {
            Some(Column::Labels(v)) => Some(v),
            _ => None,
        }
    }

    /// Numeric values of a column regardless of its storage kind.
    ///
    /// Cells and labels are coerced with the zero-fill rule; returns `None`
    /// only when the column is absent.
    pub fn numeric(&self, name: &str) -> Option<Vec<f64>> {
        match self.columns.get(name)? {
            Column::Numbers(v) => Some(v.clone()),
            Column::Cells(cells) => Some(cells.iter().map(Cell::as_f64).collect()),
            Column::Labels(labels) => Some(
                labels
                    .iter()
                    .map(|s| s.trim().parse().unwrap_or(0.0))
                    .collect(),
            ),
        }
    }

    /// Numeric value at a single row, 0.0 when the row is out of range.
    pub fn number_at(&self, name: &str, row: usize) -> Option<f64> {
        self.numbers(name).map(|v| v.get(row).copied().unwrap_or(0.0))
    }

    /// Label value at a single row.
    pub fn label_at(&self, name: &str, row: usize) -> Option<&str> {
        self.labels(name).and_then(|v| v.get(row)).map(String::as_str)
    }

    /// New table keeping only the rows at the given indices, in order.
    pub fn select_rows(&self, indices: &[usize]) -> StatTable {
        let mut out = StatTable::new();
        out.len = indices.len();
        for (name, column) in &self.columns {
            let picked = match column {
                Column::Labels(v) => {
                    Column::Labels(indices.iter().map(|&i| v[i].clone()).collect())
                }
                Column::Numbers(v) => Column::Numbers(indices.iter().map(|&i| v[i]).collect()),
                Column::Cells(v) => Column::Cells(indices.iter().map(|&i| v[i].clone()).collect()),
            };
            out.columns.insert(name.clone(), picked);
        }
        out
    }

    /// New table keeping rows where `keep` is true.
    pub fn retain_rows(&self, keep: &[bool]) -> StatTable {
        let indices: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter_map(|(i, k)| k.then_some(i))
            .collect();
        self.select_rows(&indices)
    }

    /// New table sorted descending by a numeric column.
    ///
    /// Returns an unsorted copy when the column is absent.
    pub fn sorted_desc(&self, name: &str) -> StatTable {
        let Some(values) = self.numbers(name) else {
            return self.clone();
        };
        let mut indices: Vec<usize> = (0..self.len).collect();
        indices.sort_by(|&a, &b| {
            values[b]
                .partial_cmp(&values[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self.select_rows(&indices)
    }

    /// New table with at most the first `n` rows.
    pub fn head(&self, n: usize) -> StatTable {
        let indices: Vec<usize> = (0..self.len.min(n)).collect();
        self.select_rows(&indices)
    }
}
