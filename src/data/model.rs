use std::fmt;

use crate::error::{ImportError, Result};

// ---------------------------------------------------------------------------
// ColumnKind – the storage type of a column
// ---------------------------------------------------------------------------

/// Column type after loading.  `Integer` and `Float` are the numeric kinds,
/// `Text` is the generic fallback every column starts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Integer => write!(f, "integer"),
            ColumnKind::Float => write!(f, "float"),
            ColumnKind::Text => write!(f, "text"),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnData – nullable values of one column
// ---------------------------------------------------------------------------

/// Values of a single column.  `None` marks an absent value, which is
/// distinct from `0` and from the empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Integer(_) => ColumnKind::Integer,
            ColumnData::Float(_) => ColumnKind::Float,
            ColumnData::Text(_) => ColumnKind::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of values that are present.
    pub fn non_null_count(&self) -> usize {
        match self {
            ColumnData::Integer(v) => v.iter().filter(|x| x.is_some()).count(),
            ColumnData::Float(v) => v.iter().filter(|x| x.is_some()).count(),
            ColumnData::Text(v) => v.iter().filter(|x| x.is_some()).count(),
        }
    }

    /// Borrow the value at `row`.  Out-of-range rows read as null.
    pub fn cell(&self, row: usize) -> Cell<'_> {
        match self {
            ColumnData::Integer(v) => match v.get(row).copied().flatten() {
                Some(i) => Cell::Integer(i),
                None => Cell::Null,
            },
            ColumnData::Float(v) => match v.get(row).copied().flatten() {
                Some(f) => Cell::Float(f),
                None => Cell::Null,
            },
            ColumnData::Text(v) => match v.get(row).and_then(|s| s.as_deref()) {
                Some(s) => Cell::Text(s),
                None => Cell::Null,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Cell – a borrowed view of one value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Null,
    Integer(i64),
    Float(f64),
    Text(&'a str),
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "<null>"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column / Dataset
// ---------------------------------------------------------------------------

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Column {
            name: name.into(),
            data,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }
}

/// The in-memory table carried between the pipeline stages.
///
/// Columns keep source order and every column holds `row_count` values in
/// source row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub row_count: usize,
}

impl Dataset {
    pub fn new(columns: Vec<Column>, row_count: usize) -> Self {
        Dataset { columns, row_count }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Values of one row, in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Cell<'_>> {
        self.columns.iter().map(move |c| c.data.cell(row))
    }

    /// Check that every column has exactly `row_count` values.
    pub fn validate(&self) -> Result<()> {
        for col in &self.columns {
            if col.data.len() != self.row_count {
                return Err(ImportError::Inference(format!(
                    "column '{}' has {} values but the dataset has {} rows",
                    col.name,
                    col.data.len(),
                    self.row_count
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                Column::new("id", ColumnData::Integer(vec![Some(1), Some(2)])),
                Column::new(
                    "name",
                    ColumnData::Text(vec![Some("a".to_string()), None]),
                ),
            ],
            2,
        )
    }

    #[test]
    fn row_reads_cells_in_column_order() {
        let ds = sample();
        let row: Vec<Cell<'_>> = ds.row(1).collect();
        assert_eq!(row, vec![Cell::Integer(2), Cell::Null]);
    }

    #[test]
    fn validate_rejects_ragged_columns() {
        let mut ds = sample();
        ds.columns[1].data = ColumnData::Text(vec![None]);
        assert!(matches!(ds.validate(), Err(ImportError::Inference(_))));
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn non_null_count_ignores_absent_values() {
        let data = ColumnData::Float(vec![Some(0.0), None, Some(1.5)]);
        assert_eq!(data.non_null_count(), 2);
        assert!(data.kind().is_numeric());
        assert!(!ColumnKind::Text.is_numeric());
    }
}
