//! Domain models for the aggregation engine.
//!
//! - [`Dataset`] - Immutable ordered rows sharing one [`Schema`]
//! - [`Schema`] - Column names with their declared [`ColumnType`]
//! - [`Row`] - Cells aligned with the schema
//! - [`Value`] / [`Key`] - Tagged cells and normalized group keys

mod value;

pub use value::{Key, Value};

use std::sync::Arc;

use crate::error::{EngineError, EngineResult};

// =============================================================================
// Column Types
// =============================================================================

/// Declared type of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Plain numeric column.
    Numeric,
    /// Numeric rating, subject to the 0-1 rescale policy.
    Rating,
    /// Single categorical label.
    Categorical,
    /// Comma-joined list of categorical labels.
    MultiCategorical,
    /// Title or name; never aggregated.
    Identifier,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Numeric | ColumnType::Rating)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Rating => "rating",
            ColumnType::Categorical => "categorical",
            ColumnType::MultiCategorical => "categorical-multi",
            ColumnType::Identifier => "identifier",
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Ordered column list of a dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// A copy of this schema with one more column at the end.
    pub fn with_column(&self, column: Column) -> Self {
        let mut columns = self.columns.clone();
        columns.push(column);
        Self { columns }
    }
}

// =============================================================================
// Rows
// =============================================================================

/// One record; cells are positioned by the dataset schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Value>,
}

impl Row {
    pub fn new(cells: Vec<Value>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Value] {
        &self.cells
    }

    /// Cell at `index`, `Missing` when the row is shorter than the schema.
    pub fn get(&self, index: usize) -> &Value {
        self.cells.get(index).unwrap_or(&Value::Missing)
    }

    /// A copy of this row with the cell at `index` replaced.
    pub fn with_cell(&self, index: usize, value: Value) -> Row {
        let mut cells = self.cells.clone();
        if index >= cells.len() {
            cells.resize(index + 1, Value::Missing);
        }
        cells[index] = value;
        Row { cells }
    }

    /// A copy of this row with one more cell at the end.
    pub fn with_appended(&self, value: Value) -> Row {
        let mut cells = self.cells.clone();
        cells.push(value);
        Row { cells }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Immutable ordered collection of rows.
///
/// Stages never mutate a dataset; they derive a new one that shares the
/// schema when the columns are unchanged.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    schema: Arc<Schema>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, schema: Schema, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            schema: Arc::new(schema),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `column`, or the structural error naming it.
    pub fn column_index(&self, column: &str) -> EngineResult<usize> {
        self.schema
            .index_of(column)
            .ok_or_else(|| EngineError::missing_column(&self.name, column))
    }

    /// Declared type of `column`.
    pub fn column_type(&self, column: &str) -> EngineResult<ColumnType> {
        self.schema
            .column(column)
            .map(|c| c.kind)
            .ok_or_else(|| EngineError::missing_column(&self.name, column))
    }

    /// Values of one column in row order.
    pub fn values(&self, column: &str) -> EngineResult<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| row.get(idx)))
    }

    /// Same name and schema, different rows.
    pub fn with_rows(&self, rows: Vec<Row>) -> Dataset {
        Dataset {
            name: self.name.clone(),
            schema: Arc::clone(&self.schema),
            rows,
        }
    }

    /// Same name, new schema and rows.
    pub fn with_schema(&self, schema: Schema, rows: Vec<Row>) -> Dataset {
        Dataset {
            name: self.name.clone(),
            schema: Arc::new(schema),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let schema = Schema::new(vec![
            Column::new("Title", ColumnType::Identifier),
            Column::new("Year", ColumnType::Numeric),
        ]);
        Dataset::new(
            "movies",
            schema,
            vec![
                Row::new(vec![Value::from("Alien"), Value::Number(1979.0)]),
                Row::new(vec![Value::from("Heat")]),
            ],
        )
    }

    #[test]
    fn test_short_rows_read_as_missing() {
        let ds = sample();
        let years: Vec<_> = ds.values("Year").unwrap().cloned().collect();
        assert_eq!(years, vec![Value::Number(1979.0), Value::Missing]);
    }

    #[test]
    fn test_unknown_column_is_structural_error() {
        let ds = sample();
        let err = ds.column_index("Genre").unwrap_err();
        assert_eq!(err, EngineError::missing_column("movies", "Genre"));
    }

    #[test]
    fn test_with_cell_does_not_touch_source() {
        let row = Row::new(vec![Value::from("a")]);
        let changed = row.with_cell(1, Value::Number(1.0));
        assert_eq!(row.cells().len(), 1);
        assert_eq!(changed.get(1), &Value::Number(1.0));
    }
}
