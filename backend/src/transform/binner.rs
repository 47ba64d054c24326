//! Numeric binning into labeled, right-closed intervals.

use crate::error::{EngineError, EngineResult};
use crate::models::{Column, ColumnType, Dataset, Value};

/// Ordered bin edges with one label per interval.
///
/// A value `v` falls in bin `i` when `edges[i] < v <= edges[i + 1]`; the
/// first bin also includes `edges[0]`. Anything outside
/// `[edges[0], edges[last]]` is unassigned.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSpec {
    edges: Vec<f64>,
    labels: Vec<String>,
}

impl BinSpec {
    pub fn new<L: Into<String>>(edges: Vec<f64>, labels: Vec<L>) -> EngineResult<Self> {
        if edges.len() < 2 {
            return Err(EngineError::InvalidBinSpec(
                "at least two edges are required".to_string(),
            ));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(EngineError::InvalidBinSpec("edges must be finite".to_string()));
        }
        if edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(EngineError::InvalidBinSpec(
                "edges must be strictly increasing".to_string(),
            ));
        }
        if labels.len() != edges.len() - 1 {
            return Err(EngineError::InvalidBinSpec(format!(
                "{} edges need {} labels, got {}",
                edges.len(),
                edges.len() - 1,
                labels.len()
            )));
        }
        Ok(Self {
            edges,
            labels: labels.into_iter().map(Into::into).collect(),
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of the bin holding `value`.
    pub fn assign_index(&self, value: f64) -> Option<usize> {
        let first = self.edges[0];
        let last = self.edges[self.edges.len() - 1];
        if !(first..=last).contains(&value) {
            return None;
        }
        if value == first {
            return Some(0);
        }
        // First edge >= value closes the bin on the right.
        let upper = self.edges.partition_point(|&e| e < value);
        Some(upper - 1)
    }

    /// Label of the bin holding `value`, `None` when unassigned.
    pub fn assign(&self, value: f64) -> Option<&str> {
        self.assign_index(value).map(|i| self.labels[i].as_str())
    }
}

/// Append `target` holding the bin label of `source` for every row.
///
/// Unassigned or non-numeric values get [`Value::Missing`], which every
/// aggregate skips.
pub fn bin_column(
    dataset: &Dataset,
    source: &str,
    spec: &BinSpec,
    target: &str,
) -> EngineResult<Dataset> {
    let idx = dataset.column_index(source)?;
    let schema = dataset
        .schema()
        .with_column(Column::new(target, ColumnType::Categorical));

    let rows = dataset
        .rows()
        .iter()
        .map(|row| {
            let label = row
                .get(idx)
                .as_number()
                .and_then(|v| spec.assign(v))
                .map(|l| Value::Text(l.to_string()))
                .unwrap_or(Value::Missing);
            row.with_appended(label)
        })
        .collect();

    Ok(dataset.with_schema(schema, rows))
}
