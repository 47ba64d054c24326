//! Structural validation of datasets.
//!
//! The engine never judges dataset *content*. It only checks that the
//! columns a view depends on exist, which is the one failure surfaced to
//! callers as an error.

use crate::catalog::{Catalog, DatasetKind};
use crate::error::{EngineError, EngineResult};
use crate::models::Dataset;

/// Columns from `required` that the dataset schema lacks, in request order.
pub fn missing_columns(dataset: &Dataset, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|c| dataset.schema().index_of(c).is_none())
        .map(|c| c.to_string())
        .collect()
}

/// Fail with [`EngineError::MissingColumn`] on the first absent column.
pub fn require_columns(dataset: &Dataset, required: &[&str]) -> EngineResult<()> {
    match missing_columns(dataset, required).into_iter().next() {
        Some(column) => Err(EngineError::missing_column(dataset.name(), column)),
        None => Ok(()),
    }
}

/// Declared columns each loaded dataset is missing.
///
/// Used at startup and by `inspect` to report which views will fail before
/// any request arrives.
pub fn catalog_report(catalog: &Catalog) -> Vec<(DatasetKind, Vec<String>)> {
    DatasetKind::ALL
        .iter()
        .map(|kind| {
            let declared: Vec<&str> = kind.declared_columns().iter().map(|(n, _)| *n).collect();
            (*kind, missing_columns(catalog.get(*kind), &declared))
        })
        .filter(|(_, missing)| !missing.is_empty())
        .collect()
}
