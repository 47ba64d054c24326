//! Building blocks shared by several views.

use indexmap::IndexMap;

use crate::error::EngineResult;
use crate::models::{Dataset, Key, Value};
use crate::transform::{clean, explode, group_by, Metric};

pub const YEAR: &str = "Year";
pub const GENRE: &str = "Genre";

/// Replace `column` by its integer part. Years exported as `2006.0` or
/// `2006.5` both count as 2006.
pub fn whole_numbers(dataset: &Dataset, column: &str) -> EngineResult<Dataset> {
    let idx = dataset.column_index(column)?;
    let rows = dataset
        .rows()
        .iter()
        .map(|row| match row.get(idx).as_number() {
            Some(n) => row.with_cell(idx, Value::Number(n.trunc())),
            None => row.clone(),
        })
        .collect();
    Ok(dataset.with_rows(rows))
}

/// Title count per year, ascending by year.
pub fn year_counts(dataset: &Dataset) -> EngineResult<IndexMap<Key, u64>> {
    let years = whole_numbers(&clean(dataset, &[YEAR])?, YEAR)?;
    Ok(group_by(&years, YEAR, Metric::Count)?.sorted().counts())
}

/// Cleaned rows with one normalized genre per row.
///
/// `extra` lists further required columns (e.g. the rating column).
pub fn genre_rows(dataset: &Dataset, extra: &[&str]) -> EngineResult<Dataset> {
    let mut required = vec![GENRE];
    required.extend_from_slice(extra);
    explode(&clean(dataset, &required)?, GENRE)
}
