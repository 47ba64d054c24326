//! Row cleaning and the rating rescale policy.
//!
//! [`clean`] keeps the rows usable for a view: every required column present
//! and, for numeric columns, parseable. Uncoercible values count as missing;
//! they drop the row instead of failing the view.

use tracing::debug;

use crate::error::EngineResult;
use crate::models::{ColumnType, Dataset, Row, Value};
use crate::validation::require_columns;

/// Keep rows whose required columns are present and type-valid.
///
/// Numeric cells in required columns come out as [`Value::Number`]. Every
/// required rating column then goes through [`rescale_ratings`], using the
/// maximum of the cleaned rows. An empty result is valid.
pub fn clean(dataset: &Dataset, required: &[&str]) -> EngineResult<Dataset> {
    require_columns(dataset, required)?;

    let mut targets = Vec::with_capacity(required.len());
    for column in required {
        targets.push((dataset.column_index(column)?, dataset.column_type(column)?));
    }

    let rows: Vec<Row> = dataset
        .rows()
        .iter()
        .filter_map(|row| coerce_row(row, &targets))
        .collect();

    debug!(
        dataset = dataset.name(),
        before = dataset.len(),
        after = rows.len(),
        "cleaned rows"
    );

    let mut cleaned = dataset.with_rows(rows);
    for (column, (_, kind)) in required.iter().zip(&targets) {
        if *kind == ColumnType::Rating {
            cleaned = rescale_ratings(&cleaned, column)?;
        }
    }
    Ok(cleaned)
}

fn coerce_row(row: &Row, targets: &[(usize, ColumnType)]) -> Option<Row> {
    let mut out = row.clone();
    for &(idx, kind) in targets {
        let value = row.get(idx);
        if value.is_missing() {
            return None;
        }
        if kind.is_numeric() {
            let n = value.as_number()?;
            out = out.with_cell(idx, Value::Number(n));
        }
    }
    Some(out)
}

/// Rescale policy: a rating column whose maximum is at most 1.0 is taken to
/// be on a 0-1 scale.
///
/// An empty column never qualifies. This can misfire on a legitimately
/// low-rated slice whose best score is 1.0 or less.
pub fn needs_rescale(values: &[f64]) -> bool {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    !values.is_empty() && max <= 1.0
}

/// Multiply `column` by 10 when [`needs_rescale`] holds for its values.
pub fn rescale_ratings(dataset: &Dataset, column: &str) -> EngineResult<Dataset> {
    let idx = dataset.column_index(column)?;
    let values: Vec<f64> = dataset
        .rows()
        .iter()
        .filter_map(|row| row.get(idx).as_number())
        .collect();

    if !needs_rescale(&values) {
        return Ok(dataset.clone());
    }

    debug!(dataset = dataset.name(), column, "rescaling 0-1 ratings to 0-10");
    let rows = dataset
        .rows()
        .iter()
        .map(|row| match row.get(idx).as_number() {
            Some(n) => row.with_cell(idx, Value::Number(n * 10.0)),
            None => row.clone(),
        })
        .collect();
    Ok(dataset.with_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DatasetKind;
    use crate::error::EngineError;
    use crate::parser::parse_str;

    fn ratings(ds: &Dataset) -> Vec<f64> {
        ds.values("Rating")
            .unwrap()
            .filter_map(|v| v.as_number())
            .collect()
    }

    #[test]
    fn test_drops_missing_and_uncoercible_rows() {
        let csv = "Title,Type,Episodes\nA,TV,12\nB,,24\nC,OVA,Unknown\nD,Movie,1\n";
        let ds = parse_str(DatasetKind::Anime, csv, b',').unwrap();
        let cleaned = clean(&ds, &["Episodes", "Type"]).unwrap();

        assert!(cleaned.len() <= ds.len());
        assert_eq!(cleaned.len(), 2);
        for row in cleaned.rows() {
            assert!(matches!(row.get(2), Value::Number(_)));
            assert!(!row.get(1).is_missing());
        }
    }

    #[test]
    fn test_text_number_is_coerced() {
        let ds = Dataset::new(
            "anime",
            crate::models::Schema::new(vec![crate::models::Column::new(
                "Episodes",
                ColumnType::Numeric,
            )]),
            vec![Row::new(vec![Value::from(" 26 ")])],
        );
        let cleaned = clean(&ds, &["Episodes"]).unwrap();
        assert_eq!(cleaned.rows()[0].get(0), &Value::Number(26.0));
    }

    #[test]
    fn test_missing_required_column_is_error() {
        let ds = parse_str(DatasetKind::Anime, "Title,Type\nA,TV\n", b',').unwrap();
        let err = clean(&ds, &["Type", "Episodes"]).unwrap_err();
        assert_eq!(err, EngineError::missing_column("anime", "Episodes"));
    }

    #[test]
    fn test_empty_result_is_ok() {
        let ds = parse_str(DatasetKind::Anime, "Title,Rating\nA,\nB,n/a\n", b',').unwrap();
        let cleaned = clean(&ds, &["Rating"]).unwrap();
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_unit_scale_ratings_are_rescaled() {
        let csv = "Title,Rating\nA,0.1\nB,0.5\nC,0.9\n";
        let ds = parse_str(DatasetKind::Anime, csv, b',').unwrap();
        let cleaned = clean(&ds, &["Rating"]).unwrap();
        let got = ratings(&cleaned);
        let expected = [1.0, 5.0, 9.0];
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-9, "{} != {}", g, e);
        }
    }

    #[test]
    fn test_ten_scale_ratings_untouched() {
        let csv = "Title,Rating\nA,1\nB,5\nC,9\n";
        let ds = parse_str(DatasetKind::Anime, csv, b',').unwrap();
        let cleaned = clean(&ds, &["Rating"]).unwrap();
        assert_eq!(ratings(&cleaned), vec![1.0, 5.0, 9.0]);
    }

    #[test]
    fn test_rescale_uses_cleaned_maximum() {
        // The 7.0 row has no Type, so it is gone before the maximum is taken.
        let csv = "Title,Type,Rating\nA,TV,0.4\nB,,7.0\nC,OVA,0.8\n";
        let ds = parse_str(DatasetKind::Anime, csv, b',').unwrap();
        let cleaned = clean(&ds, &["Type", "Rating"]).unwrap();
        let got = ratings(&cleaned);
        assert_eq!(got.len(), 2);
        assert!((got[0] - 4.0).abs() < 1e-9);
        assert!((got[1] - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_needs_rescale_policy() {
        assert!(needs_rescale(&[0.2, 1.0]));
        assert!(!needs_rescale(&[0.2, 1.01]));
        assert!(!needs_rescale(&[]));
    }
}
