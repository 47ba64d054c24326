//! Multi-value category normalization and row explosion.
//!
//! Genre fields arrive as comma-joined strings (`"action, comedy"`). They are
//! split into title-cased tokens and each source row fans out into one row
//! per token.

use tracing::debug;

use crate::error::EngineResult;
use crate::models::{Dataset, Row, Value};

/// Separator between tokens of a multi-value field. Whitespace following it
/// is removed by trimming.
pub const TOKEN_DELIMITER: char = ',';

/// Split, trim and title-case a raw multi-value field, dropping empty tokens.
pub fn normalize_tokens(raw: &str) -> Vec<String> {
    raw.split(TOKEN_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(title_case)
        .collect()
}

/// Title-case a token: a letter is upper-cased when it follows a non-letter
/// (or starts the token) and lower-cased otherwise, so `"sci-fi"` becomes
/// `"Sci-Fi"` and `"slice of life"` becomes `"Slice Of Life"`.
pub fn title_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut prev_alpha = false;
    for c in token.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Replace each row by one row per normalized token of `column`.
///
/// Other cells are copied unchanged. Tokens keep the order they had in the
/// source string and source rows keep their relative order. Rows whose field
/// is missing or holds only empty tokens produce nothing.
pub fn explode(dataset: &Dataset, column: &str) -> EngineResult<Dataset> {
    let idx = dataset.column_index(column)?;

    let mut rows: Vec<Row> = Vec::with_capacity(dataset.len());
    for row in dataset.rows() {
        let Some(raw) = row.get(idx).as_text() else {
            continue;
        };
        rows.extend(
            normalize_tokens(&raw)
                .into_iter()
                .map(|token| row.with_cell(idx, Value::Text(token))),
        );
    }

    debug!(
        dataset = dataset.name(),
        column,
        before = dataset.len(),
        after = rows.len(),
        "exploded rows"
    );
    Ok(dataset.with_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DatasetKind;
    use crate::parser::parse_str;

    fn genres(ds: &Dataset) -> Vec<String> {
        ds.values("Genre")
            .unwrap()
            .filter_map(|v| v.as_text())
            .collect()
    }

    #[test]
    fn test_normalize_tokens() {
        assert_eq!(
            normalize_tokens("action,  comedy ,SCI-FI"),
            vec!["Action", "Comedy", "Sci-Fi"]
        );
        assert_eq!(normalize_tokens(" , ,"), Vec::<String>::new());
        assert_eq!(normalize_tokens("slice of life"), vec!["Slice Of Life"]);
    }

    #[test]
    fn test_token_count_is_preserved() {
        let csv = "Title,Genre\nA,\"Action, Comedy, Drama\"\nB,\"Romance,, \"\nC,Horror\n";
        let ds = parse_str(DatasetKind::Anime, csv, b',').unwrap();
        let exploded = explode(&ds, "Genre").unwrap();

        let expected: usize = ds
            .values("Genre")
            .unwrap()
            .map(|v| normalize_tokens(&v.as_text().unwrap()).len())
            .sum();
        assert_eq!(exploded.len(), expected);
        assert_eq!(exploded.len(), 5);
        assert_eq!(
            genres(&exploded),
            vec!["Action", "Comedy", "Drama", "Romance", "Horror"]
        );
    }

    #[test]
    fn test_order_and_other_columns_preserved() {
        let csv = "Title,Genre,Rating\nA,\"Mecha, Drama\",8.1\nB,Comedy,6.0\n";
        let ds = parse_str(DatasetKind::Anime, csv, b',').unwrap();
        let exploded = explode(&ds, "Genre").unwrap();

        let titles: Vec<_> = exploded.values("Title").unwrap().cloned().collect();
        assert_eq!(
            titles,
            vec![Value::from("A"), Value::from("A"), Value::from("B")]
        );
        assert_eq!(exploded.rows()[1].get(2), &Value::Number(8.1));
    }

    #[test]
    fn test_single_token_row_is_identical_except_field() {
        let csv = "Title,Genre,Rating\nB, comedy ,6.0\n";
        let ds = parse_str(DatasetKind::Anime, csv, b',').unwrap();
        let exploded = explode(&ds, "Genre").unwrap();

        assert_eq!(exploded.len(), 1);
        let expected = ds.rows()[0].with_cell(1, Value::from("Comedy"));
        assert_eq!(exploded.rows()[0], expected);
    }

    #[test]
    fn test_missing_field_produces_no_rows() {
        let csv = "Title,Genre\nA,\nB,Drama\n";
        let ds = parse_str(DatasetKind::Anime, csv, b',').unwrap();
        let exploded = explode(&ds, "Genre").unwrap();
        assert_eq!(genres(&exploded), vec!["Drama"]);
    }
}
