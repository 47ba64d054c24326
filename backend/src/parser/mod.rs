//! CSV loader with encoding and delimiter auto-detection.
//!
//! Reads a catalog file into a typed [`Dataset`]: declared numeric columns
//! are parsed to numbers, blank cells and the usual NA markers become
//! [`Value::Missing`], everything else is kept as text.

use std::path::Path;

use crate::catalog::DatasetKind;
use crate::error::{DatasetError, DatasetResult};
use crate::models::{Column, ColumnType, Dataset, Row, Schema, Value};

/// Cell contents treated as "no value", matching what the catalog
/// exports use for gaps.
const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> DatasetResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            let (text, _, had_errors) = encoding_rs::ISO_8859_15.decode(bytes);
            if had_errors {
                return Err(DatasetError::EncodingError(format!(
                    "invalid {} byte sequence",
                    encoding
                )));
            }
            text.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };

    Ok(decoded.trim_start_matches('\u{feff}').to_string())
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [b',', b';', b'\t', b'|'];
    let mut best_sep = b',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep as char).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

pub fn is_missing_marker(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw.trim())
}

/// Type one raw cell according to its declared column type.
///
/// Unparseable text in a numeric column is kept as text so the cleaner can
/// see and drop it.
pub fn type_cell(raw: &str, kind: ColumnType) -> Value {
    let raw = raw.trim();
    if is_missing_marker(raw) {
        return Value::Missing;
    }
    if kind.is_numeric() {
        if let Ok(n) = raw.parse::<f64>() {
            if n.is_finite() {
                return Value::Number(n);
            }
        }
    }
    Value::Text(raw.to_string())
}

/// Read a dataset file with encoding and delimiter auto-detection.
pub fn load_file<P: AsRef<Path>>(kind: DatasetKind, path: P) -> DatasetResult<Dataset> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(kind, &bytes)
}

/// Parse dataset bytes with encoding and delimiter auto-detection.
pub fn parse_bytes(kind: DatasetKind, bytes: &[u8]) -> DatasetResult<Dataset> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    parse_str(kind, &content, delimiter)
}

/// Parse already-decoded CSV text with an explicit delimiter.
pub fn parse_str(kind: DatasetKind, content: &str, delimiter: u8) -> DatasetResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(DatasetError::NoHeaders(kind.name().to_string()));
    }

    let schema = Schema::new(
        headers
            .iter()
            .map(|h| Column::new(h.clone(), kind.column_type(h)))
            .collect(),
    );

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let cells = schema
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| type_cell(record.get(i).unwrap_or(""), column.kind))
            .collect();
        rows.push(Row::new(cells));
    }

    if rows.is_empty() {
        return Err(DatasetError::EmptyFile(kind.name().to_string()));
    }

    Ok(Dataset::new(kind.name(), schema, rows))
}
