use crate::error::{AnalyzerError, Result};
use polars::prelude::*;
use serde_json::{Map, Value};
use std::io::Cursor;
use std::path::Path;

/// Reader family selected from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with a header row (`.csv`)
    Tabular,
    /// JSON records or columns (`.json`)
    Record,
}

impl SourceFormat {
    /// Resolves the reader from the extension alone; content is never sniffed.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::UnsupportedFormat`] for any extension other
    /// than `csv` or `json` (case-insensitive), including none at all.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(Self::Tabular),
            "json" => Ok(Self::Record),
            _ => Err(AnalyzerError::UnsupportedFormat(ext)),
        }
    }
}

/// Loads the whole file into memory. Either the full table is returned or an error.
///
/// # Errors
///
/// - [`AnalyzerError::UnsupportedFormat`] for anything but `.csv`/`.json`
/// - [`AnalyzerError::Io`] naming `path` when the file is missing or
///   cannot be read, including read failures inside the CSV reader
/// - `Data`/`Json` when the content does not parse into a table
pub fn load_df(path: &Path, infer_schema_length: Option<usize>) -> Result<DataFrame> {
    let format = SourceFormat::from_path(path)?;
    if !path.is_file() {
        return Err(AnalyzerError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "input file not found"),
        ));
    }
    // Surface permission problems before polars wraps them.
    std::fs::File::open(path).map_err(|e| AnalyzerError::io(path, e))?;

    let df = match format {
        SourceFormat::Tabular => {
            let df = LazyCsvReader::new(path)
                .with_infer_schema_length(infer_schema_length)
                .with_has_header(true)
                .finish()
                .and_then(LazyFrame::collect)
                .map_err(|e| read_error(path, e))?;
            empty_columns_as_float(df)?
        }
        SourceFormat::Record => {
            let raw = std::fs::read(path).map_err(|e| AnalyzerError::io(path, e))?;
            read_json_records(raw)?
        }
    };

    tracing::info!(
        "Loaded {} ({format:?}): {} rows x {} columns",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Keeps reader I/O failures in the `Io` category, tied to the input path.
pub(crate) fn read_error(path: &Path, err: PolarsError) -> AnalyzerError {
    match err {
        PolarsError::IO { error, .. } => AnalyzerError::io(
            path,
            std::io::Error::new(error.kind(), error.to_string()),
        ),
        other => other.into(),
    }
}

// A CSV column without a single value has no type evidence; treat it as
// an all-null float column so it is summarised (with NaN) like any other.
fn empty_columns_as_float(mut df: DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df);
    }
    let empty: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String && c.null_count() == c.len())
        .map(|c| c.name().clone())
        .collect();

    for name in empty {
        let as_float = df.column(name.as_str())?.cast(&DataType::Float64)?;
        df.with_column(as_float)?;
        tracing::debug!("Column '{name}' has no values; reading it as Float64");
    }
    Ok(df)
}

/// Parses JSON into a table. Accepts an array of records, an object of
/// column arrays, or an object of index-keyed column objects.
///
/// # Errors
///
/// Returns [`AnalyzerError::Json`] for malformed JSON or any other top-level
/// shape, and `Data` when polars cannot build a table from the records.
pub fn read_json_records(raw: Vec<u8>) -> Result<DataFrame> {
    let value: Value = serde_json::from_slice(&raw)?;
    let bytes = match value {
        Value::Array(_) => raw,
        Value::Object(columns) => serde_json::to_vec(&columns_to_records(columns)?)?,
        _ => {
            return Err(AnalyzerError::Json(
                "expected an array of records or an object of columns".to_owned(),
            ));
        }
    };

    let df = JsonReader::new(Cursor::new(bytes)).finish()?;
    Ok(df)
}

fn columns_to_records(columns: Map<String, Value>) -> Result<Value> {
    let mut cells: Vec<(String, Vec<Value>)> = Vec::with_capacity(columns.len());
    for (name, column) in columns {
        let values = match column {
            Value::Array(values) => values,
            Value::Object(by_index) => index_ordered(by_index),
            other => {
                return Err(AnalyzerError::Json(format!(
                    "column '{name}' must be an array or object, found {other}"
                )));
            }
        };
        cells.push((name, values));
    }

    let rows = cells.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    let mut records = Vec::with_capacity(rows);
    for row in 0..rows {
        let record: Map<String, Value> = cells
            .iter()
            .map(|(name, values)| (name.clone(), values.get(row).cloned().unwrap_or(Value::Null)))
            .collect();
        records.push(Value::Object(record));
    }
    Ok(Value::Array(records))
}

// Keys are row labels such as "0", "1", ...; numeric keys sort numerically.
fn index_ordered(by_index: Map<String, Value>) -> Vec<Value> {
    let mut entries: Vec<(String, Value)> = by_index.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    });
    entries.into_iter().map(|(_, v)| v).collect()
}

/// Writes a table as CSV with a header row.
///
/// # Errors
///
/// Returns [`AnalyzerError::Io`] if `path` cannot be created.
pub fn save_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| AnalyzerError::io(path, e))?;
    CsvWriter::new(file).include_header(true).finish(df)?;
    Ok(())
}
