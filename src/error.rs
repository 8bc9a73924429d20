//! Error handling for tabscope.
//!
//! Every fallible operation in the library returns [`Result<T>`], whose
//! error side is the closed [`AnalyzerError`] taxonomy. Variants carry the
//! offending name (extension, column, parameter, plot type or path) so the
//! caller can report it without extra context:
//!
//! ```
//! use tabscope::error::AnalyzerError;
//!
//! fn describe(err: &AnalyzerError) -> &'static str {
//!     match err {
//!         AnalyzerError::UnsupportedFormat(_) => "pick a .csv or .json file",
//!         AnalyzerError::ColumnNotFound(_) => "check the column name",
//!         AnalyzerError::Io { .. } => "check the path",
//!         _ => "analysis failed",
//!     }
//! }
//! ```
//!
//! Errors from polars and `serde_json` convert through `From`, so the `?`
//! operator works directly on their results inside the library.

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for tabscope operations.
#[derive(Debug)]
pub enum AnalyzerError {
    /// Input file extension is neither `.csv` nor `.json`
    UnsupportedFormat(String),

    /// Requested column is absent from the dataset
    ColumnNotFound(String),

    /// A parameter required by the operation was omitted
    MissingParameter(String),

    /// Plot type outside bar/scatter/line/histogram
    UnsupportedPlotType(String),

    /// Column cannot be plotted on a numeric axis
    NonNumericColumn(String),

    /// File could not be read or written
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data engine errors (parsing, casting)
    Data(String),

    /// Malformed JSON input, report or settings
    Json(String),

    /// Chart backend failure
    Render(String),
}

impl AnalyzerError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat(ext) => write!(
                f,
                "Unsupported file format '{ext}'. Please use CSV or JSON."
            ),
            Self::ColumnNotFound(name) => write!(f, "Column '{name}' not found in dataset"),
            Self::MissingParameter(name) => write!(f, "Missing required parameter: {name}"),
            Self::UnsupportedPlotType(kind) => write!(f, "Unsupported plot type: {kind}"),
            Self::NonNumericColumn(name) => write!(f, "Column '{name}' is not numeric"),
            Self::Io { path, source } => write!(f, "I/O error on {}: {source}", path.display()),
            Self::Data(msg) => write!(f, "Data processing error: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<polars::error::PolarsError> for AnalyzerError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::Data(err.to_string())
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for tabscope operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_column() {
        let err = AnalyzerError::ColumnNotFound("region".to_owned());
        assert_eq!(err.to_string(), "Column 'region' not found in dataset");
    }

    #[test]
    fn test_io_error_keeps_path_and_source() {
        let err = AnalyzerError::io(
            "/nope/report.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/nope/report.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_json_error_conversion() {
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str("{oops");
        let err: AnalyzerError = parsed.unwrap_err().into();
        assert!(matches!(err, AnalyzerError::Json(_)));
    }
}
