use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables shared by the analyzer, the drawing context and the report writer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Number of equal-width buckets used by histogram plots (default: 30)
    pub histogram_bins: usize,
    /// Figure width in pixels (default: 1000)
    pub figure_width: u32,
    /// Figure height in pixels (default: 600)
    pub figure_height: u32,
    /// Rows scanned to infer CSV column types; `None` scans the whole file (default)
    pub infer_schema_length: Option<usize>,
    /// Spaces per indentation level in the JSON report (default: 4)
    pub report_indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            histogram_bins: 30,
            figure_width: 1000,
            figure_height: 600,
            infer_schema_length: None,
            report_indent: 4,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file. Fields left out keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Io`] if the file cannot be read and
    /// [`AnalyzerError::Json`] if it is malformed or names an unknown field.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| AnalyzerError::io(path, e))?;
        let settings: Self = serde_json::from_str(&raw)?;
        tracing::debug!("Loaded settings from {}: {settings:?}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_partial_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "histogram_bins": 12 }"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.histogram_bins, 12);
        assert_eq!(settings.figure_width, 1000);
        assert_eq!(settings.report_indent, 4);
        assert_eq!(settings.infer_schema_length, None);
    }

    #[test]
    fn test_bounded_schema_inference_can_be_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "infer_schema_length": 500 }"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.infer_schema_length, Some(500));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "bins": 12 }"#).unwrap();

        assert!(matches!(Settings::load(&path), Err(AnalyzerError::Json(_))));
    }

    #[test]
    fn test_missing_settings_file_is_io_error() {
        let result = Settings::load("does/not/exist.json");
        assert!(matches!(result, Err(AnalyzerError::Io { .. })));
    }
}
