use super::stats::{ColumnStatistics, SummaryStatistics};
use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON summary written by [`Analyzer::save_analysis_report`](super::Analyzer::save_analysis_report).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub file_analyzed: String,
    pub total_rows: usize,
    pub columns_analyzed: Vec<String>,
    #[serde(with = "ordered_map")]
    pub summary_statistics: Vec<(String, ColumnStatistics)>,
}

impl Report {
    pub fn new(file_analyzed: impl Into<String>, stats: SummaryStatistics) -> Self {
        Self {
            file_analyzed: file_analyzed.into(),
            total_rows: stats.total_rows,
            columns_analyzed: stats.column_names(),
            summary_statistics: stats.column_stats,
        }
    }

    /// Serializes with `indent` spaces per level, plus a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Json`] if serialization fails.
    pub fn to_json(&self, indent: usize) -> Result<Vec<u8>> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        out.push(b'\n');
        Ok(out)
    }

    /// Writes the report, replacing whatever is at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Io`] naming `path` if it cannot be written.
    pub fn write(&self, path: &Path, indent: usize) -> Result<()> {
        let bytes = self.to_json(indent)?;
        std::fs::write(path, bytes).map_err(|e| AnalyzerError::io(path, e))?;
        tracing::info!("Report written to {}", path.display());
        Ok(())
    }

    /// Parses a report previously written by [`Report::write`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Io`] if `path` cannot be read and
    /// [`AnalyzerError::Json`] if it does not hold a report.
    pub fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read(path).map_err(|e| AnalyzerError::io(path, e))?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

// Serializes the (column, stats) pairs as a JSON object, keeping their order.
mod ordered_map {
    use super::ColumnStatistics;
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(entries: &[(String, ColumnStatistics)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(entries.iter().map(|(name, stats)| (name, stats)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, ColumnStatistics)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Vec<(String, ColumnStatistics)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column name to statistics")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, ColumnStatistics>()? {
                    entries.push(entry);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
